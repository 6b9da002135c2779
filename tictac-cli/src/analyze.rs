//! Analyze command - score every Opponent move on a board
//!
//! Board text is 9 cells, row-major: X, O, and _ . - for empty. Spaces, `/`
//! and `|` may separate rows, e.g. `"XX_/OO_/___"`.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tictac_core::{choose_move, detect_outcome, Board, MinimaxAI, Outcome, ScoredMove};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Board to analyze, e.g. "XX_/OO_/___"
    pub board: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Analysis of one board from the Opponent's side
#[derive(Debug, Serialize)]
struct Analysis {
    board: Board,
    status: Outcome,
    moves: Vec<ScoredMove>,
    best: Option<ScoredMove>,
    nodes: u64,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let board: Board = args
        .board
        .parse()
        .with_context(|| format!("Invalid board: {:?}", args.board))?;

    let analysis = analyze(&board);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", format_analysis(&analysis));
    }

    Ok(())
}

fn analyze(board: &Board) -> Analysis {
    let mut ai = MinimaxAI::new();
    let moves = ai.score_moves(board);
    let nodes = ai.nodes_searched();
    let best = choose_move(board, &moves);

    tracing::debug!(nodes, "analysis complete");

    Analysis {
        board: *board,
        status: detect_outcome(board),
        moves,
        best,
        nodes,
    }
}

fn format_analysis(analysis: &Analysis) -> String {
    let mut text = format!("{}\n\nStatus: {}\n", analysis.board, analysis.status);

    if analysis.moves.is_empty() {
        text.push_str("No moves: the game is over.\n");
        return text;
    }

    text.push_str("\nCell  Score\n");
    for mv in &analysis.moves {
        let marker = if analysis.best.map(|b| b.cell) == Some(mv.cell) {
            "  <- engine plays"
        } else {
            ""
        };
        text.push_str(&format!("{:>4}  {:>5}{marker}\n", mv.cell + 1, mv.score));
    }
    text.push_str(&format!("\nPositions searched: {}\n", analysis.nodes));
    text
}
