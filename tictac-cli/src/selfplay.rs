//! Selfplay command - random Player against the minimax Opponent
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game()
//! - Level 4: create_rng()
//!
//! The Player picks uniformly among empty cells and sometimes rewinds to an
//! earlier history entry, so branching is exercised too. The Opponent must
//! never lose.

use anyhow::{bail, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use tictac_core::{GameSession, Outcome};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SelfplayArgs {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Random seed for the Player (default: from entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Chance per turn that the Player rewinds before moving
    #[arg(long, default_value = "0.1")]
    pub rewind_chance: f64,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    result: Outcome,
    turns: usize,
    rewinds: usize,
}

/// Aggregated results
#[derive(Clone, Debug, Default, Serialize)]
struct MatchResults {
    games: Vec<GameRecord>,
    opponent_wins: usize,
    player_wins: usize,
    draws: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run selfplay command
///
/// 1. Play all games
/// 2. Report results
/// 3. Fail if the Player ever won
pub fn run(args: SelfplayArgs) -> Result<()> {
    if !(0.0..1.0).contains(&args.rewind_chance) {
        bail!("--rewind-chance must be in [0, 1), got {}", args.rewind_chance);
    }

    tracing::info!(games = args.games, seed = ?args.seed, "starting selfplay");

    let results = play_match(&args);

    report_results(&results, args.json)?;

    if results.player_wins > 0 {
        bail!("engine lost {} of {} games", results.player_wins, results.games.len());
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_match(args: &SelfplayArgs) -> MatchResults {
    let mut rng = create_rng(args.seed);
    let mut results = MatchResults::default();

    for game_number in 1..=args.games {
        let record = play_single_game(game_number, args.rewind_chance, &mut rng);

        match record.result {
            Outcome::OpponentWins => results.opponent_wins += 1,
            Outcome::PlayerWins => results.player_wins += 1,
            Outcome::Draw => results.draws += 1,
            Outcome::Ongoing => {}
        }

        tracing::debug!(
            game = game_number,
            result = %record.result,
            turns = record.turns,
            "game finished"
        );
        results.games.push(record);
    }

    results
}

fn report_results(results: &MatchResults, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    let total = results.games.len().max(1) as f64;
    println!("Games:         {}", results.games.len());
    println!(
        "Opponent wins: {} ({:.1}%)",
        results.opponent_wins,
        100.0 * results.opponent_wins as f64 / total
    );
    println!(
        "Draws:         {} ({:.1}%)",
        results.draws,
        100.0 * results.draws as f64 / total
    );
    println!("Player wins:   {}", results.player_wins);
    Ok(())
}

// ============================================================================
// LEVEL 3 - GAME
// ============================================================================

fn play_single_game(game_number: usize, rewind_chance: f64, rng: &mut ChaCha8Rng) -> GameRecord {
    let mut session = GameSession::new();
    let mut turns = 0;
    let mut rewinds = 0;

    while session.status() == Outcome::Ongoing {
        if session.cursor() > 0 && rng.gen_bool(rewind_chance) {
            let index = rng.gen_range(0..session.cursor());
            if session.jump_to(index).is_ok() {
                rewinds += 1;
            }
        }

        let empty: Vec<usize> = session.current_board().empty_cells().collect();
        let Some(&cell) = empty.choose(rng) else {
            break;
        };
        if session.apply_human_move(cell).is_some() {
            turns += 1;
        }
    }

    GameRecord {
        game_number,
        result: session.status(),
        turns,
        rewinds,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
