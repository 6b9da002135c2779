//! Play command - interactive game in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_session() - read/eval/render loop
//! - Level 3: execute(), render_board(), render_history()
//! - Level 4: parse_command()
//!
//! Cells are numbered 1-9 on screen, row by row. History entries keep their
//! session index (0 = start).

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};

use tictac_core::{GameSession, Mark, CELL_COUNT};

const HELP: &str = "\
Commands:
  1-9          play that cell
  j N, jump N  show history entry N (0 or \"start\" is the empty board)
  h, history   list history entries
  n, new       start a new game
  ?, help      show this help
  q, quit      leave";

/// Parsed user input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Move(usize),
    Jump(usize),
    History,
    New,
    Help,
    Quit,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let session = run_session(stdin.lock(), stdout.lock())?;

    tracing::info!(
        turns = session.len() - 1,
        status = %session.status(),
        "session finished"
    );
    Ok(())
}

// ============================================================================
// LEVEL 2 - LOOP
// ============================================================================

/// Drive a session from `input` until `quit` or end of input
fn run_session<R: BufRead, W: Write>(input: R, mut out: W) -> Result<GameSession> {
    let mut session = GameSession::new();

    writeln!(out, "You are X. Type ? for help.")?;
    render_board(&session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        execute(command, &mut session, &mut out)?;
    }

    Ok(session)
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn execute<W: Write>(command: Command, session: &mut GameSession, out: &mut W) -> Result<()> {
    match command {
        Command::Move(cell) => {
            if session.apply_human_move(cell).is_none() {
                writeln!(out, "Cell {} can't be played now.", cell + 1)?;
                return Ok(());
            }
            render_board(session, out)?;
        }
        Command::Jump(index) => match session.jump_to(index) {
            Ok(()) => render_board(session, out)?,
            Err(err) => writeln!(out, "{err}")?,
        },
        Command::History => render_history(session, out)?,
        Command::New => {
            *session = GameSession::new();
            render_board(session, out)?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}

/// Board with empty cells numbered, then the status line
fn render_board<W: Write>(session: &GameSession, out: &mut W) -> Result<()> {
    let board = session.current_board();

    writeln!(out)?;
    for row in board.cells().chunks(3).enumerate() {
        let (row_index, cells) = row;
        let symbols: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| match cell {
                Some(mark) => mark.symbol().to_string(),
                None => (row_index * 3 + col + 1).to_string(),
            })
            .collect();
        writeln!(out, " {}", symbols.join(" | "))?;
        if row_index < 2 {
            writeln!(out, "---+---+---")?;
        }
    }

    let status = session.status();
    let line = if status.is_terminal() {
        status.label().to_string()
    } else {
        let next = match session.next_mark() {
            Mark::Player => "you",
            Mark::Opponent => "engine",
        };
        format!("{} (next: {next})", status.label())
    };
    writeln!(
        out,
        "Move {} of {}: {line}",
        session.cursor(),
        session.len() - 1
    )?;
    Ok(())
}

fn render_history<W: Write>(session: &GameSession, out: &mut W) -> Result<()> {
    for entry in session.moves() {
        let marker = if entry.index == session.cursor() { '>' } else { ' ' };
        writeln!(out, "{marker} {}: {}", entry.index, entry.label)?;
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - PARSING
// ============================================================================

fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        bail!("Empty command");
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Command::Quit,
        "?" | "help" => Command::Help,
        "h" | "history" => Command::History,
        "n" | "new" => Command::New,
        "j" | "jump" => {
            let Some(target) = words.next() else {
                bail!("Usage: jump N");
            };
            let index = match target {
                "start" => 0,
                n => n
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Not a history index: {n}"))?,
            };
            Command::Jump(index)
        }
        cell => match cell.parse::<usize>() {
            Ok(n) if (1..=CELL_COUNT).contains(&n) => Command::Move(n - 1),
            _ => bail!("Unknown command: {head} (type ? for help)"),
        },
    };

    Ok(command)
}

// ============================================================================
// TESTS
// ============================================================================
