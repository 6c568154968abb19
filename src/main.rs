use anyhow::{bail, Context, Result};
use tracing::info;

use rookery::board::Board;
use rookery::fen::STARTING_FEN;
use rookery::perft::{divide, perft};
use rookery::search::search_best_move;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("rookery starting");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("usage: rookery <perft|divide|search> <depth> [fen]");
    };

    match command.as_str() {
        "perft" => run_perft(&args[1..]),
        "divide" => run_divide(&args[1..]),
        "search" => run_search(&args[1..]),
        other => bail!("unknown command {other:?}; expected perft, divide, or search"),
    }
}

/// Parse `depth [fen]`, defaulting to the starting position when no FEN is given.
fn parse_depth_and_board(tokens: &[String]) -> Result<(usize, Board)> {
    let depth: usize = tokens
        .first()
        .context("missing depth argument")?
        .parse()
        .context("depth must be a non-negative integer")?;

    let fen = if tokens.len() > 1 { tokens[1..].join(" ") } else { STARTING_FEN.to_string() };
    let board: Board = fen.parse().with_context(|| format!("invalid FEN: {fen}"))?;

    Ok((depth, board))
}

fn run_perft(tokens: &[String]) -> Result<()> {
    let (depth, mut board) = parse_depth_and_board(tokens)?;
    let nodes = perft(&mut board, depth);
    println!("{nodes}");
    Ok(())
}

fn run_divide(tokens: &[String]) -> Result<()> {
    let (depth, mut board) = parse_depth_and_board(tokens)?;
    let breakdown = divide(&mut board, depth);
    let mut total = 0u64;
    for (mv, nodes) in &breakdown {
        println!("{mv}: {nodes}");
        total += nodes;
    }
    println!("total: {total}");
    Ok(())
}

fn run_search(tokens: &[String]) -> Result<()> {
    let (depth, mut board) = parse_depth_and_board(tokens)?;
    let result = search_best_move(&mut board, depth as u32);
    match result.best_move {
        Some(mv) => println!("bestmove {mv} score {} nodes {}", result.score, result.nodes),
        None => println!("bestmove none score {} nodes {}", result.score, result.nodes),
    }
    Ok(())
}
