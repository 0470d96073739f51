use clap::Parser;
use std::{io, process::ExitCode};
use textsweeper::{AdjacencyRule, BoardConfig, Session};

#[derive(Parser, Debug)]
#[command(name = "textsweeper", about = "Minesweeper in the terminal", version)]
struct Args {
    /// Board width (columns)
    #[arg(long, default_value_t = 10)]
    width: usize,
    /// Board height (rows)
    #[arg(long, default_value_t = 10)]
    height: usize,
    /// Number of mines
    #[arg(long, default_value_t = 10)]
    mines: usize,
    /// Neighbor rule: standard, orthogonal, diagonal or knight
    #[arg(long, default_value_t = AdjacencyRule::Standard)]
    rule: AdjacencyRule,
    /// Show unopened mines as ','
    #[arg(long)]
    reveal_mines: bool,
    /// Seed for mine placement
    #[arg(long)]
    seed: Option<u64>,
    /// Skip the setup menu and play with the values given here
    #[arg(long)]
    no_menu: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = BoardConfig::new(args.width, args.height, args.mines, args.rule)
        .with_reveal_mines(args.reveal_mines);
    if let Err(e) = config.validate() {
        eprintln!("Invalid board configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let (stdin, stdout) = (io::stdin().lock(), io::stdout().lock());
    let mut session = match args.seed {
        Some(seed) => Session::with_seed(stdin, stdout, seed),
        None => Session::new(stdin, stdout),
    };

    let result = session.run(&config, !args.no_menu);
    drop(session);

    match result {
        Ok(()) => {
            println!("Thanks for playing!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Game error: {}", e);
            ExitCode::FAILURE
        }
    }
}
