//! # Delve Main Entry Point
//!
//! Parses arguments, sets up logging, starts or resumes a session and runs
//! it on the terminal front end until the player quits or input ends.

use clap::Parser;
use delve::{
    DelveError, DelveResult, GameState, GenerationConfig, InputSource, TerminalFrontend,
    TurnOutcome,
};
use log::{error, info};
use std::path::{Path, PathBuf};

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A turn-based dungeon crawl into the Archive")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where the session is saved on quit
    #[arg(long, default_value = "savegame.json")]
    save: PathBuf,

    /// Resume the session stored at the save path
    #[arg(long)]
    load: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);
    info!("Starting Delve v{}", delve::VERSION);

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("delve: {}", e);
        std::process::exit(1);
    }
}

/// Initializes env_logger, letting `RUST_LOG` override the flag.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn run(args: &Args) -> DelveResult<()> {
    let mut state = start_session(args)?;
    let config = state.config.clone();
    let mut frontend = TerminalFrontend::stdio(config.width as i32, config.height as i32);

    loop {
        let Some(action) = frontend.next_action(&state) else {
            info!("Input closed");
            break;
        };
        if state.play_turn(action, &mut frontend)? == TurnOutcome::Quit {
            break;
        }
    }

    state.save_to_file(&args.save)?;
    println!("Game saved to {}", args.save.display());
    Ok(())
}

fn start_session(args: &Args) -> DelveResult<GameState> {
    if args.load {
        match GameState::load_from_file(&args.save) {
            Ok(state) => return Ok(state),
            Err(DelveError::NothingToLoad(path)) => {
                println!("No saved game to load at {}, starting a new one.", path);
            }
            Err(e) => return Err(e),
        }
    }
    new_session(args.seed, &args.save)
}

fn new_session(seed: Option<u64>, save: &Path) -> DelveResult<GameState> {
    let seed = seed.unwrap_or_else(rand::random);
    info!("New session with seed {} (saves to {})", seed, save.display());
    GameState::new_game_with_config(GenerationConfig::new(seed))
}
