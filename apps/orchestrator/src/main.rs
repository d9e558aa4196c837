use std::path::PathBuf;

use clap::Parser;
use orchestrator::domain::seed_derivation::derive_oracle_seed;
use orchestrator::domain::snapshot::snapshot;
use orchestrator::domain::{player_tag, PlayerId};
use orchestrator::{
    AdvanceOutcome, GameConfig, GameError, GameFlow, GameSetup, GameState, OracleConfig,
    OracleRegistry, PlayerSetup,
};
use rand::Rng;
use tokio::io::{AsyncBufReadExt, BufReader};

mod telemetry;

/// How many times a failed oracle turn is retried before giving up.
const ORACLE_RETRIES: usize = 3;

#[derive(Debug, Parser)]
#[command(name = "werewolf", about = "Play a game of Werewolf against decision oracles")]
struct Args {
    /// Table size when no setup file is given (6, 9, or 12)
    #[arg(long, default_value_t = 6)]
    players: usize,

    /// Game seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// 1-based seat of the human player; 0 watches an all-oracle game
    #[arg(long, default_value_t = 1)]
    seat: usize,

    /// Human player's name
    #[arg(long, default_value = "You")]
    name: String,

    /// Registered oracle used for every other seat
    #[arg(long, default_value = "RandomOracle")]
    oracle: String,

    /// JSON game setup; overrides --players and --name
    #[arg(long)]
    setup: Option<PathBuf>,

    /// Skip the sheriff election
    #[arg(long)]
    no_election: bool,

    /// Emit logs as JSON on stderr
    #[arg(long)]
    json_logs: bool,
}

fn build_setup(args: &Args, config: GameConfig, seed: u64) -> Result<GameSetup, String> {
    let mut setup = match &args.setup {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            serde_json::from_str::<GameSetup>(&raw)
                .map_err(|e| format!("invalid setup {}: {e}", path.display()))?
        }
        None => {
            let players = (0..args.players)
                .map(|i| {
                    if i + 1 == args.seat {
                        PlayerSetup::new(args.name.clone())
                    } else {
                        PlayerSetup::new(format!("Bot {}", i + 1))
                    }
                })
                .collect();
            GameSetup {
                players,
                human_seat: args.seat.checked_sub(1),
                config,
                ..GameSetup::default()
            }
        }
    };
    setup.seed = Some(setup.seed.unwrap_or(seed));
    Ok(setup)
}

/// Bind one seeded oracle per non-human seat, keyed by seat tag.
fn bind_seats(setup: &mut GameSetup, factory: &str, seed: u64) -> Result<OracleRegistry, GameError> {
    let mut oracles = OracleRegistry::new();
    for (seat, player) in setup.players.iter_mut().enumerate() {
        if setup.human_seat == Some(seat) {
            continue;
        }
        let id = seat as PlayerId;
        let key = player_tag(id);
        let name = player.oracle.clone().unwrap_or_else(|| factory.to_string());
        let config = OracleConfig::with_seed(derive_oracle_seed(seed, id));
        oracles.bind_factory(key.clone(), &name, &config)?;
        player.oracle = Some(key);
    }
    Ok(oracles)
}

/// Print log lines the viewer may see that have not been printed yet.
fn print_new_lines(state: &GameState, viewer: Option<PlayerId>, next_seq: &mut u64) {
    let player = viewer.and_then(|id| state.roster().get(id));
    for entry in state.log().entries() {
        if entry.seq >= *next_seq && entry.visible_to(player) {
            println!("{}", entry.text);
        }
    }
    *next_seq = state.log().len() as u64;
}

fn print_prompt(state: &GameState, viewer: Option<PlayerId>) {
    let Some(pending) = snapshot(state, viewer).pending else {
        return;
    };
    println!();
    println!("> {}", pending.prompt);
    for option in &pending.options {
        println!("    {:<8} {}", option.id, option.label);
    }
    if pending.allow_free_text {
        println!("  answer with: <id> <what you say>");
    } else {
        println!("  answer with: <id>");
    }
}

async fn advance_with_retry(flow: &GameFlow, state: &mut GameState) -> Result<AdvanceOutcome, GameError> {
    let mut attempt = 0;
    loop {
        match flow.advance(state).await {
            Err(e) if e.is_retryable() && attempt < ORACLE_RETRIES => {
                attempt += 1;
                eprintln!("[{}] {e}; retrying ({attempt}/{ORACLE_RETRIES})", e.code());
            }
            other => return other,
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    telemetry::init_tracing(args.json_logs);

    let mut config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(2);
        }
    };
    if args.no_election {
        config.sheriff_election = false;
    }

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut setup = match build_setup(&args, config, seed) {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(2);
        }
    };
    let seed = setup.seed.unwrap_or(seed);
    let oracles = match bind_seats(&mut setup, &args.oracle, seed) {
        Ok(oracles) => oracles,
        Err(e) => {
            eprintln!("❌ [{}] {e}", e.code());
            std::process::exit(2);
        }
    };

    let flow = GameFlow::new(oracles);
    let mut state = match flow.new_game(setup) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ [{}] {e}", e.code());
            std::process::exit(2);
        }
    };

    let viewer = state.roster().human();
    if let Some(id) = viewer {
        let me = state.roster().get(id).map(|p| (p.display(), p.role));
        if let Some((who, role)) = me {
            println!("You are {who}, the {role}. Seed {seed}.");
        }
    } else {
        println!("Spectating seed {seed}.");
    }

    let mut next_seq = 0;
    let mut outcome = advance_with_retry(&flow, &mut state).await;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_new_lines(&state, viewer, &mut next_seq);
        match outcome {
            Ok(AdvanceOutcome::Ended(winner)) => {
                println!();
                println!("Game over on day {}. Winner: {winner}.", state.day());
                return Ok(());
            }
            Ok(AdvanceOutcome::AwaitingHuman) => print_prompt(&state, viewer),
            Err(e) if e.is_caller_correctable() => {
                println!("  [{}] {e}", e.code());
                print_prompt(&state, viewer);
            }
            Err(e) => {
                eprintln!("❌ [{}] {e}", e.code());
                std::process::exit(1);
            }
        }

        let Some(line) = lines.next_line().await? else {
            println!("Input closed; leaving the game.");
            return Ok(());
        };
        let line = line.trim();
        if line.is_empty() {
            outcome = Ok(AdvanceOutcome::AwaitingHuman);
            continue;
        }
        let (id, text) = match line.split_once(char::is_whitespace) {
            Some((id, text)) => (id, Some(text)),
            None => (line, None),
        };
        outcome = match flow.submit(&mut state, id, text).await {
            Err(e) if e.is_retryable() => {
                eprintln!("[{}] {e}; retrying", e.code());
                advance_with_retry(&flow, &mut state).await
            }
            other => other,
        };
    }
}
