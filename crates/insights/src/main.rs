use std::sync::Arc;

use anyhow::{bail, Context};
use chess_core::games::{GameFilter, GameSort};
use chess_core::{Outcome, Side, Timeframe};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use insights::clients::lichess::{LichessClient, PlayerData};
use insights::config::Config;
use insights::dashboard::{Dashboard, DashboardOptions, GameDetail};
use insights::error::AppError;
use insights::search::{normalize_username, SearchSession, SearchTicket};

#[derive(Parser, Debug)]
#[command(name = "lichess-insights", version, about = "Lichess player statistics and game replay")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summary, rating history and recent games for a player
    Player(PlayerArgs),
    /// Opening analysis and board for one Lichess game
    Game {
        id: String,
        /// Ply to show, -1 for the initial position. Defaults to the final position.
        #[arg(short, long, allow_negative_numbers = true)]
        index: Option<isize>,
    },
    /// Replay a move list offline
    Replay {
        /// SAN moves, either as separate arguments or one quoted string
        #[arg(required = true, num_args = 1..)]
        moves: Vec<String>,
        #[arg(short, long, allow_negative_numbers = true)]
        index: Option<isize>,
    },
    /// Read usernames from stdin; each line replaces the previous search
    Watch {
        #[arg(short, long, default_value_t = Timeframe::AllTime)]
        timeframe: Timeframe,
        #[arg(short, long)]
        max: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct PlayerArgs {
    username: String,
    #[arg(short, long, default_value_t = Timeframe::AllTime)]
    timeframe: Timeframe,
    /// Number of recent games to fetch
    #[arg(short, long)]
    max: Option<usize>,
    #[arg(long)]
    speed: Option<String>,
    #[arg(long)]
    color: Option<Side>,
    #[arg(long)]
    outcome: Option<Outcome>,
    /// newest, oldest, rating or opponent
    #[arg(long, default_value = "newest")]
    sort: GameSort,
    /// Print the dashboard as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Command::Player(args) => run_player(&config, args).await,
        Command::Game { id, index } => run_game(&config, &id, index).await,
        Command::Replay { moves, index } => {
            let moves: Vec<String> = moves
                .iter()
                .flat_map(|m| m.split_whitespace())
                .map(str::to_string)
                .collect();
            print!("{}", GameDetail::from_moves(&moves, index));
            Ok(())
        }
        Command::Watch { timeframe, max } => {
            let options = DashboardOptions {
                timeframe,
                ..Default::default()
            };
            run_watch(&config, max.unwrap_or(config.max_games), options).await
        }
    }
}

async fn run_player(config: &Config, args: PlayerArgs) -> anyhow::Result<()> {
    let username = normalize_username(&args.username)?;
    let client = LichessClient::new(config)?;
    let data = client
        .fetch_player(&username, args.max.unwrap_or(config.max_games))
        .await
        .with_context(|| format!("Failed to load data for '{username}'"))?;

    let options = DashboardOptions {
        timeframe: args.timeframe,
        filter: GameFilter {
            speed: args.speed,
            color: args.color,
            outcome: args.outcome,
        },
        sort: args.sort,
    };
    let dashboard = build_dashboard(&username, &data, &options);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print!("{dashboard}");
    }
    Ok(())
}

async fn run_game(config: &Config, id: &str, index: Option<isize>) -> anyhow::Result<()> {
    let id = id.trim();
    if id.is_empty() {
        bail!("Game id cannot be empty");
    }
    let client = LichessClient::new(config)?;
    let game = client
        .fetch_game(id)
        .await
        .with_context(|| format!("Failed to load game '{id}'"))?;

    print!("{}", GameDetail::from_game(&game, index));
    Ok(())
}

fn build_dashboard(username: &str, data: &PlayerData, options: &DashboardOptions) -> Dashboard {
    Dashboard::build(
        username,
        Some(&data.profile),
        &data.games,
        options,
        Utc::now().date_naive(),
    )
}

/// Interactive mode: every stdin line starts a search, and only the newest
/// search's result is printed.
async fn run_watch(config: &Config, max_games: usize, options: DashboardOptions) -> anyhow::Result<()> {
    let client = Arc::new(LichessClient::new(config)?);
    let session = SearchSession::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<(SearchTicket, String, Result<PlayerData, AppError>)>();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut in_flight = 0usize;

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => match normalize_username(&line) {
                        Ok(username) => {
                            let ticket = session.begin();
                            let client = Arc::clone(&client);
                            let tx = tx.clone();
                            in_flight += 1;
                            eprintln!("Searching {username}...");
                            tokio::spawn(async move {
                                let result = client.fetch_player(&username, max_games).await;
                                let _ = tx.send((ticket, username, result));
                            });
                        }
                        Err(e) => eprintln!("{e}"),
                    },
                    None => stdin_open = false,
                }
            }
            Some((ticket, username, result)) = rx.recv(), if in_flight > 0 => {
                in_flight -= 1;
                match session.accept(ticket, result) {
                    Some(Ok(data)) => print!("{}", build_dashboard(&username, &data, &options)),
                    Some(Err(e)) => eprintln!("Failed to load data for '{username}': {e}"),
                    None => {}
                }
            }
            else => break,
        }
    }

    Ok(())
}
