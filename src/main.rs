use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pingpong_tracker::api::{build_router, state::AppState};
use pingpong_tracker::calculate::{
    self, parse_score, MonthlyLeaderboard, StatsReport, RECENT_LIMIT,
};
use pingpong_tracker::config::AppConfig;
use pingpong_tracker::models::{MatchId, MatchRecord, NewMatch, PlayerSummary, Roster};
use pingpong_tracker::storage::{MatchStore, StorageError};

#[derive(Parser)]
#[command(name = "pingpong-tracker")]
#[command(about = "Table-tennis score tracker and statistics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a match result
    Add {
        /// First player
        #[arg(long)]
        p1: String,

        /// Second player
        #[arg(long)]
        p2: String,

        /// Final score as "P1-P2", e.g. 11-9
        #[arg(long)]
        score: String,

        /// Date played (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a match by id
    Delete { id: String },

    /// Player leaderboard
    Leaderboard,

    /// Head-to-head matrix
    HeadToHead,

    /// Monthly wins and losses
    Monthly,

    /// Longest winning streaks
    Streaks,

    /// Most recent matches
    Recent {
        #[arg(long, default_value_t = RECENT_LIMIT)]
        limit: usize,
    },

    /// Every match, newest first
    Matches,

    /// Match with the most combined points
    Longest,

    /// A player's biggest win
    BiggestWin { player: String },

    /// Full statistics report as JSON
    Report,

    /// Start the API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&PathBuf::from(&cli.config))
        .with_context(|| format!("loading config from {}", cli.config))?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(dir);
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting pingpong-tracker v{}", env!("CARGO_PKG_VERSION"));

    let roster = config.roster();
    let store = MatchStore::for_config(&config.storage_config());

    match cli.command {
        Commands::Add {
            p1,
            p2,
            score,
            date,
        } => {
            let date = date
                .map(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d"))
                .transpose()
                .context("invalid --date (expected YYYY-MM-DD)")?;
            let (score1, score2) = match parse_score(&score) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}", e.reason());
                    std::process::exit(2);
                }
            };
            let new_match = NewMatch {
                p1,
                p2,
                score1,
                score2,
                date,
            };
            let today = chrono::Local::now().date_naive();
            match store.append(new_match, &roster, today) {
                Ok(record) => println!("Match saved! ({})", record.id),
                Err(StorageError::Rejected(e)) => {
                    eprintln!("{}", e);
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Delete { id } => {
            let removed = store.delete(&MatchId::from(id))?;
            println!(
                "Deleted match {}",
                removed.id.as_deref().unwrap_or_default()
            );
        }
        Commands::Leaderboard => {
            let matches = store.load()?;
            print_leaderboard(&calculate::leaderboard(&matches, &roster));
        }
        Commands::HeadToHead => {
            let matches = store.load()?;
            print_head_to_head(&matches, &roster);
        }
        Commands::Monthly => {
            let matches = store.load()?;
            let months = calculate::monthly_leaderboards(&matches, &roster);
            if months.is_empty() {
                println!("No matches recorded yet.");
            }
            for month in &months {
                print_month(month);
            }
        }
        Commands::Streaks => {
            let matches = store.load()?;
            let streaks = calculate::longest_win_streaks(&matches, &roster);
            println!("{:<12} {:>7}", "Player", "Longest");
            for player in roster.extended_with(streaks.keys().map(String::as_str)) {
                println!("{:<12} {:>7}", player, streaks.get(player).unwrap_or(&0));
            }
        }
        Commands::Recent { limit } => {
            let matches = store.load()?;
            print_matches(&calculate::recent_matches(&matches, limit));
        }
        Commands::Matches => {
            let matches = store.load()?;
            print_matches(&calculate::matches_by_date_desc(&matches));
        }
        Commands::Longest => {
            let matches = store.load()?;
            match calculate::longest_match(&matches) {
                Some(m) => print_matches(&[m]),
                None => println!("No matches recorded yet."),
            }
        }
        Commands::BiggestWin { player } => {
            let matches = store.load()?;
            match calculate::biggest_win_for(&player, &matches) {
                Some(win) => println!(
                    "{} won by {} against {} (match {})",
                    player, win.margin, win.opponent, win.match_id
                ),
                None => println!("{} has no wins yet.", player),
            }
        }
        Commands::Report => {
            let matches = store.load()?;
            let report = StatsReport::build(&matches, &roster);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::new(store, roster).with_cors_origin(&config.server.cors_origin);
            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Serving match statistics on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn print_leaderboard(rows: &[PlayerSummary]) {
    println!(
        "{:<12} {:>4} {:>6} {:>7} {:>10} {:>11} {:>4} {:>4}",
        "Player", "Wins", "Losses", "Win %", "Points Won", "Points Lost", "OTW", "OTL"
    );
    for s in rows {
        println!(
            "{:<12} {:>4} {:>6} {:>6.1}% {:>10} {:>11} {:>4} {:>4}",
            s.player,
            s.wins,
            s.losses,
            s.win_percentage,
            s.points_for,
            s.points_against,
            s.overtime_wins,
            s.overtime_losses
        );
    }
}

fn print_head_to_head(matches: &[MatchRecord], roster: &Roster) {
    let h2h = calculate::head_to_head(matches, roster);
    let grid = h2h.grid(roster);

    print!("{:<12}", "");
    for (player, _) in &grid {
        print!(" {:>8}", player);
    }
    println!();
    for (player, cells) in &grid {
        print!("{:<12}", player);
        for cell in cells {
            let text = cell.map_or_else(|| "-".to_string(), |r| r.to_string());
            print!(" {:>8}", text);
        }
        println!();
    }
}

fn print_month(month: &MonthlyLeaderboard) {
    println!("{}", month.label);
    println!("  {:<12} {:>4} {:>6}", "Player", "Wins", "Losses");
    for row in &month.rows {
        println!("  {:<12} {:>4} {:>6}", row.player, row.wins, row.losses);
    }
    println!();
}

fn print_matches(matches: &[&MatchRecord]) {
    if matches.is_empty() {
        println!("No matches recorded yet.");
        return;
    }
    println!(
        "{:<12} {:>6} {:<12} {:>6} {:<10} {}",
        "P1", "Score1", "P2", "Score2", "Date", "Id"
    );
    for m in matches {
        println!(
            "{:<12} {:>6} {:<12} {:>6} {:<10} {}",
            m.player_a, m.score_a, m.player_b, m.score_b, m.played_on, m.id
        );
    }
}
