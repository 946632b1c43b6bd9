use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::warn;

use league_pods::config::{LeagueConfig, DEFAULT_CONFIG_FILE};
use league_pods::display::{
    format_player, print_assignment, print_league, write_assignment_to_file, write_history,
    write_player_history,
};
use league_pods::parser::load_roster;
use league_pods::schedule::{generate_pods, swap_players, GenerateOptions};
use league_pods::storage::JsonStorage;
use league_pods::web;

#[derive(Parser)]
#[command(name = "league-pods", about = "Generate monthly pod matchings for a league")]
struct Cli {
    /// Path to the league configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Overrides the configured data directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import or refresh a league roster from a CSV file.
    Import {
        csv: PathBuf,
        #[arg(long)]
        event: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Generate pods and matches for a month.
    Generate {
        event: String,
        #[arg(long)]
        month: String,
        #[arg(long)]
        pod_size: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Comma-separated player ids pinned into one pod. Repeatable.
        #[arg(long = "fixed")]
        fixed: Vec<String>,
    },
    /// Show the roster, or the stored pods for a month.
    View {
        event: String,
        #[arg(long)]
        month: Option<String>,
        /// Also write the month's pods to a text file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show recorded match history.
    History {
        event: String,
        #[arg(long)]
        player: Option<String>,
    },
    /// Swap two players between pods and regenerate those pods' matches.
    Swap {
        event: String,
        #[arg(long)]
        month: String,
        #[arg(long)]
        player1: String,
        #[arg(long)]
        player2: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Serve stored leagues, matchings and history as JSON.
    Web {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

fn parse_fixed_pods(groups: &[String]) -> Vec<Vec<String>> {
    groups
        .iter()
        .map(|group| {
            group
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,league_pods=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = LeagueConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let storage = JsonStorage::new(&config.data_dir);

    match cli.command {
        Command::Import { csv, event, name } => {
            let name = name.unwrap_or_else(|| format!("League {}", event));
            let league = load_roster(&csv, &event, &name)
                .with_context(|| format!("importing roster from {}", csv.display()))?;
            storage.save_league(&league)?;

            println!("League: {}", league.name);
            println!("Event ID: {}", league.event_id);
            println!("Players: {}", league.players.len());
            println!();
            for player in &league.players {
                println!("  - {}", format_player(player));
            }
            println!();
            println!("Data saved to: {}", storage.data_dir().display());
        }

        Command::Generate { event, month, pod_size, seed, fixed } => {
            let league = storage
                .load_league(&event)?
                .with_context(|| format!("league {} not found, run 'import' first", event))?;
            let history = storage.load_history(&event)?;
            let pod_size = pod_size.unwrap_or(config.pod_size);

            if !config.is_known_month(&month) {
                warn!(%month, configured = ?config.months, "month is not one of the configured months");
            }
            if history.has_period(&month) {
                warn!(%month, "history already holds pairings for this month; both runs will be recorded");
            }

            println!("Generating matchings for {}...", league.name);
            println!("  Month: {}", month);
            println!("  Pod Size: {}", pod_size);
            println!("  Players: {}", league.players.len());
            println!();

            let mut options = GenerateOptions::default().with_fixed_pods(parse_fixed_pods(&fixed));
            options.seed = seed;

            let result = generate_pods(&league, pod_size, &history, &month, &options)?;
            storage.save_assignment(&event, &result)?;
            storage.record_matches(&event, &result)?;

            print_assignment(&result, &league)?;
            println!();
            println!("Matchings saved to: {}", storage.data_dir().display());
        }

        Command::View { event, month, out } => {
            let league = storage
                .load_league(&event)?
                .with_context(|| format!("league {} not found, run 'import' first", event))?;

            match month {
                None => {
                    if out.is_some() {
                        bail!("--out needs --month");
                    }
                    print_league(&league);
                }
                Some(month) => {
                    let result = storage
                        .load_assignment(&event, &month)?
                        .with_context(|| format!("no matchings found for {}, run 'generate' first", month))?;
                    print_assignment(&result, &league)?;
                    if let Some(path) = out {
                        write_assignment_to_file(&result, &league, &path)
                            .with_context(|| format!("writing {}", path.display()))?;
                        println!();
                        println!("Pods written to: {}", path.display());
                    }
                }
            }
        }

        Command::History { event, player } => {
            let league = storage
                .load_league(&event)?
                .with_context(|| format!("league {} not found, run 'import' first", event))?;
            let history = storage.load_history(&event)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();

            match player {
                Some(key) => {
                    let player_id = league
                        .resolve(&key)
                        .map(|p| p.id.clone())
                        .unwrap_or(key);
                    write_player_history(&mut out, &history, &league, &player_id)?
                }
                None => write_history(&mut out, &history, &league, &config)?,
            }
        }

        Command::Swap { event, month, player1, player2, seed } => {
            let league = storage
                .load_league(&event)?
                .with_context(|| format!("league {} not found", event))?;
            let current = storage
                .load_assignment(&event, &month)?
                .with_context(|| format!("no matchings found for {}", month))?;
            let history = storage.load_history(&event)?;

            let swapped = swap_players(&current, &league, &history, &player1, &player2, seed)?;
            storage.save_assignment(&event, &swapped)?;
            let added = storage.record_matches(&event, &swapped)?;

            let pod_id = |id: &str| swapped.pod_of(id).map(|p| p.pod_id).unwrap_or_default();
            println!(
                "Swapped {} (now in Pod {}) and {} (now in Pod {})",
                league.display_name_of(&player1),
                pod_id(&player1),
                league.display_name_of(&player2),
                pod_id(&player2)
            );
            println!("Matches regenerated for affected pods ({} new pairings recorded).", added);
        }

        Command::Web { port } => {
            println!("Starting web server on port {}...", port);
            println!("Access the API at http://localhost:{}/api/leagues/<event-id>", port);
            web::start_server(port, storage).await?;
        }
    }

    Ok(())
}
