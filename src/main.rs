use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use wardmap::feed::{FeedPhase, FeedSnapshot, TicketFeed};
use wardmap::model::{FeedConfig, Marker, SelectionKey, SelectionRef, TicketStatus};
use wardmap::normalize::normalize;
use wardmap::remote::{TicketClient, TicketFilters};
use wardmap::resolve::resolve_selection;
use wardmap::stats;
use wardmap::surface::{display_issue_type, external_map_url};

#[derive(Parser)]
#[command(name = "wardmap")]
#[command(about = "Live complaints map feed", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(long, global = true, default_value = "wardmap.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the feed configuration
    Init {
        /// Ticket backend base URL (e.g. http://localhost:8000)
        #[arg(long)]
        url: String,
        /// Bearer token for the ticket API
        #[arg(long)]
        token: Option<String>,
        /// Refresh interval in seconds (default 30)
        #[arg(long)]
        refresh_secs: Option<u64>,
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Show the feed configuration
    Config {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch once and list map markers
    Markers {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch once and show status counters
    Stats {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a selection reference to a marker
    Locate {
        /// Ticket id of an exact (ticket, sub-ticket) pair
        #[arg(long, requires = "sub")]
        ticket: Option<String>,
        /// Sub-ticket id of an exact (ticket, sub-ticket) pair
        #[arg(long, requires = "ticket")]
        sub: Option<String>,
        /// Bare id matched against ticket or sub-ticket ids
        #[arg(long)]
        id: Option<String>,
        /// Latitude to match at 6-decimal precision
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        /// Longitude to match at 6-decimal precision
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Poll the backend and print each snapshot until interrupted
    Watch {
        /// Override the configured refresh interval
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            url,
            token,
            refresh_secs,
            force,
        } => {
            if cli.config.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    cli.config.display()
                );
            }
            let mut config = FeedConfig::new(url);
            config.token = token;
            config.refresh_secs = refresh_secs;
            config.save(&cli.config)?;
            println!("Wrote {}", cli.config.display());
        }

        Commands::Config { json } => {
            let config = FeedConfig::load(&cli.config)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&config).context("serialize config json")?
                );
            } else {
                println!("url: {}", config.base_url);
                println!("token: {}", if config.token.is_some() { "set" } else { "none" });
                println!("refresh: {}s", config.refresh_interval().as_secs());
            }
        }

        Commands::Markers { json } => {
            let markers = fetch_markers(&cli.config).await?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&markers).context("serialize markers json")?
                );
            } else if markers.is_empty() {
                println!("No complaints with location data");
            } else {
                for marker in &markers {
                    print_marker(marker);
                }
                println!("{} locations", markers.len());
            }
        }

        Commands::Stats { json } => {
            let markers = fetch_markers(&cli.config).await?;
            let counts = stats::aggregate(&markers);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&counts).context("serialize stats json")?
                );
            } else {
                println!(
                    "total={} active={} open={} in_progress={} assigned={} resolved={} closed={}",
                    counts.total,
                    counts.active(),
                    counts.open,
                    counts.in_progress,
                    counts.assigned,
                    counts.resolved,
                    counts.closed,
                );
            }
        }

        Commands::Locate {
            ticket,
            sub,
            id,
            lat,
            lng,
            json,
        } => {
            let mut reference = SelectionRef::default();
            if let (Some(ticket), Some(sub)) = (ticket, sub) {
                reference = reference.and(SelectionKey::ByIds {
                    ticket_id: ticket.into(),
                    sub_id: sub.into(),
                });
            }
            if let Some(id) = id {
                reference = reference.and(SelectionKey::ById(id.into()));
            }
            if let (Some(latitude), Some(longitude)) = (lat, lng) {
                reference = reference.and(SelectionKey::ByCoordinate {
                    latitude,
                    longitude,
                });
            }
            if reference.is_empty() {
                anyhow::bail!("nothing to locate (pass --ticket/--sub, --id, or --lat/--lng)");
            }

            let markers = fetch_markers(&cli.config).await?;
            match resolve_selection(&reference, &markers) {
                Some(unique_id) => {
                    let marker = markers
                        .iter()
                        .find(|m| m.unique_id == unique_id)
                        .context("resolved marker missing from sequence")?;
                    if json {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(marker)
                                .context("serialize marker json")?
                        );
                    } else {
                        print_marker(marker);
                        println!("{}", external_map_url(marker.latitude, marker.longitude));
                    }
                }
                None => println!("No matching marker"),
            }
        }

        Commands::Watch { interval_secs } => {
            let config = FeedConfig::load(&cli.config)?;
            let client = TicketClient::new(&config)?;
            let interval = interval_secs
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.refresh_interval());

            println!(
                "Watching {} every {}s (ctrl-c to stop)",
                config.base_url,
                interval.as_secs()
            );

            let mut feed = TicketFeed::spawn(client, interval);
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    snapshot = feed.next_snapshot() => {
                        print_snapshot(&snapshot?);
                    }
                }
            }
        }
    }

    Ok(())
}

async fn fetch_markers(config_path: &std::path::Path) -> Result<Vec<Marker>> {
    let config = FeedConfig::load(config_path)?;
    let client = TicketClient::new(&config)?;
    let tickets = client.fetch_tickets(&TicketFilters::default()).await?;
    Ok(normalize(&tickets))
}

fn print_marker(marker: &Marker) {
    let status = TicketStatus::classify(marker.status.as_deref());
    println!(
        "{}  {:.6},{:.6}  {}  {}{}",
        marker.unique_id,
        marker.latitude,
        marker.longitude,
        status.as_str(),
        display_issue_type(marker.issue_type.as_deref()),
        marker
            .created_at
            .as_deref()
            .map(|raw| format!("  {}", display_created_at(raw)))
            .unwrap_or_default(),
    );
}

fn print_snapshot(snapshot: &FeedSnapshot) {
    match &snapshot.phase {
        FeedPhase::Loading => println!("loading..."),
        FeedPhase::Failed(message) => {
            println!("fetch failed: {} (retrying next cycle)", message);
        }
        FeedPhase::Empty => println!("no complaints with location data"),
        FeedPhase::Ready => {
            let counts = &snapshot.stats;
            println!(
                "{} locations ({} active): open={} in_progress={} assigned={} resolved={} closed={}",
                counts.total,
                counts.active(),
                counts.open,
                counts.in_progress,
                counts.assigned,
                counts.resolved,
                counts.closed,
            );
        }
    }
}

fn display_created_at(raw: &str) -> String {
    match time::OffsetDateTime::parse(raw, &time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts.date().to_string(),
        Err(_) => raw.to_string(),
    }
}
