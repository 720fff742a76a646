//! tweaklab command line
//!
//! Inspect the Record & Tuple laboratory without a browser: render the
//! table, produce exports and links, shuffle, and run concern discovery.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tweaklab::{explore, Availability, LabConfig, ReportEntry, Session};

#[derive(Parser)]
#[command(name = "tweaklab")]
#[command(about = "Explore the design space of Records and Tuples")]
struct Cli {
    /// Per-subscriber change buffer
    #[arg(long, default_value_t = LabConfig::default().notification_capacity)]
    notification_capacity: usize,

    /// Do not log link restore diagnostics
    #[arg(long)]
    quiet_restore: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every decision with its availability and concern
    Show {
        /// Link fragment to restore first
        #[arg(short, long)]
        link: Option<String>,
    },
    /// Print the exported selection
    Export {
        #[arg(short, long)]
        link: Option<String>,

        /// Indent the JSON
        #[arg(short, long)]
        pretty: bool,
    },
    /// Print a shareable link fragment
    Link {
        /// File holding exported JSON to apply first
        #[arg(short, long)]
        import: Option<PathBuf>,
    },
    /// Randomize every decision and print the export
    Shuffle {
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Print every concern each decision can raise
    Report {
        /// Only explore this decision
        #[arg(short, long)]
        target: Option<String>,
    },
}

/// Log to stderr so stdout only carries command output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "tweaklab=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = LabConfig {
        notification_capacity: cli.notification_capacity,
        log_restore_issues: !cli.quiet_restore,
    };

    match cli.command {
        Commands::Show { link } => {
            let session = Session::open(&config, link.as_deref())?;
            for row in session.view() {
                let value = row.value.map(|v| v.to_string()).unwrap_or_default();
                let note = match (&row.availability, &row.concern) {
                    (Availability::Unavailable { reason }, _) => format!("(n/a: {reason})"),
                    (_, Some(concern)) => concern.to_string(),
                    _ => String::new(),
                };
                let marker = if row.choices.is_some() { "*" } else { " " };
                println!("{marker} {:<45} {value:<12} {note}", row.id);
            }
            for issue in session.restore_issues() {
                println!("{issue}");
            }
        }
        Commands::Export { link, pretty } => {
            let snapshot = Session::open(&config, link.as_deref())?.export();
            if pretty {
                println!("{}", snapshot.to_json_pretty());
            } else {
                println!("{}", snapshot.to_json());
            }
        }
        Commands::Link { import } => {
            let mut session = Session::open(&config, None)?;
            if let Some(path) = import {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let summary = session
                    .try_import(&text)
                    .with_context(|| format!("failed to import {}", path.display()))?;
                for key in &summary.unknown {
                    tracing::warn!(key = %key, "ignored unknown item");
                }
                tracing::info!(applied = summary.applied, "imported selection");
            }
            println!("#{}", session.save_link());
        }
        Commands::Shuffle { seed } => {
            let mut session = Session::open(&config, None)?;
            match seed {
                Some(seed) => session.shuffle_with(&mut StdRng::seed_from_u64(seed)),
                None => session.shuffle(),
            };
            println!("{}", session.export().to_json_pretty());
        }
        Commands::Report { target } => {
            let session = Session::open(&config, None)?;
            let json = match target {
                Some(id) => {
                    let catalogue = session.store().catalogue();
                    anyhow::ensure!(catalogue.contains(&id), "unknown decision '{id}'");
                    let outcomes = explore(catalogue, &id);
                    serde_json::to_string_pretty(&ReportEntry { id, outcomes })?
                }
                None => serde_json::to_string_pretty(&session.report())?,
            };
            println!("{json}");
        }
    }

    Ok(())
}
