//! `semlabel` — a thin diagnostic front end over the two ingestion paths.
//!
//! ```bash
//! semlabel csv  <path> [--has-header] [--max-rows N]
//! semlabel rdf  <path> [--sample-portion F]
//! ```
//!
//! Prints the inferred columns (name, variant, link targets) as plain text.
//! No REPL, no server, no persistence — diagnostics only.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use semlabel::column::Column;
use semlabel::config::Config;
use semlabel::{csv_ingest, rdf_ingest};

#[derive(Parser)]
#[command(name = "semlabel", about = "Infer a labeled column graph from CSV or RDF/OWL input")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Infer columns from a CSV sample.
    Csv {
        path: PathBuf,
        #[arg(long)]
        has_header: bool,
        #[arg(long)]
        max_rows: Option<usize>,
    },
    /// Infer columns from an RDF/OWL document.
    Rdf {
        path: PathBuf,
        #[arg(long)]
        sample_portion: Option<f64>,
    },
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_columns(columns: &[(String, Column)]) {
    for (name, column) in columns {
        println!("{name}: {}", column.variant_name());
        for (link_name, targets) in column.links() {
            let mut targets: Vec<&String> = targets.iter().collect();
            targets.sort();
            for target in targets {
                println!("  --{link_name}--> {target}");
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load().unwrap_or_default();
    init_tracing(&config);

    match cli.command {
        Command::Csv { path, has_header, max_rows } => {
            if let Some(max_rows) = max_rows {
                config.csv.max_rows = max_rows;
            }
            let columns = csv_ingest::infer_from_csv(&path, has_header, &config)?;
            tracing::info!(columns = columns.len(), "inferred columns from CSV sample");
            print_columns(&columns);
        }
        Command::Rdf { path, sample_portion } => {
            if let Some(sample_portion) = sample_portion {
                config.rdf.sample_portion = sample_portion;
            }
            let source = rdf_ingest::KnowledgeSource::from_path(&path, &config.rdf)?;
            let columns = source.into_columns();
            tracing::info!(columns = columns.len(), "inferred columns from RDF document");
            print_columns(&columns);
        }
    }

    Ok(())
}
