mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "beehive",
    version,
    about = "Export Beehive manuscript index annotations to CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the annotation store and write the CSV export
    Export {
        #[command(flatten)]
        sources: SourceArgs,

        /// SPARQL endpoint to query (overrides the config file)
        #[arg(short, long, value_name = "URL")]
        endpoint: Option<String>,

        /// Read annotations from a saved SPARQL result file (JSON or XML) instead of querying
        #[arg(short, long, value_name = "FILE")]
        results: Option<PathBuf>,

        /// Write the CSV to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Classify a single annotation body (reads stdin when no text is given)
    Parse {
        /// Annotation content, HTML allowed
        text: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List the canvases found in the configured manifests
    Canvases {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

#[derive(clap::Args)]
struct SourceArgs {
    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Manifest URL or path; repeat for several (overrides the config file)
    #[arg(short, long = "manifest", value_name = "URL")]
    manifests: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            sources,
            endpoint,
            results,
            out,
        } => commands::resolve_config(sources.config, sources.manifests, endpoint)
            .and_then(|config| commands::export::run(&config, results, out)),
        Commands::Parse { text, output } => commands::parse::run(text, &output),
        Commands::Canvases { sources, output } => {
            commands::resolve_config(sources.config, sources.manifests, None)
                .and_then(|config| commands::canvases::run(&config, &output))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
