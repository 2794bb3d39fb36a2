//! Projload CLI - load a delimited export into a document collection.
//!
//! ```bash
//! projload projects.csv http://host:8080/v1/api/projects   # load for real
//! projload default default                                 # built-in defaults
//! projload projects.csv default --preview                  # render records, no network
//! projload default default --fetch                         # GET the collection
//! ```
//!
//! Both positionals accept the literal sentinel `default`. There is no
//! header handling: every line of the file is loaded as a record, so
//! pre-strip a header row if the destination should not receive it.

use clap::Parser;
use projload::{config::DEFAULT_SENTINEL, render_preview, LoadConfig, Loader};

#[derive(Parser)]
#[command(name = "projload")]
#[command(about = "Load a delimited spreadsheet export into a document API", long_about = None)]
struct Cli {
    /// Source file path, or `default` for the built-in path
    file: String,

    /// Destination URL, or `default` for the built-in endpoint
    url: String,

    /// Render the transformed records to stdout instead of posting
    #[arg(long)]
    preview: bool,

    /// Query the destination and print its response instead of loading
    #[arg(long)]
    fetch: bool,

    /// Row-count and coercion diagnostics
    #[arg(long)]
    debug: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = LoadConfig::from_env();
    if cli.debug {
        config.debug = true;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    if let Err(e) = run(&cli, &config).await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, config: &LoadConfig) -> Result<(), Box<dyn std::error::Error>> {
    if cli.file == DEFAULT_SENTINEL {
        eprintln!("📄 Using default import file [{}]", config.source_path);
    }
    if cli.url == DEFAULT_SENTINEL {
        eprintln!("🌐 Using default url [{}]", config.endpoint_url);
    }

    let file = config.resolve_source(&cli.file);
    let url = config.resolve_url(&cli.url);

    let loader = Loader::new(config)?;

    if cli.fetch {
        let (status, body) = loader.fetch(url).await?;
        eprintln!("🌐 Get result: {} from {}", status, url);
        println!("{}", body);
        return Ok(());
    }

    if cli.preview {
        let records = loader.preview(file)?;
        eprintln!("👀 Previewing {} records (no network)", records.len());
        println!("{}", render_preview(&records)?);
        return Ok(());
    }

    eprintln!("🚀 Loading {} into {}", file, url);
    let report = loader.load(file, url).await?;
    eprintln!(
        "✨ Done: {} rows, {} posted, {} failed",
        report.rows, report.posted, report.failed
    );

    Ok(())
}
