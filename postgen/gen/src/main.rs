//! Postgen collection generator
//!
//! Builds a Postman collection from a manifest of endpoint shapes.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use postgen_gen::errors::GeneratorError;
use postgen_gen::manifest::CollectionManifest;
use postgen_gen::postman::SchemaVersion;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Postgen - compiles annotated request shapes into a Postman collection
#[derive(Parser, Debug)]
#[command(name = "postgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Manifest describing the collection (.yaml, .yml, .toml or .json)
    #[arg(short, long, value_name = "FILE")]
    manifest: PathBuf,

    /// Output file for the collection
    #[arg(short, long, value_name = "FILE", default_value = "collection.json")]
    output: PathBuf,

    /// Collection schema version (v2.0 or v2.1)
    #[arg(long, default_value = "v2.1")]
    schema: SchemaVersion,

    /// Print the collection to stdout without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,postgen_gen=info".to_string(),
            2 => "info,postgen_gen=debug".to_string(),
            _ => "debug,postgen_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let manifest = CollectionManifest::load(&cli.manifest)?;
    tracing::info!(
        name = %manifest.name,
        endpoints = manifest.endpoints.len(),
        schema = %cli.schema,
        "building collection"
    );

    let collection = manifest.into_collection()?;

    if cli.dry_run {
        let mut stdout = io::stdout().lock();
        collection.write(&mut stdout, cli.schema)?;
        return Ok(());
    }

    collection.write_to_file(&cli.output, cli.schema)?;
    if cli.verbose > 0 {
        eprintln!("Wrote {}", cli.output.display());
    }

    Ok(())
}
