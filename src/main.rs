use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use nodegen::config as cfg;
use nodegen::generator::{self, DEFAULT_API_URL};
use nodegen::output;

/// nodegen CLI
#[derive(Debug, Parser)]
#[command(
    name = nodegen::PKG_NAME,
    version = nodegen::PKG_VERSION,
    about = "Generate a workflow node module and manifest from a JSON configuration"
)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short = 'c', long = "config", default_value = "./config.json")]
    config: PathBuf,

    /// Directory the node directory is created in
    #[arg(short = 'o', long = "output", default_value = "./nodes")]
    output: PathBuf,

    /// Template file to render instead of the built-in one
    #[arg(short = 't', long = "template")]
    template: Option<PathBuf>,

    /// Overwrite an existing node directory
    #[arg(short = 'f', long = "force")]
    force: bool,

    /// Print the generated module instead of writing files
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Set log level (e.g., trace, debug, info, warn, error). Overrides RUST_LOG.
    #[arg(long = "log-level")]
    log_level: Option<String>,

    /// Print the JSON Schema for the configuration and exit
    #[arg(long = "print-schema")]
    print_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // --log-level wins over RUST_LOG.
    match args.log_level.as_deref() {
        Some(level) => nodegen::init_tracing_with_level(
            nodegen::parse_level(level).unwrap_or(tracing::Level::INFO),
        ),
        None => nodegen::init_tracing(),
    }

    if args.print_schema {
        let schema = cfg::generate_schema();
        let json = serde_json::to_string_pretty(&schema)?;
        println!("{json}");
        return Ok(());
    }

    info!(
        version = nodegen::PKG_VERSION,
        config = %args.config.display(),
        output = %args.output.display(),
        dry_run = args.dry_run,
        "Starting nodegen"
    );

    let (config, node) = generator::generate_from_paths(&args.config, args.template.as_deref())
        .await
        .with_context(|| format!("Generation failed for {}", args.config.display()))?;
    debug!(
        display_name = %config.display_name,
        version = config.version.as_deref().unwrap_or("1.0.0"),
        "Configuration loaded"
    );

    if args.dry_run {
        println!("{}", node.module_source);
        return Ok(());
    }

    let written = output::write_node(&args.output, &node, args.force)
        .await
        .context("Failed to write generated node")?;

    info!(
        dir = %written.dir.display(),
        module = %node.module_file_name(),
        manifest = %node.manifest_file_name(),
        "Node generated"
    );
    info!(
        class_name = %node.identifiers.class_name,
        display_name = %config.display_name,
        internal_name = %node.identifiers.internal_name,
        api_url = config.api_url.as_deref().unwrap_or(DEFAULT_API_URL),
        parameters = node.property_count,
        "Node summary"
    );
    Ok(())
}
