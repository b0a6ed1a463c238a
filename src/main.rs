//! CLI entry point: parse arguments, load the catalog, resolve the audit
//! scope, retrieve and evaluate, report.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rsconfaudit::{
    ArchiveWriter, ConfigManager, ConsoleReporter, Inventory, NxapiClient,
    RetrievalCoordinator, RuleCatalog, RuleEvaluator, load_file_source,
};

#[derive(Parser, Debug)]
#[command(name = "rsconfaudit", version, about = "Check Cisco NX-OS configurations for security settings over NX-API")]
struct Cli {
    /// Scope of the audit: a device group from the inventory, or a path
    /// to a captured config file to read
    #[arg(short, long, default_value = "switch.conf")]
    scope: String,

    /// Management API username
    #[arg(short = 'U', long, default_value = "admin")]
    username: String,

    /// Management API password
    #[arg(short = 'P', long, default_value = "password")]
    password: String,

    /// Directory for config archives and catalog exports
    #[arg(short = 'B', long, default_value = "DATA/")]
    basedir: PathBuf,

    /// Rule catalog file
    #[arg(short, long, default_value = "checks.csv")]
    rules: PathBuf,

    /// Device inventory file (JSON)
    #[arg(short, long, default_value = "devices.json")]
    devices: PathBuf,

    /// Management API timeout in seconds
    #[arg(short, long, default_value_t = 120)]
    timeout: u64,

    /// Show per-rule match counts in the report
    #[arg(short, long)]
    verbose: bool,

    /// Show every field of the named rule and exit
    #[arg(short, long, value_name = "RULE")]
    info: Option<String>,

    /// Export the whole catalog and exit
    #[arg(short, long)]
    export: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let run_start = Local::now();
    println!("{}", run_start.format("%Y-%m-%d %H:%M:%S"));

    let config = ConfigManager::custom()
        .username(cli.username)
        .password(cli.password)
        .base_dir(cli.basedir)
        .http_timeout(cli.timeout)
        .verbose(cli.verbose)
        .build();

    // Catalog errors are fatal: no partial catalog, no silent skip.
    let catalog = RuleCatalog::load(&cli.rules)
        .await
        .with_context(|| format!("loading rule catalog {}", cli.rules.display()))?;
    let reporter = ConsoleReporter::new(config.verbose);

    if let Some(name) = &cli.info {
        let rule = catalog.describe(name)?;
        reporter.print_rule_details(rule);
        return Ok(());
    }

    if cli.export {
        let text = catalog.serialize()?;
        tokio::fs::create_dir_all(&config.base_dir).await?;
        let path = config.base_dir.join("checks_export.csv");
        tokio::fs::write(&path, &text).await?;
        print!("{text}");
        info!("catalog exported to {}", path.display());
        return Ok(());
    }

    let evaluator = RuleEvaluator::compile(&catalog)?;

    if Path::new(&cli.scope).exists() {
        // Captured config file: synchronous single source, no archive.
        let source = load_file_source(&cli.scope).await?;
        reporter.print_source_header(&source);
        reporter.print_results(&catalog, &evaluator.evaluate_source(&source));
    } else {
        let inventory = Inventory::load(&cli.devices)
            .await
            .with_context(|| format!("loading device inventory {}", cli.devices.display()))?;
        let targets = inventory.select(&cli.scope)?;

        let client = Arc::new(NxapiClient::new(&config)?);
        let commands = Arc::new(config.show_commands.clone());
        let retrieval = RetrievalCoordinator::retrieve_all(&targets, move |device| {
            let client = Arc::clone(&client);
            let commands = Arc::clone(&commands);
            async move { client.fetch_device_config(&device, &commands).await }
        })
        .await;

        let archive = ArchiveWriter::new(&config.base_dir, run_start);
        for source in &retrieval.sources {
            archive.append_source(source).await?;
            reporter.print_source_header(source);
            reporter.print_results(&catalog, &evaluator.evaluate_source(source));
        }
        reporter.print_fetch_failures(&retrieval.failures);
    }

    println!("DONE.");
    Ok(())
}
