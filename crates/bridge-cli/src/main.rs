#![forbid(unsafe_code)]
//! The `bridge` binary: imports a Maven artifact and its transitive
//! dependency graph into a local Savant repository.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use bridge_engine::{BridgeConfig, SavantBridge, StdConsole};
use bridge_savant::GroupMappings;
use bridge_util::maven::MAVEN_CENTRAL;
use bridge_util::HttpFetcher;

#[derive(Parser)]
#[command(name = "bridge", about = "Imports Maven artifacts into a Savant repository")]
#[command(version)]
struct Cli {
    /// Print download URLs, POM contents, and the generated AMD XML
    #[arg(long)]
    debug: bool,
    /// The Savant repository directory to import into
    directory: PathBuf,
}

fn main() {
    // Argument problems exit 1, like every other failure.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        let mut source = std::error::Error::source(e.as_ref());
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.directory.is_file() {
        return Err(format!(
            "invalid working directory [{}]: it is a file",
            cli.directory.display()
        )
        .into());
    }
    if !cli.directory.is_dir() {
        std::fs::create_dir_all(&cli.directory)?;
    }

    let config = BridgeConfig::from_env(cli.debug);
    let mut mappings = GroupMappings::load(&cli.directory)?;
    let fetcher = HttpFetcher::new(MAVEN_CENTRAL, cli.debug)?;
    let mut console = StdConsole;

    let mut bridge = SavantBridge::new(
        &cli.directory,
        &fetcher,
        &mut console,
        &config,
        &mut mappings,
    );
    bridge.run()?;

    mappings.store()?;
    Ok(())
}
