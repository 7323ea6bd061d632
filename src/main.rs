mod config;
mod display;
mod error;
mod file_entry;
mod parser;
mod processor;
mod slug;
mod splice;
mod writer;

use anyhow::{Context, Result};
use clap::Parser;

use config::{Cli, Options};
use display::{print_report, report_json};
use processor::process_dir;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let options = Options::from(&cli);

    let report = process_dir(&options).context("while collecting post files")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else {
        print_report(&report)?;
    }

    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
