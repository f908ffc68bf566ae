mod categorize;
mod config;
mod import;
mod ledger;
mod models;
mod run;

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    run::as_cli(&args)
}
