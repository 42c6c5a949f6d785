use log::info;
use solver::{batch, config::BatchConfig};

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // an optional JSON config replaces the stock batch of five mazes
    let config = match std::env::args().nth(1) {
        Some(path) => BatchConfig::load(path)?,
        None => BatchConfig::default(),
    };

    let reports = batch::run(&config)?;
    batch::write_output(&config.output, &reports)?;

    let unsolved = reports.iter().filter(|report| !report.is_solved()).count();
    info!("done, {} of {} mazes unsolvable", unsolved, reports.len());

    Ok(())
}
