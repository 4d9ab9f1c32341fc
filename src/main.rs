use clap::Parser;
use readbench::bench::BenchmarkRunner;
use readbench::config::BenchmarkConfig;
use readbench::{error, APP_NAME};
use std::path::PathBuf;
use std::process::ExitCode;

/// Measure disk read latency or throughput over a folder of identical files
#[derive(Parser, Debug)]
#[command(
    name = APP_NAME,
    version,
    about,
    after_help = "A folder whose name starts with '-' must follow '--', e.g. benchmark -- -data"
)]
struct Cli {
    /// Folder with the test files
    folder: Option<PathBuf>,
}

fn usage() -> String {
    format!(
        "Usage: {APP_NAME} <Folder with test files>\nExample: {APP_NAME} /mnt/test"
    )
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let Some(folder) = cli.folder else {
        println!("{}", usage());
        return ExitCode::SUCCESS;
    };

    let config = BenchmarkConfig::new(folder);
    let runner = BenchmarkRunner::new(config).with_progress(true);

    let result = runner.run(&mut std::io::stdout().lock());
    match result {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if error::is_user_input_error(&e) {
                log::debug!("Rejected input: {:?}", e);
            } else {
                log::debug!("Run failed: {:?}", e);
            }
            eprintln!("{}", error::user_friendly_message(&e));
            ExitCode::from(error::exit_code(&e))
        }
    }
}
