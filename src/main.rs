//! newsrank CLI binary.

use std::io::Write;
use std::process;

use clap::{CommandFactory, Parser};
use clap::error::ErrorKind;
use env_logger::Builder;
use log::LevelFilter;

use newsrank::cli::args::NewsrankArgs;
use newsrank::cli::commands::execute_command;

fn main() {
    let args = match NewsrankArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Usage errors exit with 1 rather than clap's 2.
            let _ = e.print();
            if !e.to_string().contains("Usage:") {
                eprintln!("\n{}", NewsrankArgs::command().render_usage());
            }
            process::exit(1);
        }
    };

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
