// src/bin/cli.rs
use watcher::{cli, log};

fn main() {
    if let Err(e) = color_eyre::install() {
        eprintln!("Error: {e}");
    }
    log::init();

    std::process::exit(cli::run());
}
