// src/bin/cli.rs
use unsc_votes::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
