// src/logging.rs
use env_logger::Builder;
use log::LevelFilter;

/// Level from the command-line flags: `info` by default, `-v` debug,
/// `-vv` trace, `--quiet` warnings only.
pub fn level(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

/// Install the global logger. `RUST_LOG`, when set, wins over the flags.
pub fn init(verbose: u8, quiet: bool) -> Result<(), log::SetLoggerError> {
    Builder::new()
        .filter_level(level(verbose, quiet))
        .parse_default_env()
        .format_timestamp_millis()
        .try_init()
}
