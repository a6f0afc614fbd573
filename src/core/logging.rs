//! Diagnostics on stderr via tracing
//!
//! Status lines are results and go to stdout; everything here is for debugging.

use tracing::Level;

/// Pick the log level from the global flags. Quiet wins over verbose.
pub fn level(verbose: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Install the global fmt subscriber
pub fn init(verbose: bool, quiet: bool) {
    tracing_subscriber::fmt()
        .with_max_level(level(verbose, quiet))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_selection() {
        assert_eq!(level(false, false), Level::WARN);
        assert_eq!(level(true, false), Level::DEBUG);
        assert_eq!(level(false, true), Level::ERROR);
        assert_eq!(level(true, true), Level::ERROR);
    }
}
