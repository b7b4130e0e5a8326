use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Install a terminal logger on stderr. Returns false when a logger was
/// already installed, which leaves the existing one in place.
pub fn init(level: LevelFilter) -> bool {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).is_ok()
}

/// "error" | "warn" | "info" | "debug" | "trace" | "off"; anything else is "info".
pub fn level_from_str(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}
