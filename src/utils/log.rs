use colog::format::CologStyle;
use env_logger::Builder;
use log::{Level, LevelFilter};

struct CustomLevelTokens;

impl CologStyle for CustomLevelTokens {
    fn level_token(&self, level: &Level) -> &str {
        match *level {
            Level::Error => "ERR",
            Level::Warn => "WRN",
            Level::Info => "INF",
            Level::Debug => "DBG",
            Level::Trace => "TRC",
        }
    }
}

pub struct Logger;

impl Logger {
    /// Logs go to stderr so they don't interleave with the chat transcript on stdout.
    pub fn init(level: Option<LevelFilter>) {
        Builder::new()
            .filter(Some("concierge"), level.unwrap_or(LevelFilter::Info))
            .filter(Some("rig"), LevelFilter::Warn)
            .filter(Some("reqwest"), LevelFilter::Warn)
            .target(env_logger::Target::Stderr)
            .format(colog::formatter(CustomLevelTokens))
            .write_style(env_logger::WriteStyle::Auto)
            .init();
    }
}
