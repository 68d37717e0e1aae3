use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

const TIME_FORMAT: &str = "[%H:%M:%S]";

/// Install the global subscriber: plain `[HH:MM:SS] message` lines on
/// stdout, `info` and up unless `RUST_LOG` says otherwise.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_owned()))
        .with_level(false)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stdout)
        .init();
}
