use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;

/// Route `tracing` events to the browser console.
///
/// Timestamps are left out because `std::time` is unavailable in the
/// browser; the console adds its own.
pub fn init(level: LevelFilter) {
    let console = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(level);

    tracing_subscriber::registry().with(console).init();
}
