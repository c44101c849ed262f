use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Targets that log at the `-v` level; everything else stays at `warn`.
const TARGETS: [&str; 2] = ["ringcal", "ring_calendar"];

/// Maps the `-v` count to a level: none = warn, `-v` = info, `-vv` = debug,
/// more = trace.
const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber on stderr. A set `RUST_LOG` wins over `-v`.
pub fn init(verbosity: u8) {
    let level = level_for(verbosity);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        TARGETS.iter().fold(
            EnvFilter::default().add_directive(LevelFilter::WARN.into()),
            |filter, target| match format!("{target}={level}").parse() {
                Ok(directive) => filter.add_directive(directive),
                Err(_) => filter,
            },
        )
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .init();
}
