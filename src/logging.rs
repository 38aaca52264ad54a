use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "NEWSCHECK_LOG";

/// Default filter for a given `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "newscheck=warn",
        1 => "newscheck=info",
        _ => "newscheck=debug",
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries results.
///
/// `NEWSCHECK_LOG` takes precedence over the verbosity flag.
pub fn init(verbosity: u8, color: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(color)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(default_directive(0), "newscheck=warn");
        assert_eq!(default_directive(1), "newscheck=info");
        assert_eq!(default_directive(2), "newscheck=debug");
        assert_eq!(default_directive(7), "newscheck=debug");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(0, false);
        init(2, false);
    }
}
