use tracing_subscriber::EnvFilter;

use crate::consts::LOG_ENV;

/// Diagnostics go to stderr; quiet unless `--debug` or `HK_LOG` asks otherwise.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::new("hk=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
