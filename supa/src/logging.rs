use tracing_subscriber::{EnvFilter, fmt};

const QUIET_FILTER: &str = "warn,supatype_gen=info";
const VERBOSE_FILTER: &str = "warn,supatype=debug,supatype_core=debug,supatype_env=debug,supatype_gen=debug";

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` enables debug output
/// for the supatype crates. Logs go to stderr so stdout stays clean.
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { VERBOSE_FILTER } else { QUIET_FILTER }));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
