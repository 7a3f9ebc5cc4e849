use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "bndict_core=info,bndict_cli=info";
const VERBOSE_FILTER: &str = "bndict_core=debug,bndict_cli=debug";

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over the
/// built-in filter.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        };
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
            )
            .init();
    });
}
