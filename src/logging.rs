// SPDX-License-Identifier: PMPL-1.0-or-later

//! Diagnostic logging setup for the CLI

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TSCAT_LOG";

/// Filter directive used when `TSCAT_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "tscat=debug"
    } else {
        "warn"
    }
}

fn filter(verbose: bool) -> EnvFilter {
    // -v wins over the environment so it always has a visible effect.
    if verbose {
        return EnvFilter::new(default_directive(true));
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(false)))
}

/// Install the global subscriber. Logs go to stderr; calling this twice is
/// harmless.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
