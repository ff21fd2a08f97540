pub mod build_info;

use std::{io, sync::Once};

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Every workspace crate logs at `info` unless `RUST_LOG` says otherwise.
const DEFAULT_DIRECTIVES: &[&str] = &[
    "finance_tracker=info",
    "finance_core=info",
    "finance_storage_json=info",
    "finance_config=info",
];

/// Installs the global subscriber. Logs go to stderr so command output on
/// stdout stays machine-readable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = default_filter(EnvFilter::from_default_env());

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    });
}

/// Adds the workspace defaults for targets `env` leaves unmentioned.
fn default_filter(env: EnvFilter) -> EnvFilter {
    let overridden = env.to_string();
    DEFAULT_DIRECTIVES
        .iter()
        .filter(|directive| {
            let target = directive.split('=').next().unwrap_or_default();
            !overridden.contains(target)
        })
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(env, EnvFilter::add_directive)
}
