//! Process-wide `tracing` setup for binaries embedding the quote engine.
//!
//! The library itself only emits events; nothing is printed until a host
//! calls [`init_default_logging`].

use std::io::{self, IsTerminal};
use std::sync::OnceLock;

use anyhow::Result;
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, reload, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

type SetStrFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;

static SET_LOG_LEVEL: OnceLock<SetStrFn> = OnceLock::new();

fn make_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn parse_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| anyhow::anyhow!("invalid log level '{directive}': {e}"))
}

fn store_level_handle<S>(handle: reload::Handle<EnvFilter, S>)
where
    S: Subscriber + Send + Sync + 'static,
{
    let _ = SET_LOG_LEVEL.set(Box::new(move |directive: &str| {
        handle
            .reload(parse_filter(directive)?)
            .map_err(|e| anyhow::anyhow!("filter reload failed: {e}"))
    }));
}

/// Changes the active log filter at runtime.
///
/// Accepts a bare level (`"warn"`, `"debug"`) or any `EnvFilter` directive
/// such as `"info,tree_core::store=trace"`.
pub fn set_log_level(level: &str) -> Result<()> {
    match SET_LOG_LEVEL.get() {
        Some(f) => f(level),
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Installs a stderr subscriber. Call once at startup; later calls are
/// ignored.
///
/// Level is INFO by default, or whatever `RUST_LOG` says.
pub fn init_default_logging() {
    let (level_filter, level_handle) = reload::Layer::new(make_filter());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .try_init()
        .is_ok()
    {
        store_level_handle(level_handle);
    }
}
