use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default targets when RUST_LOG is unset: keep the actor runtime and
/// query layer quiet, everything trial-related at info.
const DEFAULT_FILTER: &str = "info,actix_web=info,actix_web_actors=warn,sea_orm=warn,sqlx=warn";

pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json()
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
