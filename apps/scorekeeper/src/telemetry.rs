use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// JSON logs on stderr, so stdout stays free for event lines.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "debug,scorekeeper=debug"
    } else {
        "warn,scorekeeper=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
