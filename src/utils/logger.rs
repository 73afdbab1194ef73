use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn build_filter(verbose: bool, directive: Option<&str>) -> EnvFilter {
    let default_directive = match directive {
        Some(directive) => directive.to_string(),
        None if verbose => "hospital_dispatch=debug,info".to_string(),
        None => "hospital_dispatch=info".to_string(),
    };

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

// Logs go to stderr so they never interleave with the menu on stdout.
pub fn init_cli_logger(verbose: bool, directive: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, directive))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool, directive: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, directive))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
