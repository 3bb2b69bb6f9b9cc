use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logger do CLI/servidor. `RUST_LOG` tem precedência sobre `verbose`.
pub fn init_logger(verbose: bool) {
    let padrao = if verbose { "painel_obras=debug,actix_web=info" } else { "painel_obras=info,actix_web=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(padrao));

    // try_init: testes e reexecuções podem já ter um subscriber global
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
