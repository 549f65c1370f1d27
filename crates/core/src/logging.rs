//! Initialisation du logging pour MolFS Core

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise le système de logging (filtre via RUST_LOG)
pub fn init_logging() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();
}

/// Macro pour tracer les opérations du pipeline
#[macro_export]
macro_rules! log_operation {
    ($name:expr, $block:block) => {{
        let span = tracing::info_span!($name);
        let _enter = span.enter();
        tracing::debug!("début de l'opération");
        let result = $block;
        tracing::debug!("fin de l'opération");
        result
    }};
}
