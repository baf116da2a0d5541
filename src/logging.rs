//! # Structured Logging Module
//!
//! Environment-aware structured logging on top of `tracing`. The subscriber
//! writes to stdout, either human-readable or as JSON lines, filtered by an
//! `EnvFilter` directive (`RUST_LOG` wins over the configured level).
//!
//! Domain helpers below keep field names consistent across the engine so log
//! lines can be grepped by `application_id`, `call_id` and `operation`.

use crate::config::{LogFormat, LoggingConfig};
use crate::state_machine::ApplicationStatus;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging once per process
///
/// Later calls are no-ops, and an already-installed global subscriber (for
/// example one set up by an embedding host) is left in place.
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

        let layer = match config.format {
            LogFormat::Json => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed(),
            LogFormat::Pretty => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed(),
        };

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            level = %config.level,
            format = ?config.format,
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Log a committed status transition
pub fn log_transition(
    application_id: &str,
    from: ApplicationStatus,
    to: ApplicationStatus,
    changed_by: &str,
    follow_up_call_id: Option<&str>,
) {
    tracing::info!(
        operation = crate::constants::operations::STATUS_TRANSITIONED,
        application_id = %application_id,
        from = %from,
        to = %to,
        changed_by = %changed_by,
        follow_up_call_id = follow_up_call_id,
        "📋 STATUS_TRANSITION"
    );
}

/// Log a call lifecycle operation
pub fn log_call_operation(
    operation: &str,
    application_id: &str,
    call_id: &str,
    call_type: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        application_id = %application_id,
        call_id = %call_id,
        call_type = %call_type,
        details = details,
        "📞 CALL_OPERATION"
    );
}

/// Log a rejected request with full context
pub fn log_error(operation: &str, entity_id: &str, error: &crate::error::LiaisonError) {
    tracing::warn!(
        operation = %operation,
        entity_id = %entity_id,
        error_kind = error.kind(),
        error = %error,
        "❌ REQUEST_REJECTED"
    );
}
