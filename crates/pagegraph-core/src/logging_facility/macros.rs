//! Canonical logging macros
//!
//! Field keys and event names are the constants in
//! `pagegraph_core_types::schema` (re-exported as `pagegraph_core::schema`).

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use pagegraph_core::log_op_start;
/// log_op_start!("entity.create");
/// log_op_start!("entity.create", entity_id = "chore_chart");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use pagegraph_core::log_op_end;
/// log_op_end!("rel.set", duration_ms = 0u64);
/// log_op_end!("rel.set", duration_ms = 0u64, sequence = 7u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log a rejected operation
///
/// `$err` is anything convertible into a
/// [`Rejection`](crate::errors::Rejection); kind and code are logged as
/// `err.kind` / `err.code`.
///
/// # Example
///
/// ```
/// # use pagegraph_core::{log_op_error, errors::PageGraphError};
/// let err = PageGraphError::EntityNotFound { entity_id: "ghost".to_string() };
/// log_op_error!("entity.update", err, duration_ms = 0u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let rejection: $crate::errors::Rejection = $err.into();
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = rejection.kind().as_str(),
            err.code = rejection.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let rejection: $crate::errors::Rejection = $err.into();
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = rejection.kind().as_str(),
            err.code = rejection.code(),
            $($field)*
        );
    }};
}
