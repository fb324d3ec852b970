//! Operation lifecycle macros
//!
//! Every lifecycle line carries `component` (the calling module), `op` and
//! `event`, using the event names from `turnhook_core_types::schema`.
//! Extra `key = value` fields follow the usual `tracing` syntax.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr $(,)?) => {
        tracing::$level!(component = module_path!(), op = $op, event = $event)
    };
    ($level:ident, $op:expr, $event:expr, $($field:tt)+) => {
        tracing::$level!(component = module_path!(), op = $op, event = $event, $($field)+)
    };
}

/// Info line marking the start of `op`
///
/// ```
/// # use turnhook_core::log_op_start;
/// log_op_start!("notify_update");
/// log_op_start!("notify_update", step = 3u64);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::turnhook_core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// Info line for a completed `op`; `duration_ms` comes first.
///
/// ```
/// # use turnhook_core::log_op_end;
/// log_op_end!("notify_update", duration_ms = 3u64, changes_len = 1u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::turnhook_core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Trace line for an `op` that returned without doing anything.
///
/// ```
/// # use turnhook_core::log_op_skipped;
/// log_op_skipped!("notify_next", reason = "no webhook configured");
/// ```
#[macro_export]
macro_rules! log_op_skipped {
    ($op:expr, reason = $reason:expr $(,)?) => {
        $crate::__log_op_event!(
            trace,
            $op,
            $crate::turnhook_core_types::schema::EVENT_SKIPPED,
            reason = $reason
        )
    };
}

/// Error line for a failed `op`.
///
/// `$err` is converted into an [`ExError`](crate::errors::ExError) and its
/// kind and stable code are logged as `err.kind` and `err.code`.
///
/// ```
/// # use turnhook_core::{log_op_error, errors::TurnhookError};
/// let err = TurnhookError::InvalidSnapshot { reason: "not an array".to_string() };
/// log_op_error!("parse_snapshot", err, duration_ms = 1u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            $crate::turnhook_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
