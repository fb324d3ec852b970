//! Names shared by every lifecycle log line

/// Module that emitted the line
pub const FIELD_COMPONENT: &str = "component";
/// Operation name, e.g. `notify_update`
pub const FIELD_OP: &str = "op";
/// One of the `EVENT_*` values below
pub const FIELD_EVENT: &str = "event";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
/// The operation had nothing to do (inactive dispatcher)
pub const EVENT_SKIPPED: &str = "skipped";
