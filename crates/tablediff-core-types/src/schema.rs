//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Collection sizes
pub const FIELD_OLD_LEN: &str = "old_len";
pub const FIELD_NEW_LEN: &str = "new_len";
pub const FIELD_SECTION_COUNT: &str = "section_count";

// Operation group sizes
pub const FIELD_UPDATED: &str = "updated";
pub const FIELD_DELETED: &str = "deleted";
pub const FIELD_INSERTED: &str = "inserted";
pub const FIELD_MOVED: &str = "moved";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
