//! Operation boundary macros
//!
//! An operation logs one `start` event and then exactly one `end` or
//! `end_error` event. All three carry `component` (the calling module) and
//! `op`; the closing events also carry `duration_ms`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event
            $(, $($field)*)?
        )
    };
}

/// Open an operation
///
/// ```
/// # use tablediff_core::log_op_start;
/// log_op_start!("reconcile");
/// log_op_start!("reconcile", old_len = 3usize, new_len = 4usize);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            tablediff_core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// Close an operation successfully
///
/// ```
/// # use tablediff_core::log_op_end;
/// log_op_end!("reconcile", duration_ms = 42u64, moved = 2usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            tablediff_core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Close an operation with an error
///
/// `$err` is anything convertible into `ExError`; its kind and stable code
/// are logged as `err_kind` and `err_code`.
///
/// ```
/// # use tablediff_core::{log_op_error, errors::DiffError};
/// let err = DiffError::SectionOutOfRange { index: 4, count: 2 };
/// log_op_error!("section", err, duration_ms = 0u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            tablediff_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
