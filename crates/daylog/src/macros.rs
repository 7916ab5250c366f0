//! Call-site capturing log macros.

/// Logs at [`Level::Debug`](crate::Level::Debug), capturing the call site.
#[macro_export]
macro_rules! log_debug {
    ($log:expr, $($arg:tt)*) => {
        $log.log($crate::Level::Debug, format_args!($($arg)*), file!(), line!())
    };
}

/// Logs at [`Level::Info`](crate::Level::Info), capturing the call site.
#[macro_export]
macro_rules! log_info {
    ($log:expr, $($arg:tt)*) => {
        $log.log($crate::Level::Info, format_args!($($arg)*), file!(), line!())
    };
}

/// Logs at [`Level::Warn`](crate::Level::Warn), capturing the call site.
#[macro_export]
macro_rules! log_warn {
    ($log:expr, $($arg:tt)*) => {
        $log.log($crate::Level::Warn, format_args!($($arg)*), file!(), line!())
    };
}

/// Logs at [`Level::Error`](crate::Level::Error), capturing the call site.
#[macro_export]
macro_rules! log_error {
    ($log:expr, $($arg:tt)*) => {
        $log.log($crate::Level::Error, format_args!($($arg)*), file!(), line!())
    };
}

/// Logs at [`Level::Fatal`](crate::Level::Fatal), capturing the call site.
#[macro_export]
macro_rules! log_fatal {
    ($log:expr, $($arg:tt)*) => {
        $log.log($crate::Level::Fatal, format_args!($($arg)*), file!(), line!())
    };
}
