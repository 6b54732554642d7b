//! Macros for describing intercepted calls and for direct logging.
//!
//! # Examples
//!
//! ```
//! use rust_call_logger::prelude::*;
//! use rust_call_logger::{info, log_args, method};
//!
//! let method = method!("shop::Cart", add(String, u32) -> bool);
//! assert_eq!(method.signature(), "bool add(String, u32)");
//!
//! let args = log_args!["apple", 3u32];
//! assert_eq!(args.len(), 2);
//!
//! let logger = Logger::new();
//! info!(logger, "shop::Cart", "cart holds {} items", 3);
//! ```

/// Collect call arguments into a `Vec<LogValue>`.
///
/// Each argument is borrowed and converted through `AsLogValue`.
///
/// ```
/// use rust_call_logger::log_args;
/// use rust_call_logger::interpolation::LogValue;
///
/// let name = String::from("ada");
/// let args = log_args![name, 36u8, Some(1.5f64)];
/// assert!(matches!(args[1], LogValue::UInt(36)));
/// assert_eq!(name, "ada");
/// ```
#[macro_export]
macro_rules! log_args {
    () => {
        ::std::vec::Vec::<$crate::interpolation::LogValue>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        vec![$($crate::interpolation::AsLogValue::as_log_value(&$arg)),+]
    };
}

/// Build a `MethodDescriptor` from a Rust-like signature.
///
/// ```
/// use rust_call_logger::method;
///
/// let m = method!("shop::Orders", find(u64) -> Option<shop::Order>);
/// assert_eq!(m.return_type(), "Option<shop::Order>");
/// assert_eq!(m.signature(), "Option<Order> find(u64)");
///
/// let unit = method!("shop::Orders", purge());
/// assert!(unit.is_void());
/// ```
#[macro_export]
macro_rules! method {
    ($declaring:expr, $name:ident ( $($param:ty),* $(,)? ) -> $ret:ty) => {
        $crate::method!($declaring, $name($($param),*)).returns(stringify!($ret))
    };
    ($declaring:expr, $name:ident ( $($param:ty),* $(,)? )) => {
        $crate::advice::MethodDescriptor::new($declaring, stringify!($name))
            $(.param(stringify!($param)))*
    };
}

/// Implement `AsLogValue` for `Loggable + Clone` types so they can be passed
/// by reference.
///
/// ```
/// use rust_call_logger::impl_as_log_value;
/// use rust_call_logger::interpolation::{AsLogValue, LogValue, Loggable};
///
/// #[derive(Debug, Clone)]
/// struct Point { x: i32 }
///
/// impl Loggable for Point {
///     fn fields(&self) -> Vec<(&'static str, LogValue)> {
///         vec![("x", self.x.as_log_value())]
///     }
/// }
/// impl_as_log_value!(Point);
///
/// assert!(matches!(Point { x: 1 }.as_log_value(), LogValue::Object(_)));
/// ```
#[macro_export]
macro_rules! impl_as_log_value {
    ($($t:ty),+ $(,)?) => {$(
        impl $crate::interpolation::AsLogValue for $t {
            fn as_log_value(&self) -> $crate::interpolation::LogValue {
                $crate::interpolation::LogValue::object(::std::clone::Clone::clone(self))
            }
        }
    )+};
}

/// Log a formatted message under a category.
///
/// ```
/// # use rust_call_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_call_logger::log;
/// log!(logger, "billing", LogLevel::Info, "Simple message");
/// log!(logger, "billing", LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $category:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($category, $level, format!($($arg)+))
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $category:expr, $($arg:tt)+) => {
        $crate::log!($logger, $category, $crate::LogLevel::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $category:expr, $($arg:tt)+) => {
        $crate::log!($logger, $category, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $category:expr, $($arg:tt)+) => {
        $crate::log!($logger, $category, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $category:expr, $($arg:tt)+) => {
        $crate::log!($logger, $category, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $category:expr, $($arg:tt)+) => {
        $crate::log!($logger, $category, $crate::LogLevel::Error, $($arg)+)
    };
}
