//! # Rust Call Logger
//!
//! Declarative logging for intercepted method calls.
//!
//! An interception mechanism (a proxy, a wrapper, hand-written glue) reports
//! each call to an [`Interceptor`](advice::Interceptor) together with a
//! logging intent. The interceptor resolves levels and templates against
//! process-wide defaults, renders the call's signature, arguments, return
//! value, error and elapsed time into `{token}` templates, and emits the
//! result to a [`LogSink`].
//!
//! ## Features
//!
//! - **Lazy templates**: values are only rendered when a token asks for them
//!   and the level is enabled
//! - **Redaction**: hide whole parameters or individual fields
//! - **Converter chain**: sequences, optionals, pages and field-wise rendering
//!   of allow-listed types
//! - **Two-level configuration**: per-call overrides on top of defaults
//!   loaded from TOML or JSON
//! - **Bundled logger**: per-category levels with console, file and memory
//!   appenders
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use rust_call_logger::prelude::*;
//! use rust_call_logger::log_args;
//!
//! let memory = MemoryAppender::new();
//! let logger = Logger::builder()
//!     .min_level(LogLevel::Debug)
//!     .category_level("rust_call_logger", LogLevel::Warn)
//!     .appender(memory.clone())
//!     .build();
//! let interceptor = Interceptor::builder().sink(Arc::new(logger)).build().unwrap();
//!
//! let method = MethodDescriptor::new("shop::Cart", "add").param("&str").param("u32").returns("usize");
//! let invocation = Invocation::new(&method, log_args!["apple", 2u32]);
//! let count = interceptor.on_around_invoke(&invocation, &LogAround::default(), || {
//!     Ok::<usize, std::fmt::Error>(2)
//! });
//!
//! assert_eq!(count, Ok(2));
//! assert_eq!(memory.messages()[0], "Entering [usize add(&str, u32)] with parameters [apple, 2]");
//! ```

pub mod advice;
pub mod appenders;
pub mod config;
pub mod core;
pub mod interpolation;
pub mod macros;
#[cfg(feature = "paging")]
pub mod paging;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;
    pub use crate::appenders::{FileAppender, MemoryAppender};
    pub use crate::advice::{
        CaughtError, ElapsedUnit, ErrorMatcher, Interceptor, InterceptorBuilder, Invocation,
        LogAfter, LogAround, LogBefore, MethodDescriptor,
    };
    pub use crate::config::{ConverterProperties, LoggerProperties};
    pub use crate::core::{
        Appender, LevelOverride, LogEntry, LogLevel, LogSink, Logger, LoggerBuilder, LoggerError,
        Result,
    };
    pub use crate::interpolation::{AsLogValue, LogValue, Loggable, Redaction};
    pub use crate::log_args;
}

#[cfg(feature = "console")]
pub use appenders::ConsoleAppender;
pub use advice::{Interceptor, InterceptorBuilder};
pub use appenders::{FileAppender, MemoryAppender};
pub use core::{
    Appender, LevelOverride, LogEntry, LogLevel, LogSink, Logger, LoggerBuilder, LoggerError,
    Result,
};
