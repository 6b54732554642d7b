//! Basic call logger usage example
//!
//! Wires an interceptor to a console logger and reports a few calls the way
//! a proxy or wrapper would.
//!
//! Run with: cargo run --example basic_usage

use rust_call_logger::prelude::*;
use rust_call_logger::{impl_as_log_value, log_args};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Customer {
    name: String,
    password: String,
    visits: u32,
}

impl Loggable for Customer {
    fn fields(&self) -> Vec<(&'static str, LogValue)> {
        vec![
            ("name", self.name.as_log_value()),
            ("password", self.password.as_log_value()),
            ("visits", self.visits.as_log_value()),
        ]
    }
}

impl_as_log_value!(Customer);

#[derive(Debug, thiserror::Error)]
#[error("customer {0} is not registered")]
struct UnknownCustomer(String);

fn greet(customer: &Customer) -> std::result::Result<String, UnknownCustomer> {
    if customer.visits == 0 {
        return Err(UnknownCustomer(customer.name.clone()));
    }
    Ok(format!("Welcome back, {}", customer.name))
}

fn main() -> Result<()> {
    println!("=== Rust Call Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .category_level("rust_call_logger", LogLevel::Info)
        .appender(ConsoleAppender::new())
        .build();

    let properties = LoggerProperties::from_toml_str(
        r#"
        [reflection-to-string]
        base-types = ["Customer"]
        "#,
    )?;

    let interceptor = Interceptor::builder()
        .properties(properties)
        .sink(Arc::new(logger))
        .build()?;

    let method = MethodDescriptor::new("demo::Greeter", "greet")
        .param("demo::Customer")
        .returns("Result<String, UnknownCustomer>");

    println!("1. A successful call:");
    let regular = Customer {
        name: "ann".into(),
        password: "hunter2".into(),
        visits: 3,
    };
    let invocation = Invocation::new(&method, log_args![regular]);
    let greeting = interceptor.on_around_invoke(&invocation, &LogAround::default(), || greet(&regular));
    println!("   -> {:?}\n", greeting);

    println!("2. A failing call with an elapsed-time limit:");
    let newcomer = Customer {
        name: "bob".into(),
        password: "s3cret".into(),
        visits: 0,
    };
    let invocation = Invocation::new(&method, log_args![newcomer]);
    let config = LogAround::new().with_elapsed_time_limit(1, ElapsedUnit::Nanos);
    let greeting = interceptor.on_around_invoke(&invocation, &config, || greet(&newcomer));
    println!("   -> {:?}\n", greeting);

    println!("3. A redacted parameter:");
    let login = MethodDescriptor::new("demo::Auth", "login")
        .param("&str")
        .redacted_param("&str", Redaction::Hidden);
    interceptor.on_entry(
        &Invocation::new(&login, log_args!["ann", "hunter2"]),
        &LogBefore::new().with_level(LogLevel::Info),
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
