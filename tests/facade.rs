//! The process-global facade hook gets its own test binary: the `log` crate
//! accepts one logger per process.

use log_testing::{context, AssertionError, TestLogger};

#[test]
fn test_records_emitted_through_the_facade_are_captured() -> Result<(), AssertionError> {
    let logger = TestLogger::install().expect("no other logger is installed in this process");

    log::info!(port = 8080; "Application started");
    log::warn!("Connection lost");
    log::debug!(attempt = 2, backoff_ms = 250; "retrying");

    logger
        .records()
        .info("Application started", context! { "port" => 8080 })?
        .warning("Connection lost", ())?
        .debug("retrying", context! { "attempt" => 2, "backoff_ms" => 250 })?
        .end()
}
