//! Sequential Assertion Example
//!
//! Demonstrates the cursor API: per-level assertions, patterns, nested
//! context constraints, skipping, delegation, and the end-of-sequence check.
//!
//! Run with: `cargo run --example sequential_assertions`

use log_testing::{context, AssertionError, Level, TestLogger};

fn main() -> Result<(), AssertionError> {
    let logger = TestLogger::new();

    // The application under test would do this part.
    logger.info("Application started", context! { "port" => 8080 });
    logger.debug("connection accepted", context! { "peer" => "10.0.0.7" });
    logger.warning("slow query", context! { "ms" => 170, "query" => "SELECT 1" });
    logger.error("Connection lost", context! { "peer" => "10.0.0.7" });

    println!("{}\n", logger.dump());

    // Walk the whole sequence in order.
    logger
        .records()
        .info("Application started", context! { "port" => 8080 })?
        .debug("/^connection/", ())?
        .delegate(|records| {
            // Group related assertions under one block.
            records
                .warning((), context! { "ms" => 170 })?
                .error("Connection lost", context! { "peer" => "/^10\\./" })?;
            Ok(())
        })?
        .end()?;
    println!("full walk: ok");

    // Skip what the test does not care about.
    let mut records = logger.records();
    records.skip(2)?.warning((), ())?.error((), ())?.end()?;
    println!("skip walk: ok");

    // Failures carry the record number and the dotted field path.
    let err = logger
        .records()
        .assert(context! { "context" => context! { "missing" => true } })
        .unwrap_err();
    println!("\nexample failure:\n{}", err);

    // Inspection without consuming.
    let records = logger.records();
    println!("\ncaptured {} records, first level: {:?}", records.len(), records[0].level());
    assert_eq!(records[0].level(), Some(Level::Info.as_str()));

    Ok(())
}
