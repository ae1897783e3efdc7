//! Facade Capture Example
//!
//! Installs a [`TestLogger`] as the process-global `log` sink and asserts on
//! records emitted through the ordinary logging macros.
//!
//! Run with: `cargo run --example facade_capture`

use log_testing::{context, TestLogger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logger = TestLogger::install()?;

    // Anything in the process that logs through the facade is captured,
    // structured key-value pairs included.
    log::info!(version = "1.4.2"; "service starting");
    log::trace!("config loaded");
    log::error!(code = 504; "upstream timed out");

    logger
        .records()
        .info("service starting", context! { "version" => "1.4.2" })?
        .trace("config loaded", ())?
        .error("/timed out$/", context! { "code" => 504 })?
        .end()?;

    println!("{}\n\nall assertions passed", logger.dump());
    Ok(())
}
