//! Sequential assertions over captured structured log records.
//!
//! This library lets a test capture the log records an application emits and
//! then assert, record by record, that the sequence matches expected field
//! values or patterns, in order, with no gaps and no leftovers.
//!
//! # Features
//!
//! - **Sequential Cursor**: every assertion consumes exactly one record;
//!   [`Records::end`] verifies nothing was left over
//! - **Recursive Constraints**: exact values, `/regex/` patterns, nested
//!   field maps, and custom [`Predicate`] objects
//! - **Per-Level Shorthand**: `records.error(...)`, `records.info(...)` and
//!   friends for every severity level
//! - **Facade Capture**: [`TestLogger`] implements [`log::Log`], so records
//!   emitted through `log::info!`-style macros (including structured
//!   key-value pairs) are captured too
//! - **Precise Failures**: one message per failing test, naming the 1-based
//!   record index and the dotted field path
//!
//! # Quick Start
//!
//! ```
//! use log_testing::{context, TestLogger};
//!
//! # fn main() -> Result<(), log_testing::AssertionError> {
//! let logger = TestLogger::new();
//!
//! // Application code under test emits records...
//! logger.info("Application started", context! { "port" => 8080 });
//! logger.error("Connection lost", context! { "peer" => "10.0.0.7" });
//!
//! // ...and the test walks them in order.
//! logger.records()
//!     .info("Application started", ())?
//!     .error("/^Connection/", context! { "peer" => "10.0.0.7" })?
//!     .end()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Constraint grammar
//!
//! Each field of an assertion takes one of:
//!
//! - `()` or `None`: do not check the field (its absence is fine too)
//! - a literal (`"text"`, `42`, `true`): strict equality
//! - a string starting with `/`: regular expression over the field's string
//!   form, with optional trailing flags (`"/record \\d/i"`)
//! - a [`Context`] map or [`Constraints`] builder: recurse into a nested
//!   mapping, reporting dotted paths such as `context.request_id`
//! - [`ConstraintSpec::predicate`]: any custom [`Predicate`]
//!
//! # Assertion API
//!
//! - [`Records::assert`]: check the next record's fields and consume it
//! - [`Records::skip`]: consume records without checking them
//! - [`Records::delegate`]: group related assertions under one callback
//! - [`Records::end`]: fail if unconsumed records remain
//!
//! With the `predicates` cargo feature, [`satisfies`] adapts any
//! [`predicates`](https://docs.rs/predicates) crate predicate into a field
//! constraint.

mod error;
mod level;
mod logger;
mod record;
mod records;

pub use error::AssertionError;
pub use level::{Level, ParseLevelError};
pub use logger::TestLogger;
pub use record::{Context, Record};
#[cfg(feature = "predicates")]
pub use records::satisfies;
pub use records::{ConstraintSpec, Constraints, Predicate, Records};
