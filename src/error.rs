use thiserror::Error;

/// A failed log assertion.
///
/// Every variant is a test-failure-class condition: nothing is transient or
/// recoverable. The cursor never catches or aggregates these; the first
/// failure unwinds to the test body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    #[error("There are not enough log records.")]
    EndOfSequence,

    #[error("Record #{index}: missing field \"{label}\". Existed fields: {present}.")]
    MissingField {
        index: usize,
        label: String,
        present: String,
    },

    #[error("Record #{index}: value of the \"{label}\" field does not match given constraint.\n{explanation}")]
    ValueMismatch {
        index: usize,
        label: String,
        explanation: String,
    },

    #[error("Can not skip record #{total}: the end of the log has been reached.")]
    SkipPastEnd { total: usize },

    #[error("Excessive log records: {excess}.")]
    ExcessRecords { excess: usize },
}
