mod constraint;
pub(crate) mod helpers;
mod matcher;
mod predicates;

pub use constraint::{ConstraintSpec, Constraints};
#[cfg(feature = "predicates")]
pub use predicates::satisfies;
pub use predicates::Predicate;

use std::ops::Index;

use matcher::apply_constraint;

use crate::error::AssertionError;
use crate::level::Level;
use crate::record::Record;

/// Generates the per-level assertion methods from one fixed table, so they
/// cannot drift from [`Records::assert_level`].
macro_rules! impl_level_assertions {
    ($($method:ident => $variant:ident),* $(,)?) => {
        $(
            #[doc = concat!("Asserts that the next record was logged at the `", stringify!($method), "` level.")]
            ///
            /// `message` and `context` accept any constraint conversion; pass
            /// `()` to leave a slot unchecked.
            pub fn $method<M, C>(&mut self, message: M, context: C) -> Result<&mut Self, AssertionError>
            where
                M: Into<ConstraintSpec>,
                C: Into<ConstraintSpec>,
            {
                self.assert_level(Level::$variant, message, context)
            }
        )*
    };
}

/// A sequential assertion cursor over an ordered, immutable record sequence.
///
/// The cursor holds a snapshot: records emitted after it was created are not
/// visible to it. Each successful assertion consumes exactly one record;
/// [`Records::end`] then verifies nothing was left over. All assertion
/// methods return `Result<&mut Self, _>` so chains read top to bottom with
/// `?`:
///
/// ```
/// use log_testing::{context, Record, Records};
///
/// # fn main() -> Result<(), log_testing::AssertionError> {
/// let mut records = Records::new([
///     Record::from(context! { "message" => "Record 1." }),
///     Record::from(context! { "message" => "Record 2." }),
/// ]);
/// records
///     .assert(context! { "message" => "Record 1." })?
///     .assert(context! { "message" => "/^Record \\d\\.$/" })?
///     .end()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Records {
    elements: Vec<Record>,
    position: usize,
}

impl Records {
    pub fn new(items: impl IntoIterator<Item = Record>) -> Self {
        Self {
            elements: items.into_iter().collect(),
            position: 0,
        }
    }

    /// Asserts that the next record satisfies every given field constraint,
    /// then advances past it.
    ///
    /// Constraints are checked in declaration order and the first failure is
    /// returned; [`ConstraintSpec::Skip`] entries are not checked at all.
    /// Fails with [`AssertionError::EndOfSequence`] when every record has
    /// already been consumed.
    ///
    /// Accepts a [`Constraints`] builder or any [`Context`] map (interpreted
    /// through the constraint grammar).
    ///
    /// [`Context`]: crate::Context
    pub fn assert(
        &mut self,
        constraints: impl Into<Constraints>,
    ) -> Result<&mut Self, AssertionError> {
        if self.position >= self.elements.len() {
            return Err(AssertionError::EndOfSequence);
        }

        let index = self.position + 1;
        let item = self.elements[self.position].fields();
        let constraints: Constraints = constraints.into();

        for (field, constraint) in constraints.iter() {
            if constraint.is_skip() {
                continue;
            }
            apply_constraint(constraint, field, item, index, field)?;
        }

        self.position += 1;
        Ok(self)
    }

    /// Asserts that the next record was logged at `level`, with optional
    /// message and context constraints.
    ///
    /// The per-level methods ([`Records::error`], [`Records::info`], ...)
    /// are this call with the level pre-filled.
    pub fn assert_level<M, C>(
        &mut self,
        level: Level,
        message: M,
        context: C,
    ) -> Result<&mut Self, AssertionError>
    where
        M: Into<ConstraintSpec>,
        C: Into<ConstraintSpec>,
    {
        self.assert(
            Constraints::new()
                .field("level", level)
                .field("message", message)
                .field("context", context),
        )
    }

    impl_level_assertions! {
        emergency => Emergency,
        alert => Alert,
        critical => Critical,
        error => Error,
        warning => Warning,
        notice => Notice,
        info => Info,
        debug => Debug,
        trace => Trace,
    }

    /// Advances past `count` records without checking them.
    ///
    /// Consumption is one record at a time: when the sequence runs out
    /// mid-skip, the cursor is left where consumption stopped and the error
    /// names the total record count.
    pub fn skip(&mut self, count: usize) -> Result<&mut Self, AssertionError> {
        for _ in 0..count {
            if self.position >= self.elements.len() {
                return Err(AssertionError::SkipPastEnd {
                    total: self.elements.len(),
                });
            }
            self.position += 1;
        }
        Ok(self)
    }

    /// Verifies that every record has been consumed.
    pub fn end(&self) -> Result<(), AssertionError> {
        let excess = self.elements.len() - self.position;
        if excess > 0 {
            return Err(AssertionError::ExcessRecords { excess });
        }
        Ok(())
    }

    /// Runs a group of related assertions as one block.
    ///
    /// The callback receives the cursor itself; whatever it consumes stays
    /// consumed, and its first failure propagates.
    pub fn delegate<F>(&mut self, callback: F) -> Result<&mut Self, AssertionError>
    where
        F: FnOnce(&mut Records) -> Result<(), AssertionError>,
    {
        callback(self)?;
        Ok(self)
    }

    /// Total number of records in the sequence, consumed or not.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Index of the next unconsumed record; equals [`Records::len`] once the
    /// cursor is exhausted.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Read-only access to a record by 0-based index. Never advances the
    /// cursor.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.elements.get(index)
    }
}

impl Index<usize> for Records {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.elements[index]
    }
}

impl FromIterator<Record> for Records {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter)
    }
}
