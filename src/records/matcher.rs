use serde_json::{Map, Value};

use super::constraint::ConstraintSpec;
use super::helpers::{format_value, join_keys};
use super::predicates::{EqualTo, MatchesPattern, Predicate};
use crate::error::AssertionError;

/// Resolves one field constraint against a record, recursing into nested
/// mappings.
///
/// `index` is the 1-based record number used in diagnostics; `label` is the
/// dotted path accumulated so far (equal to `field` at the top level).
/// [`ConstraintSpec::Skip`] returns before the presence check, so a skipped
/// field may be absent from the record entirely.
pub(crate) fn apply_constraint(
    constraint: &ConstraintSpec,
    field: &str,
    item: &Map<String, Value>,
    index: usize,
    label: &str,
) -> Result<(), AssertionError> {
    if constraint.is_skip() {
        return Ok(());
    }

    let Some(value) = item.get(field) else {
        return Err(AssertionError::MissingField {
            index,
            label: label.to_owned(),
            present: join_keys(item),
        });
    };

    match constraint {
        ConstraintSpec::Skip => Ok(()),
        ConstraintSpec::Nested(constraints) => {
            let Some(nested) = value.as_object() else {
                return Err(AssertionError::ValueMismatch {
                    index,
                    label: label.to_owned(),
                    explanation: format!(
                        "expected a nested mapping, got {}.",
                        format_value(value)
                    ),
                });
            };
            for (sub_field, sub_constraint) in constraints.iter() {
                apply_constraint(
                    sub_constraint,
                    sub_field,
                    nested,
                    index,
                    &format!("{}.{}", label, sub_field),
                )?;
            }
            Ok(())
        }
        ConstraintSpec::Predicate(predicate) => check(predicate.as_ref(), value, index, label),
        ConstraintSpec::Pattern(raw) => {
            check(&MatchesPattern::new(raw.clone()), value, index, label)
        }
        ConstraintSpec::Literal(expected) => {
            check(&EqualTo(expected.clone()), value, index, label)
        }
    }
}

fn check(
    predicate: &dyn Predicate,
    value: &Value,
    index: usize,
    label: &str,
) -> Result<(), AssertionError> {
    predicate
        .evaluate(value)
        .map_err(|explanation| AssertionError::ValueMismatch {
            index,
            label: label.to_owned(),
            explanation,
        })
}
