use std::slice;
use std::sync::Arc;

use serde_json::Value;

use super::predicates::Predicate;
use crate::level::Level;
use crate::record::Context;

/// What a single record field must satisfy.
///
/// The grammar is recursive: a string beginning with `/` is a regular
/// expression, a map recurses into a nested mapping field, and everything
/// else is matched by strict equality. [`ConstraintSpec::Skip`] leaves the
/// field unchecked, including its presence.
///
/// Most call sites never name this type: `Into<ConstraintSpec>` conversions
/// cover plain values (`"foo"`, `42`, `true`), pattern strings (`"/^foo/"`),
/// nested [`Constraints`] or [`Context`] maps, `()` and `None` for
/// [`ConstraintSpec::Skip`], and [`serde_json::Value`] trees which are
/// interpreted recursively (JSON `null` becomes `Skip`).
#[derive(Debug, Clone)]
pub enum ConstraintSpec {
    /// Do not check this field at all.
    Skip,
    /// Strict equality against a literal value.
    Literal(Value),
    /// Regular expression over the field's string form, in bare or
    /// `/body/flags` notation.
    Pattern(String),
    /// Recurse into a nested mapping field.
    Nested(Constraints),
    /// Delegate to an externally supplied predicate.
    Predicate(Arc<dyn Predicate>),
}

impl ConstraintSpec {
    /// Wraps a custom [`Predicate`] implementation.
    pub fn predicate(predicate: impl Predicate + 'static) -> Self {
        ConstraintSpec::Predicate(Arc::new(predicate))
    }

    pub(crate) fn is_skip(&self) -> bool {
        matches!(self, ConstraintSpec::Skip)
    }
}

fn from_str_form(s: String) -> ConstraintSpec {
    if s.starts_with('/') {
        ConstraintSpec::Pattern(s)
    } else {
        ConstraintSpec::Literal(Value::String(s))
    }
}

impl From<&str> for ConstraintSpec {
    fn from(s: &str) -> Self {
        from_str_form(s.to_owned())
    }
}

impl From<String> for ConstraintSpec {
    fn from(s: String) -> Self {
        from_str_form(s)
    }
}

impl From<bool> for ConstraintSpec {
    fn from(value: bool) -> Self {
        ConstraintSpec::Literal(Value::from(value))
    }
}

impl From<i32> for ConstraintSpec {
    fn from(value: i32) -> Self {
        ConstraintSpec::Literal(Value::from(value))
    }
}

impl From<i64> for ConstraintSpec {
    fn from(value: i64) -> Self {
        ConstraintSpec::Literal(Value::from(value))
    }
}

impl From<u32> for ConstraintSpec {
    fn from(value: u32) -> Self {
        ConstraintSpec::Literal(Value::from(value))
    }
}

impl From<u64> for ConstraintSpec {
    fn from(value: u64) -> Self {
        ConstraintSpec::Literal(Value::from(value))
    }
}

impl From<f64> for ConstraintSpec {
    fn from(value: f64) -> Self {
        ConstraintSpec::Literal(Value::from(value))
    }
}

impl From<Level> for ConstraintSpec {
    fn from(level: Level) -> Self {
        ConstraintSpec::Literal(Value::String(level.as_str().to_owned()))
    }
}

/// Leaves the field unchecked.
impl From<()> for ConstraintSpec {
    fn from(_: ()) -> Self {
        ConstraintSpec::Skip
    }
}

/// `None` leaves the field unchecked.
impl<T: Into<ConstraintSpec>> From<Option<T>> for ConstraintSpec {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => ConstraintSpec::Skip,
        }
    }
}

impl From<Constraints> for ConstraintSpec {
    fn from(constraints: Constraints) -> Self {
        ConstraintSpec::Nested(constraints)
    }
}

impl From<Context> for ConstraintSpec {
    fn from(map: Context) -> Self {
        ConstraintSpec::Nested(map.into())
    }
}

/// Interprets a JSON tree through the constraint grammar: `null` becomes
/// [`ConstraintSpec::Skip`], strings beginning with `/` become patterns,
/// objects recurse, and everything else is a literal.
impl From<Value> for ConstraintSpec {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ConstraintSpec::Skip,
            Value::String(s) => from_str_form(s),
            Value::Object(map) => ConstraintSpec::Nested(map.into()),
            other => ConstraintSpec::Literal(other),
        }
    }
}

/// An ordered set of per-field constraints for one record.
///
/// Declaration order is significant: fields are checked in the order they
/// were added and the first failure is reported.
///
/// # Example
///
/// ```
/// use log_testing::{context, Constraints};
///
/// let constraints = Constraints::new()
///     .field("level", "error")
///     .field("message", "/^Connection lost/")
///     .field("context", context! { "peer" => "10.0.0.7" });
/// assert_eq!(constraints.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    entries: Vec<(String, ConstraintSpec)>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a constraint for one field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, constraint: impl Into<ConstraintSpec>) -> Self {
        self.entries.push((name.into(), constraint.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter(&self) -> slice::Iter<'_, (String, ConstraintSpec)> {
        self.entries.iter()
    }
}

/// Interprets every map entry through the constraint grammar, keeping the
/// map's key order.
impl From<Context> for Constraints {
    fn from(map: Context) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(field, value)| (field, ConstraintSpec::from(value)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context;
    use serde_json::json;

    #[test]
    fn test_plain_strings_become_literals() {
        assert!(matches!(
            ConstraintSpec::from("critical"),
            ConstraintSpec::Literal(Value::String(_))
        ));
    }

    #[test]
    fn test_leading_slash_selects_a_pattern() {
        assert!(matches!(
            ConstraintSpec::from("/^foo/"),
            ConstraintSpec::Pattern(_)
        ));
    }

    #[test]
    fn test_unit_and_none_skip() {
        assert!(ConstraintSpec::from(()).is_skip());
        assert!(ConstraintSpec::from(None::<&str>).is_skip());
        assert!(!ConstraintSpec::from(Some("x")).is_skip());
    }

    #[test]
    fn test_json_null_skips() {
        assert!(ConstraintSpec::from(json!(null)).is_skip());
    }

    #[test]
    fn test_json_objects_recurse() {
        let spec = ConstraintSpec::from(json!({"foo": "/bar/", "baz": 1}));
        let ConstraintSpec::Nested(nested) = spec else {
            panic!("expected a nested constraint");
        };
        let entries: Vec<&str> = nested.iter().map(|(field, _)| field.as_str()).collect();
        assert_eq!(entries, ["foo", "baz"]);
        assert!(matches!(
            nested.iter().next(),
            Some((_, ConstraintSpec::Pattern(_)))
        ));
    }

    #[test]
    fn test_context_maps_keep_declaration_order() {
        let constraints = Constraints::from(context! { "b" => 1, "a" => 2 });
        let fields: Vec<&str> = constraints.iter().map(|(field, _)| field.as_str()).collect();
        assert_eq!(fields, ["b", "a"]);
    }

    #[test]
    fn test_level_converts_to_its_string_literal() {
        assert!(matches!(
            ConstraintSpec::from(Level::Warning),
            ConstraintSpec::Literal(Value::String(s)) if s == "warning"
        ));
    }
}
