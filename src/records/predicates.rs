use std::fmt;

use regex::Regex;
use serde_json::Value;

use super::helpers::{format_value, text_form};

/// A custom field constraint.
///
/// Implement this to plug any externally defined check into a
/// [`ConstraintSpec`](crate::ConstraintSpec): the matcher hands the field's
/// value to [`evaluate`](Predicate::evaluate) and treats the returned
/// explanation as the failure detail, appended below the standard
/// `Record #n: value of the "<label>" field does not match given constraint.`
/// line.
///
/// # Example
///
/// ```
/// use log_testing::{ConstraintSpec, Predicate};
/// use serde_json::Value;
///
/// #[derive(Debug)]
/// struct NonEmptyString;
///
/// impl Predicate for NonEmptyString {
///     fn evaluate(&self, subject: &Value) -> Result<(), String> {
///         match subject.as_str() {
///             Some(s) if !s.is_empty() => Ok(()),
///             _ => Err("expected a non-empty string.".to_owned()),
///         }
///     }
/// }
///
/// let constraint = ConstraintSpec::predicate(NonEmptyString);
/// ```
pub trait Predicate: fmt::Debug {
    fn evaluate(&self, subject: &Value) -> Result<(), String>;
}

/// Strict equality against an expected value.
#[derive(Debug, Clone)]
pub(crate) struct EqualTo(pub(crate) Value);

impl Predicate for EqualTo {
    fn evaluate(&self, subject: &Value) -> Result<(), String> {
        if subject == &self.0 {
            Ok(())
        } else {
            Err(format!(
                "expected {}, got {}.",
                format_value(&self.0),
                format_value(subject)
            ))
        }
    }
}

/// Regular-expression match against the field's string form.
///
/// Accepts both a bare pattern and the delimited `/body/flags` form; the
/// pattern is compiled when the constraint is applied, and a malformed
/// pattern fails the owning assertion with the compile error as the
/// explanation.
#[derive(Debug, Clone)]
pub(crate) struct MatchesPattern {
    raw: String,
}

impl MatchesPattern {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

impl Predicate for MatchesPattern {
    fn evaluate(&self, subject: &Value) -> Result<(), String> {
        let regex = compile_pattern(&self.raw)?;
        if regex.is_match(&text_form(subject)) {
            Ok(())
        } else {
            Err(format!(
                "{} does not match the pattern {}.",
                format_value(subject),
                self.raw
            ))
        }
    }
}

fn compile_pattern(raw: &str) -> Result<Regex, String> {
    let (body, flags) = match raw.strip_prefix('/') {
        Some(rest) => match rest.rfind('/') {
            Some(end) => (&rest[..end], &rest[end + 1..]),
            None => {
                return Err(format!("the pattern {} has no closing delimiter.", raw));
            }
        },
        None => (raw, ""),
    };

    for flag in flags.chars() {
        if !matches!(flag, 'i' | 'm' | 's' | 'x' | 'u' | 'U') {
            return Err(format!(
                "the pattern {} uses an unsupported flag {:?}.",
                raw, flag
            ));
        }
    }

    let pattern = if flags.is_empty() {
        body.to_owned()
    } else {
        format!("(?{}){}", flags, body)
    };

    Regex::new(&pattern)
        .map_err(|err| format!("the pattern {} is not a valid regular expression: {}", raw, err))
}

/// Adapts a [`predicates`] crate predicate into a field constraint.
///
/// Available with the `predicates` cargo feature. On failure the predicate's
/// display form is quoted in the explanation.
///
/// # Example
///
/// ```
/// use log_testing::{satisfies, Constraints};
/// use serde_json::json;
///
/// let constraints = Constraints::new()
///     .field("message", satisfies(predicates::ord::eq(json!("ready"))));
/// ```
#[cfg(feature = "predicates")]
pub fn satisfies<P>(predicate: P) -> crate::ConstraintSpec
where
    P: predicates::Predicate<Value> + 'static,
{
    crate::ConstraintSpec::predicate(External(predicate))
}

#[cfg(feature = "predicates")]
struct External<P>(P);

#[cfg(feature = "predicates")]
impl<P: predicates::Predicate<Value>> fmt::Debug for External<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "satisfies({})", self.0)
    }
}

#[cfg(feature = "predicates")]
impl<P: predicates::Predicate<Value>> Predicate for External<P> {
    fn evaluate(&self, subject: &Value) -> Result<(), String> {
        if self.0.eval(subject) {
            Ok(())
        } else {
            Err(format!(
                "failed asserting that the value satisfies {}.",
                self.0
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equal_to_accepts_equal_values() {
        assert!(EqualTo(json!("foo")).evaluate(&json!("foo")).is_ok());
        assert!(EqualTo(json!(42)).evaluate(&json!(42)).is_ok());
    }

    #[test]
    fn test_equal_to_explains_the_mismatch() {
        let err = EqualTo(json!("foo")).evaluate(&json!("bar")).unwrap_err();
        assert_eq!(err, "expected \"foo\", got \"bar\".");
    }

    #[test]
    fn test_equality_is_strict_across_number_kinds() {
        assert!(EqualTo(json!(1)).evaluate(&json!(1.0)).is_err());
    }

    #[test]
    fn test_pattern_matches_delimited_form() {
        let predicate = MatchesPattern::new("/^Record \\d\\.$/");
        assert!(predicate.evaluate(&json!("Record 1.")).is_ok());
        assert!(predicate.evaluate(&json!("record 1.")).is_err());
    }

    #[test]
    fn test_pattern_honors_trailing_flags() {
        let predicate = MatchesPattern::new("/record \\d\\./i");
        assert!(predicate.evaluate(&json!("Record 1.")).is_ok());
    }

    #[test]
    fn test_pattern_matches_bare_form() {
        let predicate = MatchesPattern::new("^ready$");
        assert!(predicate.evaluate(&json!("ready")).is_ok());
    }

    #[test]
    fn test_pattern_matches_the_string_form_of_non_strings() {
        let predicate = MatchesPattern::new("/^42$/");
        assert!(predicate.evaluate(&json!(42)).is_ok());
    }

    #[test]
    fn test_unclosed_pattern_is_reported() {
        let err = MatchesPattern::new("/oops").evaluate(&json!("x")).unwrap_err();
        assert_eq!(err, "the pattern /oops has no closing delimiter.");
    }

    #[test]
    fn test_unknown_flag_is_reported() {
        let err = MatchesPattern::new("/ok/z").evaluate(&json!("ok")).unwrap_err();
        assert_eq!(err, "the pattern /ok/z uses an unsupported flag 'z'.");
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = MatchesPattern::new("/(/").evaluate(&json!("x")).unwrap_err();
        assert!(err.starts_with("the pattern /(/ is not a valid regular expression:"));
    }

    #[cfg(feature = "predicates")]
    #[test]
    fn test_external_predicate_reports_its_display_form() {
        let external = External(predicates::ord::eq(json!("ready")));
        assert!(external.evaluate(&json!("ready")).is_ok());
        let err = external.evaluate(&json!("starting")).unwrap_err();
        assert!(err.starts_with("failed asserting that the value satisfies"));
    }
}
