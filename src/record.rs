use serde_json::{Map, Value};

use crate::level::Level;

/// Ordered field map used for record contents and nested context values.
///
/// Key order is preserved, so diagnostics list fields in the order they were
/// written.
pub type Context = Map<String, Value>;

/// Builds a [`Context`] from `"key" => value` pairs.
///
/// Values can be anything convertible into a [`serde_json::Value`],
/// including another `context!` invocation for nesting.
///
/// # Example
///
/// ```
/// use log_testing::context;
///
/// let ctx = context! {
///     "user" => "alice",
///     "attempt" => 3,
///     "request" => context! { "method" => "GET" },
/// };
/// assert_eq!(ctx.len(), 3);
/// ```
#[macro_export]
macro_rules! context {
    () => { $crate::Context::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Context::new();
        $(
            map.insert(($key).into(), ::serde_json::Value::from($value));
        )+
        map
    }};
}

/// One captured log emission.
///
/// The sink always produces the three-field form `{level, message, context}`,
/// but a record is ultimately an ordered field map: assertions look fields up
/// by name, and partial records can be built directly from a [`Context`] when
/// a test wants to drive the cursor without a logger.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Context,
}

impl Record {
    /// Creates the standard three-field record produced by the sink.
    pub fn new(level: Level, message: impl Into<String>, context: Context) -> Self {
        let mut fields = Context::new();
        fields.insert("level".to_owned(), Value::String(level.as_str().to_owned()));
        fields.insert("message".to_owned(), Value::String(message.into()));
        fields.insert("context".to_owned(), Value::Object(context));
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn level(&self) -> Option<&str> {
        self.fields.get("level").and_then(Value::as_str)
    }

    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").and_then(Value::as_str)
    }

    pub fn context(&self) -> Option<&Context> {
        self.fields.get("context").and_then(Value::as_object)
    }

    /// All fields of the record, in declaration order.
    pub fn fields(&self) -> &Context {
        &self.fields
    }
}

impl From<Context> for Record {
    fn from(fields: Context) -> Self {
        Self { fields }
    }
}
