use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use crate::level::Level;
use crate::record::{Context, Record};
use crate::records::helpers::format_value;
use crate::records::Records;

/// Generates the per-level emitters from one fixed table, so they cannot
/// drift from [`TestLogger::emit`].
macro_rules! impl_level_emitters {
    ($($method:ident => $level:ident),* $(,)?) => {
        $(
            #[doc = concat!("Captures a record at the `", stringify!($method), "` level.")]
            pub fn $method<M, I, K, V>(&self, message: M, context: I)
            where
                M: Into<String>,
                I: IntoIterator<Item = (K, V)>,
                K: Into<String>,
                V: Into<Value>,
            {
                self.emit(Level::$level, message, context);
            }
        )*
    };
}

/// An append-only capture sink for log records.
///
/// Application code under test emits into the logger (directly, or through
/// the [`log`] facade); the test then takes a [`Records`] cursor with
/// [`TestLogger::records`] and walks the captured sequence record by record.
///
/// # Example
///
/// ```
/// use log_testing::{context, TestLogger};
///
/// # fn main() -> Result<(), log_testing::AssertionError> {
/// let logger = TestLogger::new();
/// logger.info("Application started", context! { "port" => 8080 });
///
/// logger.records()
///     .info("Application started", context! { "port" => 8080 })?
///     .end()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct TestLogger {
    records: Mutex<Vec<Record>>,
}

impl TestLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures one record.
    ///
    /// `context` is any iterator of key-value pairs whose values convert
    /// into [`serde_json::Value`]; the [`context!`](crate::context) macro
    /// builds one inline.
    pub fn emit<M, I, K, V>(&self, level: Level, message: M, context: I)
    where
        M: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let context: Context = context
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.lock().push(Record::new(level, message, context));
    }

    impl_level_emitters! {
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

    /// Takes a snapshot cursor over the records captured so far.
    ///
    /// Records emitted after this call are not visible to the returned
    /// cursor.
    pub fn records(&self) -> Records {
        Records::new(self.lock().clone())
    }

    /// Number of records captured so far.
    pub fn record_count(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discards every captured record.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Human-readable listing of every captured record, for debugging a
    /// failing test.
    pub fn dump(&self) -> String {
        let records = self.lock();
        let mut output = format!("Test logger: {} record(s)\n", records.len());
        for (idx, record) in records.iter().enumerate() {
            let fields: Vec<String> = record
                .fields()
                .iter()
                .map(|(key, value)| format!("{}={}", key, format_value(value)))
                .collect();
            output.push_str(&format!("\n[{}] {}", idx, fields.join(", ")));
        }
        output
    }

    /// Registers a leaked logger as the process-global [`log`] sink at
    /// [`log::LevelFilter::Trace`] and returns it.
    ///
    /// The facade accepts one logger per process, so call this once and
    /// [`TestLogger::clear`] between test cases sharing it.
    pub fn install() -> Result<&'static TestLogger, log::SetLoggerError> {
        let logger: &'static TestLogger = Box::leak(Box::new(TestLogger::new()));
        log::set_logger(logger)?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(logger)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        // A poisoned lock still yields the captured records.
        match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

struct ContextVisitor<'a>(&'a mut Context);

impl<'kv> log::kv::VisitSource<'kv> for ContextVisitor<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kv>,
        value: log::kv::Value<'kv>,
    ) -> Result<(), log::kv::Error> {
        let value = serde_json::to_value(&value).unwrap_or(Value::Null);
        self.0.insert(key.as_str().to_owned(), value);
        Ok(())
    }
}

impl log::Log for TestLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let mut context = Context::new();
        // A visit error leaves the context partially filled.
        let _ = record.key_values().visit(&mut ContextVisitor(&mut context));
        self.lock().push(Record::new(
            record.level().into(),
            record.args().to_string(),
            context,
        ));
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context;

    #[test]
    fn test_emit_captures_in_emission_order() {
        let logger = TestLogger::new();
        logger.emit(Level::Info, "first", context! {});
        logger.emit(Level::Error, "second", context! { "code" => 1 });

        assert_eq!(logger.record_count(), 2);
        let records = logger.records();
        assert_eq!(records[0].message(), Some("first"));
        assert_eq!(records[1].level(), Some("error"));
    }

    #[test]
    fn test_level_emitters_stamp_their_level() {
        let logger = TestLogger::new();
        logger.emergency("m", context! {});
        logger.alert("m", context! {});
        logger.critical("m", context! {});
        logger.error("m", context! {});
        logger.warning("m", context! {});
        logger.notice("m", context! {});
        logger.info("m", context! {});
        logger.debug("m", context! {});
        logger.trace("m", context! {});

        let records = logger.records();
        let levels: Vec<&str> = (0..records.len())
            .map(|i| records[i].level().unwrap_or(""))
            .collect();
        assert_eq!(
            levels,
            [
                "emergency",
                "alert",
                "critical",
                "error",
                "warning",
                "notice",
                "info",
                "debug",
                "trace"
            ]
        );
    }

    #[test]
    fn test_records_is_a_snapshot() {
        let logger = TestLogger::new();
        logger.info("before", context! {});
        let records = logger.records();
        logger.info("after", context! {});

        assert_eq!(records.len(), 1);
        assert_eq!(logger.record_count(), 2);
    }

    #[test]
    fn test_clear_discards_everything() {
        let logger = TestLogger::new();
        logger.info("gone", context! {});
        logger.clear();
        assert!(logger.is_empty());
    }

    #[test]
    fn test_dump_lists_every_record() {
        let logger = TestLogger::new();
        logger.info("started", context! { "port" => 8080 });
        let dump = logger.dump();
        assert!(dump.starts_with("Test logger: 1 record(s)\n"));
        assert!(dump.contains("level=\"info\""));
        assert!(dump.contains("context={port=8080}"));
    }

    #[test]
    fn test_facade_log_records_are_captured() {
        use log::Log as _;

        let logger = TestLogger::new();
        logger.log(
            &log::Record::builder()
                .level(log::Level::Warn)
                .args(format_args!("disk almost full"))
                .build(),
        );

        let records = logger.records();
        assert_eq!(records[0].level(), Some("warning"));
        assert_eq!(records[0].message(), Some("disk almost full"));
        assert_eq!(records[0].context().map(Context::len), Some(0));
    }
}
