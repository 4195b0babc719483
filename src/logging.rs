use serde::Serialize;
use std::{cmp::Ordering, rc::Rc};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
                LogLevel::Error => 3,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct LogRecord<'a> {
    ts: u64,
    level: &'static str,
    event: &'a str,
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

pub type LogSink = Rc<dyn Fn(LogLevel, &str)>;

#[derive(Clone)]
pub struct Logger {
    level: LogLevel,
    sink: LogSink,
}

impl Logger {
    pub fn new(level: LogLevel, sink: LogSink) -> Self {
        Self { level, sink }
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn console(level: LogLevel) -> Self {
        Self::new(level, Rc::new(write_to_console))
    }

    pub fn event(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        if level < self.level {
            return;
        }

        let line = format_record(now_unix_millis(), level, event, fields);
        (self.sink)(level, &line);
    }

    pub fn debug(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Debug, event, fields);
    }

    pub fn info(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Info, event, fields);
    }

    pub fn warn(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Warn, event, fields);
    }

    pub fn error(&self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Error, event, fields);
    }
}

fn format_record(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> String {
    let fields = match fields {
        serde_json::Value::Object(map) => map,
        serde_json::Value::Null => serde_json::Map::new(),
        other => {
            let mut map = serde_json::Map::new();
            map.insert("value".to_string(), other);
            map
        }
    };

    let record = LogRecord {
        ts,
        level: level.as_str(),
        event,
        fields,
    };

    serde_json::to_string(&record).unwrap_or_else(|_| format!("{{\"event\":\"{event}\"}}"))
}

#[cfg(target_arch = "wasm32")]
fn write_to_console(level: LogLevel, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Error => web_sys::console::error_1(&line),
        LogLevel::Warn => web_sys::console::warn_1(&line),
        LogLevel::Debug | LogLevel::Info => web_sys::console::log_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_to_console(_level: LogLevel, line: &str) {
    eprintln!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}
