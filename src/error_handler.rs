use crate::logging::Logger;
use serde::Serialize;
use serde_json::json;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ErrorReport {
    pub message: String,
    pub source: String,
    pub line: u32,
    pub column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

pub struct ErrorHandler {
    logger: Logger,
}

impl ErrorHandler {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn on_error(&self, report: &ErrorReport) {
        let fields = serde_json::to_value(report).unwrap_or_else(|_| json!({ "message": report.message }));
        self.logger.error("page_error", fields);
    }

    /// Returns `true`: the rejection counts as handled and the browser's own
    /// report is suppressed.
    pub fn on_rejection(&self, reason: &str) -> bool {
        self.logger.error("unhandled_rejection", json!({ "reason": reason }));
        true
    }
}
