/// Status of a handler in a saga execution report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandlerStatus {
    /// Handler executed successfully.
    Executed,
    /// Handler failed during execution.
    Failed,
    /// Handler was undone after a later failure.
    Compensated,
    /// Handler undo failed during compensation.
    CompensationFailed,
    /// Handler was never started because an earlier one failed.
    Skipped,
}

/// Record of one handler's fate during a saga run.
#[derive(Debug)]
pub struct HandlerRecord {
    pub name: String,
    pub status: HandlerStatus,
}

/// Execution report covering every handler a saga touched.
#[derive(Debug, Default)]
pub struct SagaReport {
    records: Vec<HandlerRecord>,
}

impl SagaReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_start(&mut self, name: &str) {
        self.records.push(HandlerRecord {
            name: name.to_string(),
            status: HandlerStatus::Executed,
        });
    }

    pub(crate) fn record_failure(&mut self) {
        if let Some(record) = self.records.last_mut() {
            record.status = HandlerStatus::Failed;
        }
    }

    pub(crate) fn record_skipped(&mut self, name: &str) {
        self.records.push(HandlerRecord {
            name: name.to_string(),
            status: HandlerStatus::Skipped,
        });
    }

    pub(crate) fn record_compensated(&mut self, name: &str) {
        self.set_status(name, HandlerStatus::Compensated);
    }

    pub(crate) fn record_compensation_failed(&mut self, name: &str) {
        self.set_status(name, HandlerStatus::CompensationFailed);
    }

    fn set_status(&mut self, name: &str, status: HandlerStatus) {
        for record in &mut self.records {
            if record.name == name {
                record.status = status;
            }
        }
    }

    #[must_use]
    pub fn records(&self) -> &[HandlerRecord] {
        &self.records
    }

    /// One line per handler, for operator-facing output.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        for record in &self.records {
            let status = match record.status {
                HandlerStatus::Executed => "✓",
                HandlerStatus::Failed => "✗",
                HandlerStatus::Compensated => "↩",
                HandlerStatus::CompensationFailed => "⚠",
                HandlerStatus::Skipped => "-",
            };
            lines.push(format!("{status} {}", record.name));
        }
        lines.join("\n")
    }
}
