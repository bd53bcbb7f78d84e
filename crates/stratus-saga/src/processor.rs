use std::sync::Arc;

use stratus_core::ResolveProvider;
use tracing::{debug, warn};

use crate::error::{BoxError, CompensationError, SagaError};
use crate::handler::{CommandHandler, DataCommandHandler};
use crate::report::SagaReport;

/// Saga orchestrator: an ordered list of command handlers.
///
/// Handlers execute strictly in attachment order, each fully awaited
/// before the next starts. On the first failure, previously successful
/// handlers are undone in reverse order and the original failure is
/// returned. The processor can be reused for independent operations via
/// [`CommandProcessor::remove_handlers`].
///
/// Every mutating call takes `&mut self`, so attaching or removing
/// handlers while `process` is in flight does not compile; the
/// single-writer discipline is enforced by the borrow checker.
#[derive(Default)]
pub struct CommandProcessor {
    handlers: Vec<Arc<dyn CommandHandler>>,
}

impl CommandProcessor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler; attachment order is execution order.
    pub fn add_handler(&mut self, handler: Arc<dyn CommandHandler>) {
        self.handlers.push(handler);
    }

    /// Resolves a provider from the registry, attaches a handler bound to
    /// it and returns the handler so a command can be installed.
    pub fn create_data_handler<P, R>(&mut self, registry: &R) -> Arc<DataCommandHandler<P>>
    where
        P: ?Sized + Send + Sync + 'static,
        R: ResolveProvider<P>,
    {
        let handler = Arc::new(DataCommandHandler::new(registry.resolve()));
        self.handlers
            .push(Arc::clone(&handler) as Arc<dyn CommandHandler>);
        handler
    }

    /// Clears the handler list so the processor can be reused.
    pub fn remove_handlers(&mut self) {
        self.handlers.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Executes all attached handlers in order.
    ///
    /// # Errors
    ///
    /// Returns [`SagaError::HandlerFailed`] if a handler fails and every
    /// compensation succeeds, or [`SagaError::CompensationFailed`] if
    /// some compensations fail too.
    pub async fn process(&mut self) -> Result<(), SagaError> {
        let (result, _report) = self.process_with_report().await;
        result
    }

    /// Executes all attached handlers and also returns a per-handler
    /// execution report.
    pub async fn process_with_report(&mut self) -> (Result<(), SagaError>, SagaReport) {
        let mut report = SagaReport::new();
        let mut succeeded: Vec<Arc<dyn CommandHandler>> = Vec::new();

        for (index, handler) in self.handlers.iter().enumerate() {
            debug!(handler = handler.name(), "executing saga handler");
            report.record_start(handler.name());

            match handler.execute().await {
                Ok(()) => succeeded.push(Arc::clone(handler)),
                Err(source) => {
                    report.record_failure();
                    for skipped in &self.handlers[index + 1..] {
                        report.record_skipped(skipped.name());
                    }

                    let error =
                        compensate(&mut report, succeeded, handler.name().to_string(), source)
                            .await;
                    return (Err(error), report);
                }
            }
        }

        (Ok(()), report)
    }
}

/// Undoes the succeeded handlers in reverse order.
///
/// Compensation is best-effort: an undo failure is recorded and the
/// remaining handlers are still undone; every failure ends up in the
/// returned error alongside the original one.
async fn compensate(
    report: &mut SagaReport,
    mut succeeded: Vec<Arc<dyn CommandHandler>>,
    failed_handler: String,
    source: BoxError,
) -> SagaError {
    let mut compensation_errors = Vec::new();

    while let Some(handler) = succeeded.pop() {
        debug!(handler = handler.name(), "compensating saga handler");
        match handler.undo().await {
            Ok(()) => report.record_compensated(handler.name()),
            Err(error) => {
                warn!(handler = handler.name(), %error, "compensation failed");
                report.record_compensation_failed(handler.name());
                compensation_errors.push(CompensationError {
                    handler: handler.name().to_string(),
                    source: error,
                });
            }
        }
    }

    if compensation_errors.is_empty() {
        SagaError::HandlerFailed {
            handler: failed_handler,
            source,
        }
    } else {
        SagaError::CompensationFailed {
            failed_handler,
            handler_error: source,
            compensation_errors,
        }
    }
}
