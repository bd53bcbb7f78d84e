//! Compensating-transaction orchestration for multi-backend operations.
//!
//! A business operation that spans backends with no shared transaction
//! protocol is expressed as an ordered list of command handlers, one per
//! backend step. [`CommandProcessor::process`] executes them strictly in
//! order; when a handler fails, every previously successful handler is
//! undone in reverse order before the original failure is returned.
//!
//! Commands are the reversible units inside a handler: an execute/undo
//! delegate pair, optionally bound to a backend provider handle resolved
//! through [`stratus_core::ResolveProvider`].

mod command;
mod error;
mod factory;
mod handler;
mod processor;
mod report;

pub use command::{ActionCommand, Command, ProviderCommand};
pub use error::{BoxError, CommandResult, CompensationError, SagaError};
pub use factory::CommandFactory;
pub use handler::{AggregateCommandHandler, CommandHandler, DataCommandHandler};
pub use processor::CommandProcessor;
pub use report::{HandlerRecord, HandlerStatus, SagaReport};
