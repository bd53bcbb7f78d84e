use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use stratus_core::provider_name;
use tracing::debug;

use crate::command::{Command, ProviderCommand};
use crate::error::{BoxError, CommandResult};

/// One saga step: a group of commands executed and undone together.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Name used in logs, error messages and execution reports.
    fn name(&self) -> &str;

    async fn execute(&self) -> CommandResult;

    async fn undo(&self) -> CommandResult;
}

/// A handler bound to one backend provider, wrapping a single command.
pub struct DataCommandHandler<P: ?Sized> {
    name: String,
    provider: Option<Arc<P>>,
    command: Mutex<Option<Arc<dyn Command>>>,
}

impl<P: ?Sized + Send + Sync + 'static> DataCommandHandler<P> {
    #[must_use]
    pub fn new(provider: Option<Arc<P>>) -> Self {
        Self::named(provider_name::<P>(), provider)
    }

    #[must_use]
    pub fn named(name: impl Into<String>, provider: Option<Arc<P>>) -> Self {
        Self {
            name: name.into(),
            provider,
            command: Mutex::new(None),
        }
    }

    /// Attaches a command, replacing any previously attached one.
    pub fn set_command(&self, command: impl Command + 'static) {
        let mut slot = self.command.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::new(command));
    }

    /// Builds a command bound to this handler's provider and attaches it.
    pub fn create_command<E, EF, U, UF>(&self, execute: E, undo: U) -> Arc<ProviderCommand<P>>
    where
        E: Fn(Arc<P>) -> EF + Send + Sync + 'static,
        EF: Future<Output = CommandResult> + Send + 'static,
        U: Fn(Arc<P>) -> UF + Send + Sync + 'static,
        UF: Future<Output = CommandResult> + Send + 'static,
    {
        let command = Arc::new(ProviderCommand::new(self.provider.clone(), execute, undo));
        let mut slot = self.command.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&command) as Arc<dyn Command>);
        command
    }

    fn attached(&self) -> Option<Arc<dyn Command>> {
        self.command
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl<P: ?Sized + Send + Sync + 'static> CommandHandler for DataCommandHandler<P> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self) -> CommandResult {
        match self.attached() {
            Some(command) => command.execute().await,
            None => {
                debug!(handler = %self.name, "no command attached, nothing to execute");
                Ok(())
            }
        }
    }

    async fn undo(&self) -> CommandResult {
        match self.attached() {
            Some(command) => command.undo().await,
            None => {
                debug!(handler = %self.name, "no command attached, nothing to undo");
                Ok(())
            }
        }
    }
}

/// A handler driving several commands as one saga step.
///
/// With more than one command attached, `execute` runs them all
/// concurrently and joins them before reporting; the first failure in
/// attachment order is surfaced as the handler's failure. `undo` mirrors
/// this. Commands that never ran undo harmlessly, so a partial concurrent
/// failure is compensated by undoing the whole handler.
pub struct AggregateCommandHandler<P: ?Sized> {
    name: String,
    provider: Option<Arc<P>>,
    commands: Mutex<Vec<Arc<dyn Command>>>,
}

impl<P: ?Sized + Send + Sync + 'static> AggregateCommandHandler<P> {
    #[must_use]
    pub fn new(provider: Option<Arc<P>>) -> Self {
        Self::named(provider_name::<P>(), provider)
    }

    #[must_use]
    pub fn named(name: impl Into<String>, provider: Option<Arc<P>>) -> Self {
        Self {
            name: name.into(),
            provider,
            commands: Mutex::new(Vec::new()),
        }
    }

    /// Attaches an already-built command.
    pub fn attach(&self, command: impl Command + 'static) {
        let mut commands = self.commands.lock().unwrap_or_else(PoisonError::into_inner);
        commands.push(Arc::new(command));
    }

    /// Builds a command bound to this handler's provider and attaches it.
    pub fn create_command<E, EF, U, UF>(&self, execute: E, undo: U) -> Arc<ProviderCommand<P>>
    where
        E: Fn(Arc<P>) -> EF + Send + Sync + 'static,
        EF: Future<Output = CommandResult> + Send + 'static,
        U: Fn(Arc<P>) -> UF + Send + Sync + 'static,
        UF: Future<Output = CommandResult> + Send + 'static,
    {
        let command = Arc::new(ProviderCommand::new(self.provider.clone(), execute, undo));
        let mut commands = self.commands.lock().unwrap_or_else(PoisonError::into_inner);
        commands.push(Arc::clone(&command) as Arc<dyn Command>);
        command
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Vec<Arc<dyn Command>> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Runs `action` on every attached command concurrently and joins all
    /// of them, then surfaces the first failure in attachment order.
    async fn run_all<A, AF>(&self, action: A) -> CommandResult
    where
        A: Fn(Arc<dyn Command>) -> AF,
        AF: Future<Output = CommandResult> + Send + 'static,
    {
        let commands = self.snapshot();
        match commands.as_slice() {
            [] => Ok(()),
            [only] => action(Arc::clone(only)).await,
            _ => {
                let handles: Vec<_> = commands
                    .iter()
                    .map(|command| tokio::spawn(action(Arc::clone(command))))
                    .collect();

                let mut results = Vec::with_capacity(handles.len());
                for handle in handles {
                    match handle.await {
                        Ok(result) => results.push(result),
                        Err(join_error) => results.push(Err(Box::new(join_error) as BoxError)),
                    }
                }

                results
                    .into_iter()
                    .find(Result::is_err)
                    .unwrap_or(Ok(()))
            }
        }
    }
}

#[async_trait]
impl<P: ?Sized + Send + Sync + 'static> CommandHandler for AggregateCommandHandler<P> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self) -> CommandResult {
        debug!(handler = %self.name, commands = self.len(), "executing commands");
        self.run_all(|command| async move { command.execute().await })
            .await
    }

    async fn undo(&self) -> CommandResult {
        debug!(handler = %self.name, commands = self.len(), "undoing commands");
        self.run_all(|command| async move { command.undo().await })
            .await
    }
}
