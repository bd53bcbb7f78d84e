use std::future::Future;
use std::sync::Arc;

use stratus_core::{ProviderUnavailable, ResolveProvider, provider_name};

use crate::command::{ActionCommand, ProviderCommand};
use crate::error::CommandResult;

/// Builds commands, resolving provider handles from a backend registry.
pub struct CommandFactory<R> {
    registry: Arc<R>,
}

impl<R> CommandFactory<R> {
    #[must_use]
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Builds a plain command from an execute/undo delegate pair.
    pub fn action<E, EF, U, UF>(&self, execute: E, undo: U) -> ActionCommand
    where
        E: Fn() -> EF + Send + Sync + 'static,
        EF: Future<Output = CommandResult> + Send + 'static,
        U: Fn() -> UF + Send + Sync + 'static,
        UF: Future<Output = CommandResult> + Send + 'static,
    {
        ActionCommand::new(execute, undo)
    }

    /// Builds a command bound to the provider of the requested type.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderUnavailable`] when the registry has no provider
    /// of that type configured.
    pub fn data_command<P, E, EF, U, UF>(
        &self,
        execute: E,
        undo: U,
    ) -> Result<ProviderCommand<P>, ProviderUnavailable>
    where
        P: ?Sized + Send + Sync + 'static,
        R: ResolveProvider<P>,
        E: Fn(Arc<P>) -> EF + Send + Sync + 'static,
        EF: Future<Output = CommandResult> + Send + 'static,
        U: Fn(Arc<P>) -> UF + Send + Sync + 'static,
        UF: Future<Output = CommandResult> + Send + 'static,
    {
        let provider = self.registry.resolve().ok_or(ProviderUnavailable {
            provider: provider_name::<P>(),
        })?;
        Ok(ProviderCommand::new(Some(provider), execute, undo))
    }
}
