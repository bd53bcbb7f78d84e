use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use stratus_core::provider_name;
use tracing::debug;

use crate::error::CommandResult;

type BoxFuture = Pin<Box<dyn Future<Output = CommandResult> + Send>>;
type ActionFn = Box<dyn Fn() -> BoxFuture + Send + Sync>;
type ProviderFn<P> = Box<dyn Fn(Arc<P>) -> BoxFuture + Send + Sync>;

/// A unit of reversible work.
///
/// The completion flag is true only after a successful `execute` and
/// before any `undo`; it is observable while sibling commands are still
/// in flight.
#[async_trait]
pub trait Command: Send + Sync {
    fn is_completed(&self) -> bool;

    async fn execute(&self) -> CommandResult;

    async fn undo(&self) -> CommandResult;
}

/// A command wrapping an arbitrary execute/undo delegate pair.
///
/// Either delegate may be absent; the corresponding call then only moves
/// the completion flag.
pub struct ActionCommand {
    completed: AtomicBool,
    execute: Option<ActionFn>,
    undo: Option<ActionFn>,
}

impl ActionCommand {
    pub fn new<E, EF, U, UF>(execute: E, undo: U) -> Self
    where
        E: Fn() -> EF + Send + Sync + 'static,
        EF: Future<Output = CommandResult> + Send + 'static,
        U: Fn() -> UF + Send + Sync + 'static,
        UF: Future<Output = CommandResult> + Send + 'static,
    {
        Self {
            completed: AtomicBool::new(false),
            execute: Some(box_action(execute)),
            undo: Some(box_action(undo)),
        }
    }

    /// A command with no undo delegate; `undo` only clears the flag.
    pub fn execute_only<E, EF>(execute: E) -> Self
    where
        E: Fn() -> EF + Send + Sync + 'static,
        EF: Future<Output = CommandResult> + Send + 'static,
    {
        Self {
            completed: AtomicBool::new(false),
            execute: Some(box_action(execute)),
            undo: None,
        }
    }

    /// A command with no execute delegate; `execute` only sets the flag.
    pub fn undo_only<U, UF>(undo: U) -> Self
    where
        U: Fn() -> UF + Send + Sync + 'static,
        UF: Future<Output = CommandResult> + Send + 'static,
    {
        Self {
            completed: AtomicBool::new(false),
            execute: None,
            undo: Some(box_action(undo)),
        }
    }
}

fn box_action<F, Fut>(f: F) -> ActionFn
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CommandResult> + Send + 'static,
{
    Box::new(move || Box::pin(f()))
}

#[async_trait]
impl Command for ActionCommand {
    fn is_completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    async fn execute(&self) -> CommandResult {
        if let Some(execute) = &self.execute {
            execute().await?;
        }
        self.completed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn undo(&self) -> CommandResult {
        if let Some(undo) = &self.undo {
            undo().await?;
        }
        self.completed.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// A command whose delegates operate on a bound backend provider handle.
///
/// When the handle is absent both `execute` and `undo` degrade to a full
/// no-op: the delegates do not run and the completion flag does not move.
pub struct ProviderCommand<P: ?Sized> {
    completed: AtomicBool,
    provider: Option<Arc<P>>,
    execute: Option<ProviderFn<P>>,
    undo: Option<ProviderFn<P>>,
}

impl<P: ?Sized> std::fmt::Debug for ProviderCommand<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCommand")
            .field("completed", &self.completed.load(Ordering::SeqCst))
            .field("has_provider", &self.provider.is_some())
            .field("has_execute", &self.execute.is_some())
            .field("has_undo", &self.undo.is_some())
            .finish()
    }
}

impl<P: ?Sized + Send + Sync + 'static> ProviderCommand<P> {
    pub fn new<E, EF, U, UF>(provider: Option<Arc<P>>, execute: E, undo: U) -> Self
    where
        E: Fn(Arc<P>) -> EF + Send + Sync + 'static,
        EF: Future<Output = CommandResult> + Send + 'static,
        U: Fn(Arc<P>) -> UF + Send + Sync + 'static,
        UF: Future<Output = CommandResult> + Send + 'static,
    {
        Self {
            completed: AtomicBool::new(false),
            provider,
            execute: Some(box_provider(execute)),
            undo: Some(box_provider(undo)),
        }
    }

    /// A provider command built without a provider handle.
    pub fn detached<E, EF, U, UF>(execute: E, undo: U) -> Self
    where
        E: Fn(Arc<P>) -> EF + Send + Sync + 'static,
        EF: Future<Output = CommandResult> + Send + 'static,
        U: Fn(Arc<P>) -> UF + Send + Sync + 'static,
        UF: Future<Output = CommandResult> + Send + 'static,
    {
        Self::new(None, execute, undo)
    }
}

fn box_provider<P, F, Fut>(f: F) -> ProviderFn<P>
where
    P: ?Sized,
    F: Fn(Arc<P>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CommandResult> + Send + 'static,
{
    Box::new(move |provider| Box::pin(f(provider)))
}

#[async_trait]
impl<P: ?Sized + Send + Sync + 'static> Command for ProviderCommand<P> {
    fn is_completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    async fn execute(&self) -> CommandResult {
        let Some(provider) = &self.provider else {
            debug!(
                provider = provider_name::<P>(),
                "provider unavailable, skipping execute"
            );
            return Ok(());
        };

        if let Some(execute) = &self.execute {
            execute(Arc::clone(provider)).await?;
        }
        self.completed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn undo(&self) -> CommandResult {
        let Some(provider) = &self.provider else {
            debug!(
                provider = provider_name::<P>(),
                "provider unavailable, skipping undo"
            );
            return Ok(());
        };

        if let Some(undo) = &self.undo {
            undo(Arc::clone(provider)).await?;
        }
        self.completed.store(false, Ordering::SeqCst);
        Ok(())
    }
}
