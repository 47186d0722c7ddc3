//! Contract between timer-driven modules and their hosting runtime.
//!
//! The runtime (external to this crate) repeatedly calls
//! [`TimerDrivenModule::do_some_work`] at a configured cadence, wraps each
//! call in its own transaction, persists the returned context and passes it
//! back on the next call. The very first call receives
//! [`ModuleContext::empty`].

use crate::{errors::GraphMillError, store::GraphStore, walker::ModuleContext};

pub trait TimerDrivenModule {
    type Config;

    /// Stable configured name of this module instance.
    fn id(&self) -> &str;

    /// Immutable configuration value object.
    fn configuration(&self) -> &Self::Config;

    fn initialize(&mut self, _store: &GraphStore) -> Result<(), GraphMillError> {
        Ok(())
    }

    fn reinitialize(&mut self, store: &GraphStore) -> Result<(), GraphMillError> {
        self.initialize(store)
    }

    fn shutdown(&mut self) -> Result<(), GraphMillError> {
        Ok(())
    }

    /// Perform one unit of timed work. Runs inside a transaction supplied by
    /// the caller; the module must not manage transactions itself.
    fn do_some_work(
        &mut self,
        last_context: &ModuleContext,
        store: &GraphStore,
    ) -> Result<ModuleContext, GraphMillError>;
}
