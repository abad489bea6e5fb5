use std::sync::Arc;

use super::{config::DispatcherConfig, dispatcher::Dispatcher};
use crate::{resolver::ResolverRef, scheduler::SchedulerRef, scheduler::TokioScheduler};

/// Builder for constructing a [`Dispatcher`] with its collaborators.
pub struct DispatcherBuilder {
    cfg: DispatcherConfig,
    resolver: Option<ResolverRef>,
    scheduler: Option<SchedulerRef>,
}

impl DispatcherBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: DispatcherConfig) -> Self {
        Self {
            cfg,
            resolver: None,
            scheduler: None,
        }
    }

    /// Sets the resolver used for string listener/subscriber references.
    ///
    /// Without one, every string reference fails with `UnresolvedIdentifier`.
    pub fn with_resolver(mut self, resolver: ResolverRef) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Sets the scheduler used for background dispatch.
    ///
    /// Defaults to a [`TokioScheduler`] bound to the ambient runtime.
    pub fn with_scheduler(mut self, scheduler: SchedulerRef) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Builds the dispatcher. Registries start empty.
    pub fn build(self) -> Dispatcher {
        let scheduler = self
            .scheduler
            .unwrap_or_else(|| Arc::new(TokioScheduler::default()));
        Dispatcher::new_internal(self.cfg, self.resolver, scheduler)
    }
}
