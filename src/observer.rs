//! Step observer trait for monitoring simulation progress.

/// Trait for observing simulation ticks.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called once external (and, for Euler, damping) forces are accumulated.
    fn on_external_forces(&mut self) {}

    /// Called after all particles have been integrated.
    fn on_integrate(&mut self) {}

    /// Called after each Verlet relaxation pass.
    fn on_relaxation_pass(&mut self, _iteration: usize) {}

    /// Called when the interaction between particles `a` and `b` tears.
    fn on_tear(&mut self, _a: usize, _b: usize) {}

    /// Called when a tick is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
