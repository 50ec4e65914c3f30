//! Step observer trait for monitoring the cloth's substep loop.

/// Hooks into each phase of a tick.
///
/// Implement this to count substeps, profile phases, or capture
/// intermediate grid states. Every method defaults to a no-op.
pub trait StepObserver {
    /// Called after accelerations have been recomputed for a substep.
    fn on_forces(&mut self) {}

    /// Called after every row has been integrated or re-anchored.
    fn on_integrate(&mut self) {}

    /// Called after each constraint pass.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called after plane collision, whether or not a plane is configured.
    fn on_collision(&mut self) {}

    /// Called when a substep is complete.
    fn on_substep_complete(&mut self, _substep: usize) {}

    /// Called once per tick, after the last substep.
    fn on_step_complete(&mut self, _substeps: usize) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
