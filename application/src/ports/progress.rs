//! Progress notification port
//!
//! Defines the interface for reporting progress during a fan-out.

use relay_domain::FanOutTarget;

/// Callback for progress updates during a fan-out
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, nothing).
pub trait FanOutProgress: Send + Sync {
    /// Called once before any branch starts
    fn on_fan_out_start(&self, total_targets: usize);

    /// Called when one target settles
    fn on_target_complete(&self, target: &FanOutTarget, success: bool);

    /// Called after every branch has settled
    fn on_fan_out_complete(&self);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl FanOutProgress for NoProgress {
    fn on_fan_out_start(&self, _total_targets: usize) {}
    fn on_target_complete(&self, _target: &FanOutTarget, _success: bool) {}
    fn on_fan_out_complete(&self) {}
}
