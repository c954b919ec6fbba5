//! Request admission control.
//!
//! [`TaskQueue`] serializes generation traffic against the single external
//! endpoint: tasks start in submission order, one at a time, with a
//! configurable pause between consecutive tasks.
//!
//! ```text
//!  caller A ──enqueue──┐
//!  caller B ──enqueue──┤   ┌──────────────┐      ┌──────────┐
//!  caller C ──enqueue──┴──▶│ pending FIFO │─────▶│  worker  │──▶ endpoint
//!                          └──────────────┘      └────┬─────┘
//!                                 ▲                   │ settle
//!                   TaskHandle ◀──┴──── oneshot ◀─────┘
//! ```

mod task_queue;

pub use task_queue::{QueueError, QueueState, TaskHandle, TaskQueue};
