//! Output sink trait and error types.

use core::future::Future;

use crate::report::JoystickReport;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// The host disabled or detached the endpoint.
    Disconnected,
}

/// Async trait for joystick report sinks.
///
/// This trait abstracts the destination of assembled reports so the
/// forwarding logic can be tested without a USB stack.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait OutputSink {
    /// Send a report to the host.
    ///
    /// May block until the previous report has been sent.
    fn send(&mut self, report: &JoystickReport) -> impl Future<Output = Result<(), OutputError>>;

    /// Check if the output is ready to accept data.
    fn is_ready(&self) -> bool;
}
