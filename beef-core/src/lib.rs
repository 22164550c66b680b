//! Platform-agnostic input decoding for the BEEF turntable controller.
//!
//! This crate holds everything that decides *what* the controller reports,
//! with no dependency on a particular chip. It can be used both in embedded
//! `no_std` firmware and on host for testing.
//!
//! # Overview
//!
//! - [`analog`]: dead-zone tracker for analog turntable sensors ([`AnalogTurntable`])
//! - [`quadrature`]: two-phase encoder decoder ([`QuadratureDecoder`])
//! - [`matrix`]: button state and reactive lighting arbitration ([`ButtonMatrix`])
//! - [`controller`]: the single context object tying them together ([`Controller`])
//! - [`report`]: HID input/output report layouts ([`JoystickReport`], [`LightingCommand`])
//! - [`forwarder`]: change-only report delivery to an [`OutputSink`]
//! - [`gpio`]: `embedded-hal` seams for button inputs and LED outputs
//!
//! # Example
//!
//! ```rust
//! use beef_core::{Controller, Phases, QuadratureDecoder, BUTTON_COUNT};
//! use embassy_time::Instant;
//!
//! // Any `LedBank` works; here a bank of no-op pins.
//! struct Led;
//! impl embedded_hal::digital::ErrorType for Led {
//!     type Error = core::convert::Infallible;
//! }
//! impl embedded_hal::digital::OutputPin for Led {
//!     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//!     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! let leds: [Led; BUTTON_COUNT] = core::array::from_fn(|_| Led);
//! let mut controller: Controller<_, _, BUTTON_COUNT> =
//!     Controller::new(QuadratureDecoder::new(), leds);
//!
//! let released = [true; BUTTON_COUNT];
//! controller.poll(Phases::from_code(3), &released, Instant::from_millis(0));
//! let report = controller.poll(Phases::from_code(1), &released, Instant::from_millis(1));
//! assert_eq!(report.x, 1);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)
//! - **`log`**: Route log messages through the `log` facade
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod analog;
pub mod controller;
pub mod forwarder;
pub mod gpio;
pub mod matrix;
pub mod output;
pub mod quadrature;
pub mod report;
pub mod timer;
pub mod turntable;
pub mod types;

// Re-export main types at crate root
pub use analog::{AnalogConfig, AnalogTurntable};
pub use controller::Controller;
pub use forwarder::ReportForwarder;
pub use gpio::{ButtonInputs, LedBank};
pub use matrix::{ButtonMatrix, LightingMode};
pub use output::{OutputError, OutputSink};
pub use quadrature::{Phases, QuadratureDecoder};
pub use report::{JoystickReport, LightingCommand, ReportError, REPORT_DESCRIPTOR};
pub use timer::SustainTimer;
pub use turntable::TurntableDecoder;
pub use types::{Buttons, Direction, BUTTON_COUNT};
