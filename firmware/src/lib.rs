//! RP2040 firmware support for the BEEF turntable controller.
//!
//! Hardware glue around [`beef_core`]: the turntable sensor driver for the
//! selected variant, the USB HID joystick endpoint and the host lighting
//! request handler. All decoding lives in `beef-core`.
//!
//! # Turntable variants
//!
//! Exactly one of these features must be enabled:
//!
//! - **`turntable-quadrature`** (default): two-phase optical encoder
//! - **`turntable-analog`**: analog sensor on ADC0 with a dead-zone tracker

#![no_std]

#[cfg(all(feature = "turntable-quadrature", feature = "turntable-analog"))]
compile_error!("features `turntable-quadrature` and `turntable-analog` are mutually exclusive");

#[cfg(not(any(feature = "turntable-quadrature", feature = "turntable-analog")))]
compile_error!("enable one of `turntable-quadrature` or `turntable-analog`");

pub mod config;
pub mod lighting;
pub mod turntable_input;
pub mod usb_output;

pub use lighting::{LightingRequestHandler, LightingSignal};
pub use turntable_input::{Decoder, TurntableInput};
pub use usb_output::{configure_usb_hid, JoystickHid, UsbHidOutput};
