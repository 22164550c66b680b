//! Host lighting command intake.
//!
//! Lighting output reports arrive either as HID SET_REPORT control requests
//! or on the interrupt OUT endpoint. Both paths end in
//! [`LightingRequestHandler::set_report`], which only publishes the decoded
//! command. The poll task applies it between iterations, so it stays the
//! single writer of the LED pins.

use beef_core::LightingCommand;
use defmt::{debug, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{ReportId, RequestHandler};
use embassy_usb::control::OutResponse;

/// Latest-value-wins channel from the USB handlers to the poll task.
pub type LightingSignal = Signal<CriticalSectionRawMutex, LightingCommand>;

/// HID request handler that forwards lighting output reports.
#[derive(Clone, Copy)]
pub struct LightingRequestHandler {
    signal: &'static LightingSignal,
}

impl LightingRequestHandler {
    #[must_use]
    pub const fn new(signal: &'static LightingSignal) -> Self {
        Self { signal }
    }
}

impl RequestHandler for LightingRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        let ReportId::Out(_) = id else {
            return OutResponse::Rejected;
        };
        match LightingCommand::parse(data) {
            Ok(command) => {
                debug!("Lighting report: {:?}", command);
                self.signal.signal(command);
                OutResponse::Accepted
            }
            Err(e) => {
                warn!("Bad lighting report ({} bytes): {:?}", data.len(), e);
                OutResponse::Rejected
            }
        }
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}
