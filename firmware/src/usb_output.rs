//! USB HID joystick output implementation.

use beef_core::{JoystickReport, LightingCommand, OutputError, OutputSink, REPORT_DESCRIPTOR};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{
    Config, HidBootProtocol, HidReader, HidReaderWriter, HidSubclass, HidWriter, RequestHandler,
    State,
};
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;

use crate::config::HID_POLL_MS;

/// Input report size: X axis plus the button bitfield.
pub const IN_REPORT_SIZE: usize = JoystickReport::SIZE;
/// Output report size: the LED bitfield.
pub const OUT_REPORT_SIZE: usize = LightingCommand::SIZE;

pub type UsbDriver<'d> = Driver<'d, USB>;
pub type JoystickHid<'d> = HidReaderWriter<'d, UsbDriver<'d>, OUT_REPORT_SIZE, IN_REPORT_SIZE>;
pub type JoystickWriter<'d> = HidWriter<'d, UsbDriver<'d>, IN_REPORT_SIZE>;
pub type JoystickReader<'d> = HidReader<'d, UsbDriver<'d>, OUT_REPORT_SIZE>;

/// USB HID joystick output.
///
/// Wraps an embassy-usb HID writer to send joystick reports.
pub struct UsbHidOutput<'d> {
    writer: JoystickWriter<'d>,
    ready: bool,
}

impl<'d> UsbHidOutput<'d> {
    /// Create a new USB HID output from the given HID writer.
    pub fn new(writer: JoystickWriter<'d>) -> Self {
        Self {
            writer,
            ready: false,
        }
    }

    /// Wait until the device is ready (USB enumerated).
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
        self.ready = true;
    }
}

impl OutputSink for UsbHidOutput<'_> {
    async fn send(&mut self, report: &JoystickReport) -> Result<(), OutputError> {
        self.writer.write(&report.as_bytes()).await.map_err(|e| match e {
            EndpointError::Disabled => {
                self.ready = false;
                OutputError::Disconnected
            }
            EndpointError::BufferOverflow => OutputError::Io,
        })
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Configure the USB HID class in the USB builder.
///
/// `handler` serves SET_REPORT requests on the control pipe. Returns the
/// combined reader/writer; the reader carries interrupt OUT lighting reports.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, UsbDriver<'d>>,
    state: &'d mut State<'d>,
    handler: &'d mut dyn RequestHandler,
) -> JoystickHid<'d> {
    let config = Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: Some(handler),
        poll_ms: HID_POLL_MS,
        max_packet_size: 8,
        hid_subclass: HidSubclass::No,
        hid_boot_protocol: HidBootProtocol::None,
    };

    HidReaderWriter::new(builder, state, config)
}
