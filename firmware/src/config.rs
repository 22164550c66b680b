//! Start-up configuration constants.
//!
//! # Pin mapping
//!
//! | Function            | GPIO    | Description                         |
//! |---------------------|---------|-------------------------------------|
//! | Buttons 1-7         | 0-6     | Input, pull-up, active low          |
//! | START / VEFX / EFFECT / AUX | 7-10 | Input, pull-up, active low    |
//! | Button LEDs         | 11-21   | Output, LED `i` belongs to button `i` |
//! | Turntable phase A/B | 26 / 27 | Input, pull-up (`turntable-quadrature`) |
//! | Turntable sensor    | 26      | ADC0 (`turntable-analog`)           |

use beef_core::AnalogConfig;
use embassy_time::Duration;

/// Interval between poll iterations.
pub const POLL_PERIOD: Duration = Duration::from_micros(250);

/// Delay before resending a report whose USB write failed.
pub const OUTPUT_RETRY_PERIOD: Duration = Duration::from_millis(1);

/// pid.codes test VID/PID.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;
pub const USB_MANUFACTURER: &str = "BEEF";
pub const USB_PRODUCT: &str = "BEEF Turntable Controller";
pub const USB_SERIAL: &str = "001";

/// Host polling interval for the HID endpoints.
pub const HID_POLL_MS: u8 = 1;

/// Analog tracker tuning.
pub const ANALOG: AnalogConfig = AnalogConfig::new(
    AnalogConfig::DEFAULT_DEADZONE,
    Duration::from_millis(AnalogConfig::DEFAULT_SUSTAIN_MS),
    true,
);

/// Right shift that scales a 12-bit ADC conversion to the tracker's 8 bits.
pub const ADC_SHIFT: u32 = 4;
