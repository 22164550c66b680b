//! HID report layouts: the joystick input report and the host lighting
//! output report.

use crate::types::{Buttons, BUTTON_COUNT};

/// Error type for decoding host reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// The report is shorter than the expected layout.
    TooShort,
}

/// Joystick input report sent to the host.
///
/// Wire layout (3 bytes): `[x, buttons_lo, buttons_hi]`, matching
/// [`REPORT_DESCRIPTOR`].
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickReport {
    /// Turntable axis: tri-state direction or wrapping position.
    pub x: i8,
    /// Pressed buttons, bit 0 = button 1.
    pub buttons: Buttons,
}

impl JoystickReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 3;

    /// Neutral/zero report.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            x: 0,
            buttons: Buttons::NONE,
        }
    }

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let buttons = self.buttons.raw().to_le_bytes();
        [self.x as u8, buttons[0], buttons[1]]
    }
}

/// Lighting state requested by the host, one bit per button LED.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightingCommand {
    pub lights: Buttons,
}

impl LightingCommand {
    /// Size of the output report in bytes.
    pub const SIZE: usize = 2;

    #[must_use]
    pub const fn new(lights: Buttons) -> Self {
        Self { lights }
    }

    /// Decode a lighting output report (little-endian u16).
    ///
    /// Trailing bytes are ignored, as are bits beyond the button count.
    pub fn parse(data: &[u8]) -> Result<Self, ReportError> {
        match data {
            [lo, hi, ..] => {
                let raw = u16::from_le_bytes([*lo, *hi]);
                Ok(Self::new(Buttons(raw) & Buttons::ALL))
            }
            _ => Err(ReportError::TooShort),
        }
    }

    /// Whether the LED at zero-based `index` should be lit.
    #[inline]
    #[must_use]
    pub const fn is_lit(&self, index: usize) -> bool {
        self.lights.is_set(index)
    }
}

/// HID report descriptor for the controller.
///
/// - Input: 1 signed 8-bit axis (X), 11 buttons, 5 bits padding
/// - Output: 11 LEDs, 5 bits padding
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x04, // Usage (Joystick)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Turntable ---
    0x09, 0x30, //   Usage (X)
    0x15, 0x80, //   Logical Minimum (-128)
    0x25, 0x7F, //   Logical Maximum (127)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Buttons (11 buttons) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, BUTTON_COUNT as u8, //   Usage Maximum (Button 11)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, BUTTON_COUNT as u8, //   Report Count (11)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x75, 0x05, //   Report Size (5)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x03, //   Input (Constant) - padding
    //
    // --- Button LEDs ---
    0x05, 0x08, //   Usage Page (LEDs)
    0x19, 0x01, //   Usage Minimum (1)
    0x29, BUTTON_COUNT as u8, //   Usage Maximum (11)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, BUTTON_COUNT as u8, //   Report Count (11)
    0x91, 0x02, //   Output (Data, Variable, Absolute)
    0x75, 0x05, //   Report Size (5)
    0x95, 0x01, //   Report Count (1)
    0x91, 0x03, //   Output (Constant) - padding
    //
    0xC0, // End Collection
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_bytes() {
        let report = JoystickReport {
            x: -1,
            buttons: Buttons::BUTTON_1 | Buttons::VEFX,
        };
        assert_eq!(report.as_bytes(), [0xFF, 0x01, 0x01]);
        assert_eq!(JoystickReport::neutral().as_bytes(), [0, 0, 0]);
    }

    #[test]
    fn test_parse_lighting_command() {
        let cmd = LightingCommand::parse(&[0x04, 0x04]).unwrap();
        assert!(cmd.is_lit(2));
        assert!(cmd.is_lit(10));
        assert!(!cmd.is_lit(0));
    }

    #[test]
    fn test_parse_masks_unused_bits_and_ignores_trailing_bytes() {
        let cmd = LightingCommand::parse(&[0xFF, 0xFF, 0x12]).unwrap();
        assert_eq!(cmd.lights, Buttons::ALL);
    }

    #[test]
    fn test_parse_short_report() {
        assert_eq!(LightingCommand::parse(&[0x01]), Err(ReportError::TooShort));
        assert_eq!(LightingCommand::parse(&[]), Err(ReportError::TooShort));
    }

    #[test]
    fn test_descriptor_bit_totals() {
        // Walk short items and sum Report Size * Report Count per main item.
        let mut size = 0u32;
        let mut count = 0u32;
        let mut input_bits = 0u32;
        let mut output_bits = 0u32;
        let mut i = 0;
        while i < REPORT_DESCRIPTOR.len() {
            let prefix = REPORT_DESCRIPTOR[i];
            let len = match prefix & 0x03 {
                3 => 4,
                n => n as usize,
            };
            let value = REPORT_DESCRIPTOR
                .get(i + 1..i + 1 + len)
                .map(|b| b.iter().rev().fold(0u32, |acc, &x| (acc << 8) | x as u32))
                .unwrap_or(0);
            match prefix & 0xFC {
                0x74 => size = value,
                0x94 => count = value,
                0x80 => input_bits += size * count,
                0x90 => output_bits += size * count,
                _ => {}
            }
            i += 1 + len;
        }
        assert_eq!(input_bits as usize, JoystickReport::SIZE * 8);
        assert_eq!(output_bits as usize, LightingCommand::SIZE * 8);
    }
}
