//! GPIO seams for button inputs and LED outputs.
//!
//! Only infallible pins are accepted so the decoding layer never has to
//! surface a hardware error.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin, PinState};

/// A bank of button inputs read as raw electrical levels (`true` = high).
pub trait ButtonInputs<const N: usize> {
    fn read_levels(&mut self) -> [bool; N];
}

/// A bank of LEDs, one per button.
pub trait LedBank {
    /// Drive the LED at `index`; out-of-range indices are ignored.
    fn set_led(&mut self, index: usize, lit: bool);
}

impl<P, const N: usize> ButtonInputs<N> for [P; N]
where
    P: InputPin<Error = Infallible>,
{
    fn read_levels(&mut self) -> [bool; N] {
        let mut levels = [true; N];
        for (level, pin) in levels.iter_mut().zip(self.iter_mut()) {
            *level = match pin.is_high() {
                Ok(high) => high,
                Err(never) => match never {},
            };
        }
        levels
    }
}

impl<P, const N: usize> LedBank for [P; N]
where
    P: OutputPin<Error = Infallible>,
{
    fn set_led(&mut self, index: usize, lit: bool) {
        if let Some(pin) = self.get_mut(index) {
            match pin.set_state(PinState::from(lit)) {
                Ok(()) => {}
                Err(never) => match never {},
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use embedded_hal::digital::ErrorType;

    /// Output pin that remembers its last driven state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct MockLed {
        pub lit: bool,
        pub writes: u32,
    }

    impl ErrorType for MockLed {
        type Error = Infallible;
    }

    impl OutputPin for MockLed {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.lit = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.lit = true;
            self.writes += 1;
            Ok(())
        }
    }

    /// Input pin with a fixed level.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MockButton {
        pub high: bool,
    }

    impl ErrorType for MockButton {
        type Error = Infallible;
    }

    impl InputPin for MockButton {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    pub fn lit(leds: &[MockLed]) -> u16 {
        leds.iter()
            .enumerate()
            .filter(|(_, led)| led.lit)
            .fold(0, |acc, (i, _)| acc | (1 << i))
    }
}
