//! Button matrix with reactive lighting arbitration.
//!
//! Every button has a dedicated LED. Until the host sends its first lighting
//! command the LEDs mirror the buttons ("reactive" mode). After that the host
//! owns the LEDs for the rest of the power cycle and the poll loop no longer
//! touches them.

use crate::gpio::LedBank;
use crate::report::LightingCommand;
use crate::types::Buttons;

/// Who drives the button LEDs.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightingMode {
    /// LEDs follow button presses.
    #[default]
    Reactive,
    /// LEDs follow the last host lighting command.
    HostControlled,
}

/// Pressed-button state for `N` buttons plus the lighting mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMatrix<const N: usize> {
    buttons: Buttons,
    mode: LightingMode,
}

impl<const N: usize> ButtonMatrix<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buttons: Buttons::NONE,
            mode: LightingMode::Reactive,
        }
    }

    /// Buttons pressed as of the last poll.
    #[inline]
    #[must_use]
    pub const fn buttons(&self) -> Buttons {
        self.buttons
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> LightingMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub const fn is_reactive(&self) -> bool {
        matches!(self.mode, LightingMode::Reactive)
    }

    /// Update the button state from raw active-low `levels` and, in reactive
    /// mode, mirror each press onto its LED.
    pub fn poll<L: LedBank + ?Sized>(&mut self, levels: &[bool; N], leds: &mut L) -> Buttons {
        let reactive = self.is_reactive();
        for (index, &level) in levels.iter().enumerate() {
            let pressed = !level;
            self.buttons.set(Buttons::from_index(index), pressed);
            if reactive {
                leds.set_led(index, pressed);
            }
        }
        self.buttons
    }

    /// Hand the LEDs to the host and apply its lighting state.
    ///
    /// There is no way back to reactive mode short of a power cycle.
    pub fn on_host_lighting_command<L: LedBank + ?Sized>(
        &mut self,
        command: LightingCommand,
        leds: &mut L,
    ) {
        if self.is_reactive() {
            info!("host took over button lighting");
            self.mode = LightingMode::HostControlled;
        }
        for index in 0..N {
            leds.set_led(index, command.is_lit(index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::mock::{lit, MockLed};
    use crate::types::BUTTON_COUNT;

    const RELEASED: bool = true;
    const PRESSED: bool = false;

    fn levels_with(pressed: &[usize]) -> [bool; BUTTON_COUNT] {
        let mut levels = [RELEASED; BUTTON_COUNT];
        for &i in pressed {
            levels[i] = PRESSED;
        }
        levels
    }

    #[test]
    fn test_active_low_translation() {
        let mut matrix = ButtonMatrix::<BUTTON_COUNT>::new();
        let mut leds = [MockLed::default(); BUTTON_COUNT];

        let buttons = matrix.poll(&levels_with(&[0, 7, 10]), &mut leds);
        assert_eq!(buttons, Buttons::BUTTON_1 | Buttons::START | Buttons::AUX);

        let buttons = matrix.poll(&levels_with(&[]), &mut leds);
        assert!(buttons.is_empty());
    }

    #[test]
    fn test_reactive_leds_follow_buttons() {
        let mut matrix = ButtonMatrix::<BUTTON_COUNT>::new();
        let mut leds = [MockLed::default(); BUTTON_COUNT];

        matrix.poll(&levels_with(&[1, 4]), &mut leds);
        assert_eq!(lit(&leds), 0b1_0010);

        matrix.poll(&levels_with(&[4]), &mut leds);
        assert_eq!(lit(&leds), 0b1_0000);
    }

    #[test]
    fn test_host_command_takes_over_lighting() {
        let mut matrix = ButtonMatrix::<BUTTON_COUNT>::new();
        let mut leds = [MockLed::default(); BUTTON_COUNT];

        matrix.poll(&levels_with(&[3]), &mut leds);
        assert!(leds[3].lit);

        matrix.on_host_lighting_command(LightingCommand::new(Buttons::NONE), &mut leds);
        assert_eq!(matrix.mode(), LightingMode::HostControlled);
        assert!(!leds[3].lit);

        // Still pressed: LED stays off.
        matrix.poll(&levels_with(&[3]), &mut leds);
        assert!(!leds[3].lit);
        assert!(matrix.buttons().contains(Buttons::BUTTON_4));

        // Released: no effect either.
        matrix.poll(&levels_with(&[]), &mut leds);
        assert!(!leds[3].lit);
        assert!(matrix.buttons().is_empty());
    }

    #[test]
    fn test_host_mode_never_writes_leds_from_poll() {
        let mut matrix = ButtonMatrix::<BUTTON_COUNT>::new();
        let mut leds = [MockLed::default(); BUTTON_COUNT];

        matrix.on_host_lighting_command(
            LightingCommand::new(Buttons::BUTTON_2 | Buttons::EFFECT),
            &mut leds,
        );
        let writes: u32 = leds.iter().map(|l| l.writes).sum();

        matrix.poll(&levels_with(&[0, 1, 2]), &mut leds);
        matrix.poll(&levels_with(&[]), &mut leds);

        assert_eq!(leds.iter().map(|l| l.writes).sum::<u32>(), writes);
        assert_eq!(lit(&leds), (Buttons::BUTTON_2 | Buttons::EFFECT).raw());
    }

    #[test]
    fn test_later_commands_replace_lighting() {
        let mut matrix = ButtonMatrix::<BUTTON_COUNT>::new();
        let mut leds = [MockLed::default(); BUTTON_COUNT];

        matrix.on_host_lighting_command(LightingCommand::new(Buttons::ALL), &mut leds);
        assert_eq!(lit(&leds), Buttons::ALL.raw());

        matrix.on_host_lighting_command(LightingCommand::new(Buttons::START), &mut leds);
        assert_eq!(lit(&leds), Buttons::START.raw());
        assert!(!matrix.is_reactive());
    }

    #[test]
    fn test_smaller_matrix() {
        let mut matrix = ButtonMatrix::<2>::new();
        let mut leds = [MockLed::default(); 2];
        let buttons = matrix.poll(&[PRESSED, RELEASED], &mut leds);
        assert_eq!(buttons, Buttons::BUTTON_1);
        assert_eq!(lit(&leds), 0b01);
    }
}
