//! Core controller types: Buttons, Direction.

use core::ops::{BitAnd, BitOr, Neg};

/// Maximum number of buttons on the controller.
pub const BUTTON_COUNT: usize = 11;

/// Button state represented as a bitfield.
///
/// Bit `i` corresponds to button `i + 1` in the HID report. The same layout
/// is used by host lighting commands, where a set bit means "LED on".
///
/// # Example
///
/// ```
/// use beef_core::Buttons;
///
/// let buttons = Buttons::BUTTON_1 | Buttons::START;
/// assert!(buttons.contains(Buttons::BUTTON_1));
/// assert!(buttons.contains(Buttons::START));
/// assert!(!buttons.contains(Buttons::AUX));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const BUTTON_1: Self = Self(1 << 0);
    pub const BUTTON_2: Self = Self(1 << 1);
    pub const BUTTON_3: Self = Self(1 << 2);
    pub const BUTTON_4: Self = Self(1 << 3);
    pub const BUTTON_5: Self = Self(1 << 4);
    pub const BUTTON_6: Self = Self(1 << 5);
    pub const BUTTON_7: Self = Self(1 << 6);
    pub const START: Self = Self(1 << 7);
    pub const VEFX: Self = Self(1 << 8);
    pub const EFFECT: Self = Self(1 << 9);
    pub const AUX: Self = Self(1 << 10);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Every button on the controller.
    pub const ALL: Self = Self((1 << BUTTON_COUNT) - 1);

    /// The button at zero-based `index`, or [`Buttons::NONE`] when out of range.
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        if index < 16 {
            Self(1 << index)
        } else {
            Self::NONE
        }
    }

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Check if the button at zero-based `index` is set.
    #[inline]
    #[must_use]
    pub const fn is_set(self, index: usize) -> bool {
        index < 16 && self.0 & (1 << index) != 0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: Buttons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

/// Tri-state rotation direction.
///
/// Used both as the analog tracker's reported state and as the per-poll
/// position delta of the quadrature decoder.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i8)]
pub enum Direction {
    Reverse = -1,
    #[default]
    Neutral = 0,
    Forward = 1,
}

impl Direction {
    /// Signed value of the direction: -1, 0 or +1.
    #[inline]
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        self as i8
    }

    #[inline]
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        matches!(self, Direction::Neutral)
    }
}

impl Neg for Direction {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        match self {
            Direction::Reverse => Direction::Forward,
            Direction::Neutral => Direction::Neutral,
            Direction::Forward => Direction::Reverse,
        }
    }
}

impl From<Direction> for i8 {
    #[inline]
    fn from(direction: Direction) -> Self {
        direction.as_i8()
    }
}
