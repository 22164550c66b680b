//! Quadrature decoder for a two-phase turntable encoder.

use embassy_time::Instant;

use crate::turntable::TurntableDecoder;
use crate::types::Direction;

/// Raw levels of the two encoder phases sampled in one poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phases {
    pub a: bool,
    pub b: bool,
}

impl Phases {
    #[must_use]
    pub const fn new(a: bool, b: bool) -> Self {
        Self { a, b }
    }

    /// The 2-bit phase code `ab`.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        ((self.a as u8) << 1) | self.b as u8
    }

    /// Phases for a 2-bit code; bits above the second are ignored.
    #[inline]
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        Self {
            a: code & 0b10 != 0,
            b: code & 0b01 != 0,
        }
    }
}

/// Classify a transition between two phase codes.
///
/// Forward rotation cycles 3 -> 1 -> 0 -> 2 -> 3, reverse rotation cycles
/// 1 -> 3 -> 2 -> 0 -> 1. Repeats and two-bit jumps are not motion.
#[inline]
#[must_use]
pub const fn classify(previous: u8, current: u8) -> Direction {
    match (previous, current) {
        (3, 1) | (1, 0) | (0, 2) | (2, 3) => Direction::Forward,
        (1, 3) | (0, 1) | (2, 0) | (3, 2) => Direction::Reverse,
        _ => Direction::Neutral,
    }
}

/// Accumulates encoder steps into a signed position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    previous: Option<u8>,
    position: i32,
}

impl QuadratureDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            previous: None,
            position: 0,
        }
    }

    /// Total steps since initialization (forward minus reverse).
    #[inline]
    #[must_use]
    pub const fn position(&self) -> i32 {
        self.position
    }

    /// Feed one sample of both phases and return the step it produced.
    ///
    /// The first sample after construction only seeds the previous code.
    pub fn poll(&mut self, phases: Phases) -> Direction {
        let current = phases.code();
        let step = match self.previous {
            Some(previous) => classify(previous, current),
            None => Direction::Neutral,
        };
        self.previous = Some(current);
        self.position = self.position.wrapping_add(i32::from(step.as_i8()));
        step
    }
}

impl TurntableDecoder for QuadratureDecoder {
    type Sample = Phases;

    /// Reports the running position truncated to a signed byte; the host
    /// treats the axis as a wrapping counter.
    #[inline]
    fn update(&mut self, sample: Phases, _now: Instant) -> i8 {
        self.poll(sample);
        self.position as i8
    }
}
