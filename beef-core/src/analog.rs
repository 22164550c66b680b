//! Analog turntable tracker.
//!
//! Converts a sampled rotary sensor value into a tri-state [`Direction`].
//! Motion is detected when the sample moves at least `deadzone` away from a
//! tracking center. Once motion stops, the last direction is held until the
//! sustain timer expires, after which the tracker recenters on the current
//! sample and reports neutral.

use embassy_time::{Duration, Instant};

use crate::timer::SustainTimer;
use crate::turntable::TurntableDecoder;
use crate::types::Direction;

/// Tracker configuration, supplied once at start-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogConfig {
    /// Minimum sample delta from the center that counts as motion.
    pub deadzone: u32,
    /// How long the last direction is held after motion stops.
    pub sustain: Duration,
    /// Report one neutral poll whenever the direction flips sign.
    pub clear_on_reversal: bool,
}

impl AnalogConfig {
    pub const DEFAULT_DEADZONE: u32 = 3;
    pub const DEFAULT_SUSTAIN_MS: u64 = 150;

    #[must_use]
    pub const fn new(deadzone: u32, sustain: Duration, clear_on_reversal: bool) -> Self {
        Self {
            deadzone,
            sustain,
            clear_on_reversal,
        }
    }
}

impl Default for AnalogConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_DEADZONE,
            Duration::from_millis(Self::DEFAULT_SUSTAIN_MS),
            true,
        )
    }
}

/// Dead-zone/hysteresis tracker for an analog turntable sensor.
#[derive(Clone, Debug)]
pub struct AnalogTurntable {
    config: AnalogConfig,
    deadzone: i32,
    center: Option<u8>,
    direction: Direction,
    sustain_timer: SustainTimer,
}

impl AnalogTurntable {
    #[must_use]
    pub fn new(config: AnalogConfig) -> Self {
        Self {
            config,
            deadzone: i32::try_from(config.deadzone).unwrap_or(i32::MAX),
            center: None,
            direction: Direction::Neutral,
            sustain_timer: SustainTimer::new(),
        }
    }

    /// Forget the reference center and held direction, and disarm the timer.
    pub fn reset(&mut self) {
        self.center = None;
        self.direction = Direction::Neutral;
        self.sustain_timer.disarm();
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &AnalogConfig {
        &self.config
    }

    /// The current reference center, if one has been established.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Option<u8> {
        self.center
    }

    /// The held direction, which may differ from the last reported value
    /// right after a reversal.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Feed one raw sample taken at `now` and return the direction to report.
    ///
    /// Only the low 8 bits of `sample` are used: the delta to the center is
    /// computed with 8-bit wraparound so that a sensor rolling over from
    /// 255 to 0 still reads as a small step.
    pub fn poll(&mut self, sample: u32, now: Instant) -> Direction {
        let observed = sample as u8;
        let Some(center) = self.center else {
            self.center = Some(observed);
            return Direction::Neutral;
        };
        let delta = i32::from(observed.wrapping_sub(center) as i8);

        let instantaneous = if delta >= self.deadzone {
            Direction::Forward
        } else if delta <= -self.deadzone {
            Direction::Reverse
        } else {
            Direction::Neutral
        };

        if !instantaneous.is_neutral() {
            // Track the moving center and slide the sustain deadline.
            self.center = Some(observed);
            self.sustain_timer.arm(now, self.config.sustain);
        } else if self.sustain_timer.check_expired_reset(now) {
            trace!("turntable idle, recentering at {}", observed);
            self.direction = Direction::Neutral;
            self.center = Some(observed);
        }

        if self.config.clear_on_reversal && instantaneous == -self.direction {
            // One neutral report at the turning point.
            self.direction = instantaneous;
            return Direction::Neutral;
        }

        if !instantaneous.is_neutral() {
            self.direction = instantaneous;
        }

        self.direction
    }
}

impl TurntableDecoder for AnalogTurntable {
    type Sample = u32;

    #[inline]
    fn update(&mut self, sample: u32, now: Instant) -> i8 {
        self.poll(sample, now).as_i8()
    }
}
