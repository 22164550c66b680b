//! Turntable decoder seam shared by the analog and quadrature variants.

use embassy_time::Instant;

/// A decoder that turns one raw turntable sample per poll into the signed
/// byte placed in the report's X axis.
///
/// Both hardware variants implement this trait, so the
/// [`Controller`](crate::Controller) does not care which sensor is fitted.
pub trait TurntableDecoder {
    /// Raw sample read from the hardware each poll.
    type Sample: Copy;

    /// Feed one sample taken at `now` and return the axis value to report.
    fn update(&mut self, sample: Self::Sample, now: Instant) -> i8;
}
