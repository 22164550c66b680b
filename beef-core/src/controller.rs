//! Controller context: owns the decoders, the LEDs and the latest report.

use embassy_time::Instant;

use crate::gpio::{ButtonInputs, LedBank};
use crate::matrix::{ButtonMatrix, LightingMode};
use crate::report::{JoystickReport, LightingCommand, ReportError};
use crate::turntable::TurntableDecoder;

/// Single owner of all mutable controller state.
///
/// The poll loop calls [`poll`](Self::poll) once per iteration, and host
/// lighting commands are applied between iterations through
/// [`on_host_lighting_command`](Self::on_host_lighting_command). Both take
/// `&mut self`, so the lighting mode and LED pins only ever have one writer.
pub struct Controller<T, L, const N: usize> {
    turntable: T,
    matrix: ButtonMatrix<N>,
    leds: L,
    report: JoystickReport,
}

impl<T, L, const N: usize> Controller<T, L, N>
where
    T: TurntableDecoder,
    L: LedBank,
{
    /// Create a controller in reactive lighting mode with a neutral report.
    pub fn new(turntable: T, leds: L) -> Self {
        Self {
            turntable,
            matrix: ButtonMatrix::new(),
            leds,
            report: JoystickReport::neutral(),
        }
    }

    /// Run one poll iteration and return the assembled report.
    pub fn poll(&mut self, sample: T::Sample, levels: &[bool; N], now: Instant) -> JoystickReport {
        let x = self.turntable.update(sample, now);
        let buttons = self.matrix.poll(levels, &mut self.leds);
        self.report = JoystickReport { x, buttons };
        self.report
    }

    /// Like [`poll`](Self::poll), reading the button levels from `inputs`.
    pub fn poll_inputs<B>(&mut self, sample: T::Sample, inputs: &mut B, now: Instant) -> JoystickReport
    where
        B: ButtonInputs<N> + ?Sized,
    {
        let levels = inputs.read_levels();
        self.poll(sample, &levels, now)
    }

    /// Apply a lighting command received from the host.
    pub fn on_host_lighting_command(&mut self, command: LightingCommand) {
        debug!("lighting command {:#x}", command.lights.raw());
        self.matrix.on_host_lighting_command(command, &mut self.leds);
    }

    /// Decode and apply a raw lighting output report.
    ///
    /// A malformed report leaves the lighting mode unchanged.
    pub fn on_host_lighting_report(&mut self, data: &[u8]) -> Result<(), ReportError> {
        let command = LightingCommand::parse(data).map_err(|e| {
            warn!("rejected lighting report of {} bytes", data.len());
            e
        })?;
        self.on_host_lighting_command(command);
        Ok(())
    }

    /// The report assembled by the last poll.
    #[inline]
    #[must_use]
    pub fn report(&self) -> JoystickReport {
        self.report
    }

    #[inline]
    #[must_use]
    pub fn lighting_mode(&self) -> LightingMode {
        self.matrix.mode()
    }

    #[inline]
    pub fn turntable(&self) -> &T {
        &self.turntable
    }

    #[inline]
    pub fn leds(&self) -> &L {
        &self.leds
    }
}
