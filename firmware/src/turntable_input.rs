//! Turntable sensor sampling for the selected hardware variant.

#[cfg(feature = "turntable-analog")]
pub use analog::{AnalogInput as TurntableInput, Decoder};
#[cfg(feature = "turntable-quadrature")]
pub use quadrature::{Decoder, QuadratureInput as TurntableInput};

#[cfg(feature = "turntable-quadrature")]
mod quadrature {
    use beef_core::{Phases, QuadratureDecoder};
    use embassy_rp::gpio::Input;

    pub type Decoder = QuadratureDecoder;

    /// Both encoder phases, read as GPIO levels.
    pub struct QuadratureInput<'d> {
        a: Input<'d>,
        b: Input<'d>,
    }

    impl<'d> QuadratureInput<'d> {
        #[must_use]
        pub fn new(a: Input<'d>, b: Input<'d>) -> Self {
            Self { a, b }
        }

        #[must_use]
        pub fn decoder() -> Decoder {
            QuadratureDecoder::new()
        }

        #[inline]
        pub fn sample(&mut self) -> Phases {
            Phases::new(self.a.is_high(), self.b.is_high())
        }
    }
}

#[cfg(feature = "turntable-analog")]
mod analog {
    use beef_core::AnalogTurntable;
    use defmt::warn;
    use embassy_rp::adc::{Adc, Blocking, Channel};

    use crate::config::{ADC_SHIFT, ANALOG};

    pub type Decoder = AnalogTurntable;

    /// Analog turntable sensor on an ADC channel.
    ///
    /// A failed conversion is logged and the last good sample is reused, so
    /// the tracker simply sees no motion for that poll.
    pub struct AnalogInput<'d> {
        adc: Adc<'d, Blocking>,
        channel: Channel<'d>,
        last: u32,
    }

    impl<'d> AnalogInput<'d> {
        #[must_use]
        pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
            Self {
                adc,
                channel,
                last: 0,
            }
        }

        #[must_use]
        pub fn decoder() -> Decoder {
            AnalogTurntable::new(ANALOG)
        }

        pub fn sample(&mut self) -> u32 {
            match self.adc.blocking_read(&mut self.channel) {
                Ok(raw) => self.last = u32::from(raw) >> ADC_SHIFT,
                Err(_) => warn!("ADC conversion failed, holding last sample"),
            }
            self.last
        }
    }
}
