//! Potentiometer knob
//!
//! Raw ADC readings jitter by a few counts even with the knob untouched.
//! A new reading is only reported once it has moved at least the
//! hysteresis away from the last reported one.

use dealerbot_core::config::PotConfig;
use dealerbot_core::traits::SensorError;

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read ADC value (12-bit, 0-4095)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

/// Potentiometer with hysteresis
pub struct Potentiometer<ADC> {
    adc: ADC,
    adc_max: u16,
    hysteresis: u16,
    /// Last reported reading
    last: Option<u16>,
}

impl<ADC: AdcReader> Potentiometer<ADC> {
    /// Create a new knob
    pub fn new(adc: ADC, config: &PotConfig) -> Self {
        Self {
            adc,
            adc_max: config.adc_max,
            hysteresis: config.hysteresis,
            last: None,
        }
    }

    /// Read the knob, clamped to `adc_max`
    pub fn read_raw(&mut self) -> Result<u16, SensorError> {
        let raw = self.adc.read().map_err(|_| SensorError::ReadFailed)?;
        Ok(raw.min(self.adc_max))
    }

    /// Read the knob and return the value if it moved
    ///
    /// The first successful reading is always reported. Reaching either end
    /// of the range is reported even inside the hysteresis band so the
    /// extremes stay selectable.
    pub fn poll(&mut self) -> Result<Option<u16>, SensorError> {
        let raw = self.read_raw()?;
        let moved = match self.last {
            None => true,
            Some(last) if last == raw => false,
            Some(last) => {
                raw.abs_diff(last) >= self.hysteresis || raw == 0 || raw == self.adc_max
            }
        };
        if moved {
            self.last = Some(raw);
            Ok(Some(raw))
        } else {
            Ok(None)
        }
    }

    /// Last reported reading
    pub fn last(&self) -> Option<u16> {
        self.last
    }
}
