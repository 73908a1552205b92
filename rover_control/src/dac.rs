use crate::bsp::analog::AnalogOut;
use crate::voltage::{Voltage, V_MAX};

pub const DAC_MAX: u16 = u16::MAX;

/// Converts volts to a 16 bit DAC code, rounding to the nearest step.
///
/// Anything outside of `0..=V_MAX` is clamped first, so the code never wraps.
pub fn dac_code(volts: f32) -> u16 {
    let volts = if volts.is_nan() { 0.0 } else { volts.max(0.0).min(V_MAX) };
    (volts / V_MAX * DAC_MAX as f32 + 0.5) as u16
}

/// Analog output channel bound to a board output
pub struct AnalogOutput<'a> {
    channel: &'a dyn AnalogOut,
}

impl<'a> AnalogOutput<'a> {
    pub fn new(channel: &'a dyn AnalogOut) -> Self {
        AnalogOutput { channel }
    }

    /// Writes the voltage and returns the code which was written
    pub fn set(&self, voltage: Voltage) -> u16 {
        let code = dac_code(voltage.volts());
        self.channel.write(code);
        code
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use crate::bsp::analog::AnalogOut;
    use crate::dac::{dac_code, AnalogOutput, DAC_MAX};
    use crate::voltage::Voltage;

    struct TestOut {
        code: Cell<u16>,
    }

    impl AnalogOut for TestOut {
        fn write(&self, code: u16) {
            self.code.set(code);
        }

        fn code(&self) -> u16 {
            self.code.get()
        }
    }

    #[test]
    fn codes_at_known_voltages() {
        assert_eq!(dac_code(3.3), DAC_MAX);
        assert_eq!(dac_code(0.0), 0);
        assert_eq!(dac_code(1.774), 35230);
        assert_eq!(dac_code(0.00001), 0);
    }

    #[test]
    fn out_of_range_voltage_is_clamped() {
        assert_eq!(dac_code(-1.0), 0);
        assert_eq!(dac_code(5.0), DAC_MAX);
        assert_eq!(dac_code(f32::NAN), 0);
    }

    #[test]
    fn output_writes_the_code_to_the_channel() {
        let out = TestOut { code: Cell::new(7) };
        let output = AnalogOutput::new(&out);
        assert_eq!(output.set(Voltage::MAX), DAC_MAX);
        assert_eq!(out.code.get(), DAC_MAX);
        output.set(Voltage::STOP);
        assert_eq!(out.code(), 35230);
    }
}
