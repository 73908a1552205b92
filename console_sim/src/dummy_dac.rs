use std::cell::Cell;

use rover_control::bsp::analog::AnalogOut;
use rover_control::voltage::V_MAX;

/// DAC channel which resides in memory, for simulation
pub struct DummyDac {
    code: Cell<u16>,
}

impl DummyDac {
    /// Factory function to create a dummy DAC channel
    pub fn create() -> Self {
        return DummyDac { code: Cell::new(0) };
    }

    pub fn volts(&self) -> f32 {
        self.code.get() as f32 / u16::MAX as f32 * V_MAX
    }
}

impl AnalogOut for DummyDac {
    fn write(&self, code: u16) {
        self.code.set(code);
    }

    fn code(&self) -> u16 {
        return self.code.get();
    }
}
