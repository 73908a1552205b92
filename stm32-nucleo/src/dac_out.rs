use core::cell::{Cell, RefCell};

use rover_control::bsp::analog::AnalogOut;

use crate::stm_hal::analog::dac::DacOut;

/// The DAC is 12 bit, the low nibble of the 16 bit code is dropped
const CODE_SHIFT: u16 = 4;

pub struct DacChannel<DAC: DacOut<u16>> {
    dac_ch: RefCell<DAC>,
    state: Cell<u16>,
}

impl<DAC: DacOut<u16>> DacChannel<DAC> {
    pub(crate) fn create(dac_ch: DAC) -> Self {
        let channel = DacChannel {
            dac_ch: RefCell::new(dac_ch),
            state: Cell::new(0),
        };

        channel.dac_ch.borrow_mut().set_value(0);

        return channel;
    }
}

impl<DAC: DacOut<u16>> AnalogOut for DacChannel<DAC> {
    fn write(&self, code: u16) {
        self.state.set(code);
        self.dac_ch.borrow_mut().set_value(code >> CODE_SHIFT);
    }

    fn code(&self) -> u16 {
        return self.state.get();
    }
}
