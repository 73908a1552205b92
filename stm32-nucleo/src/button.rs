use rover_control::bsp::pin::Pin;

use crate::hal::digital::v2::InputPin;

/// Switch between the pin and ground, with the internal pull up enabled
pub struct PullUpButton<INPUT: InputPin> {
    pub(crate) pin: INPUT,
}

impl<INPUT: InputPin> Pin for PullUpButton<INPUT> {
    fn is_down(&self) -> bool {
        return self.pin.is_low().unwrap_or(false);
    }
}
