use no_std_compat::cell::Cell;

use log::{debug, warn};

use crate::bsp::analog::AnalogOut;
use crate::bsp::pin::Pin;
use crate::bsp::sensors::{Acceleration, Accelerometer, ColorData, ColorSensor};
use crate::dac::AnalogOutput;
use crate::debounce::DebouncedSwitch;
use crate::edt::EDT;
use crate::error::SensorError;
use crate::lux::calculate_lux;
use crate::mode::{on_off, Mode};
use crate::steering::control_vehicle_direction;
use crate::voltage::{calc_voltage, Voltage};

#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum Action {
    CheckSwitches,
    AwaitColorData,
    Actuate,
}

pub const SWITCH_CHECK_PERIOD: u32 = 10;
/// How often the color sensor is asked again while it has no data
pub const COLOR_RETRY_PERIOD: u32 = 100;
/// Settling time between data ready and reading the sensors
pub const ACTUATION_DELAY: u32 = 10;
/// Pause after one pass before waiting for the next color sample
pub const CYCLE_PERIOD: u32 = 30;

/// Sensor readings of one pass, never kept across passes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorFrame {
    pub acceleration: Acceleration,
    pub color: ColorData,
}

impl SensorFrame {
    pub fn lux(&self) -> f32 {
        calculate_lux(self.color.r, self.color.g, self.color.b)
    }
}

/// Control logic polls the switches and maps sensor readings to the throttle and steering outputs
pub struct RoverControl<'a, A: Pin, B: Pin> {
    enable_switch: DebouncedSwitch<A>,
    reverse_switch: DebouncedSwitch<B>,
    throttle: AnalogOutput<'a>,
    steering: AnalogOutput<'a>,
    accelerometer: &'a dyn Accelerometer,
    color_sensor: &'a dyn ColorSensor,
    edt: &'a EDT<Action>,
    mode: Cell<Mode>,
}

impl<'a, A: Pin, B: Pin> RoverControl<'a, A, B> {
    pub fn new(
        enable_pin: A,
        reverse_pin: B,
        throttle: &'a dyn AnalogOut,
        steering: &'a dyn AnalogOut,
        accelerometer: &'a dyn Accelerometer,
        color_sensor: &'a dyn ColorSensor,
        edt: &'a EDT<Action>,
    ) -> Self {
        RoverControl {
            enable_switch: DebouncedSwitch::new(enable_pin),
            reverse_switch: DebouncedSwitch::new(reverse_pin),
            throttle: AnalogOutput::new(throttle),
            steering: AnalogOutput::new(steering),
            accelerometer,
            color_sensor,
            edt,
            mode: Cell::new(Mode::INITIAL),
        }
    }

    pub fn start(&self) {
        self.check_switches();
        self.edt.schedule(SWITCH_CHECK_PERIOD, Action::AwaitColorData);
    }

    pub fn mode(&self) -> Mode {
        self.mode.get()
    }

    pub fn process_message(&self, action: Action) {
        match action {
            Action::CheckSwitches => self.check_switches(),
            Action::AwaitColorData => self.await_color_data(),
            Action::Actuate => self.actuate(),
        }
    }

    fn check_switches(&self) {
        let mode = on_off(
            self.mode.get(),
            &self.enable_switch,
            &self.reverse_switch,
            SWITCH_CHECK_PERIOD,
        );
        self.mode.set(mode);
        self.edt.schedule(SWITCH_CHECK_PERIOD, Action::CheckSwitches);
    }

    fn await_color_data(&self) {
        match self.color_sensor.color_data_ready() {
            Ok(true) if self.mode.get().enabled => {
                self.edt.schedule(ACTUATION_DELAY, Action::Actuate);
            }
            Ok(true) => {
                self.edt.schedule(CYCLE_PERIOD, Action::AwaitColorData);
            }
            Ok(false) => {
                self.edt.schedule(COLOR_RETRY_PERIOD, Action::AwaitColorData);
            }
            Err(e) => {
                warn!("color sensor: {}", e);
                self.edt.schedule(COLOR_RETRY_PERIOD, Action::AwaitColorData);
            }
        }
    }

    /// A failed read skips this pass, outputs keep their previous values
    fn actuate(&self) {
        if self.mode.get().enabled {
            match self.read_frame() {
                Ok(frame) => self.apply(&frame),
                Err(e) => warn!("skipping actuation: {}", e),
            }
        }
        self.edt.schedule(CYCLE_PERIOD, Action::AwaitColorData);
    }

    fn read_frame(&self) -> Result<SensorFrame, SensorError> {
        Ok(SensorFrame {
            acceleration: self.accelerometer.acceleration()?,
            color: self.color_sensor.color_data()?,
        })
    }

    fn apply(&self, frame: &SensorFrame) {
        let steering = control_vehicle_direction(frame.acceleration.x);
        self.steering.set(steering);

        let lux = frame.lux();
        let throttle: Voltage = calc_voltage(lux, self.mode.get().reversed);
        let code = self.throttle.set(throttle);
        debug!(
            "lux: {:.2}, throttle: {} ({}), steering: {}",
            lux, throttle, code, steering
        );
    }
}
