use std::cell::Cell;

use rover_control::bsp::sensors::{Acceleration, Accelerometer, ColorData, ColorSensor};
use rover_control::error::SensorError;

/// Lateral acceleration reported while a tilt key is held
pub const TILT: f32 = 5.0;
/// Lux change per frame while a light key is held
pub const LUX_STEP: f32 = 5.0;
pub const LUX_LIMIT: f32 = 2000.0;
/// The color sensor has a new sample on every n-th poll
const POLLS_PER_SAMPLE: u32 = 3;
/// Lux of one count on each channel when r, g and b are equal
const GREY_LUX_PER_COUNT: f32 = -0.32466 + 1.57837 - 0.73191;
const GRAVITY: f32 = 9.81;

/// Accelerometer and color sensor driven from the keyboard
pub struct SimSensors {
    lux: Cell<f32>,
    x: Cell<f32>,
    polls: Cell<u32>,
}

impl SimSensors {
    pub fn create(lux: f32) -> Self {
        SimSensors {
            lux: Cell::new(lux),
            x: Cell::new(0.0),
            polls: Cell::new(0),
        }
    }

    /// Applies the state of the sensor keys, called once per frame
    pub fn update(&self, tilt_left: bool, tilt_right: bool, brighter: bool, darker: bool) {
        self.x.set(if tilt_left {
            TILT
        } else if tilt_right {
            -TILT
        } else {
            0.0
        });

        let mut lux = self.lux.get();
        if brighter {
            lux += LUX_STEP;
        }
        if darker {
            lux -= LUX_STEP;
        }
        self.lux.set(lux.max(0.0).min(LUX_LIMIT));
    }

    pub fn lux(&self) -> f32 {
        self.lux.get()
    }

    pub fn x(&self) -> f32 {
        self.x.get()
    }
}

impl Accelerometer for SimSensors {
    fn acceleration(&self) -> Result<Acceleration, SensorError> {
        Ok(Acceleration {
            x: self.x.get(),
            y: 0.0,
            z: GRAVITY,
        })
    }
}

impl ColorSensor for SimSensors {
    fn color_data_ready(&self) -> Result<bool, SensorError> {
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        Ok(polls % POLLS_PER_SAMPLE == 0)
    }

    fn color_data(&self) -> Result<ColorData, SensorError> {
        let grey = (self.lux.get() / GREY_LUX_PER_COUNT) as u16;
        Ok(ColorData {
            r: grey,
            g: grey,
            b: grey,
            c: grey,
        })
    }
}
