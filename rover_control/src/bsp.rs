pub mod pin {
    /// A pin (of a switch) which may be down (tied to the ground) or up (pulled up)
    pub trait Pin {
        fn is_down(&self) -> bool;
    }
}

pub mod analog {
    /// Analog output channel, driven by a 16 bit code spanning `0..=V_MAX` volts.
    pub trait AnalogOut {
        fn write(&self, code: u16);
        fn code(&self) -> u16;
    }
}

pub mod sensors {
    use crate::error::SensorError;

    /// Acceleration in m/s^2
    #[derive(Clone, Debug, PartialEq, Copy, Default)]
    pub struct Acceleration {
        pub x: f32,
        pub y: f32,
        pub z: f32,
    }

    /// Raw channels of the color sensor
    #[derive(Clone, Debug, Eq, PartialEq, Copy, Default)]
    pub struct ColorData {
        pub r: u16,
        pub g: u16,
        pub b: u16,
        pub c: u16,
    }

    pub trait Accelerometer {
        fn acceleration(&self) -> Result<Acceleration, SensorError>;
    }

    pub trait ColorSensor {
        fn color_data_ready(&self) -> Result<bool, SensorError>;
        fn color_data(&self) -> Result<ColorData, SensorError>;
    }
}
