use core::cell::RefCell;

use apds9960::Apds9960;
use rover_control::bsp::sensors::{Acceleration, Accelerometer, ColorData, ColorSensor};
use rover_control::error::{HardwareInitError, SensorError};

use crate::hal::blocking::i2c::{Write, WriteRead};

/// One device on the shared I2C bus, addressed register by register
struct Registers<I2C> {
    i2c: RefCell<I2C>,
    sensor: &'static str,
    address: u8,
}

impl<I2C, E> Registers<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Reads the identity register and compares it to the expected value
    fn identify(
        i2c: I2C,
        sensor: &'static str,
        address: u8,
        id_register: u8,
        expected: u8,
    ) -> Result<Self, HardwareInitError> {
        let registers = Registers {
            i2c: RefCell::new(i2c),
            sensor,
            address,
        };
        let found = registers
            .read_u8(id_register)
            .map_err(|_| HardwareInitError::MissingSensor(sensor))?;
        if found == expected {
            Ok(registers)
        } else {
            Err(HardwareInitError::UnexpectedDevice {
                sensor,
                expected,
                found,
            })
        }
    }

    fn read(&self, register: u8, buffer: &mut [u8]) -> Result<(), SensorError> {
        self.i2c
            .borrow_mut()
            .write_read(self.address, &[register], buffer)
            .map_err(|_| SensorError::Bus {
                sensor: self.sensor,
            })
    }

    fn read_u8(&self, register: u8) -> Result<u8, SensorError> {
        let mut buffer = [0u8; 1];
        self.read(register, &mut buffer)?;
        Ok(buffer[0])
    }

    fn configure(&self, register: u8, value: u8) -> Result<(), HardwareInitError> {
        self.i2c
            .borrow_mut()
            .write(self.address, &[register, value])
            .map_err(|_| HardwareInitError::MissingSensor(self.sensor))
    }
}

/// APDS9960 color engine, driven by the `apds9960` crate
pub struct ColorEngine<I2C> {
    sensor: RefCell<Apds9960<I2C>>,
}

impl<I2C, E> ColorEngine<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    const NAME: &'static str = "apds9960";
    /// APDS9960 and its 0xA8 / 0x9C revisions
    const IDS: [u8; 3] = [0xAB, 0xA8, 0x9C];

    pub fn init(i2c: I2C) -> Result<Self, HardwareInitError> {
        let mut sensor = Apds9960::new(i2c);
        let found = sensor
            .read_device_id()
            .map_err(|_| HardwareInitError::MissingSensor(Self::NAME))?;
        if !Self::IDS.contains(&found) {
            return Err(HardwareInitError::UnexpectedDevice {
                sensor: Self::NAME,
                expected: Self::IDS[0],
                found,
            });
        }
        sensor
            .enable()
            .and_then(|_| sensor.enable_light())
            .map_err(|_| HardwareInitError::MissingSensor(Self::NAME))?;
        Ok(ColorEngine {
            sensor: RefCell::new(sensor),
        })
    }

    fn bus_error<T>(_: T) -> SensorError {
        SensorError::Bus { sensor: Self::NAME }
    }
}

impl<I2C, E> ColorSensor for ColorEngine<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    fn color_data_ready(&self) -> Result<bool, SensorError> {
        self.sensor
            .borrow_mut()
            .is_light_data_valid()
            .map_err(Self::bus_error)
    }

    fn color_data(&self) -> Result<ColorData, SensorError> {
        let light = self
            .sensor
            .borrow_mut()
            .read_light()
            .map_err(Self::bus_error)?;
        Ok(ColorData {
            r: light.red,
            g: light.green,
            b: light.blue,
            c: light.clear,
        })
    }
}

/// LSM6DSOX accelerometer, the gyroscope stays powered down
pub struct Lsm6dsox<I2C> {
    registers: Registers<I2C>,
}

impl<I2C, E> Lsm6dsox<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    const ADDRESS: u8 = 0x6A;
    const WHO_AM_I: u8 = 0x0F;
    const CTRL1_XL: u8 = 0x10;
    const OUTX_L_A: u8 = 0x28;
    /// 104 Hz, +-4 g
    const ODR_104HZ_4G: u8 = 0x48;
    const MG_PER_LSB: f32 = 0.122;
    const STANDARD_GRAVITY: f32 = 9.80665;

    pub fn init(i2c: I2C) -> Result<Self, HardwareInitError> {
        let registers = Registers::identify(i2c, "lsm6dsox", Self::ADDRESS, Self::WHO_AM_I, 0x6C)?;
        registers.configure(Self::CTRL1_XL, Self::ODR_104HZ_4G)?;
        Ok(Lsm6dsox { registers })
    }
}

impl<I2C, E> Accelerometer for Lsm6dsox<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    fn acceleration(&self) -> Result<Acceleration, SensorError> {
        let mut raw = [0u8; 6];
        self.registers.read(Self::OUTX_L_A, &mut raw)?;
        let axis = |i: usize| {
            let counts = i16::from_le_bytes([raw[2 * i], raw[2 * i + 1]]);
            counts as f32 * Self::MG_PER_LSB / 1000.0 * Self::STANDARD_GRAVITY
        };
        Ok(Acceleration {
            x: axis(0),
            y: axis(1),
            z: axis(2),
        })
    }
}

/// LIS3MDL magnetometer. Brought up with the other sensors, its readings are not used.
pub struct Lis3mdl<I2C> {
    _registers: Registers<I2C>,
}

impl<I2C, E> Lis3mdl<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    const ADDRESS: u8 = 0x1C;
    const WHO_AM_I: u8 = 0x0F;
    const CTRL_REG3: u8 = 0x22;
    const CONTINUOUS: u8 = 0x00;

    pub fn init(i2c: I2C) -> Result<Self, HardwareInitError> {
        let registers = Registers::identify(i2c, "lis3mdl", Self::ADDRESS, Self::WHO_AM_I, 0x3D)?;
        registers.configure(Self::CTRL_REG3, Self::CONTINUOUS)?;
        Ok(Lis3mdl {
            _registers: registers,
        })
    }
}
