#![no_std]
#![no_main]

extern crate alloc;
extern crate cortex_m;
extern crate cortex_m_rt as rt;
extern crate jlink_rtt;
extern crate nb;
extern crate panic_halt;
extern crate stm32g0xx_hal as stm_hal;

use core::convert::Infallible;

use alloc_cortex_m::CortexMHeap;
use log::{error, info, LevelFilter};
use nb::block;
use rt::{entry, exception, ExceptionFrame};
use stm_hal::analog::dac::DacExt;
use stm_hal::prelude::*;
use stm_hal::{hal, stm32};

use rover_control::control::RoverControl;
use rover_control::edt::{Event, EDT};
use rover_control::error::HardwareInitError;

use crate::button::PullUpButton;
use crate::dac_out::DacChannel;
use crate::sensors::{ColorEngine, Lis3mdl, Lsm6dsox};

#[global_allocator]
static ALLOCATOR: CortexMHeap = CortexMHeap::empty();
const HEAP_SIZE: usize = 512; // in bytes

mod button;
mod dac_out;
mod rtt_logger;
mod sensors;

#[entry]
fn main() -> ! {
    unsafe { ALLOCATOR.init(cortex_m_rt::heap_start() as usize, HEAP_SIZE) }
    rtt_logger::init(LevelFilter::Info);

    match run() {
        Ok(never) => match never {},
        Err(e) => {
            error!("hardware init failed: {}", e);
            panic!("");
        }
    }
}

/// Brings up the board and runs the control loop, only returns if bring up fails
fn run() -> Result<Infallible, HardwareInitError> {
    // https://github.com/stm32-rs/stm32g0xx-hal
    let dp = stm32::Peripherals::take().ok_or(HardwareInitError::MissingPeripheral("device"))?;
    let cp = stm32::CorePeripherals::take().ok_or(HardwareInitError::MissingPeripheral("core"))?;
    let mut rcc = dp.RCC.constrain();

    let gpioa = dp.GPIOA.split(&mut rcc);
    let gpiob = dp.GPIOB.split(&mut rcc);

    // Nucleo D5 / D4
    let switch_on_off = gpiob.pb4;
    let switch_reverse = gpiob.pb5;

    // Nucleo A3 / A4, the only pins wired to the DAC
    let dac_throttle = gpioa.pa4;
    let dac_steering = gpioa.pa5;

    let mut watchdog = dp.IWDG.constrain();
    watchdog.start(2000.ms());

    let mut delay = cp.SYST.delay(&mut rcc);
    let mut timer = dp.TIM17.timer(&mut rcc);
    let edt = EDT::create();

    let (dac_ch1, dac_ch2) = dp.DAC.constrain((dac_throttle, dac_steering), &mut rcc);
    let throttle = DacChannel::create(dac_ch1.calibrate_buffer(&mut delay).enable());
    let steering = DacChannel::create(dac_ch2.calibrate_buffer(&mut delay).enable());

    let sda = gpiob.pb9.into_open_drain_output();
    let scl = gpiob.pb8.into_open_drain_output();
    let bus = shared_bus::BusManagerSimple::new(dp.I2C1.i2c(sda, scl, 100.khz(), &mut rcc));
    let color_sensor = ColorEngine::init(bus.acquire_i2c())?;
    let accelerometer = Lsm6dsox::init(bus.acquire_i2c())?;
    let _magnetometer = Lis3mdl::init(bus.acquire_i2c())?;
    info!("sensors ready");

    let rover_control = RoverControl::new(
        PullUpButton {
            pin: switch_on_off.into_pull_up_input(),
        },
        PullUpButton {
            pin: switch_reverse.into_pull_up_input(),
        },
        &throttle,
        &steering,
        &accelerometer,
        &color_sensor,
        &edt,
    );

    rover_control.start();

    loop {
        match edt.poll() {
            Event::Execute { msg } => {
                watchdog.feed();
                rover_control.process_message(msg);
            }
            Event::Wait { ms } => {
                timer.start(ms.ms());
                let _ = block!(timer.wait());
            }
            Event::Halt => {
                // the control loop always reschedules itself
                panic!("event queue drained");
            }
        }
    }
}

#[exception]
fn HardFault(ef: &ExceptionFrame) -> ! {
    error!("hard fault {:?}", ef);
    panic!("");
}
