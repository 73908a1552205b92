#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use rover_control::bsp::analog::AnalogOut;
    use rover_control::bsp::pin::Pin;
    use rover_control::bsp::sensors::{Acceleration, Accelerometer, ColorData, ColorSensor};
    use rover_control::control::{
        RoverControl, ACTUATION_DELAY, COLOR_RETRY_PERIOD, CYCLE_PERIOD, SWITCH_CHECK_PERIOD,
    };
    use rover_control::dac::{dac_code, DAC_MAX};
    use rover_control::edt::EDT;
    use rover_control::error::SensorError;
    use rover_control::lux::calculate_lux;
    use rover_control::mode::Mode;
    use rover_control::voltage::calc_voltage;

    /// Outputs start with this code, so a write of any voltage is visible
    const UNTOUCHED: u16 = 12345;
    const STOP_CODE: u16 = 35230;

    /// Green channel which reads as ~2000 lux, well above the stop point
    const BRIGHT: ColorData = ColorData {
        r: 0,
        g: 1268,
        b: 0,
        c: 1300,
    };
    const DARK: ColorData = ColorData {
        r: 0,
        g: 0,
        b: 0,
        c: 0,
    };

    #[test]
    fn starts_disabled_and_forward() {
        with_bench(&|bench| {
            bench.run(1000);
            assert_eq!((bench.mode)(), Mode::INITIAL);
        });
    }

    #[test]
    fn outputs_are_not_written_while_disabled() {
        with_bench(&|bench| {
            bench.sensors.x.set(-5.0);
            bench.run(2000);
            assert_eq!(bench.throttle.get(), UNTOUCHED);
            assert_eq!(bench.steering.get(), UNTOUCHED);
            assert_eq!(bench.sensors.reads.get(), 0);
        });
    }

    #[test]
    fn enabling_drives_both_outputs() {
        with_bench(&|bench| {
            bench.sensors.color.set(BRIGHT);
            bench.click_enable();
            bench.run(100);
            assert!((bench.mode)().enabled);
            assert_eq!(bench.steering.get(), STOP_CODE);
            assert_eq!(bench.throttle.get(), STOP_CODE);
        });
    }

    #[test]
    fn throttle_follows_the_light() {
        with_bench(&|bench| {
            let color = ColorData {
                r: 0,
                g: 333,
                b: 0,
                c: 400,
            };
            bench.sensors.color.set(color);
            bench.click_enable();
            bench.run(100);
            let lux = calculate_lux(color.r, color.g, color.b);
            assert_eq!(
                bench.throttle.get(),
                dac_code(calc_voltage(lux, false).volts())
            );
            assert!(bench.throttle.get() > 0 && bench.throttle.get() < STOP_CODE);
        });
    }

    #[test]
    fn dark_is_zero_volts_without_reverse() {
        with_bench(&|bench| {
            bench.sensors.color.set(DARK);
            bench.click_enable();
            bench.run(100);
            assert_eq!(bench.throttle.get(), 0);
        });
    }

    #[test]
    fn reverse_switch_moves_throttle_to_the_upper_range() {
        with_bench(&|bench| {
            bench.sensors.color.set(DARK);
            bench.click_enable();
            bench.click_reverse();
            bench.run(100);
            assert_eq!(
                (bench.mode)(),
                Mode {
                    enabled: true,
                    reversed: true
                }
            );
            assert_eq!(bench.throttle.get(), DAC_MAX);

            bench.sensors.color.set(BRIGHT);
            bench.run(100);
            assert_eq!(bench.throttle.get(), STOP_CODE);
        });
    }

    #[test]
    fn tilt_steers_the_vehicle() {
        with_bench(&|bench| {
            bench.click_enable();

            bench.sensors.x.set(-5.0);
            bench.run(100);
            assert_eq!(bench.steering.get(), DAC_MAX);

            bench.sensors.x.set(5.0);
            bench.run(100);
            assert_eq!(bench.steering.get(), 0);

            bench.sensors.x.set(0.5);
            bench.run(100);
            assert_eq!(bench.steering.get(), STOP_CODE);
        });
    }

    #[test]
    fn second_click_disables_and_freezes_outputs() {
        with_bench(&|bench| {
            bench.sensors.color.set(BRIGHT);
            bench.click_enable();
            bench.run(100);
            bench.click_enable();
            assert!(!(bench.mode)().enabled);

            let reads = bench.sensors.reads.get();
            bench.sensors.color.set(DARK);
            bench.sensors.x.set(-5.0);
            bench.run(1000);
            assert_eq!(bench.throttle.get(), STOP_CODE);
            assert_eq!(bench.steering.get(), STOP_CODE);
            assert_eq!(bench.sensors.reads.get(), reads);
        });
    }

    #[test]
    fn glitch_shorter_than_debounce_does_not_toggle() {
        with_bench(&|bench| {
            bench.enable_pin.set(true);
            bench.run(SWITCH_CHECK_PERIOD);
            bench.enable_pin.set(false);
            bench.run(500);
            assert!(!(bench.mode)().enabled);
            assert_eq!(bench.throttle.get(), UNTOUCHED);
        });
    }

    #[test]
    fn long_press_toggles_once() {
        with_bench(&|bench| {
            bench.enable_pin.set(true);
            bench.run(2000);
            bench.enable_pin.set(false);
            bench.run(100);
            assert!((bench.mode)().enabled);
        });
    }

    #[test]
    fn sensor_failure_skips_actuation_but_switches_keep_working() {
        with_bench(&|bench| {
            bench.sensors.failing.set(true);
            bench.click_enable();
            bench.run(500);
            assert_eq!(bench.throttle.get(), UNTOUCHED);
            assert_eq!(bench.steering.get(), UNTOUCHED);

            bench.click_reverse();
            assert!((bench.mode)().reversed);

            bench.sensors.failing.set(false);
            bench.sensors.color.set(DARK);
            bench.run(200);
            assert_eq!(bench.throttle.get(), DAC_MAX);
            assert_eq!(bench.steering.get(), STOP_CODE);
        });
    }

    #[test]
    fn actuation_waits_for_color_data() {
        with_bench(&|bench| {
            bench.sensors.ready.set(false);
            bench.click_enable();
            assert!((bench.mode)().enabled);
            bench.run(1000);
            assert_eq!(bench.throttle.get(), UNTOUCHED);

            bench.sensors.ready.set(true);
            bench.run(COLOR_RETRY_PERIOD + ACTUATION_DELAY);
            assert_ne!(bench.throttle.get(), UNTOUCHED);
        });
    }

    #[test]
    fn one_read_per_cycle() {
        with_bench(&|bench| {
            bench.click_enable();
            let reads = bench.sensors.reads.get();
            bench.run(10 * (ACTUATION_DELAY + CYCLE_PERIOD));
            assert_eq!(bench.sensors.reads.get() - reads, 10);
        });
    }

    #[test]
    fn edt_queue_stays_small() {
        with_bench(&|bench| {
            bench.click_enable();
            bench.click_reverse();
            bench.run(1000);
            assert!((bench.pending)() <= 3);
        });
    }

    fn with_bench(block: &dyn Fn(&Bench)) {
        let enable_pin = Cell::new(false);
        let reverse_pin = Cell::new(false);
        let throttle = Cell::new(UNTOUCHED);
        let steering = Cell::new(UNTOUCHED);
        let throttle_out = TestOut { code: &throttle };
        let steering_out = TestOut { code: &steering };
        let sensors = TestSensors {
            x: Cell::new(0.0),
            color: Cell::new(BRIGHT),
            ready: Cell::new(true),
            failing: Cell::new(false),
            reads: Cell::new(0),
        };
        let edt = EDT::create();
        let control = RoverControl::new(
            TestPin {
                is_down: &enable_pin,
            },
            TestPin {
                is_down: &reverse_pin,
            },
            &throttle_out,
            &steering_out,
            &sensors,
            &sensors,
            &edt,
        );
        control.start();

        let advance_time = |time: u32| {
            edt.advance_time_by(time, &|msg| {
                control.process_message(msg);
            });
        };
        let mode = || control.mode();
        let pending = || edt.pending();

        block(&Bench {
            advance_time: &advance_time,
            enable_pin: &enable_pin,
            reverse_pin: &reverse_pin,
            throttle: &throttle,
            steering: &steering,
            sensors: &sensors,
            mode: &mode,
            pending: &pending,
        });
    }

    struct Bench<'a> {
        advance_time: &'a dyn Fn(u32),
        enable_pin: &'a Cell<bool>,
        reverse_pin: &'a Cell<bool>,
        throttle: &'a Cell<u16>,
        steering: &'a Cell<u16>,
        sensors: &'a TestSensors,
        mode: &'a dyn Fn() -> Mode,
        pending: &'a dyn Fn() -> usize,
    }

    impl<'a> Bench<'a> {
        fn run(&self, time: u32) {
            (self.advance_time)(time);
        }
        fn click(&self, pin: &Cell<bool>) {
            pin.set(true);
            self.run(3 * SWITCH_CHECK_PERIOD);
            pin.set(false);
            self.run(3 * SWITCH_CHECK_PERIOD);
        }
        fn click_enable(&self) {
            self.click(self.enable_pin);
        }
        fn click_reverse(&self) {
            self.click(self.reverse_pin);
        }
    }

    struct TestPin<'a> {
        is_down: &'a Cell<bool>,
    }

    impl<'a> Pin for TestPin<'a> {
        /// returns true is pin is tied to the ground
        fn is_down(&self) -> bool {
            self.is_down.get()
        }
    }

    struct TestOut<'a> {
        code: &'a Cell<u16>,
    }

    impl<'a> AnalogOut for TestOut<'a> {
        fn write(&self, code: u16) {
            self.code.set(code);
        }

        fn code(&self) -> u16 {
            self.code.get()
        }
    }

    /// Accelerometer and color sensor in one, counting the frames which were read
    struct TestSensors {
        x: Cell<f32>,
        color: Cell<ColorData>,
        ready: Cell<bool>,
        failing: Cell<bool>,
        reads: Cell<u32>,
    }

    impl Accelerometer for TestSensors {
        fn acceleration(&self) -> Result<Acceleration, SensorError> {
            if self.failing.get() {
                return Err(SensorError::Bus {
                    sensor: "accelerometer",
                });
            }
            Ok(Acceleration {
                x: self.x.get(),
                y: 0.0,
                z: 9.81,
            })
        }
    }

    impl ColorSensor for TestSensors {
        fn color_data_ready(&self) -> Result<bool, SensorError> {
            Ok(self.ready.get())
        }

        fn color_data(&self) -> Result<ColorData, SensorError> {
            self.reads.set(self.reads.get() + 1);
            Ok(self.color.get())
        }
    }
}
