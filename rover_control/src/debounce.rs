use no_std_compat::cell::Cell;

use crate::bsp::pin::Pin;

/// How long (ms) a new level has to be held before it is accepted
pub const DEBOUNCE_INTERVAL: u32 = 10;

/// Switch on a pull-up pin, filtered against contact bounce.
///
/// The level is high while the switch is open and low while it is closed, so a press is a
/// falling edge. Edge flags only describe the most recent [DebouncedSwitch::update], the switch
/// has to be updated on every tick for edges not to get lost.
pub struct DebouncedSwitch<P: Pin> {
    pin: P,
    interval: u32,
    stable: Cell<bool>,
    candidate: Cell<bool>,
    held: Cell<u32>,
    rose: Cell<bool>,
    fell: Cell<bool>,
}

impl<P: Pin> DebouncedSwitch<P> {
    pub fn new(pin: P) -> Self {
        Self::with_interval(pin, DEBOUNCE_INTERVAL)
    }

    /// Starts from the current level of the pin, a switch closed at power up is not an edge
    pub fn with_interval(pin: P, interval: u32) -> Self {
        let level = !pin.is_down();
        DebouncedSwitch {
            pin,
            interval,
            stable: Cell::new(level),
            candidate: Cell::new(level),
            held: Cell::new(0),
            rose: Cell::new(false),
            fell: Cell::new(false),
        }
    }

    /// Samples the pin, `elapsed_time` is the time since the previous update
    pub fn update(&self, elapsed_time: u32) {
        let level = !self.pin.is_down();

        let held = if level == self.candidate.get() {
            self.held.get().saturating_add(elapsed_time)
        } else {
            self.candidate.set(level);
            0
        };
        self.held.set(held);

        let changed = held >= self.interval && level != self.stable.get();
        if changed {
            self.stable.set(level);
        }
        self.rose.set(changed && level);
        self.fell.set(changed && !level);
    }

    /// Debounced level, `true` is high (switch open)
    pub fn value(&self) -> bool {
        self.stable.get()
    }

    pub fn rose(&self) -> bool {
        self.rose.get()
    }

    pub fn fell(&self) -> bool {
        self.fell.get()
    }
}
