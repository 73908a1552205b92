use core::fmt;

use log::{debug, info};

use crate::bsp::pin::Pin;
use crate::debounce::DebouncedSwitch;

/// Operating mode of the rover. Only switch edges change it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Mode {
    pub enabled: bool,
    pub reversed: bool,
}

/// Which flags flip on this tick
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Toggles {
    pub enable: bool,
    pub reverse: bool,
}

impl Mode {
    pub const INITIAL: Mode = Mode {
        enabled: false,
        reversed: false,
    };

    pub fn apply(self, toggles: Toggles) -> Mode {
        Mode {
            enabled: self.enabled ^ toggles.enable,
            reversed: self.reversed ^ toggles.reverse,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mode: {}, Toggle: {}, Reverse: {}",
            if self.reversed { "Reverse" } else { "Forward" },
            self.enabled,
            self.reversed
        )
    }
}

/// Updates both switches and applies their falling edges to `mode`.
///
/// Switch A toggles `enabled`, switch B toggles `reversed`, independently of each other.
pub fn on_off<A: Pin, B: Pin>(
    mode: Mode,
    switch_a: &DebouncedSwitch<A>,
    switch_b: &DebouncedSwitch<B>,
    elapsed_time: u32,
) -> Mode {
    switch_a.update(elapsed_time);
    switch_b.update(elapsed_time);

    let toggles = Toggles {
        enable: switch_a.fell(),
        reverse: switch_b.fell(),
    };
    let next = mode.apply(toggles);
    if next != mode {
        info!("{}", next);
    } else {
        debug!("{}", next);
    }
    next
}
