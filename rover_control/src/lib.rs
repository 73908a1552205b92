// make `std` available when testing
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod bsp;
pub mod control;
pub mod dac;
pub mod debounce;
pub mod edt;
pub mod error;
pub mod lux;
pub mod mode;
pub mod steering;
pub mod voltage;
