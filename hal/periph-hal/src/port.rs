//! Logical GPIO port abstraction
//!
//! A port is up to eight pins read and written as one byte. Bit `i` of a
//! port value always belongs to pin index `i`.

use crate::gpio::{Level, PinMode};

/// Widest port supported (one byte)
pub const MAX_PORT_WIDTH: u8 = 8;

/// Pin-level and port-level access to an N-bit port
///
/// Implemented by register-addressed expanders and by virtual ports built
/// from host pins, so application code can drive either without knowing
/// which one it has.
///
/// Pin indices are `0..width()`. An index outside that range is rejected
/// with an error before any bus or host GPIO access happens.
pub trait GpioPort {
    /// Error type for port operations
    type Error;

    /// Number of pins in the port (1-8)
    fn width(&self) -> u8;

    /// Check whether an error is an invalid pin index (rather than a bus failure)
    fn is_invalid_pin(error: &Self::Error) -> bool;

    /// Configure a single pin
    fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error>;

    /// Configure every pin in the port
    fn set_port_mode(&mut self, mode: PinMode) -> Result<(), Self::Error>;

    /// Drive a single pin, leaving the others unchanged
    fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), Self::Error>;

    /// Sample a single pin
    fn read_pin(&mut self, pin: u8) -> Result<Level, Self::Error>;

    /// Drive the whole port, bit `i` to pin `i`
    fn write_port(&mut self, value: u8) -> Result<(), Self::Error>;

    /// Sample the whole port, pin `i` into bit `i`
    fn read_port(&mut self) -> Result<u8, Self::Error>;

    /// Mask covering the bits that belong to this port
    fn mask(&self) -> u8 {
        match self.width() {
            0 => 0,
            w if w >= MAX_PORT_WIDTH => 0xFF,
            w => (1u8 << w) - 1,
        }
    }
}

impl<P: GpioPort + ?Sized> GpioPort for &mut P {
    type Error = P::Error;

    fn width(&self) -> u8 {
        (**self).width()
    }

    fn is_invalid_pin(error: &Self::Error) -> bool {
        P::is_invalid_pin(error)
    }

    fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        (**self).set_pin_mode(pin, mode)
    }

    fn set_port_mode(&mut self, mode: PinMode) -> Result<(), Self::Error> {
        (**self).set_port_mode(mode)
    }

    fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), Self::Error> {
        (**self).write_pin(pin, level)
    }

    fn read_pin(&mut self, pin: u8) -> Result<Level, Self::Error> {
        (**self).read_pin(pin)
    }

    fn write_port(&mut self, value: u8) -> Result<(), Self::Error> {
        (**self).write_port(value)
    }

    fn read_port(&mut self) -> Result<u8, Self::Error> {
        (**self).read_port()
    }
}
