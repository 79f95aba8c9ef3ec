//! Virtual port over host pins
//!
//! Groups up to eight unrelated host GPIO pins into one logical port.
//! The mapping is positional: the pin at list index `i` is bit `i` of the
//! port value, whatever its physical number.
//!
//! There is no latch. Every read samples the pins and every write drives
//! them, one pin at a time, in index order.

use heapless::Vec;
use periph_hal::{GpioPort, HostGpio, Level, PinMode, MAX_PORT_WIDTH};

/// Errors from virtual port operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError {
    /// Index not below the port width; no pin was touched
    InvalidPin(u8),
    /// Requested width is zero or more pins were requested than supplied
    InvalidWidth(u8),
}

/// Logical N-bit port made of host pins
pub struct VirtualPort<G> {
    gpio: G,
    pins: Vec<u8, { MAX_PORT_WIDTH as usize }>,
}

impl<G: HostGpio> VirtualPort<G> {
    /// Bind a full 8-bit port, `pins[0]` as LSB through `pins[7]` as MSB
    pub fn new(gpio: G, pins: [u8; 8]) -> Self {
        Self {
            gpio,
            pins: pins.iter().copied().collect(),
        }
    }

    /// Bind the first `n_bits` of `pins`
    ///
    /// `n_bits` above eight is clamped to eight. A width of zero, or more
    /// bits than `pins` provides, is rejected.
    pub fn with_width(gpio: G, pins: &[u8], n_bits: u8) -> Result<Self, PortError> {
        let width = n_bits.min(MAX_PORT_WIDTH) as usize;
        if width == 0 || pins.len() < width {
            return Err(PortError::InvalidWidth(n_bits));
        }
        Self::bind(gpio, &pins[..width])
    }

    /// Bind exactly the given pins (one to eight of them)
    pub fn from_pins(gpio: G, pins: &[u8]) -> Result<Self, PortError> {
        if pins.is_empty() || pins.len() > MAX_PORT_WIDTH as usize {
            let requested = u8::try_from(pins.len()).unwrap_or(u8::MAX);
            return Err(PortError::InvalidWidth(requested));
        }
        Self::bind(gpio, pins)
    }

    fn bind(gpio: G, pins: &[u8]) -> Result<Self, PortError> {
        let pins = Vec::from_slice(pins).map_err(|_| PortError::InvalidWidth(pins.len() as u8))?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Virtual port bound to pins {=[u8]}", pins.as_slice());

        Ok(Self { gpio, pins })
    }

    /// Physical pin numbers, LSB first
    pub fn pins(&self) -> &[u8] {
        &self.pins
    }

    /// Consume the port and give the host facility back
    pub fn release(self) -> G {
        self.gpio
    }

    /// Physical pin behind a logical index
    fn physical(&self, index: u8) -> Result<u8, PortError> {
        self.pins
            .get(index as usize)
            .copied()
            .ok_or(PortError::InvalidPin(index))
    }

    /// Configure one pin of the port
    pub fn set_pin_mode(&mut self, index: u8, mode: PinMode) -> Result<(), PortError> {
        let pin = self.physical(index)?;
        self.gpio.set_mode(pin, mode);
        Ok(())
    }

    /// Configure every pin of the port
    pub fn set_port_mode(&mut self, mode: PinMode) {
        for &pin in self.pins.iter() {
            self.gpio.set_mode(pin, mode);
        }
    }

    /// Drive one pin of the port
    pub fn write_pin(&mut self, index: u8, level: Level) -> Result<(), PortError> {
        let pin = self.physical(index)?;
        self.gpio.write(pin, level);
        Ok(())
    }

    /// Sample one pin of the port
    pub fn read_pin(&mut self, index: u8) -> Result<Level, PortError> {
        let pin = self.physical(index)?;
        Ok(self.gpio.read(pin))
    }

    /// Drive pin `i` to bit `i` of `value`; bits above the width are ignored
    pub fn write_port(&mut self, value: u8) {
        for (bit, &pin) in self.pins.iter().enumerate() {
            self.gpio.write(pin, Level::from_bit(value, bit as u8));
        }
    }

    /// Sample pin `i` into bit `i`; bits above the width read as zero
    pub fn read_port(&mut self) -> u8 {
        let mut value = 0u8;
        for (bit, &pin) in self.pins.iter().enumerate() {
            if self.gpio.read(pin).is_high() {
                value |= 1 << bit;
            }
        }
        value
    }
}

impl<G: HostGpio> GpioPort for VirtualPort<G> {
    type Error = PortError;

    fn width(&self) -> u8 {
        self.pins.len() as u8
    }

    fn is_invalid_pin(error: &Self::Error) -> bool {
        matches!(error, PortError::InvalidPin(_))
    }

    fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        VirtualPort::set_pin_mode(self, pin, mode)
    }

    fn set_port_mode(&mut self, mode: PinMode) -> Result<(), Self::Error> {
        VirtualPort::set_port_mode(self, mode);
        Ok(())
    }

    fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), Self::Error> {
        VirtualPort::write_pin(self, pin, level)
    }

    fn read_pin(&mut self, pin: u8) -> Result<Level, Self::Error> {
        VirtualPort::read_pin(self, pin)
    }

    fn write_port(&mut self, value: u8) -> Result<(), Self::Error> {
        VirtualPort::write_port(self, value);
        Ok(())
    }

    fn read_port(&mut self) -> Result<u8, Self::Error> {
        Ok(VirtualPort::read_port(self))
    }
}
