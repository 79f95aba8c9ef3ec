//! MCP23008 / MCP23S08 8-bit GPIO expander
//!
//! The two parts share one register file and differ only in the bus:
//! the MCP23008 sits on I2C with three strapped address bits, the MCP23S08
//! on SPI with two strapped address bits and a chip-select line.
//!
//! The transport is chosen once, by the constructor, and fixed in the type
//! of the driver. Everything else is built from single-register reads and
//! writes.
//!
//! # Usage
//!
//! ```ignore
//! let i2c = NoopMutex::new(RefCell::new(i2c));
//! let mut port_a = Mcp23x08::new_i2c(shared_i2c(&i2c), 0x00)?;
//! let mut port_b = Mcp23x08::new_i2c(shared_i2c(&i2c), 0x01)?;
//!
//! port_a.set_port_mode(PinMode::Output)?;
//! port_a.write_port(0x2A)?;
//! let a = port_a.read_port()?;
//! ```
//!
//! # Register targets
//!
//! - single-pin writes read-modify-write `GPIO`
//! - whole-port writes go to `OLAT`
//! - all reads come from `GPIO`
//!
//! On the real part a write to `GPIO` lands in `OLAT`, so the two paths
//! agree for pins configured as outputs.

mod registers;
mod transport;

pub use registers::{iocon, Register, BASE_ADDRESS};
pub use transport::{I2cTransport, RegisterAccess, SpiTransport};

use periph_hal::{
    spi::Mode, GpioPort, I2cBus, I2cConfig, Level, OutputPin, PinMode, SpiBus, SpiConfig,
};

/// Number of GPIO pins on the device
pub const PIN_COUNT: u8 = 8;

/// Highest I2C clock used with the MCP23008 (fast mode)
pub const I2C_CONFIG: I2cConfig = I2cConfig::FAST;

/// SPI settings for the MCP23S08 (mode 0, 10 MHz maximum)
pub const SPI_CONFIG: SpiConfig = SpiConfig::new(10_000_000, Mode::Mode0);

/// Errors from expander operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Pin index outside 0-7; nothing was sent on the bus
    InvalidPin(u8),
    /// The bus reported a failure (no acknowledge, timeout, ...)
    Transport(E),
}

/// MCP23x08 driver bound to one transport
pub struct Mcp23x08<T> {
    transport: T,
    address: u8,
}

impl<B: I2cBus> Mcp23x08<I2cTransport<B>> {
    /// Bind an MCP23008 on an I2C bus
    ///
    /// `sub_address` is the A2..A0 strapping; only its low three bits are used.
    pub fn new_i2c(bus: B, sub_address: u8) -> Result<Self, Error<B::Error>> {
        let address = BASE_ADDRESS | (sub_address & 0x07);
        Self::bind(I2cTransport::new(bus, address), address)
    }

    /// Bind an MCP23008 with A2..A0 all strapped low
    pub fn new_i2c_default(bus: B) -> Result<Self, Error<B::Error>> {
        Self::new_i2c(bus, 0)
    }
}

impl<B: SpiBus, CS: OutputPin> Mcp23x08<SpiTransport<B, CS>> {
    /// Bind an MCP23S08 on an SPI bus
    ///
    /// `sub_address` is the A1..A0 strapping; only its low two bits are used.
    /// `cs` is driven high here and pulsed low around every register access.
    pub fn new_spi(bus: B, cs: CS, sub_address: u8) -> Result<Self, Error<B::Error>> {
        let address = (BASE_ADDRESS << 1) | ((sub_address & 0x03) << 1);
        Self::bind(SpiTransport::new(bus, cs, address), address)
    }
}

impl<T: RegisterAccess> Mcp23x08<T> {
    /// Bind the driver to a caller-supplied transport
    ///
    /// `address` is the full 8-bit device address; its LSB is the R/W bit
    /// and is only recorded, the transport does its own addressing.
    pub fn with_transport(transport: T, address: u8) -> Result<Self, Error<T::Error>> {
        Self::bind(transport, address)
    }

    fn bind(mut transport: T, address: u8) -> Result<Self, Error<T::Error>> {
        transport.begin().map_err(Error::Transport)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("MCP23x08 bound at address {=u8:#x}", address);

        Ok(Self { transport, address })
    }

    /// Address resolved when the driver was bound
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Consume the driver and give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    /// Read any register directly
    pub fn read_register(&mut self, reg: Register) -> Result<u8, Error<T::Error>> {
        let value = self
            .transport
            .read_register(reg.addr())
            .map_err(Error::Transport)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("MCP23x08 {=u8:#x} read {} = {=u8:#x}", self.address, reg, value);

        Ok(value)
    }

    /// Write any register directly
    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("MCP23x08 {=u8:#x} write {} = {=u8:#x}", self.address, reg, value);

        self.transport
            .write_register(reg.addr(), value)
            .map_err(Error::Transport)
    }

    /// Bit mask for a pin, or `InvalidPin` before any bus traffic
    fn pin_mask(pin: u8) -> Result<u8, Error<T::Error>> {
        if pin < PIN_COUNT {
            Ok(1 << pin)
        } else {
            Err(Error::InvalidPin(pin))
        }
    }

    /// Read `reg`, set or clear the bits in `mask`, write it back
    fn update_register(
        &mut self,
        reg: Register,
        mask: u8,
        set: bool,
    ) -> Result<(), Error<T::Error>> {
        let current = self.read_register(reg)?;
        let value = if set { current | mask } else { current & !mask };
        self.write_register(reg, value)
    }

    /// Configure one pin
    ///
    /// Input sets the IODIR bit, output clears it. Pull-up also sets the
    /// GPPU bit (before the direction is changed). Input and output leave
    /// GPPU untouched.
    pub fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Error<T::Error>> {
        let mask = Self::pin_mask(pin)?;
        if mode == PinMode::InputPullup {
            self.update_register(Register::Gppu, mask, true)?;
        }
        self.update_register(Register::Iodir, mask, mode.is_input())
    }

    /// Configure all eight pins with a single IODIR write (plus GPPU for pull-up)
    pub fn set_port_mode(&mut self, mode: PinMode) -> Result<(), Error<T::Error>> {
        match mode {
            PinMode::Input => self.write_register(Register::Iodir, 0xFF),
            PinMode::Output => self.write_register(Register::Iodir, 0x00),
            PinMode::InputPullup => {
                self.write_register(Register::Gppu, 0xFF)?;
                self.write_register(Register::Iodir, 0xFF)
            }
        }
    }

    /// Drive one pin through a read-modify-write of GPIO
    pub fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), Error<T::Error>> {
        let mask = Self::pin_mask(pin)?;
        self.update_register(Register::Gpio, mask, level.is_high())
    }

    /// Sample one pin from GPIO
    pub fn read_pin(&mut self, pin: u8) -> Result<Level, Error<T::Error>> {
        let mask = Self::pin_mask(pin)?;
        let value = self.read_register(Register::Gpio)?;
        Ok(Level::from(value & mask != 0))
    }

    /// Drive all eight pins with one OLAT write
    pub fn write_port(&mut self, value: u8) -> Result<(), Error<T::Error>> {
        self.write_register(Register::Olat, value)
    }

    /// Sample all eight pins from GPIO
    pub fn read_port(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_register(Register::Gpio)
    }

    /// Invert the reported level of input pins in `mask` (IPOL)
    pub fn set_port_polarity(&mut self, mask: u8) -> Result<(), Error<T::Error>> {
        self.write_register(Register::Ipol, mask)
    }

    /// Current pull-up enables (GPPU)
    pub fn port_pullups(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_register(Register::Gppu)
    }

    /// Replace the pull-up enables (GPPU)
    pub fn set_port_pullups(&mut self, mask: u8) -> Result<(), Error<T::Error>> {
        self.write_register(Register::Gppu, mask)
    }
}

impl<T: RegisterAccess> GpioPort for Mcp23x08<T> {
    type Error = Error<T::Error>;

    fn width(&self) -> u8 {
        PIN_COUNT
    }

    fn is_invalid_pin(error: &Self::Error) -> bool {
        matches!(error, Error::InvalidPin(_))
    }

    fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        Mcp23x08::set_pin_mode(self, pin, mode)
    }

    fn set_port_mode(&mut self, mode: PinMode) -> Result<(), Self::Error> {
        Mcp23x08::set_port_mode(self, mode)
    }

    fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), Self::Error> {
        Mcp23x08::write_pin(self, pin, level)
    }

    fn read_pin(&mut self, pin: u8) -> Result<Level, Self::Error> {
        Mcp23x08::read_pin(self, pin)
    }

    fn write_port(&mut self, value: u8) -> Result<(), Self::Error> {
        Mcp23x08::write_port(self, value)
    }

    fn read_port(&mut self) -> Result<u8, Self::Error> {
        Mcp23x08::read_port(self)
    }
}
