//! Register transports for the MCP23x08
//!
//! The driver only ever reads or writes one register at a time. A transport
//! turns those two primitives into bus traffic:
//!
//! - [`I2cTransport`] - MCP23008 on an addressed bus
//! - [`SpiTransport`] - MCP23S08 on a chip-select bus
//! - any caller type implementing [`RegisterAccess`] (bit-banged buses,
//!   bridges, simulators)

use periph_hal::{I2cBus, OutputPin, SpiBus};

/// Read/write bit of the SPI opcode byte
const SPI_READ: u8 = 0x01;

/// Single-register access to an MCP23x08
///
/// This is the whole contract between the driver and its bus. Each call is
/// one complete, uninterruptible bus operation; the driver never retries.
pub trait RegisterAccess {
    /// Error type for bus operations
    type Error;

    /// One-time bus setup, called once when the driver is bound
    fn begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Read the current value of register `reg`
    fn read_register(&mut self, reg: u8) -> Result<u8, Self::Error>;

    /// Write `value` to register `reg`
    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Self::Error>;
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &mut T {
    type Error = T::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        (**self).begin()
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, Self::Error> {
        (**self).read_register(reg)
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        (**self).write_register(reg, value)
    }
}

/// MCP23008 over I2C
pub struct I2cTransport<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> I2cTransport<B> {
    /// Address a device at the resolved 7-bit `address`
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Resolved 7-bit device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }

    #[cfg(test)]
    pub(crate) fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

impl<B: I2cBus> RegisterAccess for I2cTransport<B> {
    type Error = B::Error;

    fn read_register(&mut self, reg: u8) -> Result<u8, Self::Error> {
        // Register pointer then one byte, joined by a repeated start
        let mut buf = [0u8; 1];
        self.bus.write_read(self.address, &[reg], &mut buf)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.bus.write(self.address, &[reg, value])
    }
}

/// MCP23S08 over SPI
///
/// Every register operation is exactly one chip-select pulse carrying
/// three bytes: opcode (address with R/W bit), register, data.
pub struct SpiTransport<B, CS> {
    bus: B,
    cs: CS,
    opcode: u8,
}

impl<B: SpiBus, CS: OutputPin> SpiTransport<B, CS> {
    /// Address a device whose write opcode is `opcode` (R/W bit clear)
    pub fn new(bus: B, cs: CS, opcode: u8) -> Self {
        Self {
            bus,
            cs,
            opcode: opcode & !SPI_READ,
        }
    }

    /// Write opcode of the device (R/W bit clear)
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Give the bus and chip-select line back
    pub fn release(self) -> (B, CS) {
        (self.bus, self.cs)
    }

    fn transaction(&mut self, opcode: u8, reg: u8, value: u8) -> Result<u8, B::Error> {
        let mut frame = [opcode, reg, value];

        self.cs.set_low();
        let result = self.bus.transfer_in_place(&mut frame);
        // Release the device even if the transfer failed
        self.cs.set_high();

        result?;
        Ok(frame[2])
    }
}

impl<B: SpiBus, CS: OutputPin> RegisterAccess for SpiTransport<B, CS> {
    type Error = B::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high();
        Ok(())
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, Self::Error> {
        self.transaction(self.opcode | SPI_READ, reg, 0x00)
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.transaction(self.opcode, reg, value).map(|_| ())
    }
}
