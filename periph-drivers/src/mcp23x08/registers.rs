//! MCP23008 / MCP23S08 register map

/// Fixed upper bits of the device address (7-bit form)
pub const BASE_ADDRESS: u8 = 0x20;

/// Device registers (IOCON.BANK is not present on the 8-bit parts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// I/O direction (1 = input)
    Iodir = 0x00,
    /// Input polarity (1 = inverted)
    Ipol = 0x01,
    /// Interrupt-on-change enable
    Gpinten = 0x02,
    /// Default compare value for interrupt-on-change
    Defval = 0x03,
    /// Interrupt control (1 = compare against DEFVAL)
    Intcon = 0x04,
    /// Device configuration
    Iocon = 0x05,
    /// Pull-up enable
    Gppu = 0x06,
    /// Interrupt flags (read-only)
    Intf = 0x07,
    /// Port value captured at interrupt (read-only)
    Intcap = 0x08,
    /// Live pin levels
    Gpio = 0x09,
    /// Output latch
    Olat = 0x0A,
}

impl Register {
    /// Every register in address order
    pub const ALL: [Register; 11] = [
        Register::Iodir,
        Register::Ipol,
        Register::Gpinten,
        Register::Defval,
        Register::Intcon,
        Register::Iocon,
        Register::Gppu,
        Register::Intf,
        Register::Intcap,
        Register::Gpio,
        Register::Olat,
    ];

    /// Register offset on the wire
    pub fn addr(self) -> u8 {
        self as u8
    }

    /// Look up a register by offset
    pub fn from_addr(addr: u8) -> Option<Self> {
        Self::ALL.get(addr as usize).copied()
    }
}

/// IOCON bits
pub mod iocon {
    /// INT output polarity (1 = active-high)
    pub const INTPOL: u8 = 1 << 1;
    /// INT output is open-drain
    pub const ODR: u8 = 1 << 2;
    /// Hardware address enable (MCP23S08 only)
    pub const HAEN: u8 = 1 << 3;
    /// SDA slew rate control disabled
    pub const DISSLW: u8 = 1 << 4;
    /// Sequential operation disabled (address pointer does not increment)
    pub const SEQOP: u8 = 1 << 5;
}
