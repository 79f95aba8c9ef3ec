//! Simulated hardware for driver tests
//!
//! - [`Mcp23x08Model`] - register file with GPIO/OLAT/IODIR interplay
//! - [`SimI2c`] - the model behind an addressed bus (also as an
//!   `embedded-hal` bus)
//! - [`SimSpi`] / [`SimCs`] - the model behind a chip-select bus, sharing
//!   one [`SpiWire`] so framing can be checked
//! - [`MockGpio`] - host GPIO facility with call counters

use core::cell::RefCell;

use embedded_hal::i2c;
use heapless::Vec;
use periph_hal::{HostGpio, I2cBus, Level, OutputPin, PinMode, SpiBus};

use crate::mcp23x08::{Register, RegisterAccess, BASE_ADDRESS};

/// Bus failure raised by the simulators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// Nobody acknowledged the address
    Nack,
    /// Injected failure
    Timeout,
}

impl i2c::Error for SimError {
    fn kind(&self) -> i2c::ErrorKind {
        match self {
            SimError::Nack => i2c::ErrorKind::NoAcknowledge(i2c::NoAcknowledgeSource::Address),
            SimError::Timeout => i2c::ErrorKind::Other,
        }
    }
}

/// Behavioural model of the MCP23008 register file
#[derive(Debug, Clone)]
pub struct Mcp23x08Model {
    regs: [u8; 11],
    /// Levels applied externally to pins configured as inputs
    pub external: u8,
}

impl Default for Mcp23x08Model {
    fn default() -> Self {
        let mut regs = [0u8; 11];
        // Power-on reset: all pins inputs
        regs[Register::Iodir.addr() as usize] = 0xFF;
        Self { regs, external: 0 }
    }
}

impl Mcp23x08Model {
    /// Stored value of a register, bypassing the GPIO calculation
    pub fn raw(&self, reg: Register) -> u8 {
        self.regs[reg.addr() as usize]
    }

    pub fn read(&self, reg: u8) -> u8 {
        match Register::from_addr(reg) {
            Some(Register::Gpio) => {
                let iodir = self.raw(Register::Iodir);
                let olat = self.raw(Register::Olat);
                let ipol = self.raw(Register::Ipol);
                ((olat & !iodir) | (self.external & iodir)) ^ (ipol & iodir)
            }
            Some(r) => self.raw(r),
            None => 0,
        }
    }

    pub fn write(&mut self, reg: u8, value: u8) {
        match Register::from_addr(reg) {
            // Writing the port modifies the output latch
            Some(Register::Gpio) | Some(Register::Olat) => {
                self.regs[Register::Olat.addr() as usize] = value;
            }
            Some(Register::Intf) | Some(Register::Intcap) | None => {}
            Some(r) => self.regs[r.addr() as usize] = value,
        }
    }
}

/// Caller-supplied transport talking straight to the model
#[derive(Default)]
pub struct DirectAccess {
    pub model: Mcp23x08Model,
    pub began: usize,
    pub reads: usize,
    pub writes: usize,
}

impl RegisterAccess for DirectAccess {
    type Error = SimError;

    fn begin(&mut self) -> Result<(), SimError> {
        self.began += 1;
        Ok(())
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, SimError> {
        self.reads += 1;
        Ok(self.model.read(reg))
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), SimError> {
        self.writes += 1;
        self.model.write(reg, value);
        Ok(())
    }
}

/// MCP23008 on a simulated I2C bus
pub struct SimI2c {
    pub model: Mcp23x08Model,
    /// 7-bit address the device answers to
    pub address: u8,
    pointer: u8,
    pub transactions: usize,
    pub fail: bool,
}

impl SimI2c {
    pub fn new(sub_address: u8) -> Self {
        Self {
            model: Mcp23x08Model::default(),
            address: BASE_ADDRESS | sub_address,
            pointer: 0,
            transactions: 0,
            fail: false,
        }
    }

    fn start(&mut self, address: u8) -> Result<(), SimError> {
        self.transactions += 1;
        if self.fail {
            return Err(SimError::Timeout);
        }
        if address != self.address {
            return Err(SimError::Nack);
        }
        Ok(())
    }

    /// Register pointer, then data bytes into that register
    fn load(&mut self, data: &[u8]) {
        if let Some((&reg, rest)) = data.split_first() {
            self.pointer = reg;
            for &value in rest {
                self.model.write(self.pointer, value);
            }
        }
    }

    fn fetch(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            *byte = self.model.read(self.pointer);
        }
    }
}

impl I2cBus for SimI2c {
    type Error = SimError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), SimError> {
        self.start(address)?;
        self.load(data);
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), SimError> {
        self.start(address)?;
        self.load(write_data);
        self.fetch(read_buf);
        Ok(())
    }
}

impl i2c::ErrorType for SimI2c {
    type Error = SimError;
}

/// The same device seen through `embedded-hal`, one start per transaction
impl i2c::I2c for SimI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [i2c::Operation<'_>],
    ) -> Result<(), SimError> {
        self.start(address)?;
        for op in operations {
            match op {
                i2c::Operation::Write(bytes) => self.load(*bytes),
                i2c::Operation::Read(buf) => self.fetch(&mut **buf),
            }
        }
        Ok(())
    }
}

/// Shared state of a simulated SPI bus and its chip-select line
pub struct SpiWire {
    pub model: Mcp23x08Model,
    /// Write opcode the device answers to
    pub opcode: u8,
    pub selected: bool,
    frame: Vec<u8, 8>,
    /// Byte count of every completed chip-select pulse
    pub pulses: Vec<usize, 64>,
    /// Bytes clocked while the device was not selected
    pub stray_bytes: usize,
    pub fail: bool,
}

impl SpiWire {
    pub fn new(sub_address: u8) -> Self {
        Self {
            model: Mcp23x08Model::default(),
            opcode: (BASE_ADDRESS | sub_address) << 1,
            selected: false,
            frame: Vec::new(),
            pulses: Vec::new(),
            stray_bytes: 0,
            fail: false,
        }
    }

    fn clock(&mut self, out: u8) -> u8 {
        if !self.selected {
            self.stray_bytes += 1;
            return 0;
        }
        let index = self.frame.len();
        let _ = self.frame.push(out);
        if index != 2 || self.frame[0] & !0x01 != self.opcode {
            return 0;
        }
        let reg = self.frame[1];
        if self.frame[0] & 0x01 != 0 {
            self.model.read(reg)
        } else {
            self.model.write(reg, out);
            0
        }
    }
}

/// SPI side of a [`SpiWire`]
pub struct SimSpi<'a>(pub &'a RefCell<SpiWire>);

impl SpiBus for SimSpi<'_> {
    type Error = SimError;

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), SimError> {
        let mut wire = self.0.borrow_mut();
        if wire.fail {
            return Err(SimError::Timeout);
        }
        for byte in data.iter_mut() {
            *byte = wire.clock(*byte);
        }
        Ok(())
    }
}

/// Chip-select side of a [`SpiWire`] (active low)
pub struct SimCs<'a>(pub &'a RefCell<SpiWire>);

impl OutputPin for SimCs<'_> {
    fn set_high(&mut self) {
        let mut wire = self.0.borrow_mut();
        if wire.selected {
            let len = wire.frame.len();
            let _ = wire.pulses.push(len);
            wire.frame.clear();
        }
        wire.selected = false;
    }

    fn set_low(&mut self) {
        let mut wire = self.0.borrow_mut();
        wire.selected = true;
        wire.frame.clear();
    }

    fn is_set_high(&self) -> bool {
        !self.0.borrow().selected
    }
}

/// Host GPIO facility with per-pin state and call counters
pub struct MockGpio {
    pub levels: [Level; 32],
    pub modes: [Option<PinMode>; 32],
    pub mode_calls: usize,
    pub writes: usize,
    pub reads: usize,
    /// Every write in order (first 32 kept)
    pub history: Vec<(u8, Level), 32>,
}

impl Default for MockGpio {
    fn default() -> Self {
        Self {
            levels: [Level::Low; 32],
            modes: [None; 32],
            mode_calls: 0,
            writes: 0,
            reads: 0,
            history: Vec::new(),
        }
    }
}

impl MockGpio {
    /// Total number of calls into the facility
    pub fn calls(&self) -> usize {
        self.mode_calls + self.writes + self.reads
    }
}

impl HostGpio for MockGpio {
    fn set_mode(&mut self, pin: u8, mode: PinMode) {
        self.mode_calls += 1;
        self.modes[pin as usize] = Some(mode);
    }

    fn write(&mut self, pin: u8, level: Level) {
        self.writes += 1;
        self.levels[pin as usize] = level;
        let _ = self.history.push((pin, level));
    }

    fn read(&mut self, pin: u8) -> Level {
        self.reads += 1;
        self.levels[pin as usize]
    }
}
