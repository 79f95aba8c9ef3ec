//! Peripheral driver implementations
//!
//! Concrete implementations of the port traits defined in `periph-hal`:
//!
//! - MCP23008 / MCP23S08 GPIO expander over I2C, SPI or a caller transport
//! - Virtual port grouping host pins into one logical port
//! - Bus sharing between several expanders
//! - `embedded-hal` 1.0 adapters

#![no_std]
#![deny(unsafe_code)]

pub mod compat;
pub mod mcp23x08;
pub mod shared;
pub mod virtual_port;

#[cfg(test)]
mod mock;

pub use compat::{EhI2c, EhOutputPin, EhSpi};
pub use mcp23x08::{Error, I2cTransport, Mcp23x08, Register, RegisterAccess, SpiTransport};
pub use shared::{shared_i2c, SharedI2c, SharedSpiBus};
pub use virtual_port::{PortError, VirtualPort};
