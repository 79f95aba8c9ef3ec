//! Periph Hardware Abstraction Layer
//!
//! This crate defines the traits shared by the GPIO drivers and the code
//! that consumes them. Chip- and board-specific crates implement the bus and
//! host GPIO traits; the drivers implement [`GpioPort`] on top of them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (periph-core bench, etc.)  │
//! └─────────────────────────────────────────┘
//!                     │  GpioPort
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  periph-drivers (MCP23x08, VirtualPort) │
//! └─────────────────────────────────────────┘
//!                     │  I2cBus / SpiBus / HostGpio / OutputPin
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  periph-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::HostGpio`], [`gpio::OutputPin`] - Native digital I/O
//! - [`i2c::I2cBus`] - Addressed multi-drop bus
//! - [`spi::SpiBus`] - Chip-select bus
//! - [`port::GpioPort`] - Pin and whole-port access to an N-bit port

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod port;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{GpioLine, HostGpio, Level, OutputPin, PinMode};
pub use i2c::{I2cBus, I2cConfig};
pub use port::{GpioPort, MAX_PORT_WIDTH};
pub use spi::{SpiBus, SpiConfig};
