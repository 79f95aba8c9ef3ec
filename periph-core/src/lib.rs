//! Board-agnostic logic for the CPLD ALU test bench
//!
//! The bench drives two operand ports and a control port into an 8-bit ALU
//! and samples its result and status lines:
//!
//! - ALU instruction set and reference model
//! - Bench sequencing over any [`periph_hal::GpioPort`]s
//! - Board pin assignment

#![no_std]
#![deny(unsafe_code)]

pub mod alu;
pub mod bench;
pub mod config;

pub use alu::Opcode;
pub use bench::{AluBench, BenchError, Sample};
pub use config::{BenchConfig, ConfigError};
