//! Bench wiring configuration
//!
//! Which host pins carry the result, control and status lines, where the
//! two operand expanders are strapped, and the operand values loaded at
//! start-up.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest host pin number plus one that the allocator can track
pub const MAX_HOST_PINS: u8 = 64;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Host pin assigned to more than one line
    PinConflict(u8),
    /// Host pin number out of range
    PinOutOfRange(u8),
    /// Both expanders resolve to the same bus address
    AddressConflict(u8),
}

/// Board wiring for the ALU bench
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BenchConfig {
    /// Result port F, LSB first
    pub result_pins: [u8; 8],
    /// Control lines S0, S1, M
    pub control_pins: [u8; 3],
    pub carry_pin: u8,
    pub overflow_pin: u8,
    /// A2..A0 strapping of the operand A expander
    pub port_a_sub_address: u8,
    /// A2..A0 strapping of the operand B expander
    pub port_b_sub_address: u8,
    /// Operand A loaded by setup
    pub a_start: u8,
    /// Operand B loaded by setup
    pub b_start: u8,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::teensy()
    }
}

impl BenchConfig {
    /// Teensy 4.0 controller board
    pub const fn teensy() -> Self {
        Self {
            result_pins: [2, 3, 4, 5, 6, 7, 8, 9],
            control_pins: [17, 16, 15],
            carry_pin: 22,
            overflow_pin: 23,
            port_a_sub_address: 0,
            port_b_sub_address: 1,
            a_start: 0,
            b_start: 50,
        }
    }

    /// Status port pins, carry first
    pub fn status_pins(&self) -> [u8; 2] {
        [self.carry_pin, self.overflow_pin]
    }

    /// Check that every host pin is used once and the expanders do not collide
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut allocated: u64 = 0;
        let status = self.status_pins();
        let pins = self
            .result_pins
            .iter()
            .chain(self.control_pins.iter())
            .chain(status.iter());

        for &pin in pins {
            if pin >= MAX_HOST_PINS {
                return Err(ConfigError::PinOutOfRange(pin));
            }
            let mask = 1u64 << pin;
            if allocated & mask != 0 {
                return Err(ConfigError::PinConflict(pin));
            }
            allocated |= mask;
        }

        // Only the strapped bits reach the bus
        let a = self.port_a_sub_address & 0x07;
        let b = self.port_b_sub_address & 0x07;
        if a == b {
            return Err(ConfigError::AddressConflict(a));
        }

        Ok(())
    }
}
