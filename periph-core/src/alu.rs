//! ALU instruction set
//!
//! The ALU under test selects its function with three control lines
//! `M, S1, S0`. `M` low selects a logical function, `M` high an arithmetic
//! one:
//!
//! | M S1 S0 | F          |
//! |---------|------------|
//! | 0 0 0   | NOT A      |
//! | 0 0 1   | A AND B    |
//! | 0 1 0   | A          |
//! | 0 1 1   | A OR B     |
//! | 1 0 0   | A - 1      |
//! | 1 0 1   | A + B      |
//! | 1 1 0   | A - B      |
//! | 1 1 1   | A + 1      |

/// Control bit selecting arithmetic functions
const MODE_BIT: u8 = 0b100;

/// ALU function selected by the control lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Opcode {
    Not = 0,
    And = 1,
    Identity = 2,
    Or = 3,
    Decrement = 4,
    Add = 5,
    Subtract = 6,
    Increment = 7,
}

impl Opcode {
    /// Every opcode in control-value order
    pub const ALL: [Opcode; 8] = [
        Opcode::Not,
        Opcode::And,
        Opcode::Identity,
        Opcode::Or,
        Opcode::Decrement,
        Opcode::Add,
        Opcode::Subtract,
        Opcode::Increment,
    ];

    /// Decode the low three bits of a control value
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    /// Control value (`M` in bit 2, `S0` in bit 0)
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Short human-readable form
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Not => "NOT(A)",
            Opcode::And => "A AND B",
            Opcode::Identity => "A",
            Opcode::Or => "A OR B",
            Opcode::Decrement => "A - 1",
            Opcode::Add => "A + B",
            Opcode::Subtract => "A - B",
            Opcode::Increment => "A + 1",
        }
    }

    /// Logical functions are shown in hex, arithmetic ones as signed decimal
    pub fn is_logical(self) -> bool {
        self.bits() & MODE_BIT == 0
    }

    /// Expected `F` output for operands `a` and `b`
    ///
    /// Arithmetic wraps at eight bits like the hardware does.
    pub fn evaluate(self, a: u8, b: u8) -> u8 {
        match self {
            Opcode::Not => !a,
            Opcode::And => a & b,
            Opcode::Identity => a,
            Opcode::Or => a | b,
            Opcode::Decrement => a.wrapping_sub(1),
            Opcode::Add => a.wrapping_add(b),
            Opcode::Subtract => a.wrapping_sub(b),
            Opcode::Increment => a.wrapping_add(1),
        }
    }
}
