//! ALU test bench
//!
//! Five ports wired to the ALU under test:
//!
//! ```text
//!   operand A (out) ──┐
//!   operand B (out) ──┼──► ALU ──► result F (in)
//!   control   (out) ──┘       └──► status    (in)  bit 0 carry, bit 1 overflow
//! ```
//!
//! The bench does not care what sits behind each port. On the Teensy
//! controller board the operands are two MCP23008 expanders and the other
//! three are virtual ports over host pins.

use periph_hal::{GpioPort, PinMode};

use crate::alu::Opcode;

/// Status port bit for the carry line
pub const STATUS_CARRY: u8 = 0;
/// Status port bit for the overflow line
pub const STATUS_OVERFLOW: u8 = 1;

/// Which bench port failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BenchError<EA, EB, EF, EC, ES> {
    OperandA(EA),
    OperandB(EB),
    ResultPort(EF),
    Control(EC),
    Status(ES),
}

type ErrorOf<A, B, F, C, S> = BenchError<
    <A as GpioPort>::Error,
    <B as GpioPort>::Error,
    <F as GpioPort>::Error,
    <C as GpioPort>::Error,
    <S as GpioPort>::Error,
>;

/// One ALU observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub opcode: Opcode,
    pub a: u8,
    pub b: u8,
    /// `F` output
    pub result: u8,
    pub carry: bool,
    pub overflow: bool,
}

impl Sample {
    /// Check the sampled output against the reference model
    pub fn matches_reference(&self) -> bool {
        self.result == self.opcode.evaluate(self.a, self.b)
    }

    /// Result as a two's complement value
    pub fn signed_result(&self) -> i8 {
        self.result as i8
    }
}

/// ALU bench over five ports
pub struct AluBench<A, B, F, C, S> {
    port_a: A,
    port_b: B,
    result: F,
    control: C,
    status: S,
}

impl<A, B, F, C, S> AluBench<A, B, F, C, S>
where
    A: GpioPort,
    B: GpioPort,
    F: GpioPort,
    C: GpioPort,
    S: GpioPort,
{
    /// Assemble a bench; no port is touched until [`setup`](Self::setup)
    pub fn new(port_a: A, port_b: B, result: F, control: C, status: S) -> Self {
        Self {
            port_a,
            port_b,
            result,
            control,
            status,
        }
    }

    /// Give the ports back
    pub fn release(self) -> (A, B, F, C, S) {
        (
            self.port_a,
            self.port_b,
            self.result,
            self.control,
            self.status,
        )
    }

    /// Configure port directions and load the starting operands
    ///
    /// The control port is zeroed before the operands are driven.
    pub fn setup(&mut self, a_start: u8, b_start: u8) -> Result<(), ErrorOf<A, B, F, C, S>> {
        self.port_a
            .set_port_mode(PinMode::Output)
            .map_err(BenchError::OperandA)?;
        self.port_b
            .set_port_mode(PinMode::Output)
            .map_err(BenchError::OperandB)?;
        self.result
            .set_port_mode(PinMode::Input)
            .map_err(BenchError::ResultPort)?;
        self.control
            .set_port_mode(PinMode::Output)
            .map_err(BenchError::Control)?;
        self.status
            .set_port_mode(PinMode::Input)
            .map_err(BenchError::Status)?;

        self.control.write_port(0).map_err(BenchError::Control)?;
        self.port_a.write_port(a_start).map_err(BenchError::OperandA)?;
        self.port_b.write_port(b_start).map_err(BenchError::OperandB)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("ALU bench ready: A={=u8} B={=u8}", a_start, b_start);

        Ok(())
    }

    /// Read back both operands
    pub fn operands(&mut self) -> Result<(u8, u8), ErrorOf<A, B, F, C, S>> {
        let a = self.port_a.read_port().map_err(BenchError::OperandA)?;
        let b = self.port_b.read_port().map_err(BenchError::OperandB)?;
        Ok((a, b))
    }

    /// Select `opcode` and sample the outputs
    pub fn sample(&mut self, opcode: Opcode) -> Result<Sample, ErrorOf<A, B, F, C, S>> {
        let (a, b) = self.operands()?;
        self.observe(opcode, a, b)
    }

    /// Sample every opcode in control-value order
    ///
    /// Operands are read once; they do not change during a sweep.
    pub fn sweep(&mut self) -> Result<[Sample; 8], ErrorOf<A, B, F, C, S>> {
        let (a, b) = self.operands()?;
        let mut samples = [Sample {
            opcode: Opcode::Not,
            a,
            b,
            result: 0,
            carry: false,
            overflow: false,
        }; 8];

        for (slot, opcode) in samples.iter_mut().zip(Opcode::ALL) {
            *slot = self.observe(opcode, a, b)?;
        }
        Ok(samples)
    }

    /// Advance operand A by one, wrapping; returns the new value
    pub fn increment_a(&mut self) -> Result<u8, ErrorOf<A, B, F, C, S>> {
        let a = self.port_a.read_port().map_err(BenchError::OperandA)?;
        let next = a.wrapping_add(1);
        self.port_a.write_port(next).map_err(BenchError::OperandA)?;
        Ok(next)
    }

    fn observe(&mut self, opcode: Opcode, a: u8, b: u8) -> Result<Sample, ErrorOf<A, B, F, C, S>> {
        self.control
            .write_port(opcode.bits())
            .map_err(BenchError::Control)?;
        let result = self.result.read_port().map_err(BenchError::ResultPort)?;
        let status = self.status.read_port().map_err(BenchError::Status)?;

        let sample = Sample {
            opcode,
            a,
            b,
            result,
            carry: status & (1 << STATUS_CARRY) != 0,
            overflow: status & (1 << STATUS_OVERFLOW) != 0,
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("{=str} = {=u8:#x}", opcode.mnemonic(), result);

        Ok(sample)
    }
}
