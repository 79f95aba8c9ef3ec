//! `embedded-hal` 1.0 adapters
//!
//! Wrap an `embedded-hal` bus or pin to use it with the drivers in this
//! crate:
//!
//! - [`EhI2c`] - any [`embedded_hal::i2c::I2c`] as an [`I2cBus`]
//! - [`EhSpi`] - any [`embedded_hal::spi::SpiBus`] as a [`SpiBus`]
//! - [`EhOutputPin`] - any infallible [`embedded_hal::digital::OutputPin`]
//!   as an [`OutputPin`] (for chip select)

use core::convert::Infallible;

use embedded_hal::{digital, i2c, spi};
use periph_hal::{I2cBus, OutputPin, SpiBus};

/// `embedded-hal` I2C bus adapter
pub struct EhI2c<I>(pub I);

impl<I: i2c::I2c> I2cBus for EhI2c<I> {
    type Error = I::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.0.write_read(address, write_data, read_buf)
    }
}

/// `embedded-hal` SPI bus adapter
///
/// Flushes after every transfer so chip select is never raised while
/// bytes are still being clocked out.
pub struct EhSpi<S>(pub S);

impl<S: spi::SpiBus> SpiBus for EhSpi<S> {
    type Error = S::Error;

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        self.0.transfer_in_place(data)?;
        self.0.flush()
    }
}

/// `embedded-hal` output pin adapter
pub struct EhOutputPin<P> {
    pin: P,
    high: bool,
}

impl<P: digital::OutputPin<Error = Infallible>> EhOutputPin<P> {
    /// Wrap a pin, driving it high (chip select idle)
    pub fn new(mut pin: P) -> Self {
        match pin.set_high() {
            Ok(()) => {}
            Err(e) => match e {},
        }
        Self { pin, high: true }
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: digital::OutputPin<Error = Infallible>> OutputPin for EhOutputPin<P> {
    fn set_high(&mut self) {
        match self.pin.set_high() {
            Ok(()) => self.high = true,
            Err(e) => match e {},
        }
    }

    fn set_low(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.high = false,
            Err(e) => match e {},
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

#[cfg(test)]
mod tests {
    use heapless::Vec;

    use super::*;
    use crate::mcp23x08::{Mcp23x08, Register};

    /// Records every embedded-hal I2C operation and answers reads with a fixed byte
    #[derive(Default)]
    struct RecordingI2c {
        writes: Vec<(u8, Vec<u8, 4>), 8>,
        reads: usize,
        answer: u8,
    }

    impl i2c::ErrorType for RecordingI2c {
        type Error = Infallible;
    }

    impl i2c::I2c for RecordingI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [i2c::Operation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations {
                match op {
                    i2c::Operation::Write(bytes) => {
                        let _ = self
                            .writes
                            .push((address, Vec::from_slice(*bytes).unwrap_or_default()));
                    }
                    i2c::Operation::Read(buf) => {
                        self.reads += 1;
                        buf.fill(self.answer);
                    }
                }
            }
            Ok(())
        }
    }

    /// SPI bus that echoes its input and counts flushes
    #[derive(Default)]
    struct EchoSpi {
        flushes: usize,
        frames: usize,
    }

    impl spi::ErrorType for EchoSpi {
        type Error = Infallible;
    }

    impl spi::SpiBus for EchoSpi {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.fill(0);
            Ok(())
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            for (r, w) in read.iter_mut().zip(write) {
                *r = *w;
            }
            Ok(())
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            self.frames += 1;
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Pin {
        high: bool,
        edges: usize,
    }

    impl digital::ErrorType for Pin {
        type Error = Infallible;
    }

    impl digital::OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.edges += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.edges += 1;
            Ok(())
        }
    }

    #[test]
    fn test_expander_over_embedded_hal_i2c() {
        let bus = RecordingI2c {
            answer: 0x3C,
            ..Default::default()
        };
        let mut expander = Mcp23x08::new_i2c(EhI2c(bus), 0x02).unwrap();

        expander.write_port(0x99).unwrap();
        assert_eq!(expander.read_port().unwrap(), 0x3C);

        let EhI2c(bus) = expander.release().release();
        assert_eq!(bus.writes.len(), 2);
        assert_eq!(bus.writes[0].0, 0x22);
        assert_eq!(bus.writes[0].1.as_slice(), &[Register::Olat.addr(), 0x99]);
        assert_eq!(bus.writes[1].1.as_slice(), &[Register::Gpio.addr()]);
        assert_eq!(bus.reads, 1);
    }

    #[test]
    fn test_spi_adapter_flushes_every_operation() {
        let mut bus = EhSpi(EchoSpi::default());
        let mut frame = [0x41, 0x09, 0x00];
        bus.transfer_in_place(&mut frame).unwrap();
        bus.transfer_in_place(&mut frame).unwrap();

        assert_eq!(frame, [0x41, 0x09, 0x00]);
        assert_eq!(bus.0.frames, 2);
        assert_eq!(bus.0.flushes, 2);
    }

    #[test]
    fn test_output_pin_adapter_tracks_state() {
        let mut cs = EhOutputPin::new(Pin::default());
        assert!(cs.is_set_high());

        cs.set_low();
        assert!(cs.is_set_low());
        cs.toggle();
        assert!(cs.is_set_high());

        let pin = cs.release();
        assert!(pin.high);
        assert_eq!(pin.edges, 3);
    }
}
