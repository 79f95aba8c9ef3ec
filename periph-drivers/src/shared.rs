//! Bus sharing between device bindings
//!
//! Several expanders can sit on one physical bus. The bus lives in an
//! `embassy-sync` blocking mutex around a `RefCell`, and each binding gets
//! its own handle that holds the lock for exactly one bus call.
//!
//! - I2C goes through `embassy-embedded-hal`'s blocking [`I2cDevice`],
//!   adapted with [`EhI2c`]; see [`shared_i2c`].
//! - SPI chip select stays with each driver, so handles share the bare bus
//!   through [`SharedSpiBus`].
//!
//! With `NoopRawMutex` nothing is actually locked, which fits the single
//! threaded control loop. A nested borrow is a programming error and panics.

use core::cell::RefCell;

use embassy_embedded_hal::shared_bus::blocking::i2c::I2cDevice;
use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};
use periph_hal::SpiBus;

use crate::compat::EhI2c;

/// I2C handle onto a shared bus
pub type SharedI2c<'a, M, B> = EhI2c<I2cDevice<'a, M, B>>;

/// Hand out one I2C handle onto `bus`
///
/// The bus must implement `embedded_hal::i2c::I2c`; bus errors reach the
/// driver wrapped in `I2cDeviceError::I2c`.
pub fn shared_i2c<M: RawMutex, B>(bus: &Mutex<M, RefCell<B>>) -> SharedI2c<'_, M, B> {
    EhI2c(I2cDevice::new(bus))
}

/// SPI handle onto a shared bus, chip select left to the driver
pub struct SharedSpiBus<'a, M: RawMutex, B> {
    bus: &'a Mutex<M, RefCell<B>>,
}

impl<'a, M: RawMutex, B> SharedSpiBus<'a, M, B> {
    /// Create a handle onto `bus`
    pub fn new(bus: &'a Mutex<M, RefCell<B>>) -> Self {
        Self { bus }
    }
}

impl<M: RawMutex, B> Clone for SharedSpiBus<'_, M, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: RawMutex, B> Copy for SharedSpiBus<'_, M, B> {}

impl<M: RawMutex, B: SpiBus> SpiBus for SharedSpiBus<'_, M, B> {
    type Error = B::Error;

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        self.bus
            .lock(|bus| bus.borrow_mut().transfer_in_place(data))
    }
}
