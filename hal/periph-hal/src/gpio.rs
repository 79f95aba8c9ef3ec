//! GPIO pin abstractions
//!
//! Provides the host's native GPIO facility, addressed by pin number, and
//! a single-line output trait used for chip-select lines.

use core::ops::Not;

/// Pin direction and pull configuration
///
/// The same vocabulary is used for host pins, expander pins and
/// virtual port pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Floating input
    Input,
    /// Push-pull output
    Output,
    /// Input with the weak pull-up enabled
    InputPullup,
}

impl PinMode {
    /// Whether the pin samples (rather than drives) its level
    pub fn is_input(self) -> bool {
        !matches!(self, PinMode::Output)
    }
}

/// Digital logic level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    /// Check if the level is high (logic 1)
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Check if the level is low (logic 0)
    pub fn is_low(self) -> bool {
        self == Level::Low
    }

    /// Level of bit `bit` in `value`
    pub fn from_bit(value: u8, bit: u8) -> Self {
        Level::from((value >> bit) & 0x01 != 0)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Self::Output {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Host GPIO facility
///
/// Numbered pins of the microcontroller itself. Operations cannot fail;
/// what an invalid pin number does is up to the implementation.
pub trait HostGpio {
    /// Configure direction and pull for a pin
    fn set_mode(&mut self, pin: u8, mode: PinMode);

    /// Drive a pin to a level
    fn write(&mut self, pin: u8, level: Level);

    /// Sample the current level of a pin
    fn read(&mut self, pin: u8) -> Level;
}

impl<G: HostGpio + ?Sized> HostGpio for &mut G {
    fn set_mode(&mut self, pin: u8, mode: PinMode) {
        (**self).set_mode(pin, mode)
    }

    fn write(&mut self, pin: u8, level: Level) {
        (**self).write(pin, level)
    }

    fn read(&mut self, pin: u8) -> Level {
        (**self).read(pin)
    }
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// One numbered host line used as an [`OutputPin`]
///
/// Configures the line as an output on construction and remembers the
/// last level it drove. The line starts high, the idle level of an
/// active-low chip select, so claiming it never selects a device.
pub struct GpioLine<G> {
    gpio: G,
    pin: u8,
    high: bool,
}

impl<G: HostGpio> GpioLine<G> {
    /// Claim `pin` on the host facility as an output, initially high
    pub fn new(mut gpio: G, pin: u8) -> Self {
        // Latch the level before the driver is enabled
        gpio.write(pin, Level::High);
        gpio.set_mode(pin, PinMode::Output);
        Self {
            gpio,
            pin,
            high: true,
        }
    }

    /// Host pin number of this line
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Give the host facility back
    pub fn release(self) -> G {
        self.gpio
    }
}

impl<G: HostGpio> OutputPin for GpioLine<G> {
    fn set_high(&mut self) {
        self.gpio.write(self.pin, Level::High);
        self.high = true;
    }

    fn set_low(&mut self) {
        self.gpio.write(self.pin, Level::Low);
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
