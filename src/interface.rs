//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and two implementations
//! for talking to the SH1107:
//!
//! - [`SpiInterface`]: 4-wire SPI with a D/C pin and a reset pin
//! - [`I2cInterface`]: I2C with control-byte framing and a reset pin
//!
//! The driver only ever needs three operations from the transport: a command
//! stream, a data stream and a timed hardware reset. No retries happen here.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use sh1107::{DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut interface = SpiInterface::new(MockSpi, MockPin, MockPin);
//!
//! // Display on
//! let _ = interface.send_commands(&[0xAF]);
//!
//! // One page worth of pixels
//! let _ = interface.send_data(&[0xFF; 64]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::{I2c, Operation};
use embedded_hal::spi::SpiDevice;

use crate::config::ResetTiming;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the transport between the driver and the SH1107
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`DisplayDriver`](crate::display::DisplayDriver) to work with
/// any bus that can deliver command and data bytes.
///
/// ## Implementing
///
/// For most cases, use [`SpiInterface`] or [`I2cInterface`]. Implement this
/// trait yourself for other buses or when the reset line lives elsewhere.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a sequence of command bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the bus or a control pin fails.
    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Send pixel data bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the bus or a control pin fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform a timed hardware reset
    ///
    /// The implementation must:
    /// 1. Drive the reset line to its asserted level (`timing.active_high`)
    /// 2. Wait `timing.assert_ms`
    /// 3. Release the reset line
    /// 4. Wait `timing.settle_ms`
    ///
    /// # Errors
    ///
    /// Returns an error if the reset pin cannot be driven.
    fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timing: ResetTiming,
    ) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over bus and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<BusErr, PinErr> {
    /// SPI or I2C communication error
    Bus(BusErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

fn pulse_reset<RST, D>(rst: &mut RST, delay: &mut D, timing: ResetTiming) -> Result<(), RST::Error>
where
    RST: OutputPin,
    D: DelayNs,
{
    if timing.active_high {
        rst.set_high()?;
    } else {
        rst.set_low()?;
    }
    delay.delay_ms(timing.assert_ms);
    if timing.active_high {
        rst.set_low()?;
    } else {
        rst.set_high()?;
    }
    delay.delay_ms(timing.settle_ms);
    Ok(())
}

/// 4-wire SPI interface
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`] (owns chip select)
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct SpiInterface<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin
    rst: RST,
}

impl<SPI, DC, RST> SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new SPI interface
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Give back the bus and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(commands).map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Bus)
    }

    fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timing: ResetTiming,
    ) -> InterfaceResult<(), Self::Error> {
        pulse_reset(&mut self.rst, delay, timing).map_err(InterfaceError::Pin)
    }
}

/// Default 7-bit I2C address of SH1107 modules
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Control byte announcing a command stream
pub const I2C_CONTROL_COMMAND: u8 = 0x00;

/// Control byte announcing a data stream
pub const I2C_CONTROL_DATA: u8 = 0x40;

/// I2C interface
///
/// Each call is one I2C transaction: the control byte followed by the payload.
pub struct I2cInterface<I2C, RST> {
    i2c: I2C,
    rst: RST,
    address: u8,
}

impl<I2C, RST> I2cInterface<I2C, RST>
where
    I2C: I2c,
    RST: OutputPin,
{
    /// Create a new I2C interface at [`DEFAULT_I2C_ADDRESS`]
    pub fn new(i2c: I2C, rst: RST) -> Self {
        Self {
            i2c,
            rst,
            address: DEFAULT_I2C_ADDRESS,
        }
    }

    /// Use a different 7-bit device address
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// The configured 7-bit device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the bus and reset pin
    pub fn release(self) -> (I2C, RST) {
        (self.i2c, self.rst)
    }

    fn write_framed(&mut self, control: u8, payload: &[u8]) -> Result<(), I2C::Error> {
        // Adjacent writes in one transaction go out without a repeated start
        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&[control]), Operation::Write(payload)],
        )
    }
}

impl<I2C, RST> DisplayInterface for I2cInterface<I2C, RST>
where
    I2C: I2c,
    I2C::Error: Debug,
    RST: OutputPin,
    RST::Error: Debug,
{
    type Error = InterfaceError<I2C::Error, RST::Error>;

    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.write_framed(I2C_CONTROL_COMMAND, commands)
            .map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.write_framed(I2C_CONTROL_DATA, data)
            .map_err(InterfaceError::Bus)
    }

    fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timing: ResetTiming,
    ) -> InterfaceResult<(), Self::Error> {
        pulse_reset(&mut self.rst, delay, timing).map_err(InterfaceError::Pin)
    }
}
