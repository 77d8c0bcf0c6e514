//! SH1107 Monochrome OLED Display Driver
//!
//! A driver for the SH1107 controller driving 64x128 one-bit OLED panels in
//! page addressing mode, in portrait (64x128) or landscape (128x64).
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation
//! - `embedded-hal` v1.0 support, over SPI or I2C
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Dirty areas rounded to whole 8-pixel pages
//! - Per-page flushing that keeps going past transport failures
//!
//! ## Memory layout
//!
//! The caller owns a 1024 byte bitplane: 16 pages of 64 column bytes. Bit
//! `n` of a column byte is row `n` of that page. In portrait the pages run
//! down the y axis; in landscape they run along x.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use sh1107::{Area, Builder, Dimensions, DisplayDriver, NullEngine, SpiInterface};
//!
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = SpiInterface::new(spi, dc, rst);
//! let dims = match Dimensions::new(64, 128) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).contrast(0x40).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = DisplayDriver::new(interface, NullEngine, [0u8; 1024], config);
//! if !display.initialize(&mut delay) {
//!     return;
//! }
//!
//! display.set_pixel(10, 20, true);
//! let area = display.round_area(Area::new(10, 20, 10, 20));
//! let outcome = display.flush(area);
//! assert_eq!(outcome.pages, 1);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Packed 1-bit pixel storage
pub mod bitplane;
/// SH1107 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Rendering engine contract
pub mod engine;
/// Error types for the driver
pub mod error;
/// Panel geometry and rectangles
pub mod geometry;
/// Hardware interface abstraction
pub mod interface;
/// Orientation-aware addressing
pub mod mapper;
/// Single pixel writes into the bitplane
pub mod packer;
/// Per-page command/data sequencing
pub mod sequencer;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use bitplane::BitplaneBuffer;
pub use config::{Builder, Config, Dimensions, Orientation, ResetTiming};
pub use display::{DisplayDriver, DriverState};
pub use engine::{NullEngine, Registration, RenderEngine};
pub use error::{BuilderError, Error};
pub use geometry::{Area, BUFFER_SIZE, COLUMNS, PAGES};
pub use interface::{
    DEFAULT_I2C_ADDRESS, DisplayInterface, I2cInterface, InterfaceError, SpiInterface,
};
pub use mapper::{CoordinateMapper, PixelAddress};
pub use sequencer::{FlushOutcome, PageAddress};

#[cfg(feature = "graphics")]
pub use graphics::GraphicDisplay;
