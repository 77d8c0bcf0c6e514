//! Graphics support via embedded-graphics
//!
//! This module provides the [`GraphicDisplay`] struct which wraps
//! [`DisplayDriver`] and implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait from
//! the embedded-graphics ecosystem with [`BinaryColor`] pixels.
//!
//! Drawing only touches the bitplane. Every drawn pixel grows a dirty area,
//! and [`GraphicDisplay::flush`] sends just the pages that area covers.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use sh1107::{Builder, Dimensions, DisplayDriver, GraphicDisplay, NullEngine, SpiInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let dims = match Dimensions::new(64, 128) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let interface = SpiInterface::new(MockSpi, MockPin, MockPin);
//! let driver = DisplayDriver::new(interface, NullEngine, [0u8; 1024], config);
//! let mut display = GraphicDisplay::new(driver);
//! if !display.initialize(&mut MockDelay) {
//!     return;
//! }
//!
//! let _ = Rectangle::new(Point::new(2, 2), Size::new(60, 20))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(12, 40), 40)
//!     .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
//!     .draw(&mut display);
//!
//! let _ = Text::new(
//!     "SH1107",
//!     Point::new(4, 100),
//!     MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
//! )
//! .draw(&mut display);
//!
//! // Push the dirty pages
//! let outcome = display.flush();
//! assert!(outcome.is_complete());
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};
use embedded_hal::delay::DelayNs;

use crate::display::DisplayDriver;
use crate::engine::RenderEngine;
use crate::geometry::Area;
use crate::interface::DisplayInterface;
use crate::sequencer::FlushOutcome;

/// Display driver with embedded-graphics drawing and dirty-area tracking
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `E` - Rendering engine notified by the driver
/// * `B` - Bitplane storage, at least [`BUFFER_SIZE`](crate::geometry::BUFFER_SIZE) bytes
pub struct GraphicDisplay<I, E, B>
where
    I: DisplayInterface,
    E: RenderEngine,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// The underlying display driver
    display: DisplayDriver<I, E, B>,
    /// Area drawn since the last flush
    dirty: Option<Area>,
}

impl<I, E, B> GraphicDisplay<I, E, B>
where
    I: DisplayInterface,
    E: RenderEngine,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap a driver; nothing is marked dirty
    pub fn new(display: DisplayDriver<I, E, B>) -> Self {
        Self {
            display,
            dirty: None,
        }
    }

    /// Initialize the underlying driver
    ///
    /// The bitplane is cleared on success, and the whole screen is marked
    /// dirty so the next [`flush`](Self::flush) wipes the panel RAM.
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> bool {
        let ready = self.display.initialize(delay);
        if ready {
            self.mark_dirty(self.full_area());
        }
        ready
    }

    /// Send the pages covered by everything drawn since the last flush
    ///
    /// Does nothing (and sends nothing) when no pixel was drawn.
    pub fn flush(&mut self) -> FlushOutcome {
        let Some(dirty) = self.dirty.take() else {
            return FlushOutcome::default();
        };
        let area = self.display.round_area(dirty);
        self.display.flush(area)
    }

    /// Area that the next [`flush`](Self::flush) will send, before rounding
    pub fn dirty_area(&self) -> Option<Area> {
        self.dirty
    }

    /// Get a reference to the underlying driver
    pub fn display(&self) -> &DisplayDriver<I, E, B> {
        &self.display
    }

    /// Get a mutable reference to the underlying driver
    ///
    /// Pixels written straight through the driver are not tracked as dirty.
    pub fn display_mut(&mut self) -> &mut DisplayDriver<I, E, B> {
        &mut self.display
    }

    /// Unwrap the driver
    pub fn into_inner(self) -> DisplayDriver<I, E, B> {
        self.display
    }

    fn full_area(&self) -> Area {
        let dims = self.display.dimensions();
        Area::full(dims.width, dims.height)
    }

    fn mark_dirty(&mut self, area: Area) {
        self.dirty = Some(match self.dirty {
            Some(dirty) => dirty.union(&area),
            None => area,
        });
    }
}

impl<I, E, B> DrawTarget for GraphicDisplay<I, E, B>
where
    I: DisplayInterface,
    E: RenderEngine,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let x = x as u32;
            let y = y as u32;

            if x >= sz.width || y >= sz.height {
                continue;
            }

            let (x, y) = (x as u16, y as u16);
            if self.display.set_pixel(x, y, color.is_on()) {
                self.mark_dirty(Area::new(x, y, x, y));
            }
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.display.clear(color.is_on());
        self.mark_dirty(self.full_area());
        Ok(())
    }
}

impl<I, E, B> OriginDimensions for GraphicDisplay<I, E, B>
where
    I: DisplayInterface,
    E: RenderEngine,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        let dims = self.display.dimensions();
        Size::new(u32::from(dims.width), u32::from(dims.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, Dimensions, ResetTiming};
    use crate::engine::NullEngine;
    use crate::geometry::BUFFER_SIZE;
    use alloc::vec::Vec;
    use embedded_graphics::{
        prelude::*,
        primitives::{Line, PrimitiveStyle, Rectangle},
    };

    #[derive(Debug, Default)]
    struct MockInterface {
        commands: Vec<Vec<u8>>,
        data: Vec<Vec<u8>>,
    }

    impl DisplayInterface for MockInterface {
        type Error = Infallible;

        fn send_commands(&mut self, commands: &[u8]) -> Result<(), Self::Error> {
            self.commands.push(commands.to_vec());
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.data.push(data.to_vec());
            Ok(())
        }

        fn reset<D: DelayNs>(
            &mut self,
            _delay: &mut D,
            _timing: ResetTiming,
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    type TestDisplay = GraphicDisplay<MockInterface, NullEngine, [u8; BUFFER_SIZE]>;

    fn test_display(width: u16, height: u16) -> TestDisplay {
        let config = Builder::new()
            .dimensions(Dimensions::new(width, height).unwrap())
            .build()
            .unwrap();
        let driver = DisplayDriver::new(
            MockInterface::default(),
            NullEngine,
            [0u8; BUFFER_SIZE],
            config,
        );
        let mut display = GraphicDisplay::new(driver);
        assert!(display.initialize(&mut MockDelay));
        let _ = display.flush();
        let interface = display.display_mut().interface_mut();
        interface.commands.clear();
        interface.data.clear();
        display
    }

    #[test]
    fn test_size_follows_orientation() {
        assert_eq!(test_display(64, 128).size(), Size::new(64, 128));
        assert_eq!(test_display(128, 64).size(), Size::new(128, 64));
    }

    #[test]
    fn test_initialize_marks_full_screen_dirty() {
        let config = Builder::new()
            .dimensions(Dimensions::new(64, 128).unwrap())
            .build()
            .unwrap();
        let driver = DisplayDriver::new(
            MockInterface::default(),
            NullEngine,
            [0u8; BUFFER_SIZE],
            config,
        );
        let mut display = GraphicDisplay::new(driver);
        assert!(display.initialize(&mut MockDelay));
        assert_eq!(display.dirty_area(), Some(Area::new(0, 0, 63, 127)));
        assert_eq!(display.flush().pages, 16);
    }

    #[test]
    fn test_flush_without_drawing_sends_nothing() {
        let mut display = test_display(64, 128);
        assert_eq!(display.flush(), FlushOutcome::default());
        assert!(display.display_mut().interface_mut().data.is_empty());
    }

    #[test]
    fn test_draw_rectangle_flushes_covered_pages() {
        let mut display = test_display(64, 128);
        Rectangle::new(Point::new(4, 10), Size::new(8, 4))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut display)
            .unwrap();

        assert_eq!(display.dirty_area(), Some(Area::new(4, 10, 11, 13)));
        assert_eq!(display.display().pixel(4, 10), Some(true));
        assert_eq!(display.display().pixel(11, 13), Some(true));
        assert_eq!(display.display().pixel(12, 13), Some(false));

        let outcome = display.flush();
        assert_eq!(outcome.pages, 1);
        assert!(display.dirty_area().is_none());

        let interface = display.display_mut().interface_mut();
        assert_eq!(interface.commands, alloc::vec![alloc::vec![0x10, 0x04, 0xB1]]);
        // y 10..=13 is bits 2..=5 of page 1
        assert_eq!(interface.data, alloc::vec![alloc::vec![0b0011_1100u8; 8]]);
    }

    #[test]
    fn test_landscape_line_uses_x_pages() {
        let mut display = test_display(128, 64);
        Line::new(Point::new(0, 5), Point::new(15, 5))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut display)
            .unwrap();

        let outcome = display.flush();
        assert_eq!(outcome.pages, 2);
        let interface = display.display_mut().interface_mut();
        assert_eq!(interface.commands[0], alloc::vec![0x10, 0x05, 0xB0]);
        assert_eq!(interface.commands[1], alloc::vec![0x10, 0x05, 0xB1]);
        assert_eq!(interface.data, alloc::vec![alloc::vec![0xFF], alloc::vec![0xFF]]);
    }

    #[test]
    fn test_off_screen_pixels_are_ignored() {
        let mut display = test_display(64, 128);
        display
            .draw_iter([
                Pixel(Point::new(-1, 0), BinaryColor::On),
                Pixel(Point::new(64, 0), BinaryColor::On),
                Pixel(Point::new(0, 128), BinaryColor::On),
            ])
            .unwrap();
        assert!(display.dirty_area().is_none());
        assert!(display.display().buffer().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_clear_fills_buffer_and_marks_everything() {
        let mut display = test_display(64, 128);
        display.clear(BinaryColor::On).unwrap();
        assert!(display.display().buffer().iter().all(|byte| *byte == 0xFF));
        assert_eq!(display.dirty_area(), Some(Area::new(0, 0, 63, 127)));
        assert_eq!(display.flush().pages, 16);
    }
}
