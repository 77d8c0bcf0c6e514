//! Core display operations

use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};

use crate::bitplane::BitplaneBuffer;
use crate::command::{
    COM_SCAN_LANDSCAPE, DISPLAY_OFF, DISPLAY_ON, INVERSE_DISPLAY, NORMAL_DISPLAY, SET_CONTRAST,
};
use crate::config::{Config, Dimensions, Orientation};
use crate::engine::{Registration, RenderEngine};
use crate::error::Error;
use crate::geometry::{Area, BUFFER_SIZE};
use crate::interface::DisplayInterface;
use crate::mapper::CoordinateMapper;
use crate::packer;
use crate::sequencer::{self, FlushOutcome};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Lifecycle of a [`DisplayDriver`]
///
/// ```text
/// Uninitialized -> Resetting -> ConfiguringOrientation -> Ready <-> Flushing
///                      |                  |
///                      +------------------+--> Failed
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, nothing sent yet
    #[default]
    Uninitialized,
    /// Reset pulse and init block in progress
    Resetting,
    /// Selecting the scan direction and registering with the engine
    ConfiguringOrientation,
    /// Accepting flushes
    Ready,
    /// A flush is streaming pages
    Flushing,
    /// Initialization failed; flushes are refused
    Failed,
}

/// SH1107 display driver
///
/// Owns the transport, the rendering engine handle and the bitplane storage.
/// The engine (or the application) draws through [`set_pixel`](Self::set_pixel)
/// and pushes dirty areas with [`flush`](Self::flush).
///
/// Nothing here returns a transport error to the caller: initialization
/// reports success as `bool` and flushes report a [`FlushOutcome`], with every
/// failure logged. Use [`try_initialize`](Self::try_initialize) to get the
/// [`Error`] itself.
pub struct DisplayDriver<I, E, B>
where
    I: DisplayInterface,
    E: RenderEngine,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Hardware interface
    interface: I,
    /// Rendering engine notified on registration and flush completion
    engine: E,
    /// Packed pixel storage
    buffer: BitplaneBuffer<B>,
    /// Display configuration
    config: Config,
    /// Addressing for the configured orientation
    mapper: CoordinateMapper,
    state: DriverState,
}

impl<I, E, B> DisplayDriver<I, E, B>
where
    I: DisplayInterface,
    E: RenderEngine,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a driver; nothing is sent until [`initialize`](Self::initialize)
    pub fn new(interface: I, engine: E, buffer: B, config: Config) -> Self {
        let mapper = CoordinateMapper::new(config.orientation());
        Self {
            interface,
            engine,
            buffer: BitplaneBuffer::new(buffer),
            config,
            mapper,
            state: DriverState::Uninitialized,
        }
    }

    /// Reset and configure the controller, then register with the engine
    ///
    /// Returns `false` and leaves the driver [`Failed`](DriverState::Failed)
    /// if any step goes wrong. Calling it again re-runs the whole sequence.
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> bool {
        match self.try_initialize(delay) {
            Ok(()) => true,
            Err(e) => {
                error!("display initialization failed: {}", e);
                false
            }
        }
    }

    /// Same as [`initialize`](Self::initialize), returning the failure
    ///
    /// # Errors
    ///
    /// - [`Error::Interface`] if the reset pulse or a command write fails
    /// - [`Error::BufferTooSmall`] if the storage is shorter than [`BUFFER_SIZE`]
    /// - [`Error::RegistrationRejected`] if the engine refuses the driver
    pub fn try_initialize<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        info!("initializing SH1107");
        match self.init(delay) {
            Ok(()) => {
                self.state = DriverState::Ready;
                info!(
                    "SH1107 ready: {}x{} {:?}",
                    self.config.dimensions.width,
                    self.config.dimensions.height,
                    self.orientation()
                );
                Ok(())
            }
            Err(e) => {
                self.state = DriverState::Failed;
                Err(e)
            }
        }
    }

    fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.state = DriverState::Resetting;
        self.interface
            .reset(delay, self.config.reset)
            .map_err(Error::Interface)?;
        let init = self.config.init_sequence();
        self.send_commands(&init)?;

        self.state = DriverState::ConfiguringOrientation;
        if self.orientation() == Orientation::Landscape {
            debug!("selecting landscape scan direction");
            self.send_commands(&[COM_SCAN_LANDSCAPE])?;
        }

        self.buffer
            .validate()
            .map_err(|provided| Error::BufferTooSmall {
                required: BUFFER_SIZE,
                provided,
            })?;
        self.buffer.fill(false);

        let registration = Registration {
            dimensions: self.config.dimensions,
            orientation: self.orientation(),
            buffer_len: self.buffer.len(),
        };
        if !self.engine.register(registration) {
            return Err(Error::RegistrationRejected);
        }
        Ok(())
    }

    /// Expand `area` to whole pages for the configured orientation
    pub fn round_area(&self, area: Area) -> Area {
        self.mapper.round(area)
    }

    /// Set or clear one pixel in the bitplane
    ///
    /// Returns `false` for coordinates outside the buffer.
    pub fn set_pixel(&mut self, x: u16, y: u16, on: bool) -> bool {
        packer::set_pixel(&mut self.buffer, &self.mapper, x, y, on)
    }

    /// Read one pixel back from the bitplane
    pub fn pixel(&self, x: u16, y: u16) -> Option<bool> {
        packer::pixel(&self.buffer, &self.mapper, x, y)
    }

    /// Send the pages covered by `area` from the driver's own bitplane
    ///
    /// The area is clamped to the screen and rounded to whole pages first.
    /// The engine is told the flush finished even when pages failed or the
    /// driver was not ready.
    pub fn flush(&mut self, area: Area) -> FlushOutcome {
        let outcome = match self.prepare_flush(area) {
            Some(rounded) => {
                let (start_page, _) = self.mapper.page_span(&rounded);
                let (start_col, _) = self.mapper.column_span(&rounded);
                let offset = CoordinateMapper::page_offset(start_page, start_col);
                let colormap = self.buffer.as_bytes().get(offset..).unwrap_or(&[]);
                let outcome =
                    sequencer::flush(&mut self.interface, &self.mapper, &rounded, colormap);
                self.state = DriverState::Ready;
                outcome
            }
            None => FlushOutcome::default(),
        };
        self.engine.flush_ready();
        outcome
    }

    /// Send the pages covered by `area` from an engine-owned colormap
    ///
    /// `colormap` starts at the first column of the first page and holds one
    /// [`COLUMNS`](crate::geometry::COLUMNS) stride per page.
    pub fn flush_with(&mut self, area: Area, colormap: &[u8]) -> FlushOutcome {
        let outcome = match self.prepare_flush(area) {
            Some(rounded) => {
                let outcome =
                    sequencer::flush(&mut self.interface, &self.mapper, &rounded, colormap);
                self.state = DriverState::Ready;
                outcome
            }
            None => FlushOutcome::default(),
        };
        self.engine.flush_ready();
        outcome
    }

    /// Push the whole bitplane
    pub fn refresh(&mut self) -> FlushOutcome {
        let full = Area::full(self.config.dimensions.width, self.config.dimensions.height);
        self.flush(full)
    }

    /// Check readiness, clamp and round; moves the driver to `Flushing`
    fn prepare_flush(&mut self, area: Area) -> Option<Area> {
        if self.state != DriverState::Ready {
            warn!("flush ignored, driver is {:?}", self.state);
            return None;
        }
        let Dimensions { width, height } = self.config.dimensions;
        let Some(clamped) = area.clamp(width, height) else {
            debug!("flush area {:?} is off screen", area);
            return None;
        };
        self.state = DriverState::Flushing;
        Some(self.mapper.round(clamped))
    }

    /// Fill the bitplane with all pixels on or off; nothing is sent
    pub fn clear(&mut self, on: bool) {
        self.buffer.fill(on);
    }

    /// Change the contrast register
    pub fn set_contrast(&mut self, value: u8) -> bool {
        let result = self.send_when_ready(&[SET_CONTRAST, value]);
        if result {
            self.config.contrast = value;
        }
        result
    }

    /// Switch the panel on or off (sleep); RAM is kept
    pub fn set_display_on(&mut self, on: bool) -> bool {
        self.send_when_ready(&[if on { DISPLAY_ON } else { DISPLAY_OFF }])
    }

    /// Toggle inverse video
    pub fn set_inverted(&mut self, inverted: bool) -> bool {
        let command = if inverted {
            INVERSE_DISPLAY
        } else {
            NORMAL_DISPLAY
        };
        let result = self.send_when_ready(&[command]);
        if result {
            self.config.inverted = inverted;
        }
        result
    }

    fn send_when_ready(&mut self, commands: &[u8]) -> bool {
        let result = if self.state == DriverState::Ready {
            self.send_commands(commands)
        } else {
            Err(Error::NotReady(self.state))
        };
        match result {
            Ok(()) => true,
            Err(e @ Error::NotReady(_)) => {
                warn!("command {:02X?} ignored: {}", commands, e);
                false
            }
            Err(e) => {
                error!("command {:02X?} failed: {}", commands, e);
                false
            }
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Orientation derived from the configured resolution
    pub fn orientation(&self) -> Orientation {
        self.mapper.orientation()
    }

    /// Configured logical resolution
    pub fn dimensions(&self) -> Dimensions {
        self.config.dimensions
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Packed bitplane bytes
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Get a reference to the interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Get a mutable reference to the interface
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Engine handle
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable engine handle
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Give back the interface, engine and buffer storage
    pub fn release(self) -> (I, E, B) {
        (self.interface, self.engine, self.buffer.into_inner())
    }

    fn send_commands(&mut self, commands: &[u8]) -> DisplayResult<I> {
        self.interface
            .send_commands(commands)
            .map_err(Error::Interface)
    }
}
