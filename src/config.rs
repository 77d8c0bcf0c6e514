//! Display configuration types and builder

use crate::command;
pub use crate::error::BuilderError;
use crate::geometry::{PANEL_LONG_SIDE, PANEL_SHORT_SIDE};

/// Logical screen resolution
///
/// Only the two orientations of the 64x128 panel are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` unless the resolution is
    /// 64x128 (portrait) or 128x64 (landscape).
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        let portrait = width == PANEL_SHORT_SIDE && height == PANEL_LONG_SIDE;
        let landscape = width == PANEL_LONG_SIDE && height == PANEL_SHORT_SIDE;
        if !portrait && !landscape {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Orientation implied by the resolution
    pub fn orientation(&self) -> Orientation {
        if self.height > self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Which logical axis is quantized into hardware pages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// 64 wide, 128 tall. Pages run along y. Controller default.
    #[default]
    Portrait,
    /// 128 wide, 64 tall. Pages run along x.
    Landscape,
}

/// Hardware reset pulse
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResetTiming {
    /// Level of the reset line while asserted
    pub active_high: bool,
    /// How long the reset line is held asserted
    pub assert_ms: u32,
    /// How long to wait after releasing reset
    pub settle_ms: u32,
}

impl Default for ResetTiming {
    fn default() -> Self {
        Self {
            active_high: false,
            assert_ms: 5,
            settle_ms: 120,
        }
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Logical resolution
    pub dimensions: Dimensions,
    /// Contrast register value
    pub contrast: u8,
    /// Display offset (COM shift) register value
    pub display_offset: u8,
    /// Start with inverted pixels
    pub inverted: bool,
    /// Reset pulse shape
    pub reset: ResetTiming,
}

impl Config {
    /// Orientation derived from the configured resolution
    pub fn orientation(&self) -> Orientation {
        self.dimensions.orientation()
    }

    /// Controller init command block for this configuration
    pub fn init_sequence(&self) -> [u8; command::INIT_SEQUENCE_LEN] {
        command::init_sequence(self.contrast, self.display_offset, self.inverted)
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use sh1107::{Builder, Dimensions, Orientation};
///
/// let dims = match Dimensions::new(128, 64) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).contrast(0x80).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.orientation(), Orientation::Landscape);
/// ```
#[must_use]
pub struct Builder {
    /// Logical resolution (required)
    dimensions: Option<Dimensions>,
    /// Contrast register value
    contrast: u8,
    /// Display offset register value
    display_offset: u8,
    /// Start with inverted pixels
    inverted: bool,
    /// Reset pulse shape
    reset: ResetTiming,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            contrast: 0x2F,
            // 64 lit segments centred on the 128 segment driver
            display_offset: 0x60,
            inverted: false,
            reset: ResetTiming::default(),
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the logical resolution (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the contrast register
    pub fn contrast(mut self, value: u8) -> Self {
        self.contrast = value;
        self
    }

    /// Set the display offset register
    pub fn display_offset(mut self, value: u8) -> Self {
        self.display_offset = value;
        self
    }

    /// Start the panel in inverse video
    pub fn inverted(mut self, value: bool) -> Self {
        self.inverted = value;
        self
    }

    /// Set reset line polarity (`true` = asserted high)
    pub fn reset_active_high(mut self, value: bool) -> Self {
        self.reset.active_high = value;
        self
    }

    /// Set how long reset is held asserted, in milliseconds
    pub fn reset_assert_ms(mut self, value: u32) -> Self {
        self.reset.assert_ms = value;
        self
    }

    /// Set how long to wait after releasing reset, in milliseconds
    pub fn reset_settle_ms(mut self, value: u32) -> Self {
        self.reset.settle_ms = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            contrast: self.contrast,
            display_offset: self.display_offset,
            inverted: self.inverted,
            reset: self.reset,
        })
    }
}
