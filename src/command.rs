//! SH1107 command definitions
//!
//! This module defines the command bytes used to drive the SH1107 OLED
//! controller in page addressing mode. Commands travel with the D/C line low
//! (SPI) or behind a `0x00` control byte (I2C); pixel data with D/C high or
//! behind `0x40`.
//!
//! ## Page addressing
//!
//! Before any pixel byte reaches a page the controller needs the column
//! address split in two nibbles plus the page number:
//!
//! ```
//! use sh1107::command;
//!
//! let start_col: u8 = 0x25;
//! let page: u8 = 3;
//! let prologue = [
//!     command::UPPER_COLUMN_ADDRESS | ((start_col >> 4) & 0x0F),
//!     command::LOWER_COLUMN_ADDRESS | (start_col & 0x0F),
//!     command::PAGE_ADDRESS | page,
//! ];
//! assert_eq!(prologue, [0x12, 0x05, 0xB3]);
//! ```

// Addressing

/// Lower column address nibble (0x00 | low nibble)
pub const LOWER_COLUMN_ADDRESS: u8 = 0x00;

/// Upper column address nibble (0x10 | high nibble)
pub const UPPER_COLUMN_ADDRESS: u8 = 0x10;

/// Page addressing memory mode (0x20)
///
/// Column pointer advances within a page after each data byte.
pub const PAGE_ADDRESSING_MODE: u8 = 0x20;

/// Page address (0xB0 | page)
pub const PAGE_ADDRESS: u8 = 0xB0;

// Panel setup

/// Contrast control (0x81), followed by one value byte
pub const SET_CONTRAST: u8 = 0x81;

/// DC-DC converter control (0xAD), followed by one mode byte
pub const SET_DC_DC: u8 = 0xAD;

/// Default DC-DC setting: built-in converter on
pub const DC_DC_ON: u8 = 0x8A;

/// Segment remap, normal direction (0xA0)
pub const SEGMENT_REMAP_NORMAL: u8 = 0xA0;

/// Multiplex ratio (0xA8), followed by ratio - 1
pub const SET_MULTIPLEX_RATIO: u8 = 0xA8;

/// Multiplex ratio for 128 COM lines
pub const MULTIPLEX_128: u8 = 0x7F;

/// Resume from RAM content (0xA4)
pub const ENTIRE_DISPLAY_RESUME: u8 = 0xA4;

/// Normal video (0xA6)
pub const NORMAL_DISPLAY: u8 = 0xA6;

/// Inverse video (0xA7)
pub const INVERSE_DISPLAY: u8 = 0xA7;

/// Display offset (0xD3), followed by the COM shift
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;

/// Display clock divide ratio / oscillator frequency (0xD5), followed by one byte
pub const SET_CLOCK_DIVIDE: u8 = 0xD5;

/// Default clock setting
pub const CLOCK_DIVIDE_DEFAULT: u8 = 0x51;

/// Pre-charge / dis-charge period (0xD9), followed by one byte
pub const SET_PRECHARGE: u8 = 0xD9;

/// Default pre-charge period
pub const PRECHARGE_DEFAULT: u8 = 0x22;

/// VCOM deselect level (0xDB), followed by one byte
pub const SET_VCOM_DESELECT: u8 = 0xDB;

/// Default VCOM deselect level
pub const VCOM_DESELECT_DEFAULT: u8 = 0x35;

/// Display start line (0xDC), followed by the line number
pub const SET_START_LINE: u8 = 0xDC;

// Orientation

/// Common output scan direction, normal (0xC0). Portrait.
pub const COM_SCAN_NORMAL: u8 = 0xC0;

/// Common output scan direction, reversed (0xC8). Landscape.
pub const COM_SCAN_LANDSCAPE: u8 = 0xC8;

// Power

/// Display off, sleep mode (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

/// Length of the init command block
pub const INIT_SEQUENCE_LEN: usize = 23;

/// Build the controller init command block
///
/// Puts the panel in page addressing mode with portrait scan direction, then
/// switches the display on. Landscape is selected afterwards with
/// [`COM_SCAN_LANDSCAPE`].
pub const fn init_sequence(
    contrast: u8,
    display_offset: u8,
    inverted: bool,
) -> [u8; INIT_SEQUENCE_LEN] {
    [
        DISPLAY_OFF,
        SET_CLOCK_DIVIDE,
        CLOCK_DIVIDE_DEFAULT,
        PAGE_ADDRESSING_MODE,
        SET_CONTRAST,
        contrast,
        SET_DC_DC,
        DC_DC_ON,
        SEGMENT_REMAP_NORMAL,
        COM_SCAN_NORMAL,
        SET_START_LINE,
        0x00,
        SET_DISPLAY_OFFSET,
        display_offset,
        SET_PRECHARGE,
        PRECHARGE_DEFAULT,
        SET_VCOM_DESELECT,
        VCOM_DESELECT_DEFAULT,
        SET_MULTIPLEX_RATIO,
        MULTIPLEX_128,
        ENTIRE_DISPLAY_RESUME,
        if inverted {
            INVERSE_DISPLAY
        } else {
            NORMAL_DISPLAY
        },
        DISPLAY_ON,
    ]
}
