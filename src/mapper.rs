//! Orientation-aware addressing
//!
//! Every consumer that needs to know which logical axis becomes the hardware
//! column and which is quantized into pages goes through
//! [`CoordinateMapper`]: the rounder, the pixel packer and the flush sequencer
//! all share this one mapping.
//!
//! | Orientation | column axis | page axis |
//! |-------------|-------------|-----------|
//! | Portrait    | x           | y         |
//! | Landscape   | y           | x         |
//!
//! ## Example
//!
//! ```
//! use sh1107::{Area, CoordinateMapper, Orientation};
//!
//! let mapper = CoordinateMapper::new(Orientation::Portrait);
//! let rounded = mapper.round(Area::new(2, 3, 5, 10));
//! assert_eq!(rounded, Area::new(2, 0, 5, 15));
//!
//! let address = mapper.locate(5, 10);
//! assert_eq!(address.index, 5 + 64);
//! assert_eq!(address.bit, 2);
//! ```

use crate::config::Orientation;
use crate::geometry::{Area, COLUMNS};

const PAGE_MASK: u16 = 0x7;
const PAGE_SHIFT: u16 = 3;

/// Page holding the given page-axis coordinate
pub const fn page_of(coord: u16) -> u16 {
    coord >> PAGE_SHIFT
}

/// Bit within the page byte for the given page-axis coordinate
pub const fn bit_of(coord: u16) -> u8 {
    (coord & PAGE_MASK) as u8
}

/// Byte index and bit of one pixel inside the bitplane
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelAddress {
    /// Byte index into the bitplane
    pub index: usize,
    /// Bit within that byte (0 = top of the page)
    pub bit: u8,
}

/// Translates logical coordinates into page/column addressing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoordinateMapper {
    orientation: Orientation,
}

impl CoordinateMapper {
    /// Create a mapper for a fixed orientation
    pub const fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    /// The orientation this mapper was built for
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Logical coordinate that selects the hardware column
    pub const fn column_axis(&self, x: u16, y: u16) -> u16 {
        match self.orientation {
            Orientation::Portrait => x,
            Orientation::Landscape => y,
        }
    }

    /// Logical coordinate that is quantized into pages
    pub const fn page_axis(&self, x: u16, y: u16) -> u16 {
        match self.orientation {
            Orientation::Portrait => y,
            Orientation::Landscape => x,
        }
    }

    /// Expand an area to whole pages along the page axis
    ///
    /// The start is rounded down to a multiple of 8 and the inclusive end up
    /// to the last pixel of its page. The column axis is left alone. The
    /// result always contains the input and rounding twice changes nothing.
    pub fn round(&self, area: Area) -> Area {
        let mut rounded = area;
        match self.orientation {
            Orientation::Portrait => {
                rounded.y1 = area.y1 & !PAGE_MASK;
                rounded.y2 = area.y2 | PAGE_MASK;
            }
            Orientation::Landscape => {
                rounded.x1 = area.x1 & !PAGE_MASK;
                rounded.x2 = area.x2 | PAGE_MASK;
            }
        }
        rounded
    }

    /// Whether the page-axis bounds of `area` already sit on page boundaries
    pub fn is_page_aligned(&self, area: &Area) -> bool {
        let (start, end) = match self.orientation {
            Orientation::Portrait => (area.y1, area.y2),
            Orientation::Landscape => (area.x1, area.x2),
        };
        start & PAGE_MASK == 0 && end & PAGE_MASK == PAGE_MASK
    }

    /// Bitplane address of the pixel at logical `(x, y)`
    ///
    /// The index is not checked against the buffer; the bitplane refuses
    /// anything out of range.
    pub const fn locate(&self, x: u16, y: u16) -> PixelAddress {
        let column = self.column_axis(x, y) as usize;
        let page_coord = self.page_axis(x, y);
        PixelAddress {
            index: column + COLUMNS * page_of(page_coord) as usize,
            bit: bit_of(page_coord),
        }
    }

    /// First and last page (inclusive) covered by `area`
    pub fn page_span(&self, area: &Area) -> (u16, u16) {
        match self.orientation {
            Orientation::Portrait => (page_of(area.y1), page_of(area.y2)),
            Orientation::Landscape => (page_of(area.x1), page_of(area.x2)),
        }
    }

    /// First and last column (inclusive) covered by `area`
    pub fn column_span(&self, area: &Area) -> (u16, u16) {
        match self.orientation {
            Orientation::Portrait => (area.x1, area.x2),
            Orientation::Landscape => (area.y1, area.y2),
        }
    }

    /// Byte offset of `column` in `page` within a page-strided buffer
    pub const fn page_offset(page: u16, column: u16) -> usize {
        column as usize + COLUMNS * page as usize
    }
}
