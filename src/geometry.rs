//! Fixed controller geometry and the redraw [`Area`]
//!
//! The SH1107 on a 64x128 panel is addressed as 16 pages of 64 columns. Each
//! page is a band of 8 pixels along the page axis, packed into one byte per
//! column, so the whole screen fits in a 1024 byte bitplane.

/// Number of addressable columns per page
pub const COLUMNS: usize = 64;

/// Number of hardware pages
pub const PAGES: usize = 16;

/// Segment width of one page on the controller side
pub const SEGMENTS: usize = 128;

/// Pixels per page along the page axis (one byte)
pub const PAGE_HEIGHT: u16 = 8;

/// Size of the bitplane buffer in bytes
pub const BUFFER_SIZE: usize = COLUMNS * PAGES;

/// Length of the page addressing prologue in bytes
pub const PAGE_COMMAND_LEN: usize = 3;

/// Short side of the panel in pixels
pub const PANEL_SHORT_SIDE: u16 = COLUMNS as u16;

/// Long side of the panel in pixels
pub const PANEL_LONG_SIDE: u16 = SEGMENTS as u16;

/// Inclusive rectangle in logical display coordinates
///
/// Both corners are part of the area, so `Area::new(0, 0, 0, 0)` covers a
/// single pixel. Corners are normalized on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Area {
    /// Left edge
    pub x1: u16,
    /// Top edge
    pub y1: u16,
    /// Right edge (inclusive)
    pub x2: u16,
    /// Bottom edge (inclusive)
    pub y2: u16,
}

impl Area {
    /// Create a new area, swapping corners if they are given out of order
    #[allow(clippy::many_single_char_names)]
    pub fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Area covering a full `width` x `height` screen
    pub fn full(width: u16, height: u16) -> Self {
        Self::new(
            0,
            0,
            width.saturating_sub(1),
            height.saturating_sub(1),
        )
    }

    /// Same area with corners in order
    ///
    /// Fields are public, so a literal may carry reversed corners.
    pub fn normalized(&self) -> Area {
        Self::new(self.x1, self.y1, self.x2, self.y2)
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        u32::from(self.x1.abs_diff(self.x2)) + 1
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        u32::from(self.y1.abs_diff(self.y2)) + 1
    }

    /// Whether the point lies inside the area
    pub fn contains(&self, x: u16, y: u16) -> bool {
        (self.x1..=self.x2).contains(&x) && (self.y1..=self.y2).contains(&y)
    }

    /// Whether `other` lies entirely inside this area
    pub fn contains_area(&self, other: &Area) -> bool {
        self.contains(other.x1, other.y1) && self.contains(other.x2, other.y2)
    }

    /// Smallest area covering both `self` and `other`
    pub fn union(&self, other: &Area) -> Area {
        Area {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Clamp the area to a `width` x `height` screen
    ///
    /// Corners are put in order first. Returns `None` when the area lies
    /// completely off screen.
    pub fn clamp(&self, width: u16, height: u16) -> Option<Area> {
        let area = self.normalized();
        if width == 0 || height == 0 || area.x1 >= width || area.y1 >= height {
            return None;
        }
        Some(Area {
            x1: area.x1,
            y1: area.y1,
            x2: area.x2.min(width - 1),
            y2: area.y2.min(height - 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_geometry() {
        assert_eq!(BUFFER_SIZE, 1024);
        assert_eq!(PANEL_SHORT_SIDE, 64);
        assert_eq!(PANEL_LONG_SIDE, 128);
        assert_eq!(PAGES as u16 * PAGE_HEIGHT, PANEL_LONG_SIDE);
    }

    #[test]
    fn test_new_normalizes_corners() {
        let area = Area::new(10, 20, 2, 5);
        assert_eq!(area, Area { x1: 2, y1: 5, x2: 10, y2: 20 });
        assert_eq!(area.width(), 9);
        assert_eq!(area.height(), 16);
    }

    #[test]
    fn test_single_pixel_area() {
        let area = Area::new(3, 3, 3, 3);
        assert_eq!(area.width(), 1);
        assert_eq!(area.height(), 1);
        assert!(area.contains(3, 3));
        assert!(!area.contains(4, 3));
    }

    #[test]
    fn test_union_and_contains_area() {
        let a = Area::new(0, 0, 4, 4);
        let b = Area::new(10, 2, 12, 20);
        let u = a.union(&b);
        assert_eq!(u, Area::new(0, 0, 12, 20));
        assert!(u.contains_area(&a));
        assert!(u.contains_area(&b));
    }

    #[test]
    fn test_clamp() {
        let area = Area::new(60, 120, 70, 140);
        assert_eq!(area.clamp(64, 128), Some(Area::new(60, 120, 63, 127)));
        assert_eq!(Area::new(64, 0, 70, 4).clamp(64, 128), None);
        assert_eq!(Area::full(64, 128), Area::new(0, 0, 63, 127));
    }

    #[test]
    fn test_reversed_literal() {
        let area = Area {
            x1: 5,
            y1: 7,
            x2: 2,
            y2: 0,
        };
        assert_eq!(area.width(), 4);
        assert_eq!(area.height(), 8);
        assert_eq!(area.normalized(), Area::new(2, 0, 5, 7));
        assert_eq!(area.clamp(64, 128), Some(Area::new(2, 0, 5, 7)));
    }
}
