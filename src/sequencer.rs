//! Per-page command/data sequencing for a flush
//!
//! For every page covered by a rounded area the controller must first receive
//! a three byte [`PageAddress`] prologue, then the pixel bytes for the column
//! range. Pages go out strictly in order and one failing page does not stop
//! the rest of the flush.

use log::{debug, error};

use crate::command::{LOWER_COLUMN_ADDRESS, PAGE_ADDRESS, UPPER_COLUMN_ADDRESS};
use crate::geometry::{Area, COLUMNS, PAGE_COMMAND_LEN, PAGES};
use crate::interface::DisplayInterface;
use crate::mapper::CoordinateMapper;

/// Addressing prologue for one page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageAddress {
    /// Hardware page number
    pub page: u8,
    /// First column written in the page
    pub start_col: u8,
}

impl PageAddress {
    /// Address `start_col` within `page`
    pub const fn new(page: u8, start_col: u8) -> Self {
        Self { page, start_col }
    }

    /// Upper column nibble, lower column nibble, page
    pub const fn bytes(&self) -> [u8; PAGE_COMMAND_LEN] {
        [
            UPPER_COLUMN_ADDRESS | ((self.start_col >> 4) & 0x0F),
            LOWER_COLUMN_ADDRESS | (self.start_col & 0x0F),
            PAGE_ADDRESS | self.page,
        ]
    }
}

/// Result of one flush
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlushOutcome {
    /// Pages visited
    pub pages: u16,
    /// Pages whose commands or data did not make it to the controller
    pub failures: u16,
}

impl FlushOutcome {
    /// Every visited page went out without error
    pub fn is_complete(&self) -> bool {
        self.failures == 0
    }
}

/// Stream `area` from `colormap` to the controller, page by page
///
/// `colormap` starts at the first column of the first page and holds one
/// [`COLUMNS`] stride per page regardless of how many columns are sent. The
/// area must already be rounded to whole pages.
///
/// An area with reversed corners is refused as a single failure with no page
/// visited. Pages past the last hardware page, or columns past the last
/// column, fail without reaching the interface.
pub fn flush<I>(
    interface: &mut I,
    mapper: &CoordinateMapper,
    area: &Area,
    colormap: &[u8],
) -> FlushOutcome
where
    I: DisplayInterface,
{
    let (start_page, end_page) = mapper.page_span(area);
    let (start_col, end_col) = mapper.column_span(area);
    let (Some(_), Some(span)) = (
        end_page.checked_sub(start_page),
        end_col.checked_sub(start_col),
    ) else {
        error!("flush area {:?} has reversed corners, skipped", area);
        return FlushOutcome {
            pages: 0,
            failures: 1,
        };
    };
    let len = usize::from(span) + 1;

    let mut outcome = FlushOutcome::default();
    let mut offset = 0usize;

    for page in start_page..=end_page {
        outcome.pages += 1;
        let data = colormap.get(offset..offset + len);
        if !send_page(interface, page, (start_col, end_col), data) {
            outcome.failures += 1;
        }
        offset += COLUMNS;
    }

    debug!(
        "flushed pages {}..={} columns {}..={}: {} failed",
        start_page, end_page, start_col, end_col, outcome.failures
    );
    outcome
}

fn send_page<I>(
    interface: &mut I,
    page: u16,
    (start_col, end_col): (u16, u16),
    data: Option<&[u8]>,
) -> bool
where
    I: DisplayInterface,
{
    if usize::from(page) >= PAGES || usize::from(end_col) >= COLUMNS {
        error!(
            "page {} columns {}..={} lie outside the panel, skipped",
            page, start_col, end_col
        );
        return false;
    }
    let Some(data) = data else {
        error!("page {} lies outside the colormap, skipped", page);
        return false;
    };

    let address = PageAddress::new(page as u8, start_col as u8);
    if let Err(e) = interface.send_commands(&address.bytes()) {
        error!("failed to send page commands for page {}: {:?}", page, e);
        return false;
    }
    if let Err(e) = interface.send_data(data) {
        error!("failed to send page data for page {}: {:?}", page, e);
        return false;
    }
    true
}
