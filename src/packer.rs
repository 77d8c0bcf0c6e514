//! Single pixel writes into the bitplane

use log::warn;

use crate::bitplane::BitplaneBuffer;
use crate::mapper::CoordinateMapper;

/// Set (`on`) or clear one pixel at logical `(x, y)`
///
/// Mutates exactly one byte. A coordinate that maps outside the buffer is
/// logged and dropped; returns `false` in that case.
pub fn set_pixel<B>(
    buffer: &mut BitplaneBuffer<B>,
    mapper: &CoordinateMapper,
    x: u16,
    y: u16,
    on: bool,
) -> bool
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let address = mapper.locate(x, y);
    if buffer.set_bit(address.index, address.bit, on) {
        return true;
    }
    warn!(
        "pixel ({}, {}) maps to byte {} outside the {} byte bitplane",
        x,
        y,
        address.index,
        buffer.len()
    );
    false
}

/// Read back one pixel at logical `(x, y)`
pub fn pixel<B>(
    buffer: &BitplaneBuffer<B>,
    mapper: &CoordinateMapper,
    x: u16,
    y: u16,
) -> Option<bool>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let address = mapper.locate(x, y);
    buffer.bit(address.index, address.bit)
}
