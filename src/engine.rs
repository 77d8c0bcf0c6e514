//! Rendering engine contract
//!
//! The driver registers itself with a rendering engine once initialization
//! succeeds, and tells it when each flush has finished so the engine can
//! reuse its draw buffer. Everything else runs the other way: the engine
//! holds a `&mut DisplayDriver` and calls
//! [`round_area`](crate::display::DisplayDriver::round_area),
//! [`set_pixel`](crate::display::DisplayDriver::set_pixel) and
//! [`flush`](crate::display::DisplayDriver::flush) on it.

use crate::config::{Dimensions, Orientation};

/// What the driver tells the engine when it registers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registration {
    /// Logical resolution
    pub dimensions: Dimensions,
    /// Orientation derived from the resolution
    pub orientation: Orientation,
    /// Bytes in the packed bitplane
    pub buffer_len: usize,
}

/// Engine side of the driver/engine handshake
pub trait RenderEngine {
    /// Accept or refuse the driver
    ///
    /// Returning `false` fails initialization.
    fn register(&mut self, registration: Registration) -> bool;

    /// A flush has finished, successfully or not
    fn flush_ready(&mut self);
}

/// Engine that accepts every registration and ignores completions
///
/// For callers that draw straight through the driver.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEngine;

impl RenderEngine for NullEngine {
    fn register(&mut self, _registration: Registration) -> bool {
        true
    }

    fn flush_ready(&mut self) {}
}

impl<E: RenderEngine + ?Sized> RenderEngine for &mut E {
    fn register(&mut self, registration: Registration) -> bool {
        (**self).register(registration)
    }

    fn flush_ready(&mut self) {
        (**self).flush_ready();
    }
}
