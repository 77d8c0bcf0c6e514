//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and driver operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Failures inside initialization and maintenance commands
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level bus and GPIO errors
//!
//! The public [`DisplayDriver`](crate::display::DisplayDriver) operations
//! report success as `bool` (or a [`FlushOutcome`](crate::sequencer::FlushOutcome))
//! and log the [`Error`];
//! [`DisplayDriver::try_initialize`](crate::display::DisplayDriver::try_initialize)
//! hands it out directly.
//!
//! ## Example
//!
//! ```
//! use sh1107::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Not a 64x128 panel
//! let result = Dimensions::new(128, 128);
//! assert!(result.is_err());
//! ```

use crate::display::DriverState;
use crate::interface::DisplayInterface;

/// Errors that can occur when driving the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (bus or GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Bitplane storage cannot hold a full frame
    ///
    /// The storage must be at least [`BUFFER_SIZE`](crate::geometry::BUFFER_SIZE) bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// The rendering engine refused the driver registration
    RegistrationRejected,
    /// Operation needs a driver in the `Ready` state
    NotReady(DriverState),
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::RegistrationRejected => write!(f, "Rendering engine rejected the driver"),
            Self::NotReady(state) => write!(f, "Driver not ready (state: {state:?})"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the driver is created.
#[derive(Debug)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called
    /// before building.
    MissingDimensions,
    /// Resolution is not one of the two panel orientations
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width requested
        width: u16,
        /// Height requested
        height: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (expected 64x128 or 128x64)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
