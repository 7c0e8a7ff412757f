//! # gauze
//!
//! *Put something over your pixels.*
//!
//! Allocation-free pixel filters over premultiplied ARGB32 buffers you already
//! own: 4×5 color matrices and their CSS-style presets, sRGB↔linear gamma
//! tables, twelve separable blend modes, the Porter–Duff operators plus an
//! arithmetic combiner, and a three-pass box approximation of a Gaussian blur.
//!
//! Hot loops are dispatched once per call to the best available CPU tier
//! (AVX2 on x86-64, scalar elsewhere). Every tier produces bit-identical
//! output.
//!
//! ## Pixels
//!
//! A pixel is a `u32` with alpha in bits 24–31, red 16–23, green 8–15 and
//! blue 0–7. Red, green and blue are premultiplied by alpha. Channels are
//! always extracted with shifts, so the layout does not depend on host
//! endianness. See [`pixel`] for the packing and premultiplication helpers.
//!
//! ## Surfaces
//!
//! [`Surface`] and [`SurfaceMut`] are cheap views over a caller-owned `[u32]`
//! with a width, height and stride. Nothing in the crate allocates, owns or
//! frees pixel memory.
//!
//! ```rust
//! use gauze::{Surface, SurfaceMut, BlendMode};
//!
//! let src = vec![0x8040_2010u32; 16 * 16];
//! let mut backdrop = vec![0xFF00_00FFu32; 16 * 16];
//!
//! let src = Surface::new(&src, 16, 16, 16);
//! let mut backdrop = SurfaceMut::new(&mut backdrop, 16, 16, 16);
//! gauze::blend_onto(src, &mut backdrop, BlendMode::Multiply);
//! gauze::gaussian_blur_inplace(&mut backdrop, 2.0, 2.0);
//! ```
//!
//! ## Geometry never fails
//!
//! Filters never return errors and never panic on geometry. When surfaces of
//! different sizes take part in one call, only the overlapping top-left region
//! is processed and output pixels outside it are left untouched.
//!
//! ## In-place operation
//!
//! Each filter has a copy form writing into a separate [`SurfaceMut`] and an
//! in-place form (`*_inplace`, and `*_onto` for two-input filters writing over
//! the backdrop). Partially overlapping views of one buffer cannot be built
//! in safe Rust, so the "identical or disjoint" aliasing rule is enforced by
//! the borrow checker.
//!
//! ## Feature flags
//!
//! - **`rgb`** — typed boundary conversions over [`rgb`] crate pixels
//!   (`Rgba<u8>`, `Bgra<u8>`) via bytemuck.
//! - **`imgref`** — whole-image boundary conversions and surface views over
//!   [`imgref`] types. Implies `rgb`.
//! - **`tracing`** — emit `tracing` events at every filter entry point.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[macro_use]
mod trace;

pub mod pixel;

mod blend;
mod blur;
mod color;
mod composite;
mod convert;
mod rows;
mod surface;

pub use blend::*;
pub use blur::*;
pub use color::*;
pub use composite::*;
pub use convert::*;
pub use surface::*;

#[cfg(feature = "rgb")]
pub mod typed_rgb;

#[cfg(feature = "imgref")]
pub mod imgref;

use core::fmt;

/// Buffer geometry rejected by a validating constructor or a boundary
/// conversion.
///
/// Filters themselves never produce this error; they clip instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeError {
    /// A byte buffer is empty or its length is not a multiple of the pixel size.
    NotPixelAligned,
    /// The destination holds fewer pixels than the source.
    PixelCountMismatch,
    /// Width, height and stride do not describe a region inside the buffer.
    InvalidStride,
}

impl fmt::Display for SizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPixelAligned => f.write_str("buffer length is not a whole number of pixels"),
            Self::PixelCountMismatch => f.write_str("destination holds fewer pixels than the source"),
            Self::InvalidStride => f.write_str("stride, width and height do not fit the buffer"),
        }
    }
}

impl core::error::Error for SizeError {}

/// A blend mode or composite operator name that is not recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownNameError;

impl fmt::Display for UnknownNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown mode name")
    }
}

impl core::error::Error for UnknownNameError {}
