//! Boundary conversions over [`rgb`] crate pixel types via bytemuck.
//!
//! Same semantics as the byte-level functions at the crate root: import
//! premultiplies straight pixels into ARGB32 words, export unpremultiplies
//! them again, and the `_linear` variants add the sRGB gamma tables.
//!
//! ```rust
//! use rgb::Rgba;
//! use gauze::typed_rgb;
//!
//! let straight = vec![Rgba::new(255u8, 0, 0, 128); 4];
//! let mut words = vec![0u32; 4];
//! typed_rgb::import_rgba(&straight, &mut words).unwrap();
//! assert_eq!(words[0], 0x8080_0000);
//!
//! let mut back = vec![Rgba::default(); 4];
//! typed_rgb::export_rgba(&words, &mut back).unwrap();
//! assert_eq!(back, straight);
//! ```

use crate::SizeError;
use crate::pixel::{pack, premultiply, unpack, unpremultiply};
use rgb::{Bgra, Rgba};

// ---------------------------------------------------------------------------
// Single pixels
// ---------------------------------------------------------------------------

/// Premultiply one straight [`Rgba<u8>`] into an ARGB32 word.
pub fn premultiply_rgba(px: Rgba<u8>) -> u32 {
    premultiply(pack(px.r as u32, px.g as u32, px.b as u32, px.a as u32))
}

/// Unpremultiply one ARGB32 word into a straight [`Rgba<u8>`].
pub fn unpremultiply_rgba(px: u32) -> Rgba<u8> {
    let (r, g, b, a) = unpack(unpremultiply(px));
    Rgba::new(r as u8, g as u8, b as u8, a as u8)
}

// ---------------------------------------------------------------------------
// Import (straight → premultiplied ARGB32)
// ---------------------------------------------------------------------------

/// Premultiply `&[Rgba<u8>]` into ARGB32 words.
pub fn import_rgba(src: &[Rgba<u8>], dst: &mut [u32]) -> Result<(), SizeError> {
    crate::import_rgba8(bytemuck::cast_slice(src), dst)
}

/// Premultiply `&[Bgra<u8>]` into ARGB32 words.
pub fn import_bgra(src: &[Bgra<u8>], dst: &mut [u32]) -> Result<(), SizeError> {
    crate::import_bgra8(bytemuck::cast_slice(src), dst)
}

/// Linearize and premultiply sRGB `&[Rgba<u8>]` into ARGB32 words.
pub fn import_rgba_linear(src: &[Rgba<u8>], dst: &mut [u32]) -> Result<(), SizeError> {
    crate::import_rgba8_linear(bytemuck::cast_slice(src), dst)
}

/// Linearize and premultiply sRGB `&[Bgra<u8>]` into ARGB32 words.
pub fn import_bgra_linear(src: &[Bgra<u8>], dst: &mut [u32]) -> Result<(), SizeError> {
    crate::import_bgra8_linear(bytemuck::cast_slice(src), dst)
}

// ---------------------------------------------------------------------------
// Export (premultiplied ARGB32 → straight)
// ---------------------------------------------------------------------------

/// Unpremultiply ARGB32 words into `&mut [Rgba<u8>]`.
pub fn export_rgba(src: &[u32], dst: &mut [Rgba<u8>]) -> Result<(), SizeError> {
    crate::export_rgba8(src, bytemuck::cast_slice_mut(dst))
}

/// Unpremultiply ARGB32 words into `&mut [Bgra<u8>]`.
pub fn export_bgra(src: &[u32], dst: &mut [Bgra<u8>]) -> Result<(), SizeError> {
    crate::export_bgra8(src, bytemuck::cast_slice_mut(dst))
}

/// Unpremultiply and sRGB-encode linear ARGB32 words into `&mut [Rgba<u8>]`.
pub fn export_rgba_linear(src: &[u32], dst: &mut [Rgba<u8>]) -> Result<(), SizeError> {
    crate::export_rgba8_linear(src, bytemuck::cast_slice_mut(dst))
}

/// Unpremultiply and sRGB-encode linear ARGB32 words into `&mut [Bgra<u8>]`.
pub fn export_bgra_linear(src: &[u32], dst: &mut [Bgra<u8>]) -> Result<(), SizeError> {
    crate::export_bgra8_linear(src, bytemuck::cast_slice_mut(dst))
}
