//! Conversions between straight-alpha 8-bit byte layouts and the
//! premultiplied ARGB32 words every filter works on.
//!
//! Decoders usually hand out straight RGBA (or BGRA) bytes, and encoders want
//! them back. Import premultiplies; export unpremultiplies. The `_linear`
//! variants also decode sRGB to linear light on import and encode it again on
//! export, using [`SRGB_TO_LINEAR`] and [`LINEAR_TO_SRGB`], so filters can run
//! in linear space.
//!
//! ```rust
//! let bytes = [255u8, 0, 0, 128, 0, 0, 255, 255];
//! let mut words = [0u32; 2];
//! gauze::import_rgba8(&bytes, &mut words).unwrap();
//! assert_eq!(words, [0x8080_0000, 0xFF00_00FF]);
//!
//! let mut back = [0u8; 8];
//! gauze::export_rgba8(&words, &mut back).unwrap();
//! assert_eq!(back, [255, 0, 0, 128, 0, 0, 255, 255]);
//! ```

use crate::SizeError;
use crate::color::{LINEAR_TO_SRGB, SRGB_TO_LINEAR};
use crate::pixel::{pack, premultiply, unpack, unpremultiply};
use crate::surface::Surface;

// ===========================================================================
// Validation helpers
// ===========================================================================

#[inline]
fn check_import(src_len: usize, dst_len: usize) -> Result<(), SizeError> {
    if src_len == 0 || !src_len.is_multiple_of(4) {
        return Err(SizeError::NotPixelAligned);
    }
    if dst_len < src_len / 4 {
        return Err(SizeError::PixelCountMismatch);
    }
    Ok(())
}

#[inline]
fn check_export(src_len: usize, dst_len: usize) -> Result<(), SizeError> {
    if src_len == 0 {
        return Err(SizeError::NotPixelAligned);
    }
    if dst_len < src_len * 4 {
        return Err(SizeError::PixelCountMismatch);
    }
    Ok(())
}

/// `stride` and `len` are in units of `unit` elements per pixel (4 for bytes,
/// 1 for words).
#[inline]
fn check_strided(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    unit: usize,
) -> Result<(), SizeError> {
    if width == 0 || height == 0 {
        return Err(SizeError::InvalidStride);
    }
    let row = width.checked_mul(unit).ok_or(SizeError::InvalidStride)?;
    if row > stride {
        return Err(SizeError::InvalidStride);
    }
    let total = (height - 1)
        .checked_mul(stride)
        .ok_or(SizeError::InvalidStride)?
        .checked_add(row)
        .ok_or(SizeError::InvalidStride)?;
    if len < total {
        return Err(SizeError::InvalidStride);
    }
    Ok(())
}

// ===========================================================================
// Per-pixel codecs
// ===========================================================================

#[derive(Clone, Copy)]
enum Order {
    Rgba,
    Bgra,
}

#[derive(Clone, Copy)]
struct Codec {
    order: Order,
    gamma: Option<&'static [u8; 256]>,
}

const RGBA: Codec = Codec { order: Order::Rgba, gamma: None };
const BGRA: Codec = Codec { order: Order::Bgra, gamma: None };
const RGBA_DECODE: Codec = Codec { order: Order::Rgba, gamma: Some(&SRGB_TO_LINEAR) };
const BGRA_DECODE: Codec = Codec { order: Order::Bgra, gamma: Some(&SRGB_TO_LINEAR) };
const RGBA_ENCODE: Codec = Codec { order: Order::Rgba, gamma: Some(&LINEAR_TO_SRGB) };
const BGRA_ENCODE: Codec = Codec { order: Order::Bgra, gamma: Some(&LINEAR_TO_SRGB) };

impl Codec {
    #[inline(always)]
    fn curve(self, c: u32) -> u32 {
        match self.gamma {
            Some(table) => table[c as usize & 0xFF] as u32,
            None => c,
        }
    }

    #[inline(always)]
    fn import(self, px: [u8; 4]) -> u32 {
        let [c0, c1, c2, a] = px.map(u32::from);
        let (r, g, b) = match self.order {
            Order::Rgba => (c0, c1, c2),
            Order::Bgra => (c2, c1, c0),
        };
        premultiply(pack(self.curve(r), self.curve(g), self.curve(b), a))
    }

    #[inline(always)]
    fn export(self, px: u32) -> [u8; 4] {
        let (r, g, b, a) = unpack(unpremultiply(px));
        let (r, g, b) = (self.curve(r) as u8, self.curve(g) as u8, self.curve(b) as u8);
        match self.order {
            Order::Rgba => [r, g, b, a as u8],
            Order::Bgra => [b, g, r, a as u8],
        }
    }

    fn import_row(self, src: &[u8], dst: &mut [u32]) {
        let src: &[[u8; 4]] = bytemuck::cast_slice(src);
        for (s, d) in src.iter().zip(dst) {
            *d = self.import(*s);
        }
    }

    fn export_row(self, src: &[u32], dst: &mut [u8]) {
        let dst: &mut [[u8; 4]] = bytemuck::cast_slice_mut(dst);
        for (s, d) in src.iter().zip(dst) {
            *d = self.export(*s);
        }
    }

    fn import_contiguous(self, src: &[u8], dst: &mut [u32]) -> Result<(), SizeError> {
        check_import(src.len(), dst.len())?;
        self.import_row(src, dst);
        Ok(())
    }

    fn export_contiguous(self, src: &[u32], dst: &mut [u8]) -> Result<(), SizeError> {
        check_export(src.len(), dst.len())?;
        self.export_row(src, &mut dst[..src.len() * 4]);
        Ok(())
    }

    fn import_strided(
        self,
        src: &[u8],
        dst: &mut [u32],
        width: usize,
        height: usize,
        src_stride: usize,
        dst_stride: usize,
    ) -> Result<(), SizeError> {
        check_strided(src.len(), width, height, src_stride, 4)?;
        check_strided(dst.len(), width, height, dst_stride, 1)?;
        for y in 0..height {
            let row = &src[y * src_stride..][..width * 4];
            self.import_row(row, &mut dst[y * dst_stride..][..width]);
        }
        Ok(())
    }

    fn export_strided(
        self,
        src: &[u32],
        dst: &mut [u8],
        width: usize,
        height: usize,
        src_stride: usize,
        dst_stride: usize,
    ) -> Result<(), SizeError> {
        check_strided(src.len(), width, height, src_stride, 1)?;
        check_strided(dst.len(), width, height, dst_stride, 4)?;
        for y in 0..height {
            let row = &src[y * src_stride..][..width];
            self.export_row(row, &mut dst[y * dst_stride..][..width * 4]);
        }
        Ok(())
    }
}

// ===========================================================================
// Contiguous conversions
// ===========================================================================

/// Straight RGBA bytes → premultiplied ARGB32 words.
pub fn import_rgba8(src: &[u8], dst: &mut [u32]) -> Result<(), SizeError> {
    RGBA.import_contiguous(src, dst)
}

/// Straight BGRA bytes → premultiplied ARGB32 words.
pub fn import_bgra8(src: &[u8], dst: &mut [u32]) -> Result<(), SizeError> {
    BGRA.import_contiguous(src, dst)
}

/// Straight sRGB-encoded RGBA bytes → premultiplied linear ARGB32 words.
pub fn import_rgba8_linear(src: &[u8], dst: &mut [u32]) -> Result<(), SizeError> {
    RGBA_DECODE.import_contiguous(src, dst)
}

/// Straight sRGB-encoded BGRA bytes → premultiplied linear ARGB32 words.
pub fn import_bgra8_linear(src: &[u8], dst: &mut [u32]) -> Result<(), SizeError> {
    BGRA_DECODE.import_contiguous(src, dst)
}

/// Premultiplied ARGB32 words → straight RGBA bytes.
pub fn export_rgba8(src: &[u32], dst: &mut [u8]) -> Result<(), SizeError> {
    RGBA.export_contiguous(src, dst)
}

/// Premultiplied ARGB32 words → straight BGRA bytes.
pub fn export_bgra8(src: &[u32], dst: &mut [u8]) -> Result<(), SizeError> {
    BGRA.export_contiguous(src, dst)
}

/// Premultiplied linear ARGB32 words → straight sRGB-encoded RGBA bytes.
pub fn export_rgba8_linear(src: &[u32], dst: &mut [u8]) -> Result<(), SizeError> {
    RGBA_ENCODE.export_contiguous(src, dst)
}

/// Premultiplied linear ARGB32 words → straight sRGB-encoded BGRA bytes.
pub fn export_bgra8_linear(src: &[u32], dst: &mut [u8]) -> Result<(), SizeError> {
    BGRA_ENCODE.export_contiguous(src, dst)
}

// ===========================================================================
// Strided conversions
// ===========================================================================
//
// Byte strides are in bytes; word strides are in pixels.

/// Strided [`import_rgba8`].
pub fn import_rgba8_strided(
    src: &[u8],
    dst: &mut [u32],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    RGBA.import_strided(src, dst, width, height, src_stride, dst_stride)
}

/// Strided [`import_bgra8`].
pub fn import_bgra8_strided(
    src: &[u8],
    dst: &mut [u32],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    BGRA.import_strided(src, dst, width, height, src_stride, dst_stride)
}

/// Strided [`import_rgba8_linear`].
pub fn import_rgba8_linear_strided(
    src: &[u8],
    dst: &mut [u32],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    RGBA_DECODE.import_strided(src, dst, width, height, src_stride, dst_stride)
}

/// Strided [`import_bgra8_linear`].
pub fn import_bgra8_linear_strided(
    src: &[u8],
    dst: &mut [u32],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    BGRA_DECODE.import_strided(src, dst, width, height, src_stride, dst_stride)
}

/// Strided [`export_rgba8`].
pub fn export_rgba8_strided(
    src: &[u32],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    RGBA.export_strided(src, dst, width, height, src_stride, dst_stride)
}

/// Strided [`export_bgra8`].
pub fn export_bgra8_strided(
    src: &[u32],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    BGRA.export_strided(src, dst, width, height, src_stride, dst_stride)
}

/// Strided [`export_rgba8_linear`].
pub fn export_rgba8_linear_strided(
    src: &[u32],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    RGBA_ENCODE.export_strided(src, dst, width, height, src_stride, dst_stride)
}

/// Strided [`export_bgra8_linear`].
pub fn export_bgra8_linear_strided(
    src: &[u32],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    BGRA_ENCODE.export_strided(src, dst, width, height, src_stride, dst_stride)
}

/// True if any pixel of `surface` is not fully opaque.
pub fn has_transparency(surface: Surface<'_>) -> bool {
    surface.rows().any(|row| row.iter().any(|&px| px >> 24 != 0xFF))
}
