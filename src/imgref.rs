//! Whole-image boundary conversions and surface views over [`imgref`] types.
//!
//! An `ImgRef<u32>` / `ImgRefMut<u32>` of premultiplied ARGB32 words maps
//! directly onto a [`Surface`] / [`SurfaceMut`]. Conversions to and from
//! straight `rgb` pixels respect both images' strides.
//!
//! ```rust
//! use rgb::Rgba;
//! use ::imgref::ImgVec;
//! use gauze::imgref;
//!
//! let decoded = ImgVec::new(vec![Rgba::new(255u8, 128, 0, 255); 16], 4, 4);
//! let mut words = imgref::premultiplied_from_rgba(decoded.as_ref());
//! gauze::invert_inplace(&mut imgref::surface_mut(words.as_mut()), 1.0);
//! let out = imgref::rgba_from_premultiplied(words.as_ref());
//! assert_eq!(out.buf()[0], Rgba::new(0, 127, 255, 255));
//! ```

use alloc::vec;

use imgref::{ImgRef, ImgRefMut, ImgVec};
use rgb::{Bgra, Rgba};

use crate::SizeError;
use crate::surface::{Surface, SurfaceMut};
use crate::typed_rgb;

// ---------------------------------------------------------------------------
// Surface views
// ---------------------------------------------------------------------------

fn dims(width: usize, height: usize, stride: usize) -> (u16, u16, u32) {
    (
        width.min(u16::MAX as usize) as u16,
        height.min(u16::MAX as usize) as u16,
        stride.min(u32::MAX as usize) as u32,
    )
}

/// A read-only [`Surface`] over an image of ARGB32 words.
///
/// Dimensions beyond `u16::MAX` are clipped.
pub fn surface(img: ImgRef<'_, u32>) -> Surface<'_> {
    let (w, h, stride) = dims(img.width(), img.height(), img.stride());
    Surface::new(img.into_buf(), w, h, stride)
}

/// A writable [`SurfaceMut`] over an image of ARGB32 words.
pub fn surface_mut(img: ImgRefMut<'_, u32>) -> SurfaceMut<'_> {
    let (w, h, stride) = dims(img.width(), img.height(), img.stride());
    SurfaceMut::new(img.into_buf(), w, h, stride)
}

// ---------------------------------------------------------------------------
// Dimension check
// ---------------------------------------------------------------------------

fn check_dims(sw: usize, sh: usize, dw: usize, dh: usize) -> Result<(), SizeError> {
    if sw != dw || sh != dh {
        Err(SizeError::PixelCountMismatch)
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Copy conversions (caller provides destination)
// ---------------------------------------------------------------------------

macro_rules! import_image {
    ($(#[$doc:meta])* $name:ident, $px:ty, $row:path) => {
        $(#[$doc])*
        pub fn $name(src: ImgRef<'_, $px>, mut dst: ImgRefMut<'_, u32>) -> Result<(), SizeError> {
            check_dims(src.width(), src.height(), dst.width(), dst.height())?;
            if src.width() == 0 || src.height() == 0 {
                return Ok(());
            }
            for (src_row, dst_row) in src.rows().zip(dst.rows_mut()) {
                $row(src_row, dst_row)?;
            }
            Ok(())
        }
    };
}

macro_rules! export_image {
    ($(#[$doc:meta])* $name:ident, $px:ty, $row:path) => {
        $(#[$doc])*
        pub fn $name(src: ImgRef<'_, u32>, mut dst: ImgRefMut<'_, $px>) -> Result<(), SizeError> {
            check_dims(src.width(), src.height(), dst.width(), dst.height())?;
            if src.width() == 0 || src.height() == 0 {
                return Ok(());
            }
            for (src_row, dst_row) in src.rows().zip(dst.rows_mut()) {
                $row(src_row, dst_row)?;
            }
            Ok(())
        }
    };
}

import_image!(
    /// Premultiply an `ImgRef<Rgba<u8>>` into an image of ARGB32 words.
    import_rgba, Rgba<u8>, typed_rgb::import_rgba
);
import_image!(
    /// Premultiply an `ImgRef<Bgra<u8>>` into an image of ARGB32 words.
    import_bgra, Bgra<u8>, typed_rgb::import_bgra
);
import_image!(
    /// Linearize and premultiply an sRGB `ImgRef<Rgba<u8>>`.
    import_rgba_linear, Rgba<u8>, typed_rgb::import_rgba_linear
);
import_image!(
    /// Linearize and premultiply an sRGB `ImgRef<Bgra<u8>>`.
    import_bgra_linear, Bgra<u8>, typed_rgb::import_bgra_linear
);
export_image!(
    /// Unpremultiply an image of ARGB32 words into `ImgRefMut<Rgba<u8>>`.
    export_rgba, Rgba<u8>, typed_rgb::export_rgba
);
export_image!(
    /// Unpremultiply an image of ARGB32 words into `ImgRefMut<Bgra<u8>>`.
    export_bgra, Bgra<u8>, typed_rgb::export_bgra
);
export_image!(
    /// Unpremultiply and sRGB-encode linear ARGB32 words into `ImgRefMut<Rgba<u8>>`.
    export_rgba_linear, Rgba<u8>, typed_rgb::export_rgba_linear
);
export_image!(
    /// Unpremultiply and sRGB-encode linear ARGB32 words into `ImgRefMut<Bgra<u8>>`.
    export_bgra_linear, Bgra<u8>, typed_rgb::export_bgra_linear
);

// ---------------------------------------------------------------------------
// Allocating conversions
// ---------------------------------------------------------------------------

/// A new tightly packed image of premultiplied ARGB32 words.
pub fn premultiplied_from_rgba(src: ImgRef<'_, Rgba<u8>>) -> ImgVec<u32> {
    let (w, h) = (src.width(), src.height());
    let mut out = ImgVec::new(vec![0u32; w * h], w, h);
    for (src_row, dst_row) in src.rows().zip(out.rows_mut()) {
        for (s, d) in src_row.iter().zip(dst_row) {
            *d = typed_rgb::premultiply_rgba(*s);
        }
    }
    out
}

/// A new tightly packed straight-alpha image.
pub fn rgba_from_premultiplied(src: ImgRef<'_, u32>) -> ImgVec<Rgba<u8>> {
    let (w, h) = (src.width(), src.height());
    let mut out = ImgVec::new(vec![Rgba::default(); w * h], w, h);
    for (src_row, dst_row) in src.rows().zip(out.rows_mut()) {
        for (s, d) in src_row.iter().zip(dst_row) {
            *d = typed_rgb::unpremultiply_rgba(*s);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_surface_views_keep_stride() {
        let buf: Vec<u32> = (0..12).collect();
        let img = ImgRef::new_stride(&buf, 3, 3, 4);
        let s = surface(img);
        assert_eq!((s.width(), s.height(), s.stride()), (3, 3, 4));
        assert_eq!(s.get(2, 1), Some(6));

        let mut buf = vec![0u32; 12];
        let img = ImgRefMut::new_stride(&mut buf, 3, 3, 4);
        surface_mut(img).fill(9);
        assert_eq!(&buf[..4], &[9, 9, 9, 0]);
        assert_eq!(buf[11], 0);
    }

    #[test]
    fn test_strided_import_export() {
        let src_buf = vec![Rgba::new(255u8, 0, 0, 128); 6];
        let src = ImgRef::new_stride(&src_buf, 2, 2, 3);
        let mut words = vec![7u32; 6];
        import_rgba(src, ImgRefMut::new_stride(&mut words, 2, 2, 3)).unwrap();
        assert_eq!(words, [0x8080_0000, 0x8080_0000, 7, 0x8080_0000, 0x8080_0000, 7]);

        let mut out_buf = vec![Bgra::default(); 4];
        export_bgra(
            ImgRef::new_stride(&words, 2, 2, 3),
            ImgRefMut::new(&mut out_buf, 2, 2),
        )
        .unwrap();
        assert!(out_buf.iter().all(|p| (p.r, p.g, p.b, p.a) == (255, 0, 0, 128)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let src_buf = vec![Rgba::new(0u8, 0, 0, 0); 4];
        let mut words = vec![0u32; 6];
        assert_eq!(
            import_rgba(ImgRef::new(&src_buf, 2, 2), ImgRefMut::new(&mut words, 3, 2)),
            Err(SizeError::PixelCountMismatch)
        );
    }

    #[test]
    fn test_allocating_roundtrip() {
        let src = ImgVec::new(vec![Rgba::new(10u8, 20, 30, 255); 6], 3, 2);
        let words = premultiplied_from_rgba(src.as_ref());
        assert_eq!((words.width(), words.height()), (3, 2));
        assert_eq!(words.buf()[0], 0xFF0A_141E);
        let back = rgba_from_premultiplied(words.as_ref());
        assert_eq!(back.buf(), src.buf());
    }
}
