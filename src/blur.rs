//! Approximate Gaussian blur: three box-blur passes, each horizontal then
//! vertical, using a stack ring buffer of at most [`MAX_KERNEL_SIZE`] pixels.
//!
//! Pixels beyond the surface edge count as transparent black while the
//! divisor stays the full kernel size, so blurred edges fade out.

use crate::rows::{self, MAX_KERNEL};
use crate::surface::{Surface, SurfaceMut, overlap};

/// Largest box kernel, per axis. Larger requests are clamped to this.
pub const MAX_KERNEL_SIZE: usize = MAX_KERNEL;

// 3 * sqrt(2 * pi) / 4
const BOX_FACTOR: f32 = 1.879_971_2;

/// Box-kernel width for a standard deviation: `floor(sigma * 1.88 + 0.5)`.
///
/// Not clamped; zero or negative means that axis is not blurred.
pub fn kernel_size(sigma: f32) -> i32 {
    libm::floorf(sigma * BOX_FACTOR + 0.5) as i32
}

fn clamp_kernel(size: i32, axis: &'static str) -> usize {
    if size <= 0 {
        return 0;
    }
    let size = size as usize;
    if size > MAX_KERNEL_SIZE {
        debug_event!("blur kernel clamped", requested = size, max = MAX_KERNEL_SIZE, axis = axis);
        return MAX_KERNEL_SIZE;
    }
    size
}

fn blur_region(
    buf: &mut [u32],
    w: usize,
    h: usize,
    stride: usize,
    sigma_x: f32,
    sigma_y: f32,
) {
    let kw = clamp_kernel(kernel_size(sigma_x), "x");
    let kh = clamp_kernel(kernel_size(sigma_y), "y");
    if kw == 0 && kh == 0 {
        return;
    }
    rows::box_blur(buf, w, h, stride, kw, kh);
}

/// Blur `src` into `dst` with standard deviations `sigma_x` and `sigma_y`.
///
/// The overlap region is copied into `dst` and blurred there, so the result
/// is identical to [`gaussian_blur_inplace`] on a copy. With both kernels
/// empty this is an exact copy.
pub fn gaussian_blur(src: Surface<'_>, dst: &mut SurfaceMut<'_>, sigma_x: f32, sigma_y: f32) {
    let (w, h) = overlap(src.dims(), dst.dims());
    trace_op!("gaussian_blur", w, h);
    let (ss, ds) = (src.stride_usize(), dst.stride_usize());
    let buf = dst.pixels_mut();
    rows::copy(src.pixels(), buf, w, h, ss, ds);
    blur_region(buf, w, h, ds, sigma_x, sigma_y);
}

/// Blur `surface` in place.
pub fn gaussian_blur_inplace(surface: &mut SurfaceMut<'_>, sigma_x: f32, sigma_y: f32) {
    let (w, h) = (surface.width() as usize, surface.height() as usize);
    trace_op!("gaussian_blur", w, h);
    let stride = surface.stride_usize();
    blur_region(surface.pixels_mut(), w, h, stride, sigma_x, sigma_y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::alpha;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn kernel_sizes() {
        assert_eq!(kernel_size(0.0), 0);
        assert_eq!(kernel_size(0.2), 0);
        assert_eq!(kernel_size(1.0), 2);
        assert_eq!(kernel_size(2.0), 4);
        assert_eq!(kernel_size(10.0), 19);
        assert!(kernel_size(-3.0) < 0);
    }

    #[test]
    fn huge_sigma_is_clamped() {
        assert_eq!(clamp_kernel(kernel_size(1.0e6), "x"), MAX_KERNEL_SIZE);
        assert_eq!(clamp_kernel(-5, "x"), 0);
    }

    #[test]
    fn zero_sigma_copies_overlap() {
        let src: Vec<u32> = (0..20u32).map(|i| 0xFF00_0000 | i).collect();
        let mut dst = vec![7u32; 12];
        gaussian_blur(Surface::new(&src, 5, 4, 5), &mut SurfaceMut::new(&mut dst, 3, 3, 4), 0.0, 0.0);
        let expected = [
            src[0], src[1], src[2], 7, //
            src[5], src[6], src[7], 7, //
            src[10], src[11], src[12], 7,
        ];
        assert_eq!(dst, expected);
    }

    #[test]
    fn uniform_field_is_preserved_away_from_edges() {
        let px = 0xC060_3010;
        let (w, h) = (40usize, 30usize);
        let mut buf = vec![px; w * h];
        let sigma = 1.5;
        gaussian_blur_inplace(&mut SurfaceMut::new(&mut buf, w as u16, h as u16, w as u32), sigma, sigma);
        let margin = 3 * (kernel_size(sigma) as usize / 2) + 3;
        for y in margin..h - margin {
            for x in margin..w - margin {
                assert_eq!(buf[y * w + x], px, "({x},{y})");
            }
        }
    }

    #[test]
    fn edges_fade_toward_transparent() {
        let (w, h) = (32usize, 8usize);
        let mut buf = vec![0xFFFF_FFFFu32; w * h];
        gaussian_blur_inplace(&mut SurfaceMut::new(&mut buf, w as u16, h as u16, w as u32), 3.0, 0.0);
        let row = &buf[..w];
        assert!(alpha(row[0]) < 255);
        assert!(alpha(row[w - 1]) < 255);
        assert_eq!(row[w / 2], 0xFFFF_FFFF);
        // Vertical kernel is empty, so all rows match.
        for y in 1..h {
            assert_eq!(&buf[y * w..][..w], row);
        }
    }

    #[test]
    fn copy_and_inplace_forms_match() {
        let (w, h) = (23usize, 17usize);
        let src: Vec<u32> = (0..w * h)
            .map(|i| {
                let a = (i * 37 % 256) as u32;
                let c = (i * 11 % 256) as u32 * a / 255;
                (a << 24) | (c << 16) | ((a / 2) << 8) | (c / 3)
            })
            .collect();
        let mut copied = vec![0u32; w * h];
        gaussian_blur(
            Surface::new(&src, w as u16, h as u16, w as u32),
            &mut SurfaceMut::new(&mut copied, w as u16, h as u16, w as u32),
            2.5,
            1.0,
        );
        let mut inplace = src.clone();
        gaussian_blur_inplace(&mut SurfaceMut::new(&mut inplace, w as u16, h as u16, w as u32), 2.5, 1.0);
        assert_eq!(copied, inplace);
        assert_ne!(copied, src);
    }

    #[test]
    fn kernel_larger_than_surface_is_clipped() {
        let mut buf = vec![0xFF80_8080u32; 3 * 2];
        gaussian_blur_inplace(&mut SurfaceMut::new(&mut buf, 3, 2, 3), 50.0, 50.0);
        // Fades but never panics or produces channels above alpha.
        for px in buf {
            let a = alpha(px);
            assert!((px >> 16) & 0xFF <= a);
        }
    }

    #[test]
    fn empty_surfaces_are_fine() {
        let mut buf: [u32; 0] = [];
        gaussian_blur_inplace(&mut SurfaceMut::new(&mut buf, 0, 0, 0), 4.0, 4.0);
        let mut buf = [1u32; 4];
        gaussian_blur(Surface::new(&[], 0, 0, 0), &mut SurfaceMut::new(&mut buf, 2, 2, 2), 4.0, 4.0);
        assert_eq!(buf, [1; 4]);
    }
}
