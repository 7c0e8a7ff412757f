//! Color-matrix transforms, the named presets built on them, and the two
//! sRGB gamma lookups.
//!
//! Every operation here unpremultiplies a pixel, works on straight channels,
//! then premultiplies the result again. A 4×5 [`ColorMatrix`] follows the
//! `feColorMatrix` convention: rows produce R, G, B, A from straight `0..=255`
//! channels, and the fifth column is a bias in `0..=1` that is scaled by 255.

use core::f32::consts::PI;

use crate::pixel::{
    clamp_channel_f32, pack, premultiply_channel, unpack, unpremultiply_channel,
};
use crate::rows::{self, UnaryOp};
use crate::surface::{Surface, SurfaceMut, overlap};

/// Row-major 4×5 color matrix applied to straight (unpremultiplied) RGBA.
///
/// ```
/// use gauze::ColorMatrix;
///
/// let m = ColorMatrix::grayscale(1.0);
/// // Opaque red → luminance 54 on every channel.
/// assert_eq!(m.apply(0xFFFF_0000), 0xFF36_3636);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix(pub [f32; 20]);

impl ColorMatrix {
    /// Leaves every pixel unchanged.
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// Zeroes RGB and stores luminance (0.2125 R + 0.7154 G + 0.0721 B) in alpha.
    ///
    /// These weights differ slightly from the 0.2126/0.7152/0.0722 used by
    /// [`grayscale`](Self::grayscale).
    #[rustfmt::skip]
    pub const LUMINANCE_TO_ALPHA: Self = Self([
        0.0,    0.0,    0.0,    0.0, 0.0,
        0.0,    0.0,    0.0,    0.0, 0.0,
        0.0,    0.0,    0.0,    0.0, 0.0,
        0.2125, 0.7154, 0.0721, 0.0, 0.0,
    ]);

    pub const fn new(coefficients: [f32; 20]) -> Self {
        Self(coefficients)
    }

    pub const fn as_array(&self) -> &[f32; 20] {
        &self.0
    }

    /// True when this is exactly [`ColorMatrix::IDENTITY`].
    pub fn is_identity(&self) -> bool {
        self.0 == Self::IDENTITY.0
    }

    /// Scale alpha by `amount`.
    #[rustfmt::skip]
    pub fn opacity(amount: f32) -> Self {
        Self([
            1.0, 0.0, 0.0, 0.0,    0.0,
            0.0, 1.0, 0.0, 0.0,    0.0,
            0.0, 0.0, 1.0, 0.0,    0.0,
            0.0, 0.0, 0.0, amount, 0.0,
        ])
    }

    /// Scale RGB by `amount`.
    #[rustfmt::skip]
    pub fn brightness(amount: f32) -> Self {
        Self([
            amount, 0.0,    0.0,    0.0, 0.0,
            0.0,    amount, 0.0,    0.0, 0.0,
            0.0,    0.0,    amount, 0.0, 0.0,
            0.0,    0.0,    0.0,    1.0, 0.0,
        ])
    }

    /// Interpolate RGB toward its inverse; 1 fully inverts.
    #[rustfmt::skip]
    pub fn invert(amount: f32) -> Self {
        let scale = 1.0 - 2.0 * amount;
        Self([
            scale, 0.0,   0.0,   0.0, amount,
            0.0,   scale, 0.0,   0.0, amount,
            0.0,   0.0,   scale, 0.0, amount,
            0.0,   0.0,   0.0,   1.0, 0.0,
        ])
    }

    /// Scale RGB about mid-gray.
    #[rustfmt::skip]
    pub fn contrast(amount: f32) -> Self {
        let offset = (1.0 - amount) * 0.5;
        Self([
            amount, 0.0,    0.0,    0.0, offset,
            0.0,    amount, 0.0,    0.0, offset,
            0.0,    0.0,    amount, 0.0, offset,
            0.0,    0.0,    0.0,    1.0, 0.0,
        ])
    }

    /// Luminance-preserving saturation; 0 is fully desaturated, 1 unchanged.
    #[rustfmt::skip]
    pub fn saturate(amount: f32) -> Self {
        Self([
            0.213 + 0.787 * amount, 0.715 - 0.715 * amount, 0.072 - 0.072 * amount, 0.0, 0.0,
            0.213 - 0.213 * amount, 0.715 + 0.285 * amount, 0.072 - 0.072 * amount, 0.0, 0.0,
            0.213 - 0.213 * amount, 0.715 - 0.715 * amount, 0.072 + 0.928 * amount, 0.0, 0.0,
            0.0,                    0.0,                    0.0,                    1.0, 0.0,
        ])
    }

    /// Blend toward Rec. 709 luminance; 1 is fully gray.
    #[rustfmt::skip]
    pub fn grayscale(amount: f32) -> Self {
        let inv = 1.0 - amount;
        Self([
            inv + 0.2126 * amount, 0.7152 * amount,       0.0722 * amount,       0.0, 0.0,
            0.2126 * amount,       inv + 0.7152 * amount, 0.0722 * amount,       0.0, 0.0,
            0.2126 * amount,       0.7152 * amount,       inv + 0.0722 * amount, 0.0, 0.0,
            0.0,                   0.0,                   0.0,                   1.0, 0.0,
        ])
    }

    /// Blend toward a sepia tone; 1 is full sepia.
    #[rustfmt::skip]
    pub fn sepia(amount: f32) -> Self {
        let inv = 1.0 - amount;
        Self([
            0.393 + 0.607 * inv, 0.769 - 0.769 * inv, 0.189 - 0.189 * inv, 0.0, 0.0,
            0.349 - 0.349 * inv, 0.686 + 0.314 * inv, 0.168 - 0.168 * inv, 0.0, 0.0,
            0.272 - 0.272 * inv, 0.534 - 0.534 * inv, 0.131 + 0.869 * inv, 0.0, 0.0,
            0.0,                 0.0,                 0.0,                 1.0, 0.0,
        ])
    }

    /// Rotate hue by `angle` degrees around the luminance axis.
    #[rustfmt::skip]
    pub fn hue_rotate(angle: f32) -> Self {
        let rad = angle * (PI / 180.0);
        let a1 = libm::cos(rad as f64) as f32;
        let a2 = libm::sin(rad as f64) as f32;
        Self([
            0.213 + a1 * 0.787 - a2 * 0.213, 0.715 - a1 * 0.715 - a2 * 0.715, 0.072 - a1 * 0.072 + a2 * 0.928, 0.0, 0.0,
            0.213 - a1 * 0.213 + a2 * 0.143, 0.715 + a1 * 0.285 + a2 * 0.140, 0.072 - a1 * 0.072 - a2 * 0.283, 0.0, 0.0,
            0.213 - a1 * 0.213 - a2 * 0.787, 0.715 - a1 * 0.715 + a2 * 0.715, 0.072 + a1 * 0.928 + a2 * 0.072, 0.0, 0.0,
            0.0,                             0.0,                             0.0,                             1.0, 0.0,
        ])
    }

    /// Apply the matrix to one premultiplied pixel.
    pub fn apply(&self, px: u32) -> u32 {
        transform_pixel(px, &self.0)
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 20]> for ColorMatrix {
    fn from(coefficients: [f32; 20]) -> Self {
        Self(coefficients)
    }
}

// ===========================================================================
// Per-pixel kernels
// ===========================================================================

/// Unpremultiplied channels are not clamped: an invalid premultiplied input
/// (channel > alpha) feeds the matrix values above 255.
#[inline(always)]
pub(crate) fn transform_pixel(px: u32, m: &[f32; 20]) -> u32 {
    let (r, g, b, a) = unpack(px);
    let r = unpremultiply_channel(r, a) as f32;
    let g = unpremultiply_channel(g, a) as f32;
    let b = unpremultiply_channel(b, a) as f32;
    let a = a as f32;
    let row = |i: usize| {
        clamp_channel_f32(r * m[i] + g * m[i + 1] + b * m[i + 2] + a * m[i + 3] + m[i + 4] * 255.0)
    };
    let (r, g, b, a) = (row(0), row(5), row(10), row(15));
    pack(
        premultiply_channel(r, a),
        premultiply_channel(g, a),
        premultiply_channel(b, a),
        a,
    )
}

#[inline(always)]
pub(crate) fn lookup_pixel(px: u32, table: &[u8; 256]) -> u32 {
    let (r, g, b, a) = unpack(px);
    let lut = |c: u32| table[unpremultiply_channel(c, a).min(255) as usize] as u32;
    pack(
        premultiply_channel(lut(r), a),
        premultiply_channel(lut(g), a),
        premultiply_channel(lut(b), a),
        a,
    )
}

// ===========================================================================
// Surface operations
// ===========================================================================

fn map(name: &'static str, src: Surface<'_>, dst: &mut SurfaceMut<'_>, op: UnaryOp<'_>) {
    let (w, h) = overlap(src.dims(), dst.dims());
    trace_op!(name, w, h);
    let (ss, ds) = (src.stride_usize(), dst.stride_usize());
    rows::map(src.pixels(), dst.pixels_mut(), w, h, ss, ds, op);
}

fn map_inplace(name: &'static str, surface: &mut SurfaceMut<'_>, op: UnaryOp<'_>) {
    let (w, h) = (surface.width() as usize, surface.height() as usize);
    trace_op!(name, w, h);
    let stride = surface.stride_usize();
    rows::map_inplace(surface.pixels_mut(), w, h, stride, op);
}

/// Apply `matrix` to every pixel of the overlap of `src` and `dst`.
///
/// The identity matrix copies pixels through untouched instead of taking the
/// lossy unpremultiply/premultiply round trip.
pub fn color_transform(src: Surface<'_>, dst: &mut SurfaceMut<'_>, matrix: &ColorMatrix) {
    if matrix.is_identity() {
        let (w, h) = overlap(src.dims(), dst.dims());
        trace_op!("color_transform", w, h);
        let (ss, ds) = (src.stride_usize(), dst.stride_usize());
        rows::copy(src.pixels(), dst.pixels_mut(), w, h, ss, ds);
        return;
    }
    map("color_transform", src, dst, UnaryOp::Matrix(&matrix.0));
}

/// In-place [`color_transform`].
pub fn color_transform_inplace(surface: &mut SurfaceMut<'_>, matrix: &ColorMatrix) {
    if matrix.is_identity() {
        return;
    }
    map_inplace("color_transform", surface, UnaryOp::Matrix(&matrix.0));
}

macro_rules! preset {
    ($(#[$doc:meta])* $name:ident, $inplace:ident, $param:ident) => {
        $(#[$doc])*
        pub fn $name(src: Surface<'_>, dst: &mut SurfaceMut<'_>, $param: f32) {
            color_transform(src, dst, &ColorMatrix::$name($param));
        }

        #[doc = concat!("In-place [`", stringify!($name), "`].")]
        pub fn $inplace(surface: &mut SurfaceMut<'_>, $param: f32) {
            color_transform_inplace(surface, &ColorMatrix::$name($param));
        }
    };
}

preset!(
    /// Scale alpha by `amount` (0 transparent, 1 unchanged).
    opacity, opacity_inplace, amount
);
preset!(
    /// Multiply RGB by `amount` (1 unchanged).
    brightness, brightness_inplace, amount
);
preset!(
    /// Interpolate toward the inverted color (0 unchanged, 1 inverted).
    invert, invert_inplace, amount
);
preset!(
    /// Push RGB away from (`amount` > 1) or toward (< 1) mid-gray.
    contrast, contrast_inplace, amount
);
preset!(
    /// Change saturation (0 gray, 1 unchanged, > 1 oversaturated).
    saturate, saturate_inplace, amount
);
preset!(
    /// Move toward grayscale (0 unchanged, 1 fully gray).
    grayscale, grayscale_inplace, amount
);
preset!(
    /// Move toward sepia (0 unchanged, 1 full sepia).
    sepia, sepia_inplace, amount
);
preset!(
    /// Rotate hue by `angle` degrees.
    hue_rotate, hue_rotate_inplace, angle
);

/// Replace each pixel with transparent black whose alpha is the pixel's
/// luminance. See [`ColorMatrix::LUMINANCE_TO_ALPHA`].
pub fn luminance_to_alpha(src: Surface<'_>, dst: &mut SurfaceMut<'_>) {
    map(
        "luminance_to_alpha",
        src,
        dst,
        UnaryOp::Matrix(&ColorMatrix::LUMINANCE_TO_ALPHA.0),
    );
}

/// In-place [`luminance_to_alpha`].
pub fn luminance_to_alpha_inplace(surface: &mut SurfaceMut<'_>) {
    map_inplace(
        "luminance_to_alpha",
        surface,
        UnaryOp::Matrix(&ColorMatrix::LUMINANCE_TO_ALPHA.0),
    );
}

/// Decode sRGB-encoded RGB to linear light through [`SRGB_TO_LINEAR`].
pub fn srgb_to_linear(src: Surface<'_>, dst: &mut SurfaceMut<'_>) {
    map("srgb_to_linear", src, dst, UnaryOp::Lookup(&SRGB_TO_LINEAR));
}

/// In-place [`srgb_to_linear`].
pub fn srgb_to_linear_inplace(surface: &mut SurfaceMut<'_>) {
    map_inplace("srgb_to_linear", surface, UnaryOp::Lookup(&SRGB_TO_LINEAR));
}

/// Encode linear RGB back to sRGB through [`LINEAR_TO_SRGB`].
pub fn linear_to_srgb(src: Surface<'_>, dst: &mut SurfaceMut<'_>) {
    map("linear_to_srgb", src, dst, UnaryOp::Lookup(&LINEAR_TO_SRGB));
}

/// In-place [`linear_to_srgb`].
pub fn linear_to_srgb_inplace(surface: &mut SurfaceMut<'_>) {
    map_inplace("linear_to_srgb", surface, UnaryOp::Lookup(&LINEAR_TO_SRGB));
}

// ===========================================================================
// Gamma tables
// ===========================================================================

// Quantized 8-bit transfer curves. They are not recomputed from the analytic
// sRGB formula: content is tuned against these exact values.

/// sRGB-encoded level → linear level.
#[rustfmt::skip]
pub const SRGB_TO_LINEAR: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3,
    4, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7,
    8, 8, 8, 8, 9, 9, 9, 10, 10, 10, 11, 11, 12, 12, 12, 13,
    13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 17, 18, 18, 19, 19, 20,
    20, 21, 22, 22, 23, 23, 24, 24, 25, 25, 26, 27, 27, 28, 29, 29,
    30, 30, 31, 32, 32, 33, 34, 35, 35, 36, 37, 37, 38, 39, 40, 41,
    41, 42, 43, 44, 45, 45, 46, 47, 48, 49, 50, 51, 51, 52, 53, 54,
    55, 56, 57, 58, 59, 60, 61, 62, 63, 64, 65, 66, 67, 68, 69, 70,
    71, 72, 73, 74, 76, 77, 78, 79, 80, 81, 82, 84, 85, 86, 87, 88,
    90, 91, 92, 93, 95, 96, 97, 99, 100, 101, 103, 104, 105, 107, 108, 109,
    111, 112, 114, 115, 116, 118, 119, 121, 122, 124, 125, 127, 128, 130, 131, 133,
    134, 136, 138, 139, 141, 142, 144, 146, 147, 149, 151, 152, 154, 156, 157, 159,
    161, 163, 164, 166, 168, 170, 171, 173, 175, 177, 179, 181, 183, 184, 186, 188,
    190, 192, 194, 196, 198, 200, 202, 204, 206, 208, 210, 212, 214, 216, 218, 220,
    222, 224, 226, 229, 231, 233, 235, 237, 239, 242, 244, 246, 248, 250, 253, 255,
];

/// Linear level → sRGB-encoded level.
#[rustfmt::skip]
pub const LINEAR_TO_SRGB: [u8; 256] = [
    0, 13, 22, 28, 34, 38, 42, 46, 50, 53, 56, 59, 61, 64, 66, 69,
    71, 73, 75, 77, 79, 81, 83, 85, 86, 88, 90, 92, 93, 95, 96, 98,
    99, 101, 102, 104, 105, 106, 108, 109, 110, 112, 113, 114, 115, 117, 118, 119,
    120, 121, 122, 124, 125, 126, 127, 128, 129, 130, 131, 132, 133, 134, 135, 136,
    137, 138, 139, 140, 141, 142, 143, 144, 145, 146, 147, 148, 148, 149, 150, 151,
    152, 153, 154, 155, 155, 156, 157, 158, 159, 159, 160, 161, 162, 163, 163, 164,
    165, 166, 167, 167, 168, 169, 170, 170, 171, 172, 173, 173, 174, 175, 175, 176,
    177, 178, 178, 179, 180, 180, 181, 182, 182, 183, 184, 185, 185, 186, 187, 187,
    188, 189, 189, 190, 190, 191, 192, 192, 193, 194, 194, 195, 196, 196, 197, 197,
    198, 199, 199, 200, 200, 201, 202, 202, 203, 203, 204, 205, 205, 206, 206, 207,
    208, 208, 209, 209, 210, 210, 211, 212, 212, 213, 213, 214, 214, 215, 215, 216,
    216, 217, 218, 218, 219, 219, 220, 220, 221, 221, 222, 222, 223, 223, 224, 224,
    225, 226, 226, 227, 227, 228, 228, 229, 229, 230, 230, 231, 231, 232, 232, 233,
    233, 234, 234, 235, 235, 236, 236, 237, 237, 238, 238, 238, 239, 239, 240, 240,
    241, 241, 242, 242, 243, 243, 244, 244, 245, 245, 246, 246, 246, 247, 247, 248,
    248, 249, 249, 250, 250, 251, 251, 251, 252, 252, 253, 253, 254, 254, 255, 255,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{alpha, premultiply, red};
    use alloc::vec;
    use alloc::vec::Vec;

    fn sample_pixels() -> Vec<u32> {
        let mut out = Vec::new();
        for a in [0u32, 1, 64, 128, 200, 255] {
            for c in (0..=255u32).step_by(17) {
                out.push(premultiply(pack(c, 255 - c, c / 3, a)));
            }
        }
        out
    }

    fn run(matrix: &ColorMatrix, px: u32) -> u32 {
        let src = [px];
        let mut dst = [0u32];
        color_transform(
            Surface::new(&src, 1, 1, 1),
            &mut SurfaceMut::new(&mut dst, 1, 1, 1),
            matrix,
        );
        dst[0]
    }

    #[test]
    fn grayscale_full_on_red() {
        assert_eq!(run(&ColorMatrix::grayscale(1.0), 0xFFFF_0000), 0xFF36_3636);
    }

    #[test]
    fn grayscale_zero_is_identity() {
        assert_eq!(ColorMatrix::grayscale(0.0), ColorMatrix::IDENTITY);
        let src = sample_pixels();
        let mut dst = vec![0u32; src.len()];
        let w = src.len() as u16;
        grayscale(
            Surface::new(&src, w, 1, w as u32),
            &mut SurfaceMut::new(&mut dst, w, 1, w as u32),
            0.0,
        );
        assert_eq!(dst, src);
    }

    #[test]
    fn identity_inplace_leaves_pixels_alone() {
        let expected = sample_pixels();
        let mut buf = expected.clone();
        let w = buf.len() as u16;
        color_transform_inplace(
            &mut SurfaceMut::new(&mut buf, w, 1, w as u32),
            &ColorMatrix::IDENTITY,
        );
        assert_eq!(buf, expected);
    }

    #[test]
    fn full_invert_on_opaque() {
        for c in 0..=255 {
            let px = pack(c, 255 - c, 7, 255);
            assert_eq!(run(&ColorMatrix::invert(1.0), px), pack(255 - c, c, 248, 255));
        }
    }

    #[test]
    fn half_opacity_on_opaque_white() {
        assert_eq!(run(&ColorMatrix::opacity(0.5), 0xFFFF_FFFF), pack(127, 127, 127, 127));
    }

    #[test]
    fn luminance_moves_into_alpha() {
        assert_eq!(run(&ColorMatrix::LUMINANCE_TO_ALPHA, 0xFF00_FF00), 0xB600_0000);
        assert_eq!(run(&ColorMatrix::LUMINANCE_TO_ALPHA, 0xFF00_0000), 0);
    }

    #[test]
    fn luminance_to_alpha_matches_direct_formula() {
        for px in sample_pixels() {
            let (r, g, b, a) = unpack(px);
            let l = unpremultiply_channel(r, a) as f32 * 0.2125
                + unpremultiply_channel(g, a) as f32 * 0.7154
                + unpremultiply_channel(b, a) as f32 * 0.0721;
            let expected = pack(0, 0, 0, clamp_channel_f32(l));
            assert_eq!(run(&ColorMatrix::LUMINANCE_TO_ALPHA, px), expected, "px={px:08x}");
        }
    }

    #[test]
    fn hue_rotate_zero_is_near_identity() {
        let m = ColorMatrix::hue_rotate(0.0);
        for c in 0..=255 {
            let px = pack(c, 255 - c, c / 2, 255);
            let out = m.apply(px);
            assert_eq!(alpha(out), 255);
            assert!(red(out).abs_diff(c) <= 1, "c={c} out={out:08x}");
        }
    }

    #[test]
    fn gamma_tables_are_monotonic_with_fixed_ends() {
        for table in [&SRGB_TO_LINEAR, &LINEAR_TO_SRGB] {
            assert_eq!(table[0], 0);
            assert_eq!(table[255], 255);
            assert!(table.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn gamma_lookup_touches_rgb_only() {
        let src = [0xFF80_4020, 0x0000_0000];
        let mut dst = [0u32; 2];
        srgb_to_linear(Surface::new(&src, 2, 1, 2), &mut SurfaceMut::new(&mut dst, 2, 1, 2));
        let expected = pack(
            SRGB_TO_LINEAR[0x80] as u32,
            SRGB_TO_LINEAR[0x40] as u32,
            SRGB_TO_LINEAR[0x20] as u32,
            255,
        );
        assert_eq!(dst, [expected, 0]);

        let mut back = dst;
        linear_to_srgb_inplace(&mut SurfaceMut::new(&mut back, 2, 1, 2));
        assert_eq!(alpha(back[0]), 255);
        assert_eq!(red(back[0]), LINEAR_TO_SRGB[SRGB_TO_LINEAR[0x80] as usize] as u32);
    }

    #[test]
    fn copy_form_writes_only_the_overlap() {
        let src = [0xFF00_00FFu32; 4];
        let mut dst = [0x1234_5678u32; 9];
        brightness(
            Surface::new(&src, 2, 2, 2),
            &mut SurfaceMut::new(&mut dst, 3, 3, 3),
            0.0,
        );
        let s = 0x1234_5678;
        assert_eq!(dst, [0xFF00_0000, 0xFF00_0000, s, 0xFF00_0000, 0xFF00_0000, s, s, s, s]);
    }
}
