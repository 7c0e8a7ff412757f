//! Porter–Duff compositing and the four-coefficient arithmetic combiner.
//!
//! Every operator works on premultiplied channels. For an operator with
//! source factor `Fs` and backdrop factor `Fd` (alpha-derived, `0..=255`),
//! each channel is `div255(s * Fs) + div255(d * Fd)`:
//!
//! | operator | Fs       | Fd       |
//! |----------|----------|----------|
//! | over     | 255      | 255 − sa |
//! | in       | da       | 0        |
//! | out      | 255 − da | 0        |
//! | atop     | da       | 255 − sa |
//! | xor      | 255 − da | 255 − sa |
//!
//! Alpha follows the same rule, except `atop`, which keeps the backdrop alpha.

use core::fmt;
use core::str::FromStr;

use crate::UnknownNameError;
use crate::pixel::{clamp_channel, clamp_channel_f32, div255, pack, unpack};
use crate::rows::{self, BinaryOp};
use crate::surface::{Surface, SurfaceMut};

/// A Porter–Duff compositing operator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CompositeOp {
    /// Source over backdrop.
    #[default]
    Over,
    /// Source where the backdrop is opaque.
    In,
    /// Source where the backdrop is transparent.
    Out,
    /// Source over backdrop, clipped to the backdrop.
    Atop,
    /// Source and backdrop where they do not overlap.
    Xor,
}

impl CompositeOp {
    /// Every operator, in declaration order.
    pub const ALL: [Self; 5] = [Self::Over, Self::In, Self::Out, Self::Atop, Self::Xor];

    /// `feComposite` operator keyword, e.g. `"atop"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Over => "over",
            Self::In => "in",
            Self::Out => "out",
            Self::Atop => "atop",
            Self::Xor => "xor",
        }
    }

    /// `(Fs, Fd)` for source alpha `sa` and backdrop alpha `da`.
    #[inline(always)]
    const fn factors(self, sa: i32, da: i32) -> (i32, i32) {
        match self {
            Self::Over => (255, 255 - sa),
            Self::In => (da, 0),
            Self::Out => (255 - da, 0),
            Self::Atop => (da, 255 - sa),
            Self::Xor => (255 - da, 255 - sa),
        }
    }

    /// Composite one premultiplied source pixel with one backdrop pixel.
    #[inline(always)]
    pub fn apply(self, src: u32, backdrop: u32) -> u32 {
        let (sr, sg, sb, sa) = unpack(src);
        let (dr, dg, db, da) = unpack(backdrop);
        let (fs, fd) = self.factors(sa as i32, da as i32);
        let mix = |s: u32, d: u32| clamp_channel(div255(s as i32 * fs) + div255(d as i32 * fd));
        let a = match self {
            Self::Atop => da,
            _ => mix(sa, da),
        };
        pack(mix(sr, dr), mix(sg, dg), mix(sb, db), a)
    }
}

impl fmt::Display for CompositeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompositeOp {
    type Err = UnknownNameError;

    /// Parses the operator keyword, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownNameError)
    }
}

/// Coefficients of the `feComposite` arithmetic operator.
///
/// Every channel, alpha included, becomes
/// `k1 * s * d / 255 + k2 * s + k3 * d + k4 * 255`, clamped to `0..=255` and
/// truncated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ArithmeticCoefficients {
    pub k1: f32,
    pub k2: f32,
    pub k3: f32,
    pub k4: f32,
}

impl ArithmeticCoefficients {
    pub const fn new(k1: f32, k2: f32, k3: f32, k4: f32) -> Self {
        Self { k1, k2, k3, k4 }
    }

    /// Combine one source pixel with one backdrop pixel.
    #[inline(always)]
    pub fn apply(self, src: u32, backdrop: u32) -> u32 {
        let (sr, sg, sb, sa) = unpack(src);
        let (dr, dg, db, da) = unpack(backdrop);
        let mix = |s: u32, d: u32| {
            let product = (s * d) as f32 / 255.0;
            clamp_channel_f32(
                self.k1 * product + self.k2 * s as f32 + self.k3 * d as f32 + self.k4 * 255.0,
            )
        };
        pack(mix(sr, dr), mix(sg, dg), mix(sb, db), mix(sa, da))
    }
}

impl From<[f32; 4]> for ArithmeticCoefficients {
    fn from([k1, k2, k3, k4]: [f32; 4]) -> Self {
        Self { k1, k2, k3, k4 }
    }
}

// ===========================================================================
// Surface operations
// ===========================================================================

/// Composite `src` with `backdrop` into `dst` using `op`.
///
/// Only the overlap of all three surfaces is written.
pub fn composite(src: Surface<'_>, backdrop: Surface<'_>, dst: &mut SurfaceMut<'_>, op: CompositeOp) {
    rows::zip(op.name(), src, backdrop, dst, BinaryOp::Composite(op));
}

/// Composite `src` with `backdrop`, writing the result into `backdrop`.
pub fn composite_onto(src: Surface<'_>, backdrop: &mut SurfaceMut<'_>, op: CompositeOp) {
    rows::zip_onto(op.name(), src, backdrop, BinaryOp::Composite(op));
}

/// Composite `src` with `backdrop`, writing the result into `src`.
pub fn composite_inplace(src: &mut SurfaceMut<'_>, backdrop: Surface<'_>, op: CompositeOp) {
    rows::zip_into_source(op.name(), src, backdrop, BinaryOp::Composite(op));
}

/// Arithmetic composite of `src` and `backdrop` into `dst`.
pub fn composite_arithmetic(
    src: Surface<'_>,
    backdrop: Surface<'_>,
    dst: &mut SurfaceMut<'_>,
    k: ArithmeticCoefficients,
) {
    rows::zip("arithmetic", src, backdrop, dst, BinaryOp::Arithmetic(k));
}

/// Arithmetic composite written into `backdrop`.
pub fn composite_arithmetic_onto(
    src: Surface<'_>,
    backdrop: &mut SurfaceMut<'_>,
    k: ArithmeticCoefficients,
) {
    rows::zip_onto("arithmetic", src, backdrop, BinaryOp::Arithmetic(k));
}

/// Arithmetic composite written into `src`.
pub fn composite_arithmetic_inplace(
    src: &mut SurfaceMut<'_>,
    backdrop: Surface<'_>,
    k: ArithmeticCoefficients,
) {
    rows::zip_into_source("arithmetic", src, backdrop, BinaryOp::Arithmetic(k));
}
