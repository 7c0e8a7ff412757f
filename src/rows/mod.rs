// ---------------------------------------------------------------------------
// Strided per-pixel loops with CPU-tier dispatch.
//
// Architecture: kernels.rs holds the loops as #[inline(always)] functions.
// Each tier file wraps them in a token-taking function; #[arcane] on the v3
// wrapper compiles the inlined loop with AVX2+FMA enabled. Entry points
// below dispatch once per call via incant! and never see partial rows:
// callers pass the overlap width/height and the stride of every buffer.
// ---------------------------------------------------------------------------

use archmage::incant;

use crate::blend::{BlendMode, blend_pixel};
use crate::color::{lookup_pixel, transform_pixel};
use crate::composite::{ArithmeticCoefficients, CompositeOp};
use crate::surface::{Surface, SurfaceMut, overlap, overlap3};

mod kernels;

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;


/// Largest box-blur kernel (and ring buffer) in pixels.
pub(crate) const MAX_KERNEL: usize = 512;

// ===========================================================================
// Pixel operations
// ===========================================================================

/// A single-input pixel transform.
#[derive(Clone, Copy, Debug)]
pub(crate) enum UnaryOp<'a> {
    Matrix(&'a [f32; 20]),
    Lookup(&'a [u8; 256]),
}

impl UnaryOp<'_> {
    #[inline(always)]
    pub(crate) fn apply(self, px: u32) -> u32 {
        match self {
            Self::Matrix(m) => transform_pixel(px, m),
            Self::Lookup(table) => lookup_pixel(px, table),
        }
    }
}

/// A two-input pixel combination; the first argument is the source, the
/// second the backdrop.
#[derive(Clone, Copy, Debug)]
pub(crate) enum BinaryOp {
    Blend(BlendMode),
    Composite(CompositeOp),
    Arithmetic(ArithmeticCoefficients),
}

impl BinaryOp {
    #[inline(always)]
    pub(crate) fn apply(self, src: u32, backdrop: u32) -> u32 {
        match self {
            Self::Blend(mode) => blend_pixel(mode.channel_fn(), src, backdrop),
            Self::Composite(op) => op.apply(src, backdrop),
            Self::Arithmetic(k) => k.apply(src, backdrop),
        }
    }
}

// ===========================================================================
// Dispatched entry points
// ===========================================================================

/// `dst = op(src)` over a `w × h` region.
pub(crate) fn map(
    src: &[u32],
    dst: &mut [u32],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
    op: UnaryOp<'_>,
) {
    if w == 0 || h == 0 {
        return;
    }
    incant!(map_impl(src, dst, w, h, ss, ds, op), [v3, scalar]);
}

/// `buf = op(buf)` over a `w × h` region.
pub(crate) fn map_inplace(buf: &mut [u32], w: usize, h: usize, stride: usize, op: UnaryOp<'_>) {
    if w == 0 || h == 0 {
        return;
    }
    incant!(map_inplace_impl(buf, w, h, stride, op), [v3, scalar]);
}

/// `dst = op(src, backdrop)` over a `w × h` region.
#[allow(clippy::too_many_arguments)]
fn combine(
    src: &[u32],
    backdrop: &[u32],
    dst: &mut [u32],
    w: usize,
    h: usize,
    strides: [usize; 3],
    op: BinaryOp,
) {
    if w == 0 || h == 0 {
        return;
    }
    incant!(
        combine_impl(src, backdrop, dst, w, h, strides, op),
        [v3, scalar]
    );
}

/// `backdrop = op(src, backdrop)` over a `w × h` region.
fn combine_onto(
    src: &[u32],
    backdrop: &mut [u32],
    w: usize,
    h: usize,
    strides: [usize; 2],
    op: BinaryOp,
) {
    if w == 0 || h == 0 {
        return;
    }
    incant!(
        combine_onto_impl(src, backdrop, w, h, strides, op),
        [v3, scalar]
    );
}

/// `src = op(src, backdrop)` over a `w × h` region.
fn combine_into_source(
    src: &mut [u32],
    backdrop: &[u32],
    w: usize,
    h: usize,
    strides: [usize; 2],
    op: BinaryOp,
) {
    if w == 0 || h == 0 {
        return;
    }
    incant!(
        combine_into_source_impl(src, backdrop, w, h, strides, op),
        [v3, scalar]
    );
}

/// Three in-place box-blur passes, each horizontal then vertical.
///
/// `kw`/`kh` must be ≤ [`MAX_KERNEL`]; 0 skips that axis.
pub(crate) fn box_blur(buf: &mut [u32], w: usize, h: usize, stride: usize, kw: usize, kh: usize) {
    if w == 0 || h == 0 {
        return;
    }
    debug_assert!(kw <= MAX_KERNEL && kh <= MAX_KERNEL);
    incant!(box_blur_impl(buf, w, h, stride, kw, kh), [v3, scalar]);
}

/// Row-wise copy of a `w × h` region. Padding between rows is untouched.
pub(crate) fn copy(src: &[u32], dst: &mut [u32], w: usize, h: usize, ss: usize, ds: usize) {
    if w == 0 {
        return;
    }
    for y in 0..h {
        dst[y * ds..][..w].copy_from_slice(&src[y * ss..][..w]);
    }
}

// ===========================================================================
// Surface-level two-input entry points
// ===========================================================================

/// `dst = op(src, backdrop)` over the three-way overlap.
pub(crate) fn zip(
    name: &'static str,
    src: Surface<'_>,
    backdrop: Surface<'_>,
    dst: &mut SurfaceMut<'_>,
    op: BinaryOp,
) {
    let (w, h) = overlap3(src.dims(), backdrop.dims(), dst.dims());
    trace_op!(name, w, h);
    let strides = [src.stride_usize(), backdrop.stride_usize(), dst.stride_usize()];
    combine(src.pixels(), backdrop.pixels(), dst.pixels_mut(), w, h, strides, op);
}

/// `backdrop = op(src, backdrop)` over the overlap.
pub(crate) fn zip_onto(
    name: &'static str,
    src: Surface<'_>,
    backdrop: &mut SurfaceMut<'_>,
    op: BinaryOp,
) {
    let (w, h) = overlap(src.dims(), backdrop.dims());
    trace_op!(name, w, h);
    let strides = [src.stride_usize(), backdrop.stride_usize()];
    combine_onto(src.pixels(), backdrop.pixels_mut(), w, h, strides, op);
}

/// `src = op(src, backdrop)` over the overlap.
pub(crate) fn zip_into_source(
    name: &'static str,
    src: &mut SurfaceMut<'_>,
    backdrop: Surface<'_>,
    op: BinaryOp,
) {
    let (w, h) = overlap(src.dims(), backdrop.dims());
    trace_op!(name, w, h);
    let strides = [src.stride_usize(), backdrop.stride_usize()];
    combine_into_source(src.pixels_mut(), backdrop.pixels(), w, h, strides, op);
}
