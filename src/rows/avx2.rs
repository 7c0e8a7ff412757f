use archmage::prelude::*;

use super::kernels;
use super::{BinaryOp, UnaryOp};

// ===========================================================================
// x86-64-v3 (AVX2 + FMA): the shared loops recompiled with the tier's
// target features so LLVM can widen the per-channel integer math.
// ===========================================================================

#[arcane]
#[allow(clippy::too_many_arguments)]
pub(super) fn map_impl_v3(
    _t: X64V3Token,
    src: &[u32],
    dst: &mut [u32],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
    op: UnaryOp<'_>,
) {
    kernels::map_rows(src, dst, w, h, ss, ds, op);
}

#[arcane]
pub(super) fn map_inplace_impl_v3(
    _t: X64V3Token,
    buf: &mut [u32],
    w: usize,
    h: usize,
    stride: usize,
    op: UnaryOp<'_>,
) {
    kernels::map_rows_inplace(buf, w, h, stride, op);
}

#[arcane]
#[allow(clippy::too_many_arguments)]
pub(super) fn combine_impl_v3(
    _t: X64V3Token,
    src: &[u32],
    backdrop: &[u32],
    dst: &mut [u32],
    w: usize,
    h: usize,
    strides: [usize; 3],
    op: BinaryOp,
) {
    kernels::combine_rows(src, backdrop, dst, w, h, strides, op);
}

#[arcane]
pub(super) fn combine_onto_impl_v3(
    _t: X64V3Token,
    src: &[u32],
    backdrop: &mut [u32],
    w: usize,
    h: usize,
    strides: [usize; 2],
    op: BinaryOp,
) {
    kernels::combine_rows_onto(src, backdrop, w, h, strides, op);
}

#[arcane]
pub(super) fn combine_into_source_impl_v3(
    _t: X64V3Token,
    src: &mut [u32],
    backdrop: &[u32],
    w: usize,
    h: usize,
    strides: [usize; 2],
    op: BinaryOp,
) {
    kernels::combine_rows_into_source(src, backdrop, w, h, strides, op);
}

#[arcane]
pub(super) fn box_blur_impl_v3(
    _t: X64V3Token,
    buf: &mut [u32],
    w: usize,
    h: usize,
    stride: usize,
    kw: usize,
    kh: usize,
) {
    kernels::box_blur(buf, w, h, stride, kw, kh);
}
