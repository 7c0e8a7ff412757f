use archmage::prelude::*;

use super::kernels;
use super::{BinaryOp, UnaryOp};

// ===========================================================================
// Scalar fallbacks
// ===========================================================================

#[allow(clippy::too_many_arguments)]
pub(super) fn map_impl_scalar(
    _token: ScalarToken,
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

pub(super) fn map_inplace_impl_scalar(
    _token: ScalarToken,
    buf: &mut [u32],
    w: usize,
    h: usize,
    stride: usize,
    op: UnaryOp<'_>,
) {
    kernels::map_rows_inplace(buf, w, h, stride, op);
}

#[allow(clippy::too_many_arguments)]
pub(super) fn combine_impl_scalar(
    _token: ScalarToken,
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

pub(super) fn combine_onto_impl_scalar(
    _token: ScalarToken,
    src: &[u32],
    backdrop: &mut [u32],
    w: usize,
    h: usize,
    strides: [usize; 2],
    op: BinaryOp,
) {
    kernels::combine_rows_onto(src, backdrop, w, h, strides, op);
}

pub(super) fn combine_into_source_impl_scalar(
    _token: ScalarToken,
    src: &mut [u32],
    backdrop: &[u32],
    w: usize,
    h: usize,
    strides: [usize; 2],
    op: BinaryOp,
) {
    kernels::combine_rows_into_source(src, backdrop, w, h, strides, op);
}

pub(super) fn box_blur_impl_scalar(
    _token: ScalarToken,
    buf: &mut [u32],
    w: usize,
    h: usize,
    stride: usize,
    kw: usize,
    kh: usize,
) {
    kernels::box_blur(buf, w, h, stride, kw, kh);
}
