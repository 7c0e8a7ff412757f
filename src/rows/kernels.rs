// Tier-independent loops. Everything here is #[inline(always)] so each tier
// wrapper gets its own copy compiled with that tier's target features.

use super::{BinaryOp, MAX_KERNEL, UnaryOp};
use crate::pixel::{pack, unpack};

#[inline(always)]
pub(super) fn map_rows(
    src: &[u32],
    dst: &mut [u32],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
    op: UnaryOp<'_>,
) {
    for y in 0..h {
        let s = &src[y * ss..][..w];
        let d = &mut dst[y * ds..][..w];
        for (s, d) in s.iter().zip(d.iter_mut()) {
            *d = op.apply(*s);
        }
    }
}

#[inline(always)]
pub(super) fn map_rows_inplace(buf: &mut [u32], w: usize, h: usize, stride: usize, op: UnaryOp<'_>) {
    for y in 0..h {
        for px in &mut buf[y * stride..][..w] {
            *px = op.apply(*px);
        }
    }
}

#[inline(always)]
pub(super) fn combine_rows(
    src: &[u32],
    backdrop: &[u32],
    dst: &mut [u32],
    w: usize,
    h: usize,
    [ss, bs, ds]: [usize; 3],
    op: BinaryOp,
) {
    for y in 0..h {
        let s = &src[y * ss..][..w];
        let b = &backdrop[y * bs..][..w];
        let d = &mut dst[y * ds..][..w];
        for ((s, b), d) in s.iter().zip(b).zip(d.iter_mut()) {
            *d = op.apply(*s, *b);
        }
    }
}

#[inline(always)]
pub(super) fn combine_rows_onto(
    src: &[u32],
    backdrop: &mut [u32],
    w: usize,
    h: usize,
    [ss, bs]: [usize; 2],
    op: BinaryOp,
) {
    for y in 0..h {
        let s = &src[y * ss..][..w];
        let b = &mut backdrop[y * bs..][..w];
        for (s, b) in s.iter().zip(b.iter_mut()) {
            *b = op.apply(*s, *b);
        }
    }
}

#[inline(always)]
pub(super) fn combine_rows_into_source(
    src: &mut [u32],
    backdrop: &[u32],
    w: usize,
    h: usize,
    [ss, bs]: [usize; 2],
    op: BinaryOp,
) {
    for y in 0..h {
        let s = &mut src[y * ss..][..w];
        let b = &backdrop[y * bs..][..w];
        for (s, b) in s.iter_mut().zip(b) {
            *s = op.apply(*s, *b);
        }
    }
}

// ===========================================================================
// Box blur
// ===========================================================================

#[inline(always)]
pub(super) fn box_blur(buf: &mut [u32], w: usize, h: usize, stride: usize, kw: usize, kh: usize) {
    let mut ring = [0u32; MAX_KERNEL];
    for _ in 0..3 {
        if kw > 0 {
            let k = kw.min(w);
            for y in 0..h {
                blur_line(buf, y * stride, 1, w, k, &mut ring);
            }
        }
        if kh > 0 {
            let k = kh.min(h);
            for x in 0..w {
                blur_line(buf, x, stride, h, k, &mut ring);
            }
        }
    }
}

/// Slide a `k`-wide window along `len` pixels starting at `start`, `step`
/// words apart. Pixels outside the line contribute nothing but the divisor
/// stays `k`, so the ends fade toward transparent.
///
/// The window for output `i` covers inputs `i + k/2 - k + 1 ..= i + k/2`.
/// Each input is read into the ring before any output at or after its index
/// is written, which makes the pass safe in place.
#[inline(always)]
fn blur_line(
    buf: &mut [u32],
    start: usize,
    step: usize,
    len: usize,
    k: usize,
    ring: &mut [u32; MAX_KERNEL],
) {
    let half = k / 2;
    let k32 = k as u32;
    let (mut sr, mut sg, mut sb, mut sa) = (0u32, 0u32, 0u32, 0u32);
    for x in 0..len + k {
        let slot = x % k;
        if x >= k {
            let (r, g, b, a) = unpack(ring[slot]);
            sr -= r;
            sg -= g;
            sb -= b;
            sa -= a;
        }
        if x < len {
            let px = buf[start + x * step];
            ring[slot] = px;
            let (r, g, b, a) = unpack(px);
            sr += r;
            sg += g;
            sb += b;
            sa += a;
        }
        if x >= half && x - half < len {
            buf[start + (x - half) * step] = pack(sr / k32, sg / k32, sb / k32, sa / k32);
        }
    }
}
