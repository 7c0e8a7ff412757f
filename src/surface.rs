//! Non-owning views over caller-provided ARGB32 pixel buffers.

use core::fmt;

use crate::SizeError;

// ===========================================================================
// Geometry helpers
// ===========================================================================

/// Shrink `width`/`height` so every addressed pixel lies inside `len` words.
#[inline]
fn fit(len: usize, width: u16, height: u16, stride: u32) -> (u16, u16) {
    let stride = stride as usize;
    let width = (width as usize).min(stride);
    if width == 0 {
        return (0, height);
    }
    let rows = if len < width { 0 } else { (len - width) / stride + 1 };
    (width as u16, (height as usize).min(rows) as u16)
}

#[inline]
fn check_strided(len: usize, width: u16, height: u16, stride: u32) -> Result<(), SizeError> {
    let (width, height, stride) = (width as usize, height as usize, stride as usize);
    if width > stride {
        return Err(SizeError::InvalidStride);
    }
    if width == 0 || height == 0 {
        return Ok(());
    }
    let total = (height - 1)
        .checked_mul(stride)
        .ok_or(SizeError::InvalidStride)?
        .checked_add(width)
        .ok_or(SizeError::InvalidStride)?;
    if len < total {
        return Err(SizeError::InvalidStride);
    }
    Ok(())
}

/// Clip a `(x, y, width, height)` request to a `(parent_w, parent_h)` region.
/// Returns the word offset of the sub-region and its clipped size.
#[inline]
fn clip_sub(
    parent_w: u16,
    parent_h: u16,
    stride: u32,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
) -> (usize, u16, u16) {
    let x = x.min(parent_w);
    let y = y.min(parent_h);
    let width = width.min(parent_w - x);
    let height = height.min(parent_h - y);
    (y as usize * stride as usize + x as usize, width, height)
}

/// Element-wise minimum of two `(width, height)` pairs.
#[inline]
pub(crate) fn overlap(a: (u16, u16), b: (u16, u16)) -> (usize, usize) {
    (a.0.min(b.0) as usize, a.1.min(b.1) as usize)
}

/// Element-wise minimum of three `(width, height)` pairs.
#[inline]
pub(crate) fn overlap3(a: (u16, u16), b: (u16, u16), c: (u16, u16)) -> (usize, usize) {
    (a.0.min(b.0).min(c.0) as usize, a.1.min(b.1).min(c.1) as usize)
}

// ===========================================================================
// Surface
// ===========================================================================

/// A read-only view of premultiplied ARGB32 pixels.
///
/// Row `y` starts at word `y * stride`; only the first `width` words of each
/// row belong to the surface. Views are `Copy` and never own their pixels.
#[derive(Clone, Copy)]
pub struct Surface<'a> {
    pixels: &'a [u32],
    width: u16,
    height: u16,
    stride: u32,
}

impl<'a> Surface<'a> {
    /// Wrap a pixel buffer.
    ///
    /// `stride` is the number of words between the starts of consecutive rows
    /// and should be ≥ `width`. The view is clipped to what `pixels` can hold:
    /// width never exceeds the stride and rows past the end of the slice are
    /// dropped. Nothing else is validated.
    pub fn new(pixels: &'a [u32], width: u16, height: u16, stride: u32) -> Self {
        let (width, height) = fit(pixels.len(), width, height, stride);
        Self { pixels, width, height, stride }
    }

    /// Like [`Surface::new`], but rejects geometry that does not fit the
    /// buffer instead of clipping it.
    pub fn try_new(pixels: &'a [u32], width: u16, height: u16, stride: u32) -> Result<Self, SizeError> {
        check_strided(pixels.len(), width, height, stride)?;
        Ok(Self { pixels, width, height, stride })
    }

    /// A view of the region at `(x, y)` sharing this surface's buffer and
    /// stride.
    ///
    /// The origin is clamped into the surface and the size is clipped so the
    /// region never leaves it; out-of-range requests give an empty or
    /// truncated view.
    pub fn sub(&self, x: u16, y: u16, width: u16, height: u16) -> Surface<'a> {
        let (offset, width, height) =
            clip_sub(self.width, self.height, self.stride, x, y, width, height);
        let pixels = self.pixels.get(offset..).unwrap_or(&[]);
        Surface::new(pixels, width, height, self.stride)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Words between the starts of consecutive rows.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// The underlying buffer, starting at the view's first pixel.
    #[inline]
    pub fn pixels(&self) -> &'a [u32] {
        self.pixels
    }

    /// The pixel at `(x, y)`, or `None` outside the view.
    pub fn get(&self, x: u16, y: u16) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.stride as usize + x as usize).copied()
    }

    /// Iterate over the rows of the view, each exactly `width` pixels long.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u32]> + 'a {
        let width = self.width as usize;
        self.pixels
            .chunks(self.stride.max(1) as usize)
            .take(self.height as usize)
            .filter_map(move |row| row.get(..width))
    }

    #[inline]
    pub(crate) fn dims(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    #[inline]
    pub(crate) fn stride_usize(&self) -> usize {
        self.stride as usize
    }
}

impl fmt::Debug for Surface<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// SurfaceMut
// ===========================================================================

/// A writable view of premultiplied ARGB32 pixels.
///
/// Same layout as [`Surface`]. Use [`SurfaceMut::reborrow`] or
/// [`SurfaceMut::as_surface`] to hand the view to several calls in turn.
pub struct SurfaceMut<'a> {
    pixels: &'a mut [u32],
    width: u16,
    height: u16,
    stride: u32,
}

impl<'a> SurfaceMut<'a> {
    /// Wrap a mutable pixel buffer. Clipped exactly like [`Surface::new`].
    pub fn new(pixels: &'a mut [u32], width: u16, height: u16, stride: u32) -> Self {
        let (width, height) = fit(pixels.len(), width, height, stride);
        Self { pixels, width, height, stride }
    }

    /// Like [`SurfaceMut::new`], but rejects geometry that does not fit the
    /// buffer instead of clipping it.
    pub fn try_new(
        pixels: &'a mut [u32],
        width: u16,
        height: u16,
        stride: u32,
    ) -> Result<Self, SizeError> {
        check_strided(pixels.len(), width, height, stride)?;
        Ok(Self { pixels, width, height, stride })
    }

    /// A writable view of a sub-region, clipped like [`Surface::sub`].
    pub fn sub_mut(&mut self, x: u16, y: u16, width: u16, height: u16) -> SurfaceMut<'_> {
        self.reborrow().into_sub(x, y, width, height)
    }

    /// Consume the view and keep only a sub-region, clipped like
    /// [`Surface::sub`].
    pub fn into_sub(self, x: u16, y: u16, width: u16, height: u16) -> SurfaceMut<'a> {
        let (offset, width, height) =
            clip_sub(self.width, self.height, self.stride, x, y, width, height);
        let stride = self.stride;
        let pixels = match self.pixels.get_mut(offset..) {
            Some(rest) => rest,
            None => &mut [],
        };
        SurfaceMut::new(pixels, width, height, stride)
    }

    /// Split into the rows above `y` and the rows from `y` down.
    ///
    /// The halves never share a pixel, so they can be filtered independently
    /// (for example from two threads). `y` is clamped to the height.
    pub fn split_at_row(self, y: u16) -> (SurfaceMut<'a>, SurfaceMut<'a>) {
        let y = y.min(self.height);
        let mid = (y as usize * self.stride as usize).min(self.pixels.len());
        let (top, bottom) = self.pixels.split_at_mut(mid);
        (
            SurfaceMut::new(top, self.width, y, self.stride),
            SurfaceMut::new(bottom, self.width, self.height - y, self.stride),
        )
    }

    /// A shorter-lived writable view of the same region.
    #[inline]
    pub fn reborrow(&mut self) -> SurfaceMut<'_> {
        SurfaceMut {
            pixels: &mut *self.pixels,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }

    /// A read-only view of the same region.
    #[inline]
    pub fn as_surface(&self) -> Surface<'_> {
        Surface {
            pixels: &*self.pixels,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Words between the starts of consecutive rows.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// The pixel at `(x, y)`, or `None` outside the view.
    pub fn get(&self, x: u16, y: u16) -> Option<u32> {
        self.as_surface().get(x, y)
    }

    /// Overwrite the pixel at `(x, y)`. Writes outside the view are ignored.
    pub fn set(&mut self, x: u16, y: u16, px: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        if let Some(slot) = self.pixels.get_mut(y as usize * self.stride as usize + x as usize) {
            *slot = px;
        }
    }

    /// Set every pixel of the view to `px`. Padding between rows is untouched.
    pub fn fill(&mut self, px: u32) {
        for row in self.rows_mut() {
            row.fill(px);
        }
    }

    /// Iterate mutably over the rows of the view, each exactly `width` pixels long.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u32]> + '_ {
        let width = self.width as usize;
        self.pixels
            .chunks_mut(self.stride.max(1) as usize)
            .take(self.height as usize)
            .filter_map(move |row| row.get_mut(..width))
    }

    #[inline]
    pub(crate) fn dims(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    #[inline]
    pub(crate) fn stride_usize(&self) -> usize {
        self.stride as usize
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> &mut [u32] {
        self.pixels
    }
}

impl<'a> From<&'a SurfaceMut<'_>> for Surface<'a> {
    fn from(surface: &'a SurfaceMut<'_>) -> Self {
        surface.as_surface()
    }
}

impl fmt::Debug for SurfaceMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceMut")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn numbered(n: usize) -> Vec<u32> {
        (0..n as u32).collect()
    }

    #[test]
    fn new_stores_fields() {
        let buf = vec![0u32; 12 * 10];
        let s = Surface::new(&buf, 10, 10, 12);
        assert_eq!((s.width(), s.height(), s.stride()), (10, 10, 12));
    }

    #[test]
    fn sub_surface_is_clipped_to_parent() {
        let buf = vec![0u32; 100];
        let s = Surface::new(&buf, 10, 10, 10);
        let sub = s.sub(8, 8, 10, 10);
        assert_eq!((sub.width(), sub.height()), (2, 2));
        assert_eq!(sub.stride(), 10);
    }

    #[test]
    fn sub_surface_past_the_edge_is_empty() {
        let buf = vec![0u32; 100];
        let s = Surface::new(&buf, 10, 10, 10);
        let sub = s.sub(40, 3, 5, 5);
        assert_eq!((sub.width(), sub.height()), (0, 5));
        assert_eq!(sub.rows().filter(|r| !r.is_empty()).count(), 0);
        let sub = s.sub(0, 200, 5, 5);
        assert_eq!(sub.height(), 0);
        assert_eq!(sub.rows().count(), 0);
    }

    #[test]
    fn sub_surface_shares_parent_pixels() {
        let buf = numbered(10 * 10);
        let s = Surface::new(&buf, 10, 10, 10);
        let sub = s.sub(3, 4, 2, 2);
        assert_eq!(sub.get(0, 0), Some(43));
        assert_eq!(sub.get(1, 1), Some(54));
        assert_eq!(sub.get(2, 0), None);
    }

    #[test]
    fn short_buffer_is_clipped_not_rejected() {
        let buf = vec![0u32; 25];
        let s = Surface::new(&buf, 10, 10, 10);
        assert_eq!((s.width(), s.height()), (10, 2));
        assert_eq!(
            Surface::try_new(&buf, 10, 10, 10).unwrap_err(),
            SizeError::InvalidStride
        );
        assert!(Surface::try_new(&buf, 5, 3, 10).is_ok());
    }

    #[test]
    fn width_never_exceeds_stride() {
        let buf = vec![0u32; 64];
        let s = Surface::new(&buf, 10, 4, 8);
        assert_eq!(s.width(), 8);
        assert_eq!(Surface::try_new(&buf, 10, 4, 8).unwrap_err(), SizeError::InvalidStride);
    }

    #[test]
    fn rows_skip_padding() {
        let buf = numbered(4 * 3);
        let s = Surface::new(&buf, 3, 3, 4);
        let rows: Vec<&[u32]> = s.rows().collect();
        assert_eq!(rows, [&[0, 1, 2][..], &[4, 5, 6], &[8, 9, 10]]);
    }

    #[test]
    fn fill_and_set_respect_the_view() {
        let mut buf = vec![0u32; 5 * 4];
        let mut s = SurfaceMut::new(&mut buf, 5, 4, 5);
        s.sub_mut(1, 1, 2, 2).fill(7);
        s.set(4, 3, 9);
        s.set(5, 3, 11);
        assert_eq!(
            buf,
            [
                0, 0, 0, 0, 0, //
                0, 7, 7, 0, 0, //
                0, 7, 7, 0, 0, //
                0, 0, 0, 0, 9,
            ]
        );
    }

    #[test]
    fn split_at_row_gives_disjoint_halves() {
        let mut buf = vec![0u32; 6 * 4];
        let s = SurfaceMut::new(&mut buf, 5, 4, 6);
        let (mut top, mut bottom) = s.split_at_row(1);
        assert_eq!((top.height(), bottom.height()), (1, 3));
        top.fill(1);
        bottom.fill(2);
        assert_eq!(&buf[..6], &[1, 1, 1, 1, 1, 0]);
        assert_eq!(&buf[6..11], &[2, 2, 2, 2, 2]);
        assert_eq!(buf[23], 0);
    }

    #[test]
    fn overlap_takes_elementwise_minimum() {
        assert_eq!(overlap3((100, 50), (80, 80), (100, 100)), (80, 50));
        assert_eq!(overlap((3, 9), (7, 2)), (3, 2));
    }
}
