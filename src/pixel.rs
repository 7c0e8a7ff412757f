//! Packed ARGB32 helpers shared by every filter.
//!
//! All arithmetic here is integer and lossy on purpose: premultiplication,
//! unpremultiplication and [`div255`] round exactly the way the filters
//! expect, so results are reproducible bit for bit.

/// Alpha channel (bits 24–31).
#[inline(always)]
pub const fn alpha(px: u32) -> u32 {
    (px >> 24) & 0xFF
}

/// Red channel (bits 16–23).
#[inline(always)]
pub const fn red(px: u32) -> u32 {
    (px >> 16) & 0xFF
}

/// Green channel (bits 8–15).
#[inline(always)]
pub const fn green(px: u32) -> u32 {
    (px >> 8) & 0xFF
}

/// Blue channel (bits 0–7).
#[inline(always)]
pub const fn blue(px: u32) -> u32 {
    px & 0xFF
}

/// Split a pixel into `(r, g, b, a)`.
#[inline(always)]
pub const fn unpack(px: u32) -> (u32, u32, u32, u32) {
    (red(px), green(px), blue(px), alpha(px))
}

/// Build a pixel from `(r, g, b, a)`. Each channel must already be in `0..=255`.
#[inline(always)]
pub const fn pack(r: u32, g: u32, b: u32, a: u32) -> u32 {
    (a << 24) | (r << 16) | (g << 8) | b
}

/// Scale one straight channel by alpha: `c * (a + 1) >> 8`.
#[inline(always)]
pub const fn premultiply_channel(c: u32, a: u32) -> u32 {
    (c * (a + 1)) >> 8
}

/// Undo [`premultiply_channel`]: `255 * c / a`, or 0 when `a` is 0.
#[inline(always)]
pub const fn unpremultiply_channel(c: u32, a: u32) -> u32 {
    if a == 0 { 0 } else { (255 * c) / a }
}

/// Straight-alpha pixel → premultiplied pixel.
#[inline(always)]
pub const fn premultiply(px: u32) -> u32 {
    let (r, g, b, a) = unpack(px);
    pack(
        premultiply_channel(r, a),
        premultiply_channel(g, a),
        premultiply_channel(b, a),
        a,
    )
}

/// Premultiplied pixel → straight-alpha pixel. Fully transparent pixels
/// become transparent black.
///
/// Channels larger than alpha (not a valid premultiplied pixel) saturate at 255.
#[inline(always)]
pub const fn unpremultiply(px: u32) -> u32 {
    let (r, g, b, a) = unpack(px);
    pack(
        clamp_channel(unpremultiply_channel(r, a) as i32),
        clamp_channel(unpremultiply_channel(g, a) as i32),
        clamp_channel(unpremultiply_channel(b, a) as i32),
        a,
    )
}

/// Rounded division by 255: `(x + (x >> 8) + 0x80) >> 8`.
///
/// Within one of `x / 255` for every product of two 8-bit values, and exact
/// when one factor is 255. Negative inputs shift arithmetically.
#[inline(always)]
pub const fn div255(x: i32) -> i32 {
    (x + (x >> 8) + 0x80) >> 8
}

/// Clamp an integer channel into `0..=255`.
#[inline(always)]
pub const fn clamp_channel(v: i32) -> u32 {
    if v < 0 {
        0
    } else if v > 255 {
        255
    } else {
        v as u32
    }
}

/// Clamp a float channel into `0..=255`, truncating toward zero. NaN maps to 0.
#[inline(always)]
pub fn clamp_channel_f32(v: f32) -> u32 {
    if v < 0.0 {
        0
    } else if v > 255.0 {
        255
    } else {
        v as u32
    }
}
