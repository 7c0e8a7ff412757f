//! Separable blend modes on premultiplied pixels.
//!
//! Each mode is one channel function `(s, d, sa, da) -> channel` applied to
//! red, green and blue alike; the result alpha is always
//! `sa + da - div255(sa * da)`. Channels are never unpremultiplied, and every
//! result is clamped to `0..=255`.

use core::fmt;
use core::str::FromStr;

use crate::UnknownNameError;
use crate::pixel::{clamp_channel, div255, pack, unpack};
use crate::rows::{self, BinaryOp};
use crate::surface::{Surface, SurfaceMut};

/// How a source pixel is mixed with the backdrop beneath it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Source over backdrop.
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
}

impl BlendMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Normal,
        Self::Multiply,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::HardLight,
        Self::SoftLight,
        Self::Difference,
        Self::Exclusion,
    ];

    /// CSS `mix-blend-mode` keyword, e.g. `"color-dodge"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
        }
    }

    /// Blend one premultiplied source pixel with one backdrop pixel.
    #[inline]
    pub fn apply(self, src: u32, backdrop: u32) -> u32 {
        blend_pixel(self.channel_fn(), src, backdrop)
    }

    #[inline(always)]
    pub(crate) fn channel_fn(self) -> ChannelFn {
        CHANNEL_FNS[self as usize]
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = UnknownNameError;

    /// Parses the CSS keyword, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownNameError)
    }
}

// ===========================================================================
// Channel functions
// ===========================================================================

pub(crate) type ChannelFn = fn(i32, i32, i32, i32) -> i32;

// Indexed by `BlendMode as usize`.
const CHANNEL_FNS: [ChannelFn; 12] = [
    normal,
    multiply,
    screen,
    overlay,
    darken,
    lighten,
    color_dodge,
    color_burn,
    hard_light,
    soft_light,
    difference,
    exclusion,
];

#[inline(always)]
pub(crate) fn blend_pixel(op: ChannelFn, src: u32, backdrop: u32) -> u32 {
    let (sr, sg, sb, sa) = unpack(src);
    let (dr, dg, db, da) = unpack(backdrop);
    let (sa, da) = (sa as i32, da as i32);
    let r = op(sr as i32, dr as i32, sa, da);
    let g = op(sg as i32, dg as i32, sa, da);
    let b = op(sb as i32, db as i32, sa, da);
    let a = sa + da - div255(sa * da);
    pack(clamp_channel(r), clamp_channel(g), clamp_channel(b), clamp_channel(a))
}

fn normal(s: i32, d: i32, sa: i32, _da: i32) -> i32 {
    s + div255(d * (255 - sa))
}

fn multiply(s: i32, d: i32, sa: i32, da: i32) -> i32 {
    div255(s * d + s * (255 - da) + d * (255 - sa))
}

fn screen(s: i32, d: i32, _sa: i32, _da: i32) -> i32 {
    s + d - div255(s * d)
}

fn overlay(s: i32, d: i32, sa: i32, da: i32) -> i32 {
    let tmp = s * (255 - da) + d * (255 - sa);
    if 2 * d <= da {
        div255(2 * s * d + tmp)
    } else {
        div255(sa * da - 2 * (da - d) * (sa - s) + tmp)
    }
}

fn darken(s: i32, d: i32, sa: i32, da: i32) -> i32 {
    let (sda, dsa) = (s * da, d * sa);
    if sda < dsa {
        s + d - div255(dsa)
    } else {
        d + s - div255(sda)
    }
}

fn lighten(s: i32, d: i32, sa: i32, da: i32) -> i32 {
    let (sda, dsa) = (s * da, d * sa);
    if sda > dsa {
        s + d - div255(dsa)
    } else {
        d + s - div255(sda)
    }
}

fn color_dodge(s: i32, d: i32, sa: i32, da: i32) -> i32 {
    if d == 0 {
        return div255(s * (255 - da));
    }
    let rest = s * (255 - da) + d * (255 - sa);
    if s == sa || da * (sa - s) < d * sa {
        return div255(sa * da + rest);
    }
    div255(sa * ((d * sa) / (sa - s)) + rest)
}

fn color_burn(s: i32, d: i32, sa: i32, da: i32) -> i32 {
    let rest = s * (255 - da) + d * (255 - sa);
    if d == da {
        return div255(sa * da + rest);
    }
    if s == 0 {
        return div255(d * (255 - sa));
    }
    if da * s < (da - d) * sa {
        return div255(rest);
    }
    div255(sa * (da - (da - d) * sa / s) + rest)
}

fn hard_light(s: i32, d: i32, sa: i32, da: i32) -> i32 {
    let tmp = s * (255 - da) + d * (255 - sa);
    if 2 * s <= sa {
        div255(2 * s * d + tmp)
    } else {
        div255(sa * da - 2 * (da - d) * (sa - s) + tmp)
    }
}

// Widened to i64: `d_np` reaches 65025 when a channel exceeds its alpha, and
// the cubic term would overflow i32.
fn soft_light(s: i32, d: i32, sa: i32, da: i32) -> i32 {
    const N: i64 = 65025;
    let (s, d, sa, da) = (s as i64, d as i64, sa as i64, da as i64);
    let s2 = s << 1;
    let d_np = if da == 0 { 0 } else { 255 * d / da };
    let temp = (s * (255 - da) + d * (255 - sa)) * 255;

    let v = if s2 < sa {
        (d * (sa * 255 + (s2 - sa) * (255 - d_np)) + temp) / N
    } else if 4 * d <= da {
        let cubic = (((16 * d_np - 12 * 255) * d_np + 3 * N) * d_np) / N;
        (d * sa * 255 + da * (s2 - sa) * cubic + temp) / N
    } else {
        let root = libm::sqrtf((d_np * 255) as f32) as i64;
        ((d * sa * 255 + da * (s2 - sa) * root - d_np) + temp) / N
    };
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn difference(s: i32, d: i32, sa: i32, da: i32) -> i32 {
    let (sda, dsa) = (s * da, d * sa);
    if sda < dsa {
        d + s - 2 * div255(sda)
    } else {
        s + d - 2 * div255(dsa)
    }
}

fn exclusion(s: i32, d: i32, _sa: i32, _da: i32) -> i32 {
    div255(255 * (s + d) - 2 * s * d)
}

// ===========================================================================
// Surface operations
// ===========================================================================

/// Blend `src` over `backdrop` into `dst`.
///
/// Only the overlap of all three surfaces is written.
pub fn blend(src: Surface<'_>, backdrop: Surface<'_>, dst: &mut SurfaceMut<'_>, mode: BlendMode) {
    rows::zip(mode.name(), src, backdrop, dst, BinaryOp::Blend(mode));
}

/// Blend `src` over `backdrop`, writing the result into `backdrop`.
pub fn blend_onto(src: Surface<'_>, backdrop: &mut SurfaceMut<'_>, mode: BlendMode) {
    rows::zip_onto(mode.name(), src, backdrop, BinaryOp::Blend(mode));
}

/// Blend `src` over `backdrop`, writing the result into `src`.
pub fn blend_inplace(src: &mut SurfaceMut<'_>, backdrop: Surface<'_>, mode: BlendMode) {
    rows::zip_into_source(mode.name(), src, backdrop, BinaryOp::Blend(mode));
}
