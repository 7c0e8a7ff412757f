//! Validates the code examples from README.md compile and behave correctly,
//! plus the cross-module properties they advertise.

use gauze::pixel::{alpha, pack, unpack};
use gauze::{BlendMode, ColorMatrix, CompositeOp, Surface, SurfaceMut};

#[test]
fn readme_core_api() {
    let src = vec![0x8040_2010u32; 64 * 64];
    let mut backdrop = vec![0xFF00_00FFu32; 64 * 64];

    let src = Surface::new(&src, 64, 64, 64);
    let mut backdrop_view = SurfaceMut::new(&mut backdrop, 64, 64, 64);

    gauze::blend_onto(src, &mut backdrop_view, BlendMode::Multiply);
    gauze::sepia_inplace(&mut backdrop_view, 0.7);
    gauze::gaussian_blur_inplace(&mut backdrop_view, 3.0, 3.0);

    // Uniform input stays uniform away from the edges.
    let center = backdrop[32 * 64 + 32];
    assert_eq!(alpha(center), 255);
    assert_eq!(backdrop[30 * 64 + 31], center);
}

#[test]
fn readme_boundary_conversion() {
    let rgba = vec![255u8, 128, 0, 255, 0, 0, 255, 128];
    let mut words = vec![0u32; 2];
    gauze::import_rgba8_linear(&rgba, &mut words).unwrap();

    let mut surface = SurfaceMut::new(&mut words, 2, 1, 2);
    gauze::grayscale_inplace(&mut surface, 1.0);

    let mut out = vec![0u8; 8];
    gauze::export_rgba8_linear(&words, &mut out).unwrap();
    assert_eq!(out[0], out[1]);
    assert_eq!(out[1], out[2]);
    assert_eq!(out[3], 255);
    assert_eq!(out[7], 128);
}

#[test]
fn readme_strided() {
    let bytes = [10u8, 20, 30, 255].repeat(8 * 3);
    let mut words = vec![0u32; 5 * 3];
    gauze::import_rgba8_strided(&bytes, &mut words, 4, 3, 8 * 4, 5).unwrap();
    assert_eq!(words[0], pack(10, 20, 30, 255));
    assert_eq!(words[5 * 2 + 3], pack(10, 20, 30, 255));
    assert_eq!(words[4], 0);
}

#[cfg(feature = "imgref")]
#[test]
fn readme_imgref() {
    use ::imgref::ImgVec;
    use gauze::imgref;
    use rgb::Rgba;

    let decoded = ImgVec::new(vec![Rgba::new(200u8, 100, 50, 255); 32 * 32], 32, 32);
    let mut words = imgref::premultiplied_from_rgba(decoded.as_ref());
    gauze::contrast_inplace(&mut imgref::surface_mut(words.as_mut()), 1.2);
    let encoded: ImgVec<Rgba<u8>> = imgref::rgba_from_premultiplied(words.as_ref());
    assert_eq!(encoded.width(), 32);
    assert!(encoded.buf()[0].r > 200);
    assert!(encoded.buf()[0].b < 50);
}

// --- Cross-module properties ---

fn view(buf: &[u32], w: u16, h: u16) -> Surface<'_> {
    Surface::new(buf, w, h, w as u32)
}

fn view_mut(buf: &mut [u32], w: u16, h: u16) -> SurfaceMut<'_> {
    SurfaceMut::new(buf, w, h, w as u32)
}

#[test]
fn identity_transform_is_bit_exact() {
    let src: Vec<u32> = (0..256u32).map(|i| pack(i / 2, i / 3, i / 4, i)).collect();
    let mut dst = vec![0u32; 256];
    gauze::color_transform(view(&src, 16, 16), &mut view_mut(&mut dst, 16, 16), &ColorMatrix::IDENTITY);
    assert_eq!(dst, src);

    let mut buf = src.clone();
    gauze::opacity_inplace(&mut view_mut(&mut buf, 16, 16), 1.0);
    assert_eq!(buf, src);
}

#[test]
fn normal_blend_matches_over() {
    let src: Vec<u32> = (0..64u32).map(|i| pack(i, i * 2, i * 3, i * 4)).collect();
    let back: Vec<u32> = (0..64u32).map(|i| pack(200 - i, 100, i, 255 - i)).collect();
    let mut blended = vec![0u32; 64];
    let mut over = vec![0u32; 64];
    gauze::blend(view(&src, 8, 8), view(&back, 8, 8), &mut view_mut(&mut blended, 8, 8), BlendMode::Normal);
    gauze::composite(view(&src, 8, 8), view(&back, 8, 8), &mut view_mut(&mut over, 8, 8), CompositeOp::Over);
    for (b, o) in blended.iter().zip(&over) {
        let (br, bg, bb, ba) = unpack(*b);
        let (or, og, ob, oa) = unpack(*o);
        assert_eq!((br, bg, bb), (or, og, ob));
        assert!(ba.abs_diff(oa) <= 1);
    }
}

#[test]
fn copy_and_inplace_forms_agree() {
    let src: Vec<u32> = (0..100u32).map(|i| pack(i, 50, 100 - i, 200)).collect();
    let back: Vec<u32> = (0..100u32).map(|i| pack(30, i * 2, 70, 255)).collect();

    for mode in BlendMode::ALL {
        let mut copy = vec![0u32; 100];
        gauze::blend(view(&src, 10, 10), view(&back, 10, 10), &mut view_mut(&mut copy, 10, 10), mode);

        let mut onto = back.clone();
        gauze::blend_onto(view(&src, 10, 10), &mut view_mut(&mut onto, 10, 10), mode);
        assert_eq!(onto, copy, "{mode}");

        let mut into = src.clone();
        gauze::blend_inplace(&mut view_mut(&mut into, 10, 10), view(&back, 10, 10), mode);
        assert_eq!(into, copy, "{mode}");
    }

    let mut copy = vec![0u32; 100];
    gauze::gaussian_blur(view(&src, 10, 10), &mut view_mut(&mut copy, 10, 10), 1.5, 0.5);
    let mut inplace = src.clone();
    gauze::gaussian_blur_inplace(&mut view_mut(&mut inplace, 10, 10), 1.5, 0.5);
    assert_eq!(inplace, copy);
}

#[test]
fn mismatched_sizes_process_only_the_overlap() {
    let src = vec![0xFFFF_FFFFu32; 100 * 50];
    let back = vec![0xFF00_0000u32; 80 * 80];
    let mut dst = vec![0x1234_5678u32; 100 * 100];
    gauze::blend(
        view(&src, 100, 50),
        view(&back, 80, 80),
        &mut view_mut(&mut dst, 100, 100),
        BlendMode::Normal,
    );
    for y in 0..100 {
        for x in 0..100 {
            let expected = if x < 80 && y < 50 { 0xFFFF_FFFF } else { 0x1234_5678 };
            assert_eq!(dst[y * 100 + x], expected, "({x},{y})");
        }
    }
}

#[test]
fn sub_surfaces_filter_a_window() {
    let mut buf = vec![0xFF80_8080u32; 12 * 12];
    let mut whole = view_mut(&mut buf, 12, 12);
    let mut window = whole.sub_mut(4, 4, 4, 4);
    gauze::invert_inplace(&mut window, 1.0);
    assert_eq!(buf[5 * 12 + 5], 0xFF7F_7F7F);
    assert_eq!(buf[3 * 12 + 5], 0xFF80_8080);
    assert_eq!(buf[5 * 12 + 8], 0xFF80_8080);
}

#[test]
fn names_parse_back() {
    for mode in BlendMode::ALL {
        assert_eq!(mode.name().parse::<BlendMode>(), Ok(mode));
    }
    for op in CompositeOp::ALL {
        assert_eq!(op.to_string().parse::<CompositeOp>(), Ok(op));
    }
    assert!("plus-lighter".parse::<BlendMode>().is_err());
}
