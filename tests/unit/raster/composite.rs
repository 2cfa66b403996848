use super::*;

#[test]
fn over_coverage_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 255), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 255), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 255), src);
}

#[test]
fn replace_scales_by_coverage() {
    assert_eq!(replace([100, 50, 0, 200], 255), [100, 50, 0, 200]);
    assert_eq!(replace([100, 50, 0, 200], 0), [0, 0, 0, 0]);
    assert_eq!(CompositeOp::Replace.apply([9, 9, 9, 9], [0, 0, 0, 0], 255), [0, 0, 0, 0]);
}

#[test]
fn draw_solid_replace_clips_to_destination() {
    let mut dst = RasterSurface::new(4, 4);
    let red = Rgba8Premul::from_straight_rgba(255, 0, 0, 255);
    draw(
        &mut dst,
        Rect::new(2, 2, 10, 10),
        &Source::Solid(red),
        Point::ZERO,
        None,
        CompositeOp::Replace,
    );
    assert_eq!(dst.pixel(Point::new(1, 1)), Rgba8Premul::TRANSPARENT);
    assert_eq!(dst.pixel(Point::new(2, 2)), red);
    assert_eq!(dst.pixel(Point::new(3, 3)), red);
}

#[test]
fn draw_image_source_aligns_src_origin_and_leaves_uncovered_pixels() {
    let green = Rgba8Premul::from_straight_rgba(0, 255, 0, 255);
    let src = RasterSurface::filled(Rect::new(10, 10, 12, 12), green);
    let mut dst = RasterSurface::filled(Rect::from_size(6, 6), Rgba8Premul::BLACK);

    // Rect is larger than the source; only the 2x2 that maps onto the image is drawn.
    draw(
        &mut dst,
        Rect::new(1, 1, 5, 5),
        &Source::Image(Arc::new(src)),
        Point::new(10, 10),
        None,
        CompositeOp::Replace,
    );
    assert_eq!(dst.pixel(Point::new(1, 1)), green);
    assert_eq!(dst.pixel(Point::new(2, 2)), green);
    assert_eq!(dst.pixel(Point::new(3, 3)), Rgba8Premul::BLACK);
    assert_eq!(dst.pixel(Point::new(0, 0)), Rgba8Premul::BLACK);
}

#[test]
fn draw_through_image_mask_only_touches_covered_pixels() {
    let white = Rgba8Premul::from_straight_rgba(255, 255, 255, 255);
    let mut mask = RasterSurface::new(2, 1);
    mask.set_pixel(Point::new(1, 0), Rgba8Premul::BLACK);

    let mut dst = RasterSurface::filled(Rect::from_size(2, 1), Rgba8Premul::BLACK);
    draw(
        &mut dst,
        Rect::from_size(2, 1),
        &Source::Solid(white),
        Point::ZERO,
        Some((&Mask::Image(Arc::new(mask)), Point::ZERO)),
        CompositeOp::Over,
    );
    assert_eq!(dst.pixel(Point::new(0, 0)), Rgba8Premul::BLACK);
    assert_eq!(dst.pixel(Point::new(1, 0)), white);
}
