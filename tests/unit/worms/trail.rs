use super::*;

fn pts(xy: &[(i32, i32)]) -> Vec<Point> {
    xy.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn colour() -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(200, 100, 50, 0x44)
}

#[test]
fn trail_bounds_cover_every_point() {
    let t = Trail::new(&pts(&[(3, 4), (1, 6), (2, 2)]), colour()).unwrap();
    assert_eq!(t.bounds(), Rect::new(1, 2, 4, 7));
    assert!(t.is_partial());
}

#[test]
fn empty_trail_is_rejected() {
    assert!(Trail::new(&[], colour()).is_err());
    assert!(trail_raster(&[], colour()).is_err());
}

#[test]
fn crossing_pixels_paint_once() {
    let t = Trail::new(&pts(&[(1, 1), (2, 1), (1, 1)]), colour()).unwrap();
    assert_eq!(t.points().len(), 2);

    let mut dst = RasterSurface::filled(Rect::from_size(4, 4), Rgba8Premul::BLACK);
    t.paint(&mut dst);
    assert_eq!(dst.pixel(Point::new(1, 1)), dst.pixel(Point::new(2, 1)));
    assert_eq!(dst.pixel(Point::new(0, 0)), Rgba8Premul::BLACK);
}

#[test]
fn raster_and_lazy_styles_paint_the_same() {
    let points = pts(&[(0, 0), (1, 1), (2, 1), (3, 2), (5, 5)]);
    let bg = Rgba8Premul::from_straight_rgba(10, 20, 30, 255);

    let mut lazy = RasterSurface::filled(Rect::from_size(6, 6), bg);
    let mut raster = lazy.clone();
    TrailStyle::Lazy
        .command(&points, colour())
        .unwrap()
        .paint(&mut lazy);
    TrailStyle::Raster
        .command(&points, colour())
        .unwrap()
        .paint(&mut raster);
    assert_eq!(lazy, raster);
    assert_ne!(lazy.pixel(Point::new(3, 2)), bg);
    assert_eq!(lazy.pixel(Point::new(4, 4)), bg);
}

#[test]
fn raster_trail_is_partial_blit_over_bounds() {
    let points = pts(&[(4, 4), (5, 6)]);
    let blit = trail_raster(&points, colour()).unwrap();
    assert_eq!(blit.bounds(), Rect::new(4, 4, 6, 7));
    assert_eq!(blit.op(), CompositeOp::Over);
    assert!(blit.is_partial());
}

#[test]
fn trail_clips_to_destination() {
    let t = Trail::new(&pts(&[(-1, 0), (1, 0)]), colour()).unwrap();
    let mut dst = RasterSurface::new(2, 1);
    t.paint(&mut dst);
    assert_eq!(dst.pixel(Point::new(0, 0)), Rgba8Premul::TRANSPARENT);
    assert_eq!(dst.pixel(Point::new(1, 0)), colour());
}
