use super::*;

#[test]
fn offset_bounds_address_absolute_coordinates() {
    let mut s = RasterSurface::with_bounds(Rect::new(40, 12, 42, 14));
    let c = Rgba8Premul::from_straight_rgba(10, 20, 30, 255);
    s.set_pixel(Point::new(40, 12), c);
    assert_eq!(&s.data()[0..4], &[10, 20, 30, 255]);
    assert_eq!(s.pixel(Point::new(40, 12)), c);
    assert_eq!(s.pixel(Point::new(0, 0)), Rgba8Premul::TRANSPARENT);
}

#[test]
fn writes_outside_bounds_are_dropped() {
    let mut s = RasterSurface::new(2, 2);
    s.set_pixel(Point::new(5, 5), Rgba8Premul::BLACK);
    s.set_pixel(Point::new(-1, 0), Rgba8Premul::BLACK);
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn from_premul_bytes_checks_length() {
    assert!(RasterSurface::from_premul_bytes(Rect::from_size(2, 2), vec![0; 16]).is_ok());
    let err = RasterSurface::from_premul_bytes(Rect::from_size(2, 2), vec![0; 15]).unwrap_err();
    assert!(matches!(err, PaintError::Validation(_)));
}

#[test]
fn copy_from_reuses_or_resizes() {
    let src = RasterSurface::filled(Rect::from_size(3, 2), Rgba8Premul::BLACK);
    let mut same = RasterSurface::new(3, 2);
    same.copy_from(&src);
    assert_eq!(same, src);

    let mut other = RasterSurface::new(1, 1);
    other.copy_from(&src);
    assert_eq!(other, src);
}

#[test]
fn save_png_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.png");
    let s = RasterSurface::filled(Rect::from_size(4, 3), Rgba8Premul::BLACK);
    s.save_png(&path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 3));
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
}
