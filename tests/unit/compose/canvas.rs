use super::*;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

#[test]
fn new_buffer_is_transparent() {
    let c = CanvasBuffer::new(Rect::new(2, 2, 6, 5));
    assert_eq!(c.pixels().dimensions(), (4, 3));
    assert!(c.pixels().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    assert_eq!(c.pixel(Point::new(1, 2)), None);
}

#[test]
fn draw_over_uses_absolute_coordinates_and_clips() {
    let mut c = CanvasBuffer::new(Rect::new(10, 10, 14, 14));
    let tile = RgbaImage::from_pixel(3, 3, Rgba(RED));
    c.draw_over(&tile, Point::new(12, 12));

    assert_eq!(c.pixel(Point::new(12, 12)), Some(RED));
    assert_eq!(c.pixel(Point::new(13, 13)), Some(RED));
    assert_eq!(c.pixel(Point::new(11, 11)), Some([0, 0, 0, 0]));
}

#[test]
fn draw_over_transparent_pixels_keep_destination() {
    let mut c = CanvasBuffer::new(Rect::new(0, 0, 2, 1));
    c.draw_over(&RgbaImage::from_pixel(2, 1, Rgba(BLUE)), Point::ZERO);
    let mut tile = RgbaImage::new(2, 1);
    tile.put_pixel(1, 0, Rgba(RED));
    c.draw_over(&tile, Point::ZERO);

    assert_eq!(c.pixel(Point::new(0, 0)), Some(BLUE));
    assert_eq!(c.pixel(Point::new(1, 0)), Some(RED));
}

#[test]
fn clear_rect_only_touches_the_rect() {
    let mut c = CanvasBuffer::new(Rect::new(0, 0, 3, 3));
    c.draw_over(&RgbaImage::from_pixel(3, 3, Rgba(RED)), Point::ZERO);
    c.clear_rect(Rect::new(1, 1, 5, 5));

    assert_eq!(c.pixel(Point::new(0, 0)), Some(RED));
    assert_eq!(c.pixel(Point::new(2, 0)), Some(RED));
    assert_eq!(c.pixel(Point::new(1, 1)), Some([0, 0, 0, 0]));
    assert_eq!(c.pixel(Point::new(2, 2)), Some([0, 0, 0, 0]));
}

#[test]
fn copy_from_requires_matching_rects() {
    let mut a = CanvasBuffer::new(Rect::new(0, 0, 2, 2));
    let mut b = CanvasBuffer::new(Rect::new(0, 0, 2, 2));
    b.draw_over(&RgbaImage::from_pixel(1, 1, Rgba(RED)), Point::new(1, 0));
    a.copy_from(&b).unwrap();
    assert_eq!(a, b);

    let c = CanvasBuffer::new(Rect::new(1, 0, 3, 2));
    assert!(a.copy_from(&c).is_err());
}
