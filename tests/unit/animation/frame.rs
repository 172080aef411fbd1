use super::*;

#[test]
fn delay_rounds_to_hundredths() {
    let img = RgbaImage::new(1, 1);
    let f = SourceFrame::new(img, Point::ZERO);
    assert_eq!(f.clone().with_duration_secs(0.1).delay_centis(), 10);
    assert_eq!(f.clone().with_duration_secs(0.333).delay_centis(), 33);
    assert_eq!(f.clone().with_duration_secs(0.005).delay_centis(), 1);
    assert_eq!(f.clone().with_duration_secs(-1.0).delay_centis(), 0);
    assert_eq!(f.with_duration_secs(f64::NAN).delay_centis(), 0);
}

#[test]
fn dispose_maps_to_gif_tag() {
    assert_eq!(GifDisposal::from(DisposeOp::None), GifDisposal::NoDisposal);
    assert_eq!(
        GifDisposal::from(DisposeOp::Background),
        GifDisposal::RestoreBackground
    );
    assert_eq!(
        GifDisposal::from(DisposeOp::Previous),
        GifDisposal::RestorePrevious
    );
}

#[test]
fn defaults_are_over_and_none() {
    let f = SourceFrame::new(RgbaImage::new(3, 2), Point::new(4, 1));
    assert_eq!(f.blend, BlendOp::Over);
    assert_eq!(f.dispose, DisposeOp::None);
    assert_eq!(f.rect().unwrap(), Rect::new(4, 1, 7, 3));
}
