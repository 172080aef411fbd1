use super::*;

fn write_apng(sep_default: bool) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut enc = png::Encoder::new(&mut out, 4, 4);
        enc.set_color(png::ColorType::Rgba);
        enc.set_depth(png::BitDepth::Eight);
        enc.set_animated(2, 0).unwrap();
        enc.set_sep_def_img(sep_default).unwrap();
        let mut w = enc.write_header().unwrap();

        if sep_default {
            w.write_image_data(&[9u8; 4 * 4 * 4]).unwrap();
        }

        w.set_frame_delay(1, 10).unwrap();
        w.set_dispose_op(png::DisposeOp::Background).unwrap();
        w.set_blend_op(png::BlendOp::Source).unwrap();
        w.write_image_data(&[255u8; 4 * 4 * 4]).unwrap();

        w.set_frame_dimension(2, 1).unwrap();
        w.set_frame_position(1, 2).unwrap();
        w.set_frame_delay(3, 0).unwrap();
        w.set_dispose_op(png::DisposeOp::Previous).unwrap();
        w.set_blend_op(png::BlendOp::Over).unwrap();
        w.write_image_data(&[0, 0, 255, 128, 0, 0, 255, 128]).unwrap();
        w.finish().unwrap();
    }
    out
}

#[test]
fn decodes_frames_with_fctl_metadata() {
    let frames = decode_apng(write_apng(false).as_slice()).unwrap();
    assert_eq!(frames.len(), 2);

    let f0 = &frames[0];
    assert_eq!((f0.width(), f0.height()), (4, 4));
    assert_eq!(f0.offset, Point::ZERO);
    assert_eq!(f0.blend, BlendOp::Source);
    assert_eq!(f0.dispose, DisposeOp::Background);
    assert!((f0.duration_secs - 0.1).abs() < 1e-9);
    assert_eq!(f0.image.get_pixel(0, 0).0, [255, 255, 255, 255]);

    let f1 = &frames[1];
    assert_eq!((f1.width(), f1.height()), (2, 1));
    assert_eq!(f1.offset, Point::new(1, 2));
    assert_eq!(f1.blend, BlendOp::Over);
    assert_eq!(f1.dispose, DisposeOp::Previous);
    assert_eq!(f1.delay_centis(), 3);
    assert_eq!(f1.image.get_pixel(1, 0).0, [0, 0, 255, 128]);
}

#[test]
fn hidden_default_image_is_skipped() {
    let frames = decode_apng(write_apng(true).as_slice()).unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].image.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn still_png_is_a_single_frame() {
    let mut out = Vec::new();
    {
        let mut enc = png::Encoder::new(&mut out, 2, 1);
        enc.set_color(png::ColorType::Rgb);
        enc.set_depth(png::BitDepth::Eight);
        let mut w = enc.write_header().unwrap();
        w.write_image_data(&[1, 2, 3, 4, 5, 6]).unwrap();
        w.finish().unwrap();
    }
    let frames = decode_apng(out.as_slice()).unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].image.get_pixel(1, 0).0, [4, 5, 6, 255]);
}

#[test]
fn garbage_is_an_input_format_error() {
    let err = decode_apng(&b"definitely not a png"[..]).unwrap_err();
    assert!(matches!(err, ConvertError::InputFormat(_)));
}

#[test]
fn zero_denominator_means_hundredths() {
    assert!((delay_secs(7, 0) - 0.07).abs() < 1e-12);
    assert!((delay_secs(1, 4) - 0.25).abs() < 1e-12);
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &b in bytes {
        crc ^= u32::from(b);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

/// Overwrite bytes inside the `nth` chunk of `kind` and refresh its CRC.
fn patch_chunk(png: &mut [u8], kind: &[u8; 4], nth: usize, at: usize, bytes: &[u8]) {
    let mut pos = 8;
    let mut seen = 0;
    while pos + 8 <= png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let data = pos + 8;
        if &png[pos + 4..data] == kind {
            if seen == nth {
                png[data + at..data + at + bytes.len()].copy_from_slice(bytes);
                let crc = crc32(&png[pos + 4..data + len]);
                png[data + len..data + len + 4].copy_from_slice(&crc.to_be_bytes());
                return;
            }
            seen += 1;
        }
        pos = data + len + 4;
    }
    panic!("chunk {kind:?} #{nth} not found");
}

#[test]
fn inflated_frame_count_is_an_input_format_error() {
    let mut bytes = write_apng(false);
    patch_chunk(&mut bytes, b"acTL", 0, 0, &u32::MAX.to_be_bytes());
    let err = decode_apng(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, ConvertError::InputFormat(_)), "{err:?}");
}

#[test]
fn frame_outside_header_size_is_rejected() {
    let mut bytes = write_apng(false);
    // Second fcTL: 2x1 frame moved to x = 3 on a 4-wide image.
    patch_chunk(&mut bytes, b"fcTL", 1, 12, &3u32.to_be_bytes());
    let err = decode_apng(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, ConvertError::InputFormat(_)), "{err:?}");
}
