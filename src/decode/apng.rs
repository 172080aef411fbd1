use std::io::Read;

use image::RgbaImage;

use crate::animation::frame::{BlendOp, DisposeOp, SourceFrame};
use crate::foundation::core::Point;
use crate::foundation::error::{ConvertError, ConvertResult};

const MAX_RESERVED_FRAMES: u32 = 1024;

/// Decode every animation frame of an APNG stream into straight-alpha RGBA tiles.
///
/// The default image counts as a frame only when an `fcTL` chunk precedes it. A PNG without
/// `acTL` decodes to its single still image. Frames whose `fcTL` region falls outside the
/// header size are rejected by the `png` reader and surface as [`ConvertError::InputFormat`].
#[tracing::instrument(skip(r))]
pub fn decode_apng<R: Read>(r: R) -> ConvertResult<Vec<SourceFrame>> {
    let mut decoder = png::Decoder::new(r);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(input_err)?;

    let info = reader.info();
    let animation = info.animation_control;
    let default_is_frame = info.frame_control.is_some();
    let (screen_w, screen_h) = (info.width, info.height);

    let mut buf = vec![0u8; reader.output_buffer_size()];

    let Some(actl) = animation else {
        let out = reader.next_frame(&mut buf).map_err(input_err)?;
        let image = to_rgba8(&buf, &out)?;
        return Ok(vec![SourceFrame::new(image, Point::ZERO)]);
    };

    // acTL is untrusted; a short stream fails in `next_frame` instead.
    let mut frames = Vec::with_capacity(actl.num_frames.min(MAX_RESERVED_FRAMES) as usize);
    if !default_is_frame {
        // Hidden default image; consume it without emitting a frame.
        reader.next_frame(&mut buf).map_err(input_err)?;
    }

    for _ in 0..actl.num_frames {
        let out = reader.next_frame(&mut buf).map_err(input_err)?;
        let fctl = reader.info().frame_control.ok_or_else(|| {
            ConvertError::input_format("animation frame is missing its fcTL chunk")
        })?;
        let image = to_rgba8(&buf, &out)?;
        frames.push(source_frame(image, &fctl)?);
    }

    tracing::debug!(
        frames = frames.len(),
        width = screen_w,
        height = screen_h,
        plays = actl.num_plays,
        "decoded apng"
    );
    Ok(frames)
}

fn source_frame(image: RgbaImage, fctl: &png::FrameControl) -> ConvertResult<SourceFrame> {
    let x = i32::try_from(fctl.x_offset)
        .map_err(|_| ConvertError::input_format("fcTL x_offset out of range"))?;
    let y = i32::try_from(fctl.y_offset)
        .map_err(|_| ConvertError::input_format("fcTL y_offset out of range"))?;
    Ok(SourceFrame::new(image, Point::new(x, y))
        .with_blend(blend_op(fctl.blend_op))
        .with_dispose(dispose_op(fctl.dispose_op))
        .with_duration_secs(delay_secs(fctl.delay_num, fctl.delay_den)))
}

/// Frame delay in seconds. A zero denominator means hundredths (APNG rule).
pub(crate) fn delay_secs(num: u16, den: u16) -> f64 {
    let den = if den == 0 { 100 } else { den };
    f64::from(num) / f64::from(den)
}

pub(crate) fn blend_op(op: png::BlendOp) -> BlendOp {
    match op {
        png::BlendOp::Source => BlendOp::Source,
        png::BlendOp::Over => BlendOp::Over,
    }
}

pub(crate) fn dispose_op(op: png::DisposeOp) -> DisposeOp {
    match op {
        png::DisposeOp::None => DisposeOp::None,
        png::DisposeOp::Background => DisposeOp::Background,
        png::DisposeOp::Previous => DisposeOp::Previous,
    }
}

fn to_rgba8(buf: &[u8], out: &png::OutputInfo) -> ConvertResult<RgbaImage> {
    if out.bit_depth != png::BitDepth::Eight {
        return Err(ConvertError::input_format(format!(
            "unsupported bit depth after normalization: {:?}",
            out.bit_depth
        )));
    }
    let (w, h) = (out.width as usize, out.height as usize);
    let data = &buf[..out.line_size * h];

    let mut rgba = Vec::with_capacity(w * h * 4);
    for row in data.chunks_exact(out.line_size) {
        match out.color_type {
            png::ColorType::Rgba => rgba.extend_from_slice(&row[..w * 4]),
            png::ColorType::Rgb => {
                for px in row[..w * 3].chunks_exact(3) {
                    rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
            }
            png::ColorType::GrayscaleAlpha => {
                for px in row[..w * 2].chunks_exact(2) {
                    rgba.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
                }
            }
            png::ColorType::Grayscale => {
                for &g in &row[..w] {
                    rgba.extend_from_slice(&[g, g, g, 255]);
                }
            }
            png::ColorType::Indexed => {
                return Err(ConvertError::input_format(
                    "indexed output after palette expansion",
                ));
            }
        }
    }

    RgbaImage::from_raw(out.width, out.height, rgba)
        .ok_or_else(|| ConvertError::input_format("decoded frame buffer has the wrong size"))
}

fn input_err(err: png::DecodingError) -> ConvertError {
    ConvertError::input_format(err.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/decode/apng.rs"]
mod tests;
