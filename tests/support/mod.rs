//! Builders for APNG fixtures encoded in memory.
#![allow(dead_code)]

pub struct FrameSpec {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub rgba: [u8; 4],
    pub delay: (u16, u16),
    pub dispose: png::DisposeOp,
    pub blend: png::BlendOp,
}

impl FrameSpec {
    pub fn solid(x: u32, y: u32, width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rgba,
            delay: (1, 10),
            dispose: png::DisposeOp::None,
            blend: png::BlendOp::Over,
        }
    }

    pub fn delay(mut self, num: u16, den: u16) -> Self {
        self.delay = (num, den);
        self
    }

    pub fn dispose(mut self, op: png::DisposeOp) -> Self {
        self.dispose = op;
        self
    }

    pub fn blend(mut self, op: png::BlendOp) -> Self {
        self.blend = op;
        self
    }
}

/// Encode `frames` as an APNG whose default image is the first frame.
///
/// The first frame must cover the whole `width x height` image at (0, 0).
pub fn encode_apng(width: u32, height: u32, frames: &[FrameSpec]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut enc = png::Encoder::new(&mut out, width, height);
        enc.set_color(png::ColorType::Rgba);
        enc.set_depth(png::BitDepth::Eight);
        enc.set_animated(frames.len() as u32, 0).unwrap();
        let mut w = enc.write_header().unwrap();
        for f in frames {
            w.reset_frame_position().unwrap();
            w.set_frame_dimension(f.width, f.height).unwrap();
            w.set_frame_position(f.x, f.y).unwrap();
            w.set_frame_delay(f.delay.0, f.delay.1).unwrap();
            w.set_dispose_op(f.dispose).unwrap();
            w.set_blend_op(f.blend).unwrap();
            let data = f.rgba.repeat((f.width * f.height) as usize);
            w.write_image_data(&data).unwrap();
        }
        w.finish().unwrap();
    }
    out
}

/// Encode a single still PNG.
pub fn encode_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut enc = png::Encoder::new(&mut out, width, height);
        enc.set_color(png::ColorType::Rgba);
        enc.set_depth(png::BitDepth::Eight);
        let mut w = enc.write_header().unwrap();
        w.write_image_data(&rgba.repeat((width * height) as usize))
            .unwrap();
        w.finish().unwrap();
    }
    out
}

pub struct DecodedGif {
    pub width: u16,
    pub height: u16,
    pub frames: Vec<gif::Frame<'static>>,
}

/// Decode a GIF keeping palette indices.
pub fn decode_gif(bytes: &[u8]) -> DecodedGif {
    let mut opts = gif::DecodeOptions::new();
    opts.set_color_output(gif::ColorOutput::Indexed);
    let mut dec = opts.read_info(bytes).unwrap();
    let (width, height) = (dec.width(), dec.height());
    let mut frames = Vec::new();
    while let Some(f) = dec.read_next_frame().unwrap() {
        frames.push(f.clone());
    }
    DecodedGif {
        width,
        height,
        frames,
    }
}

/// RGB of the palette entry used by pixel `i` of `frame`.
pub fn rgb_at(frame: &gif::Frame<'_>, i: usize) -> [u8; 3] {
    let idx = usize::from(frame.buffer[i]);
    let pal = frame.palette.as_ref().unwrap();
    [pal[idx * 3], pal[idx * 3 + 1], pal[idx * 3 + 2]]
}
