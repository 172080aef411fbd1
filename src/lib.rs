//! apng2gif converts animated PNGs into GIF animations.
//!
//! APNG frames are partial tiles placed at an offset, each with a blend rule (`Source` or
//! `Over`) and a disposal rule (`None`, `Background`, `Previous`). GIF consumers here are
//! treated as replace-only, so every output frame is the complete visible canvas.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: APNG bytes -> [`SourceFrame`]s (straight-alpha RGBA tiles + fcTL metadata)
//! 2. **Resolve**: union of all frame rectangles -> overall canvas [`Rect`]
//! 3. **Compose**: [`Compositor`] replays blend/dispose on a persistent canvas and a backup
//!    buffer, quantizing the full canvas once per frame
//! 4. **Encode**: [`AnimationSink`] consumes the frames; [`GifSink`] writes the GIF container
//!
//! All frames are held in memory. A conversion either completes or fails without output.
#![forbid(unsafe_code)]

mod animation;
mod compose;
mod config;
mod decode;
mod encode;
mod foundation;
mod pipeline;
mod quantize;

pub use animation::frame::{
    BlendOp, ComposedAnimation, DisposeOp, GifDisposal, OutputFrame, SourceFrame,
};
pub use compose::canvas::CanvasBuffer;
pub use compose::compositor::{Compositor, compose_frames};
pub use compose::rect::{compute_canvas_rect, frame_rect};
pub use config::ConvertOpts;
pub use decode::apng::decode_apng;
pub use encode::gif::GifSink;
pub use encode::sink::{AnimationSink, InMemorySink, SinkConfig};
pub use foundation::core::{Point, Rect};
pub use foundation::error::{ConvertError, ConvertResult};
pub use pipeline::{
    compose_apng, convert, convert_bytes, convert_file, ensure_parent_dir, write_animation,
};
pub use quantize::drawer::{Drawer, DrawerKind, FloydSteinberg, NearestColor, create_drawer};
pub use quantize::indexed::IndexedImage;
pub use quantize::palette::{MAX_PALETTE_LEN, Palette, TRANSPARENT};
pub use quantize::{QuantizeOpts, SourceImage, quantize};
