use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context as _;

use crate::animation::frame::ComposedAnimation;
use crate::compose::compositor::compose_frames;
use crate::compose::rect::compute_canvas_rect;
use crate::config::ConvertOpts;
use crate::decode::apng::decode_apng;
use crate::encode::gif::GifSink;
use crate::encode::sink::{AnimationSink, SinkConfig};
use crate::foundation::error::{ConvertError, ConvertResult};

/// Decode an APNG stream and composite it into full-canvas indexed frames.
#[tracing::instrument(skip(r, opts))]
pub fn compose_apng<R: Read>(r: R, opts: &ConvertOpts) -> ConvertResult<ComposedAnimation> {
    let frames = decode_apng(r)?;
    let min_frames = opts.min_frames.max(1);
    if frames.len() < min_frames {
        return Err(ConvertError::input_format(format!(
            "not an animation: {} frame(s), need at least {min_frames}",
            frames.len()
        )));
    }

    let full = compute_canvas_rect(&frames)?;
    compose_frames(&frames, full, &opts.quantize_opts())
}

/// Push a composed animation through `sink`: `begin`, every frame in order, `end`.
pub fn write_animation(
    anim: &ComposedAnimation,
    loop_count: Option<u16>,
    sink: &mut dyn AnimationSink,
) -> ConvertResult<()> {
    sink.begin(SinkConfig {
        canvas: anim.canvas,
        frame_count: anim.len(),
        loop_count,
    })?;
    for frame in &anim.frames {
        sink.push_frame(frame)?;
    }
    sink.end()
}

/// Convert APNG bytes from `r` into a GIF written to `w`.
///
/// The whole GIF is encoded into memory before anything reaches `w`, so a failing conversion
/// writes nothing.
pub fn convert<R: Read, W: Write>(r: R, mut w: W, opts: &ConvertOpts) -> ConvertResult<()> {
    let bytes = convert_bytes(r, opts)?;
    w.write_all(&bytes).context("write gif output")?;
    w.flush().context("flush gif output")?;
    Ok(())
}

/// Convert APNG bytes from `r` into an in-memory GIF.
pub fn convert_bytes<R: Read>(r: R, opts: &ConvertOpts) -> ConvertResult<Vec<u8>> {
    let anim = compose_apng(r, opts)?;
    let mut sink = GifSink::new(Vec::new());
    write_animation(&anim, opts.loop_count, &mut sink)?;
    let bytes = sink.into_inner()?;

    tracing::info!(
        frames = anim.len(),
        width = anim.canvas.width(),
        height = anim.canvas.height(),
        bytes = bytes.len(),
        "converted apng to gif"
    );
    Ok(bytes)
}

/// Convert the file at `in_path` and write the GIF to `out_path`.
///
/// Output goes to a sibling temporary file that is renamed into place only after the
/// conversion succeeded; on failure no file is left at `out_path`.
#[tracing::instrument(
    skip(in_path, out_path, opts),
    fields(input = %in_path.display(), output = %out_path.display())
)]
pub fn convert_file(in_path: &Path, out_path: &Path, opts: &ConvertOpts) -> ConvertResult<()> {
    let input = std::fs::File::open(in_path)
        .with_context(|| format!("open input '{}'", in_path.display()))?;
    let bytes = convert_bytes(std::io::BufReader::new(input), opts)?;

    ensure_parent_dir(out_path)?;
    let tmp = tmp_path(out_path);
    let written = std::fs::write(&tmp, &bytes)
        .with_context(|| format!("write '{}'", tmp.display()))
        .and_then(|()| {
            std::fs::rename(&tmp, out_path).with_context(|| {
                format!("move '{}' to '{}'", tmp.display(), out_path.display())
            })
        });
    if let Err(err) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> ConvertResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn tmp_path(out_path: &Path) -> std::path::PathBuf {
    let mut name = out_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "output.gif".into());
    name.push(format!(".{}.tmp", std::process::id()));
    out_path.with_file_name(name)
}
