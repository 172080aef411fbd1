use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{ConvertError, ConvertResult};
use crate::quantize::QuantizeOpts;
use crate::quantize::drawer::DrawerKind;
use crate::quantize::palette::MAX_PALETTE_LEN;

/// Options for one APNG -> GIF conversion.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOpts {
    /// Maximum colors per frame. Values outside `1..=256` mean 256.
    pub num_colors: u16,
    /// Pixel-to-palette strategy.
    pub drawer: DrawerKind,
    /// GIF repeat count; `None` or `Some(0)` loops forever.
    pub loop_count: Option<u16>,
    /// Inputs with fewer frames are rejected as not animated.
    pub min_frames: usize,
}

impl Default for ConvertOpts {
    fn default() -> Self {
        Self {
            num_colors: MAX_PALETTE_LEN as u16,
            drawer: DrawerKind::FloydSteinberg,
            loop_count: None,
            min_frames: 2,
        }
    }
}

impl ConvertOpts {
    /// Load options from a JSON file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read options '{}'", path.display()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> ConvertResult<Self> {
        serde_json::from_str(text).map_err(|e| ConvertError::config(e.to_string()))
    }

    pub fn quantize_opts(&self) -> QuantizeOpts {
        QuantizeOpts::new(usize::from(self.num_colors), self.drawer)
    }
}
