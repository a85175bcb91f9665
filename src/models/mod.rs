//! Whisper model catalog and provisioning.
//!
//! Maps model size identifiers to ggml weight files under the local data
//! directory, downloading them from the upstream whisper.cpp repository on
//! first use. Quantized 8-bit (q8_0) builds are used where published so
//! inference runs CPU-only at low memory cost.

pub mod download;

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Model size identifiers accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    /// Parse a size identifier. Case-insensitive; `large-v3` is accepted
    /// as an alias for `large`. Returns `None` for unknown identifiers.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tiny" => Some(ModelSize::Tiny),
            "base" => Some(ModelSize::Base),
            "small" => Some(ModelSize::Small),
            "medium" => Some(ModelSize::Medium),
            "large" | "large-v3" => Some(ModelSize::Large),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }
}

/// Catalog entry for a downloadable model.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub filename: String,
    pub display_name: String,
    pub size_bytes: u64,
    pub sha256: Option<String>,
}

impl ModelInfo {
    /// Catalog lookup for a size identifier.
    ///
    /// large-v3 has no 8-bit build published upstream, so it maps to the
    /// full-precision file.
    pub fn for_size(size: ModelSize) -> Self {
        match size {
            ModelSize::Tiny => ModelInfo {
                filename: "ggml-tiny-q8_0.bin".to_string(),
                display_name: "Tiny Q8".to_string(),
                size_bytes: 43_000_000,
                sha256: None,
            },
            ModelSize::Base => ModelInfo {
                filename: "ggml-base-q8_0.bin".to_string(),
                display_name: "Base Q8".to_string(),
                size_bytes: 81_768_585,
                sha256: Some(
                    "c577b9a86e7e048a0b7eada054f4dd79a56bbfa911fbdacf900ac5b567cbb7d9"
                        .to_string(),
                ),
            },
            ModelSize::Small => ModelInfo {
                filename: "ggml-small-q8_0.bin".to_string(),
                display_name: "Small Q8".to_string(),
                size_bytes: 264_464_607,
                sha256: Some(
                    "49c8fb02b65e6049d5fa6c04f81f53b867b5ec9540406812c643f177317f779f"
                        .to_string(),
                ),
            },
            ModelSize::Medium => ModelInfo {
                filename: "ggml-medium-q8_0.bin".to_string(),
                display_name: "Medium Q8".to_string(),
                size_bytes: 823_000_000,
                sha256: None,
            },
            ModelSize::Large => ModelInfo {
                filename: "ggml-large-v3.bin".to_string(),
                display_name: "Large v3".to_string(),
                size_bytes: 3_095_033_483,
                sha256: Some(
                    "64d182b440b98d5203c4f9bd541544d84c605196c4f7b845dfa11fb23594d1e2"
                        .to_string(),
                ),
            },
        }
    }
}

/// Resolved model argument: a known size identifier or a direct file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Size(ModelSize),
    Path(PathBuf),
}

/// Directory where model weight files are cached.
pub fn models_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("whisper")
}

pub fn get_model_path(filename: &str) -> PathBuf {
    models_dir().join(filename)
}

/// Resolve the model_size argument to a source, without touching the
/// network. Unknown identifiers that are not existing files are an error.
pub fn parse_model_arg(arg: &str) -> Result<ModelSource> {
    if let Some(size) = ModelSize::parse(arg) {
        return Ok(ModelSource::Size(size));
    }

    let path = Path::new(arg);
    if path.exists() {
        return Ok(ModelSource::Path(path.to_path_buf()));
    }

    bail!(
        "Unknown model size '{}'; expected tiny, base, small, medium, large, \
         or a path to a ggml model file",
        arg
    )
}

/// Return the local path for a model source, downloading the weights on
/// first use of a size identifier.
pub fn ensure_model(source: &ModelSource) -> Result<PathBuf> {
    let size = match source {
        ModelSource::Path(path) => return Ok(path.clone()),
        ModelSource::Size(size) => *size,
    };

    let info = ModelInfo::for_size(size);
    let path = get_model_path(&info.filename);
    if path.exists() {
        return Ok(path);
    }

    log::info!(
        "Model {} not cached, downloading {} ({})",
        size.as_str(),
        info.filename,
        format_size(info.size_bytes)
    );

    let last_decile = AtomicU64::new(0);
    let progress = move |downloaded: u64, total: u64| {
        if total == 0 {
            return;
        }
        let decile = downloaded * 10 / total;
        if decile > last_decile.swap(decile, Ordering::Relaxed) {
            log::info!("  downloaded {}%", decile * 10);
        }
    };

    let rt = tokio::runtime::Runtime::new().context("Failed to start download runtime")?;
    rt.block_on(download::download_model(&info, progress))
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{} B", bytes)
    }
}
