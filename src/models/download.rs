//! Streaming model download with checksum verification.

use anyhow::{bail, Context, Result};
use futures_util::StreamExt;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::{models_dir, ModelInfo};

const HUGGINGFACE_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/";

/// Verify a file against an expected SHA-256 digest (lowercase hex).
pub fn verify_checksum(path: &Path, expected: &str) -> Result<()> {
    let mut file = fs::File::open(path)
        .with_context(|| format!("Failed to open file for verification: {}", path.display()))?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher).context("Failed to hash file")?;
    let hash = format!("{:x}", hasher.finalize());
    if hash != expected {
        bail!(
            "Checksum mismatch for {}: expected {}, got {}",
            path.display(),
            expected,
            hash
        );
    }
    Ok(())
}

/// Download a model file into the models directory.
///
/// Streams into a `.downloading` temp file, verifies the checksum when the
/// catalog pins one, then renames into place so a partial download never
/// shadows a valid model.
pub async fn download_model<F>(info: &ModelInfo, progress_callback: F) -> Result<PathBuf>
where
    F: Fn(u64, u64),
{
    let url = format!("{}{}", HUGGINGFACE_BASE_URL, info.filename);
    let dir = models_dir();

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let temp_path = dir.join(format!("{}.downloading", info.filename));
    let final_path = dir.join(&info.filename);

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Failed to connect: {}", url))?;

    if !response.status().is_success() {
        bail!(
            "Download failed for {}: HTTP {}",
            info.filename,
            response.status()
        );
    }

    let total_size = response.content_length().unwrap_or(info.size_bytes);
    let mut downloaded: u64 = 0;

    let mut file = fs::File::create(&temp_path)
        .with_context(|| format!("Failed to create file: {}", temp_path.display()))?;

    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Download stream error")?;
        std::io::Write::write_all(&mut file, &chunk).context("Failed to write model data")?;

        downloaded += chunk.len() as u64;
        progress_callback(downloaded, total_size);
    }

    drop(file);

    if let Some(expected) = &info.sha256 {
        if let Err(e) = verify_checksum(&temp_path, expected) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
    }

    fs::rename(&temp_path, &final_path).with_context(|| {
        format!(
            "Failed to rename {} -> {}",
            temp_path.display(),
            final_path.display()
        )
    })?;

    Ok(final_path)
}
