//! Media staging pipeline.
//!
//! User-selected files are staged before submission: images are
//! compressed off the async runtime's worker threads, and a file whose
//! compression fails is staged as its original bytes rather than
//! blocking the user. Batches run concurrently; the whole-batch
//! in-flight flag lets the submission controller refuse to submit while
//! compression is still running.

mod compress;

pub use compress::MAX_DIMENSION;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::join_all;
use log::{info, warn};

/// A file held client-side, pending inclusion in a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// False when compression failed and the original bytes are staged.
    pub compressed: bool,
}

pub struct MediaStaging {
    in_flight: Arc<AtomicUsize>,
}

/// Marks a batch as in flight for its lifetime.
pub struct BatchGuard {
    counter: Arc<AtomicUsize>,
}

impl Drop for BatchGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Default for MediaStaging {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaStaging {
    pub fn new() -> Self {
        Self {
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of staging batches currently compressing.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn begin_batch(&self) -> BatchGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        BatchGuard {
            counter: self.in_flight.clone(),
        }
    }

    /// Stage a single file, compressing it when possible.
    pub async fn stage(&self, path: &Path) -> Result<StagedFile> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(compress_staged(name, bytes).await)
    }

    /// Stage a batch concurrently, preserving input order. A single
    /// file's compression failure degrades that file only; a read
    /// failure aborts the batch since the path itself is wrong.
    pub async fn stage_all(&self, paths: &[PathBuf]) -> Result<Vec<StagedFile>> {
        let _guard = self.begin_batch();
        let staged = join_all(paths.iter().map(|path| self.stage(path))).await;
        staged.into_iter().collect()
    }

    /// Stage a gallery batch and assign collision-resistant names so
    /// originals sharing a filename cannot clobber each other on the
    /// server.
    pub async fn stage_gallery(&self, paths: &[PathBuf]) -> Result<Vec<StagedFile>> {
        let mut staged = self.stage_all(paths).await?;
        let stamp = chrono::Utc::now().timestamp_millis();
        for (index, file) in staged.iter_mut().enumerate() {
            let ext = Path::new(&file.name)
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_else(|| "jpg".to_string());
            file.name = format!("gallery-{stamp}-{index}.{ext}");
        }
        Ok(staged)
    }
}

async fn compress_staged(name: String, bytes: Vec<u8>) -> StagedFile {
    let original_len = bytes.len();
    let input = bytes.clone();
    let result = tokio::task::spawn_blocking(move || compress::compress_bytes(&input)).await;

    match result {
        Ok(Ok(jpeg)) => {
            info!(
                "compressed {name}: {:.2}MB -> {:.2}MB",
                original_len as f64 / 1024.0 / 1024.0,
                jpeg.len() as f64 / 1024.0 / 1024.0
            );
            StagedFile {
                name,
                content_type: "image/jpeg".to_string(),
                bytes: jpeg,
                compressed: true,
            }
        }
        Ok(Err(err)) => {
            warn!("compression failed for {name}: {err}; staging original bytes");
            fallback(name, bytes)
        }
        Err(err) => {
            warn!("compression task failed for {name}: {err}; staging original bytes");
            fallback(name, bytes)
        }
    }
}

fn fallback(name: String, bytes: Vec<u8>) -> StagedFile {
    let content_type = content_type_for(&name).to_string();
    StagedFile {
        name,
        content_type,
        bytes,
        compressed: false,
    }
}

fn content_type_for(name: &str) -> &'static str {
    match Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_gradient_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn stage_compresses_an_oversized_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_gradient_png(dir.path(), "site.png", 3000, 2000);

        let staging = MediaStaging::new();
        let staged = staging.stage(&path).await.unwrap();

        assert!(staged.compressed);
        assert_eq!(staged.content_type, "image/jpeg");
        assert_eq!(staged.name, "site.png");
        let reloaded = image::load_from_memory(&staged.bytes).unwrap();
        assert!(reloaded.width().max(reloaded.height()) <= MAX_DIMENSION);
    }

    #[tokio::test]
    async fn batch_with_one_failure_stages_all_three() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_gradient_png(dir.path(), "a.png", 2400, 1600);
        let broken = dir.path().join("broken.jpg");
        std::fs::write(&broken, b"not an image at all").unwrap();
        let c = write_gradient_png(dir.path(), "c.png", 2400, 1600);

        let staging = MediaStaging::new();
        let staged = staging
            .stage_all(&[a, broken.clone(), c])
            .await
            .unwrap();

        assert_eq!(staged.len(), 3);
        assert!(staged[0].compressed);
        assert!(staged[2].compressed);
        // The failed file is exactly its original input, untagged.
        assert!(!staged[1].compressed);
        assert_eq!(staged[1].bytes, std::fs::read(&broken).unwrap());
        assert_eq!(staging.in_flight(), 0);
    }

    #[tokio::test]
    async fn gallery_names_are_collision_resistant() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_gradient_png(dir.path(), "photo.png", 800, 600);
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let b = write_gradient_png(&sub, "photo.png", 800, 600);

        let staging = MediaStaging::new();
        let staged = staging.stage_gallery(&[a, b]).await.unwrap();

        assert_eq!(staged.len(), 2);
        assert_ne!(staged[0].name, staged[1].name);
        assert!(staged[0].name.starts_with("gallery-"));
        assert!(staged[0].name.ends_with(".png"));
    }

    #[tokio::test]
    async fn missing_file_aborts_the_batch() {
        let staging = MediaStaging::new();
        let err = staging
            .stage_all(&[PathBuf::from("/nonexistent/nope.png")])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
        assert_eq!(staging.in_flight(), 0);
    }

    #[test]
    fn batch_guard_tracks_in_flight() {
        let staging = MediaStaging::new();
        assert_eq!(staging.in_flight(), 0);
        let guard = staging.begin_batch();
        assert_eq!(staging.in_flight(), 1);
        drop(guard);
        assert_eq!(staging.in_flight(), 0);
    }
}
