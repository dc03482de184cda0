use super::Interceptor;
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Writes one markdown file per generated question set.
///
/// Names combine a millisecond timestamp with a per-interceptor sequence
/// number, and files are opened with `create_new`, so an existing recording
/// is never overwritten.
#[derive(Debug)]
pub struct FileInterceptor {
    base_path: PathBuf,
    sequence: AtomicU64,
}

impl FileInterceptor {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl Interceptor for FileInterceptor {
    async fn save(&self, topic: &str, response: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let timestamp = Utc::now();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let filename = format!("generation_{}_{:06}.md", timestamp.format("%Y%m%d_%H%M%S_%3f"), seq);
        let file_path = self.base_path.join(filename);

        fs::create_dir_all(&self.base_path).await?;

        let content = format!("# Topic\n\n{}\n\n# Response\n\n{}\n", topic, response);

        let mut file = OpenOptions::new().write(true).create_new(true).open(&file_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}
