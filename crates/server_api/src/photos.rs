use std::path::{Path, PathBuf};

use shared::protocol::PhotoStatus;
use tracing::warn;

/// Attraction photos on disk, resolved relative to the configured images dir.
#[derive(Debug, Clone)]
pub struct PhotoLibrary {
    root: PathBuf,
}

impl PhotoLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads the image header off the blocking pool. Never fails: problems
    /// come back as a status for the card to render.
    pub async fn probe(&self, file_name: &str) -> PhotoStatus {
        let path = self.root.join(file_name);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            warn!(path = %path.display(), "image not found");
            return PhotoStatus::Missing;
        }

        let probed = tokio::task::spawn_blocking({
            let path = path.clone();
            move || image::image_dimensions(&path)
        })
        .await;

        match probed {
            Ok(Ok((width, height))) => PhotoStatus::Available { width, height },
            Ok(Err(err)) => {
                warn!(path = %path.display(), error = %err, "error loading image");
                PhotoStatus::Unreadable {
                    reason: err.to_string(),
                }
            }
            Err(err) => PhotoStatus::Unreadable {
                reason: err.to_string(),
            },
        }
    }
}
