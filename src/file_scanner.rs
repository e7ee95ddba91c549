use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Combined size in bytes of the given photos
pub fn total_size(photos: &[PhotoFile]) -> u64 {
    photos.iter().map(|photo| photo.size).sum()
}

pub struct FileScanner {
    photo_paths: Vec<PathBuf>,
}

impl FileScanner {
    pub fn new(photo_paths: Vec<PathBuf>) -> Self {
        Self { photo_paths }
    }

    /// List the JPEG files directly inside each photo directory, sorted by path
    pub fn scan(&self) -> Vec<PhotoFile> {
        let mut photos = Vec::new();

        for root_path in &self.photo_paths {
            if !root_path.is_dir() {
                warn!("Photo directory does not exist: {}", root_path.display());
                continue;
            }

            info!("Scanning directory: {}", root_path.display());

            Self::collect_directory(root_path, &mut photos);
        }

        photos.sort_by(|a, b| a.path.cmp(&b.path));

        info!(
            "Found {} photos ({:.1} MB)",
            photos.len(),
            total_size(&photos) as f64 / (1024.0 * 1024.0)
        );
        photos
    }

    fn collect_directory(dir: &Path, photos: &mut Vec<PhotoFile>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to read directory {}: {}", dir.display(), e);
                return;
            }
        };

        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() || !Self::is_supported_file(&path) {
                continue;
            }

            match entry.metadata() {
                Ok(metadata) => photos.push(PhotoFile {
                    path,
                    size: metadata.len(),
                }),
                Err(e) => warn!("Failed to read metadata for {}: {}", path.display(), e),
            }
        }
    }

    fn is_supported_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg"))
            .unwrap_or(false)
    }
}
