//! Parallel-indexed camera and image filename lists

use crate::error::{DriverError, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Which of the two lists a path comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Camera,
    Image,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Camera => write!(f, "camera"),
            FileKind::Image => write!(f, "image"),
        }
    }
}

/// Camera transform files and image files sharing one index space.
///
/// Index `i` in one list is assumed to be the same frame as index `i` in the
/// other. Nothing checks the pairing beyond warning when the lengths differ.
#[derive(Debug, Clone, Default)]
pub struct FrameCatalog {
    cameras: Vec<PathBuf>,
    images: Vec<PathBuf>,
}

impl FrameCatalog {
    pub fn new(cameras: Vec<PathBuf>, images: Vec<PathBuf>) -> Self {
        let catalog = Self { cameras, images };
        catalog.check_alignment();
        catalog
    }

    /// List `camera_dir` for files ending in `camera_ext` and `image_dir`
    /// for files ending in `image_ext`, each sorted by path.
    #[tracing::instrument(
        skip_all,
        fields(
            cameras = %camera_dir.as_ref().display(),
            images = %image_dir.as_ref().display()
        )
    )]
    pub fn from_dirs(
        camera_dir: impl AsRef<Path>,
        camera_ext: &str,
        image_dir: impl AsRef<Path>,
        image_ext: &str,
    ) -> Result<Self> {
        let cameras = list_files(camera_dir.as_ref(), camera_ext)?;
        let images = list_files(image_dir.as_ref(), image_ext)?;
        info!("Found {} camera files and {} image files", cameras.len(), images.len());
        Ok(Self::new(cameras, images))
    }

    /// Camera transform file for `index`
    pub fn camera(&self, index: u32) -> Result<&Path> {
        lookup(&self.cameras, FileKind::Camera, index)
    }

    /// Image file for `index`
    pub fn image(&self, index: u32) -> Result<&Path> {
        lookup(&self.images, FileKind::Image, index)
    }

    /// Number of indices valid in both lists
    pub fn len(&self) -> usize {
        self.cameras.len().min(self.images.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_alignment(&self) {
        if self.cameras.len() != self.images.len() {
            warn!(
                "Camera and image lists differ in length ({} vs {}); pairing by index may be wrong",
                self.cameras.len(),
                self.images.len()
            );
        }
    }
}

fn lookup(paths: &[PathBuf], kind: FileKind, index: u32) -> Result<&Path> {
    paths
        .get(index as usize)
        .map(PathBuf::as_path)
        .ok_or(DriverError::FrameOutOfRange {
            kind,
            index,
            len: paths.len(),
        })
}

/// Regular files directly in `dir` whose extension matches `ext`
/// (case-insensitive; a leading `*.` or `.` is ignored).
///
/// Hidden files (`._00000.png` sidecars and the like) are skipped, matching
/// what a `*.ext` glob lists.
fn list_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let ext = ext.trim_start_matches('*').trim_start_matches('.');
    let catalog_err = |source| DriverError::Catalog {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(catalog_err)? {
        let path = entry.map_err(catalog_err)?.path();
        let hidden = path
            .file_name()
            .is_some_and(|name| name.as_encoded_bytes().starts_with(b"."));
        let matches = !hidden
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if matches && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    debug!("Listed {} *.{} files in {}", files.len(), ext, dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_from_dirs_filters_and_sorts() {
        let dir = tempdir().unwrap();
        let cams = dir.path().join("cameras_KRT");
        let imgs = dir.path().join("video");
        fs::create_dir_all(&cams).unwrap();
        fs::create_dir_all(&imgs).unwrap();

        for name in ["frame_002.txt", "frame_000.txt", "frame_001.TXT", "notes.md"] {
            File::create(cams.join(name)).unwrap();
        }
        for name in ["frame_001.png", "frame_000.png", "frame_002.png"] {
            File::create(imgs.join(name)).unwrap();
        }
        fs::create_dir_all(imgs.join("nested.png")).unwrap();

        let catalog = FrameCatalog::from_dirs(&cams, "*.txt", &imgs, "png").unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.camera(0).unwrap(), cams.join("frame_000.txt"));
        assert_eq!(catalog.camera(1).unwrap(), cams.join("frame_001.TXT"));
        assert_eq!(catalog.image(2).unwrap(), imgs.join("frame_002.png"));
    }

    #[test]
    fn test_out_of_range() {
        let catalog = FrameCatalog::new(vec![PathBuf::from("a.txt")], vec![]);
        assert!(catalog.camera(0).is_ok());

        match catalog.image(0) {
            Err(DriverError::FrameOutOfRange { kind, index, len }) => {
                assert_eq!(kind, FileKind::Image);
                assert_eq!(index, 0);
                assert_eq!(len, 0);
            }
            other => panic!("expected FrameOutOfRange, got {other:?}"),
        }
        assert!(matches!(catalog.camera(1), Err(DriverError::FrameOutOfRange { .. })));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let result = FrameCatalog::from_dirs(&missing, "txt", dir.path(), "png");
        match result {
            Err(DriverError::Catalog { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Catalog error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_directories_are_not_errors() {
        let dir = tempdir().unwrap();
        let catalog = FrameCatalog::from_dirs(dir.path(), "txt", dir.path(), "png").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_hidden_files_are_skipped() {
        let dir = tempdir().unwrap();
        let cams = dir.path().join("cameras_KRT");
        let imgs = dir.path().join("video");
        fs::create_dir_all(&cams).unwrap();
        fs::create_dir_all(&imgs).unwrap();

        for i in 0..3 {
            File::create(cams.join(format!("{i:05}.txt"))).unwrap();
            File::create(imgs.join(format!("{i:05}.png"))).unwrap();
        }
        File::create(imgs.join("._00000.png")).unwrap();
        File::create(cams.join(".00001.txt")).unwrap();

        let catalog = FrameCatalog::from_dirs(&cams, "txt", &imgs, "png").unwrap();
        assert_eq!(catalog.len(), 3);
        for i in 0..3u32 {
            assert_eq!(catalog.camera(i).unwrap(), cams.join(format!("{i:05}.txt")));
            assert_eq!(catalog.image(i).unwrap(), imgs.join(format!("{i:05}.png")));
        }
        assert!(catalog.image(3).is_err());
    }
}
