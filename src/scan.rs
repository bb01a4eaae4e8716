//! Filesystem scanning and manifest generation.
//!
//! Stage 1 of the pipeline. Walks a content directory, groups photos into
//! albums and reads every photo's pixel dimensions, producing the ordered
//! photo lists the layout stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Gallery configuration (optional)
//! ├── 010-Landscapes/              # Album: a directory holding photos
//! │   ├── 001-dawn.jpg
//! │   ├── 002-sunset.jpg
//! │   └── 010-mountains.jpg        # Non-contiguous numbering OK
//! ├── 020-Travel/                  # Group: only subdirectories
//! │   ├── config.toml              # Applies to every album below
//! │   ├── 010-Japan/
//! │   │   └── 001-tokyo.jpg
//! │   └── 020-Italy/
//! │       └── 001-rome.jpg
//! └── wip-drafts/                  # Unnumbered: ordered after numbered albums
//!     └── draft.jpg
//! ```
//!
//! ## Rules
//!
//! - Any directory that directly contains photos is an album, the root included.
//! - Photos are ordered by `NNN-` prefix; unnumbered photos follow, by file name.
//! - Two photos with the same number in one album is an error.
//! - Hidden files and directories (leading `.`) are ignored.
//! - A photo whose dimensions cannot be read is kept with `0×0` dimensions,
//!   which the layout engine treats as square.

use crate::config::{self, LayoutConfig, SiteConfig};
use crate::imaging::{ImageBackend, RustBackend};
use crate::naming::{EntryName, parse_entry_name};
use crate::types::PhotoInput;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Duplicate photo number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
}

/// Manifest output from the scan stage, written as `photos.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub albums: Vec<Album>,
    pub config: SiteConfig,
}

/// A directory of photos, in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    /// Path relative to the content root, `/`-separated. Empty for the root.
    pub path: String,
    pub title: String,
    pub photos: Vec<PhotoInput>,
    /// Layout settings after cascading every `config.toml` down to this album.
    pub layout: LayoutConfig,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    scan_with_backend(&RustBackend::new(), root)
}

/// Scan using a specific backend (allows testing with mock).
pub fn scan_with_backend(backend: &impl ImageBackend, root: &Path) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    let config = config::load_config(root)?;

    let mut album_dirs = collect_album_dirs(root, &config)?;
    album_dirs.sort_by(|(a, _), (b, _)| album_order(root, a, b));

    let mut albums = Vec::with_capacity(album_dirs.len());
    for (dir, files) in album_dirs {
        let files = order_photos(&dir, files)?;
        let layout = config::load_cascaded_config(root, &dir)?.layout;
        let photos: Vec<PhotoInput> = files
            .par_iter()
            .map(|file| identify_photo(backend, root, file))
            .collect();
        let album = Album {
            path: relative_path(root, &dir),
            title: album_title(root, &dir),
            photos,
            layout,
        };
        tracing::debug!(album = %album.path, photos = album.photos.len(), "scanned album");
        albums.push(album);
    }

    Ok(Manifest { albums, config })
}

/// Every directory under `root` that directly holds photos, with its photos.
fn collect_album_dirs(
    root: &Path,
    config: &SiteConfig,
) -> Result<Vec<(PathBuf, Vec<PathBuf>)>, ScanError> {
    let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && config.scan.is_photo(entry.path()) {
            let dir = entry
                .path()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            by_dir.entry(dir).or_default().push(entry.into_path());
        }
    }
    Ok(by_dir.into_iter().collect())
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Albums in tree order, each directory level sorted by `NNN-` prefix.
fn album_order(root: &Path, a: &Path, b: &Path) -> std::cmp::Ordering {
    let key = |p: &Path| -> Vec<(EntryName, String)> {
        p.strip_prefix(root)
            .unwrap_or(p)
            .components()
            .map(|c| {
                let name = c.as_os_str().to_string_lossy().to_string();
                (parse_entry_name(&name), name)
            })
            .collect()
    };
    let (ka, kb) = (key(a), key(b));
    for ((na, sa), (nb, sb)) in ka.iter().zip(&kb) {
        let ord = na.position_cmp(nb).then_with(|| sa.cmp(sb));
        if ord.is_ne() {
            return ord;
        }
    }
    ka.len().cmp(&kb.len())
}

/// Sort an album's photos by number prefix, unnumbered last by file name.
fn order_photos(dir: &Path, files: Vec<PathBuf>) -> Result<Vec<PathBuf>, ScanError> {
    let mut named: Vec<(EntryName, PathBuf)> = files
        .into_iter()
        .map(|f| (parse_entry_name(&file_stem(&f)), f))
        .collect();
    named.sort_by(|(na, fa), (nb, fb)| na.position_cmp(nb).then_with(|| fa.cmp(fb)));

    for pair in named.windows(2) {
        if let (Some(a), Some(b)) = (pair[0].0.number, pair[1].0.number)
            && a == b
        {
            return Err(ScanError::DuplicateNumber(a, dir.to_path_buf()));
        }
    }
    Ok(named.into_iter().map(|(_, f)| f).collect())
}

fn identify_photo(backend: &impl ImageBackend, root: &Path, file: &Path) -> PhotoInput {
    let url = relative_path(root, file);
    let id = match url.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => url.clone(),
    };
    let (width, height) = match backend.identify(file) {
        Ok(dims) => (f64::from(dims.width), f64::from(dims.height)),
        Err(e) => {
            tracing::warn!(photo = %url, error = %e, "could not read dimensions, treating as square");
            (0.0, 0.0)
        }
    };
    PhotoInput {
        id,
        url,
        width,
        height,
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn album_title(root: &Path, dir: &Path) -> String {
    let name = if dir == root {
        dir.canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .unwrap_or_default()
    } else {
        dir.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    };
    let parsed = parse_entry_name(&name);
    if parsed.title.is_empty() {
        name
    } else {
        parsed.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::setup_content;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn album<'a>(manifest: &'a Manifest, path: &str) -> &'a Album {
        manifest
            .albums
            .iter()
            .find(|a| a.path == path)
            .unwrap_or_else(|| {
                let paths: Vec<&str> = manifest.albums.iter().map(|a| a.path.as_str()).collect();
                panic!("album '{path}' not found. Available: {paths:?}")
            })
    }

    #[test]
    fn scan_finds_albums_in_tree_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "wip/a.jpg");
        touch(tmp.path(), "020-Travel/010-Japan/001-tokyo.jpg");
        touch(tmp.path(), "2-Early/001-x.jpg");
        touch(tmp.path(), "010-Landscapes/001-dawn.jpg");
        let backend = MockBackend::with_dimensions(&[]);

        let manifest = scan_with_backend(&backend, tmp.path()).unwrap();
        let paths: Vec<&str> = manifest.albums.iter().map(|a| a.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["2-Early", "010-Landscapes", "020-Travel/010-Japan", "wip"]
        );
        assert_eq!(album(&manifest, "020-Travel/010-Japan").title, "Japan");
    }

    #[test]
    fn photos_ordered_by_number_then_name() {
        let tmp = TempDir::new().unwrap();
        for name in ["zeta.jpg", "010-c.jpg", "002-b.png", "alpha.jpg", "1-a.jpg"] {
            touch(tmp.path(), &format!("Album/{name}"));
        }
        let backend = MockBackend::with_dimensions(&[]);

        let manifest = scan_with_backend(&backend, tmp.path()).unwrap();
        let ids: Vec<&str> = album(&manifest, "Album")
            .photos
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec!["Album/1-a", "Album/002-b", "Album/010-c", "Album/alpha", "Album/zeta"]
        );
    }

    #[test]
    fn photo_urls_and_dimensions_come_from_backend() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Album/001-dawn.jpg");
        let backend = MockBackend::with_dimensions(&[("001-dawn.jpg", 600, 400)]);

        let manifest = scan_with_backend(&backend, tmp.path()).unwrap();
        let photo = &album(&manifest, "Album").photos[0];
        assert_eq!(photo.url, "Album/001-dawn.jpg");
        assert_eq!(photo.width, 600.0);
        assert_eq!(photo.height, 400.0);
        assert_eq!(backend.identified_count(), 1);
    }

    #[test]
    fn unreadable_photo_kept_with_zero_dimensions() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Album/001-broken.jpg");
        let backend = MockBackend::with_dimensions(&[]);

        let manifest = scan_with_backend(&backend, tmp.path()).unwrap();
        let photo = &album(&manifest, "Album").photos[0];
        assert_eq!((photo.width, photo.height), (0.0, 0.0));
        assert_eq!(photo.aspect_ratio(), 1.0);
    }

    #[test]
    fn duplicate_numbers_rejected() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Album/001-a.jpg");
        touch(tmp.path(), "Album/001-b.jpg");
        let backend = MockBackend::with_dimensions(&[]);

        let result = scan_with_backend(&backend, tmp.path());
        assert!(matches!(result, Err(ScanError::DuplicateNumber(1, _))));
    }

    #[test]
    fn hidden_entries_and_other_files_ignored() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Album/001-a.jpg");
        touch(tmp.path(), "Album/.002-hidden.jpg");
        touch(tmp.path(), "Album/notes.txt");
        touch(tmp.path(), ".cache/001-x.jpg");
        let backend = MockBackend::with_dimensions(&[]);

        let manifest = scan_with_backend(&backend, tmp.path()).unwrap();
        assert_eq!(manifest.albums.len(), 1);
        assert_eq!(manifest.albums[0].photos.len(), 1);
    }

    #[test]
    fn extensions_come_from_root_config() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Album/001-a.jpg");
        touch(tmp.path(), "Album/002-b.png");
        fs::write(
            tmp.path().join("config.toml"),
            "[scan]\nextensions = [\"png\"]\n",
        )
        .unwrap();
        let backend = MockBackend::with_dimensions(&[]);

        let manifest = scan_with_backend(&backend, tmp.path()).unwrap();
        assert_eq!(manifest.albums[0].photos.len(), 1);
        assert_eq!(manifest.albums[0].photos[0].url, "Album/002-b.png");
    }

    #[test]
    fn album_layout_config_cascades() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "010-A/001-a.jpg");
        touch(tmp.path(), "020-B/001-b.jpg");
        fs::write(
            tmp.path().join("config.toml"),
            "[layout]\ntarget_row_height = 200\n",
        )
        .unwrap();
        fs::write(
            tmp.path().join("020-B/config.toml"),
            "[layout]\nmax_photos_per_row = 4\n",
        )
        .unwrap();
        let backend = MockBackend::with_dimensions(&[]);

        let manifest = scan_with_backend(&backend, tmp.path()).unwrap();
        let a = &album(&manifest, "010-A").layout;
        let b = &album(&manifest, "020-B").layout;
        assert_eq!((a.target_row_height, a.max_photos_per_row), (200.0, 8));
        assert_eq!((b.target_row_height, b.max_photos_per_row), (200.0, 4));
    }

    #[test]
    fn root_photos_form_an_album() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "001-a.jpg");
        let backend = MockBackend::with_dimensions(&[]);

        let manifest = scan_with_backend(&backend, tmp.path()).unwrap();
        assert_eq!(manifest.albums.len(), 1);
        assert_eq!(manifest.albums[0].path, "");
        assert_eq!(manifest.albums[0].photos[0].id, "001-a");
    }

    #[test]
    fn scan_missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn scan_reads_real_png_headers() {
        let tmp = setup_content();
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(manifest.albums.len(), 2);
        let landscapes = album(&manifest, "010-Landscapes");
        assert_eq!(landscapes.title, "Landscapes");
        let ratios: Vec<f64> = landscapes.photos.iter().map(|p| p.aspect_ratio()).collect();
        assert_eq!(ratios, vec![1.5, 1.0, 2.0]);

        let japan = album(&manifest, "020-Travel/010-Japan");
        assert_eq!(japan.photos[0].width, 20.0);
        assert_eq!(japan.photos[0].height, 30.0);
    }
}
