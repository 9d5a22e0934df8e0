use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::ui::prelude::*;

/// Enough leading bytes for every signature `image` knows about
const SNIFF_LEN: u64 = 64;

/// The set of candidate wallpapers the selector draws from.
pub trait ImagePool {
    /// Whether `name` currently exists in the pool as a valid image
    fn is_image(&self, name: &str) -> bool;

    /// Names of all valid images, in a stable order
    fn list_images(&self) -> Result<Vec<String>>;
}

/// Images stored directly in one directory
#[derive(Debug, Clone)]
pub struct DirectoryPool {
    dir: PathBuf,
}

impl DirectoryPool {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ImagePool for DirectoryPool {
    fn is_image(&self, name: &str) -> bool {
        is_bare_name(name) && is_image(&self.dir.join(name))
    }

    fn list_images(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for path in list_entries(&self.dir)? {
            if !is_image(&path) {
                continue;
            }
            match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => names.push(name.to_string()),
                None => emit(
                    Level::Debug,
                    "pool.skip_name",
                    &format!("Skipping non UTF-8 file name {}", path.display()),
                    None,
                ),
            }
        }
        Ok(names)
    }
}

/// All regular files directly inside `dir`, sorted by name.
pub fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // Broken links and the like; the directory itself failing is fatal
            Err(e) if e.depth() > 0 => {
                emit(Level::Debug, "pool.skip_entry", &format!("Skipping entry: {e}"), None);
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("listing {}", dir.display()));
            }
        };
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Whether `name` is a plain file name, with no directory part and not `.`
/// or `..`.
pub fn is_bare_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(n)), None) if n == name
    )
}

/// Whether `path` is an image in a format we recognise, judged by its
/// leading bytes. The extension is not consulted.
pub fn is_image(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    if file.take(SNIFF_LEN).read_to_end(&mut header).is_err() {
        return false;
    }
    image::guess_format(&header).is_ok()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::fs;
    use std::path::Path;

    pub const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    pub const JPEG_HEADER: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0";
    pub const GIF_HEADER: &[u8] = b"GIF89a\x01\0\x01\0";

    pub fn write_png(dir: &Path, name: &str) {
        fs::write(dir.join(name), PNG_HEADER).unwrap();
    }

    pub fn write_jpeg(dir: &Path, name: &str) {
        fs::write(dir.join(name), JPEG_HEADER).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_image_sniffs_contents() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        write_png(dir, "real.png");
        fs::write(dir.join("fake.png"), "definitely not a png").unwrap();
        fs::write(dir.join("no_extension"), GIF_HEADER).unwrap();
        fs::write(dir.join("empty.jpg"), b"").unwrap();

        assert!(is_image(&dir.join("real.png")));
        assert!(!is_image(&dir.join("fake.png")));
        assert!(is_image(&dir.join("no_extension")));
        assert!(!is_image(&dir.join("empty.jpg")));
        assert!(!is_image(&dir.join("missing.png")));
    }

    #[test]
    fn test_list_entries_is_flat_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        write_png(dir, "b.png");
        write_png(dir, "a.png");
        fs::create_dir(dir.join("sub")).unwrap();
        write_png(&dir.join("sub"), "nested.png");

        let names: Vec<_> = list_entries(dir)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_list_images_excludes_non_images() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        write_jpeg(dir, "c.jpg");
        write_png(dir, "a.png");
        fs::write(dir.join("pics.ini"), "[files]\na.png =\n").unwrap();
        fs::write(dir.join("notes.txt"), "hello").unwrap();

        let pool = DirectoryPool::new(dir);
        assert_eq!(pool.list_images().unwrap(), vec!["a.png", "c.jpg"]);
        assert!(pool.is_image("c.jpg"));
        assert!(!pool.is_image("pics.ini"));
    }

    #[test]
    fn test_pool_rejects_names_outside_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("walls");
        fs::create_dir_all(dir.join("sub")).unwrap();
        write_png(temp_dir.path(), "outside.png");
        write_png(&dir.join("sub"), "nested.png");
        write_png(&dir, "inside.png");

        let pool = DirectoryPool::new(&dir);
        assert!(pool.is_image("inside.png"));
        assert!(!pool.is_image("../outside.png"));
        assert!(!pool.is_image("sub/nested.png"));
        let absolute = temp_dir.path().join("outside.png");
        assert!(!pool.is_image(absolute.to_str().unwrap()));
    }

    #[test]
    fn test_bare_names() {
        assert!(is_bare_name("a.png"));
        assert!(is_bare_name("#1 = x.png"));
        assert!(!is_bare_name(""));
        assert!(!is_bare_name("."));
        assert!(!is_bare_name(".."));
        assert!(!is_bare_name("a/b.png"));
        assert!(!is_bare_name("a.png/"));
        assert!(!is_bare_name("/a.png"));
    }

    #[test]
    fn test_list_entries_missing_dir_is_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(list_entries(&temp_dir.path().join("gone")).is_err());
    }
}
