use image::imageops::FilterType;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, Result};

/// Get the thumbnail cache directory
/// Returns ~/.cache/mussel-catalog/thumbnails on Linux
pub fn thumbnail_cache_dir() -> Result<PathBuf> {
    let mut path = dirs_next::cache_dir()
        .or_else(dirs_next::home_dir)
        .ok_or(CatalogError::MissingUserDir("cache"))?;

    path.push("mussel-catalog");
    path.push("thumbnails");
    Ok(path)
}

/// Cache file name for a dataset-relative image filename.
/// The base name keeps the cache browsable; the hash of the full relative
/// path keeps same-named images in different folders apart.
pub fn thumbnail_name(filename: &str, size: u32) -> String {
    let base = Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let flat: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let hash = blake3::hash(filename.as_bytes()).to_hex();
    format!("{}_{}_{}px.jpg", flat, &hash.as_str()[..16], size)
}

/// Get a cached thumbnail for the image `filename`, read from `source`,
/// generating it if needed.
/// Runs on the blocking pool because decoding and resizing are CPU-bound.
pub async fn ensure_thumbnail(
    source: PathBuf,
    filename: String,
    cache_dir: PathBuf,
    size: u32,
) -> Result<PathBuf> {
    tokio::task::spawn_blocking(move || {
        ensure_thumbnail_blocking(&source, &filename, &cache_dir, size)
    })
    .await
    .map_err(|e| CatalogError::Task(e.to_string()))?
}

fn ensure_thumbnail_blocking(
    source: &Path,
    filename: &str,
    cache_dir: &Path,
    size: u32,
) -> Result<PathBuf> {
    let thumbnail_path = cache_dir.join(thumbnail_name(filename, size));

    if thumbnail_path.exists() {
        return Ok(thumbnail_path);
    }

    fs::create_dir_all(cache_dir).map_err(|e| CatalogError::io(cache_dir, e))?;

    let img = image::open(source)?;
    let thumbnail = img.resize(size, size, FilterType::Lanczos3).into_rgb8();
    thumbnail.save(&thumbnail_path)?;

    log::debug!("Generated thumbnail: {}", thumbnail_path.display());
    Ok(thumbnail_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_thumbnail_name_is_flat() {
        let name = thumbnail_name("sub/dir/shell 1.png", 256);
        assert!(name.starts_with("shell_1_png_"));
        assert!(name.ends_with("_256px.jpg"));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_thumbnail_name_distinguishes_full_paths() {
        assert_ne!(thumbnail_name("a/shell.png", 64), thumbnail_name("b/shell.png", 64));
        assert_ne!(thumbnail_name("a.b.jpg", 64), thumbnail_name("a_b.jpg", 64));
        assert_eq!(thumbnail_name("a/shell.png", 64), thumbnail_name("a/shell.png", 64));
        assert_ne!(thumbnail_name("a/shell.png", 64), thumbnail_name("a/shell.png", 128));
    }

    #[tokio::test]
    async fn test_generates_and_reuses_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("wide.png");
        RgbImage::from_pixel(400, 100, Rgb([120, 80, 40])).save(&source).unwrap();
        let cache = dir.path().join("cache");

        let path = ensure_thumbnail(source.clone(), "wide.png".to_string(), cache.clone(), 64)
            .await
            .unwrap();

        let thumb = image::open(&path).unwrap();
        assert_eq!(thumb.width(), 64);
        assert_eq!(thumb.height(), 16);

        let again = ensure_thumbnail(source, "wide.png".to_string(), cache, 64)
            .await
            .unwrap();
        assert_eq!(path, again);
    }

    #[tokio::test]
    async fn test_same_name_in_different_folders_gets_own_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("cache");
        let mut thumbs = Vec::new();

        for (folder, color) in [("a", Rgb([255, 0, 0])), ("b", Rgb([0, 0, 255]))] {
            let filename = format!("{}/shell.png", folder);
            let source = dir.path().join(&filename);
            fs::create_dir_all(source.parent().unwrap()).unwrap();
            RgbImage::from_pixel(100, 100, color).save(&source).unwrap();

            let path = ensure_thumbnail(source, filename, cache.clone(), 32).await.unwrap();
            thumbs.push(path);
        }

        assert_ne!(thumbs[0], thumbs[1]);
        let red = image::open(&thumbs[0]).unwrap().into_rgb8();
        let blue = image::open(&thumbs[1]).unwrap().into_rgb8();
        assert!(red.get_pixel(16, 16)[0] > 200);
        assert!(blue.get_pixel(16, 16)[2] > 200);
        assert!(blue.get_pixel(16, 16)[0] < 50);
    }

    #[tokio::test]
    async fn test_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = ensure_thumbnail(
            dir.path().join("nope.jpg"),
            "nope.jpg".to_string(),
            dir.path().to_path_buf(),
            64,
        )
        .await;
        assert!(matches!(result, Err(CatalogError::Image(_))));
    }
}
