//! Captured reference images on disk.
//!
//! A reference directory holds one `<name>.bin` per image and a
//! `layout.toml` describing the toolchain that produced them.
use std::{
    fs,
    mem::size_of,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{all_images, compare, error::LayoutError, LayoutDiff, LayoutImage};

pub static MANIFEST_FILE_NAME: &str = "layout.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolchain {
    pub arch: String,
    pub os: String,
    pub pointer_width: usize,
    pub little_endian: bool,
}

impl Toolchain {
    pub fn current() -> Self {
        Self {
            arch: std::env::consts::ARCH.to_string(),
            os: std::env::consts::OS.to_string(),
            pointer_width: size_of::<usize>() * 8,
            little_endian: cfg!(target_endian = "little"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub name: String,
    pub size: usize,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub toolchain: Toolchain,
    pub images: Vec<ImageEntry>,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LayoutError + '_ {
    move |source| LayoutError::IOError {
        source,
        path: path.to_path_buf(),
    }
}

/// Writes every image of this build into `dir`.
pub fn capture(dir: impl AsRef<Path>) -> Result<Manifest, LayoutError> {
    let dir = dir.as_ref();

    fs::create_dir_all(dir).map_err(io_error(dir))?;

    let images = all_images()
        .into_iter()
        .map(|image| -> Result<ImageEntry, LayoutError> {
            let file = format!("{}.bin", image.name);
            let path = dir.join(&file);

            fs::write(&path, &image.bytes).map_err(io_error(&path))?;

            log::debug!("captured {} ({} bytes)", image.name, image.size());

            Ok(ImageEntry {
                name: image.name,
                size: image.bytes.len(),
                file,
            })
        })
        .collect::<Result<Vec<_>, LayoutError>>()?;

    let manifest = Manifest {
        toolchain: Toolchain::current(),
        images,
    };

    let text = toml::to_string_pretty(&manifest)
        .map_err(|source| LayoutError::WriteManifest { source })?;
    let path = dir.join(MANIFEST_FILE_NAME);

    fs::write(&path, text).map_err(io_error(&path))?;

    Ok(manifest)
}

/// Reads a directory written by [`capture`].
pub fn load(dir: impl AsRef<Path>) -> Result<(Manifest, Vec<LayoutImage>), LayoutError> {
    let dir = dir.as_ref();
    let path = dir.join(MANIFEST_FILE_NAME);

    let text = fs::read_to_string(&path).map_err(io_error(&path))?;
    let manifest: Manifest =
        toml::from_str(&text).map_err(|source| LayoutError::ParseManifest { source })?;

    let images = manifest
        .images
        .iter()
        .map(|entry| -> Result<LayoutImage, LayoutError> {
            let path: PathBuf = dir.join(&entry.file);
            let bytes = fs::read(&path).map_err(io_error(&path))?;

            if bytes.len() != entry.size {
                return Err(LayoutError::TruncatedImage {
                    name: entry.name.clone(),
                    expect: entry.size,
                    have: bytes.len(),
                });
            }

            Ok(LayoutImage::new(entry.name.clone(), bytes))
        })
        .collect::<Result<Vec<_>, LayoutError>>()?;

    Ok((manifest, images))
}

/// Compares this build's images against the reference in `dir`.
pub fn compare_with_reference(
    dir: impl AsRef<Path>,
) -> Result<(Manifest, Vec<LayoutDiff>), LayoutError> {
    let (manifest, reference) = load(dir)?;

    if manifest.toolchain != Toolchain::current() {
        log::warn!(
            "reference captured on {:?}, running on {:?}",
            manifest.toolchain,
            Toolchain::current()
        );
    }

    let diffs = all_images()
        .iter()
        .map(|actual| -> Result<LayoutDiff, LayoutError> {
            let expected = reference
                .iter()
                .find(|image| image.name == actual.name)
                .ok_or_else(|| LayoutError::MissingImage {
                    name: actual.name.clone(),
                })?;

            Ok(compare(expected, actual))
        })
        .collect::<Result<Vec<_>, LayoutError>>()?;

    Ok((manifest, diffs))
}
