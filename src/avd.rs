use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::Serialize;

/// One discoverable AVD image. Every `<name>.ini` under the catalog
/// directory names an image.
#[derive(Debug, Clone, Serialize)]
pub struct AvdImage {
    pub name: String,
    pub ini_path: PathBuf,
}

/// Images discoverable in the user's AVD catalog, sorted by name.
///
/// `None` when the home directory or the catalog directory cannot be
/// found; callers skip catalog validation in that case rather than
/// failing the run.
pub fn list_images() -> Option<Vec<AvdImage>> {
    let base = BaseDirs::new()?;
    let avd_dir = base.home_dir().join(".android").join("avd");
    if !avd_dir.is_dir() {
        return None;
    }

    Some(images_in(&avd_dir))
}

fn images_in(dir: &Path) -> Vec<AvdImage> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut images: Vec<AvdImage> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "ini"))
        .filter_map(|path| {
            let name = path.file_stem()?.to_string_lossy().into_owned();
            Some(AvdImage {
                name,
                ini_path: path,
            })
        })
        .collect();

    images.sort_by(|a, b| a.name.cmp(&b.name));
    images
}
