//! Recolored icon sheet for the SVG cards.
//!
//! Every PNG in the icon directory is painted with [`ICON_COLOR`] (alpha kept) and
//! base64-encoded for inlining. The encodings are cached in a JSON map keyed by icon
//! path; the cache is reused unless an icon is missing from it or any icon file was
//! modified after the cache file was written.

use crate::core::{
    cache::{read_document, write_document},
    error::{ProfileStatsError, Result},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::ImageFormat;
use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const ICON_COLOR: [u8; 3] = [7, 105, 218];

/// Icon path → base64 PNG, in file-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconSheet {
    pub icons: Vec<(String, String)>,
}

impl IconSheet {
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// PNG files in `dir`, sorted. A missing directory has no icons.
pub fn icon_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        log::warn!("Icon directory {} not found, rendering without icons", dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "png") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn icon_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Paint every pixel with [`ICON_COLOR`], keep alpha, and return the PNG as base64.
pub fn recolor_icon(path: &Path) -> Result<String> {
    let [r, g, b] = ICON_COLOR;
    let mut rgba = image::open(path)
        .map_err(|e| ProfileStatsError::icon(path, e))?
        .to_rgba8();

    for pixel in rgba.pixels_mut() {
        pixel[0] = r;
        pixel[1] = g;
        pixel[2] = b;
    }

    let mut bytes = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ProfileStatsError::icon(path, e))?;
    Ok(BASE64.encode(bytes))
}

fn modified(path: &Path) -> Option<std::time::SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

pub fn is_cache_valid(cache_path: &Path, files: &[PathBuf], cached: &BTreeMap<String, String>) -> bool {
    let Some(cache_time) = modified(cache_path) else {
        return false;
    };

    files.iter().all(|file| {
        cached.contains_key(&icon_key(file))
            && modified(file).is_some_and(|icon_time| icon_time <= cache_time)
    })
}

pub fn load_icon_sheet(icons_dir: &Path, cache_path: &Path) -> Result<IconSheet> {
    let files = icon_files(icons_dir)?;
    if files.is_empty() {
        return Ok(IconSheet::default());
    }

    let cached: BTreeMap<String, String> = match read_document(cache_path) {
        Ok(map) => map.unwrap_or_default(),
        Err(e) => {
            log::warn!("Icon cache unusable, regenerating: {e}");
            BTreeMap::new()
        }
    };

    let map = if is_cache_valid(cache_path, &files, &cached) {
        log::info!("Using icon cache");
        cached
    } else {
        log::info!("Generating icon cache for {} icons...", files.len());
        let mut fresh = BTreeMap::new();
        for file in &files {
            fresh.insert(icon_key(file), recolor_icon(file)?);
        }
        if let Err(e) = write_document(cache_path, &fresh) {
            log::warn!("Icon cache save failed (run will continue): {e}");
        }
        fresh
    };

    let icons = files
        .iter()
        .filter_map(|file| {
            let key = icon_key(file);
            map.get(&key).map(|encoded| (key, encoded.clone()))
        })
        .collect();
    Ok(IconSheet { icons })
}
