//! Batch segmentation over many extractor outputs.
//!
//! Documents are independent, so each one gets its own segmenter state and
//! they can run on the rayon pool. A failing document never stops the batch.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::parser::{JsonSource, SegmentOptions, Segmentation, Segmenter, TextSource};

/// Outcome for one input file.
#[derive(Debug)]
pub struct BatchItem {
    /// Input path
    pub path: PathBuf,
    /// Segmentation or the error that stopped it
    pub result: Result<Segmentation>,
}

impl BatchItem {
    /// Check if the file was segmented.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Segment every file in `paths`.
///
/// Results come back in input order regardless of `options.parallel`.
pub fn segment_files<P>(paths: &[P], options: &SegmentOptions) -> Vec<BatchItem>
where
    P: AsRef<Path> + Sync,
{
    let run = |path: &P| {
        let path = path.as_ref();
        BatchItem {
            path: path.to_path_buf(),
            result: segment_one(path, options),
        }
    };

    let items: Vec<BatchItem> = if options.parallel {
        paths.par_iter().map(run).collect()
    } else {
        paths.iter().map(run).collect()
    };

    let failed = items.iter().filter(|item| !item.is_ok()).count();
    log::info!(
        "Batch finished: {} documents, {} failed",
        items.len(),
        failed
    );
    items
}

/// Segment every `*.json` file directly inside `dir`, sorted by name.
pub fn segment_directory<P: AsRef<Path>>(dir: P, options: &SegmentOptions) -> Result<Vec<BatchItem>> {
    let paths = json_files(dir.as_ref())?;
    Ok(segment_files(&paths, options))
}

/// Suffix of the slide manifests a batch run writes.
pub const MANIFEST_SUFFIX: &str = ".manifest.json";

/// List `*.json` files directly inside `dir`, sorted by name.
///
/// Slide manifests (`*.manifest.json`) are left out so a batch can write its
/// output next to its input.
pub fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let is_json = name.ends_with(".json") && !name.ends_with(MANIFEST_SUFFIX);
        if path.is_file() && is_json {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn segment_one(path: &Path, options: &SegmentOptions) -> Result<Segmentation> {
    log::debug!("Segmenting {}", path.display());
    let segmenter = Segmenter::new(options.clone());
    let result = JsonSource::open(path)
        .and_then(|source| source.load())
        .and_then(|doc| segmenter.segment(&doc));
    if let Err(e) = &result {
        log::warn!("{}: {}", path.display(), e);
    }
    result
}
