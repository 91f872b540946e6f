//! Output planning: which pages go into which file, at which offset.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::options::{LayoutMode, DEFAULT_PAGE_GAP};
use super::page::process_page_with_stats;
use super::stats::ConversionStats;
use crate::error::{Error, Result};
use crate::model::{Bounds, EntityBatch, LayerSet, OutputEntity, Page};

/// One planned output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFile {
    /// Destination path
    pub path: PathBuf,

    /// Layer table owned by this file
    pub layers: LayerSet,

    /// Page batches in page order
    pub batches: Vec<EntityBatch>,
}

impl OutputFile {
    /// Create an empty file plan with a fresh layer set.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            layers: LayerSet::new(),
            batches: Vec::new(),
        }
    }

    /// All entities of the file, batch by batch.
    pub fn entities(&self) -> impl Iterator<Item = &OutputEntity> {
        self.batches.iter().flat_map(|b| b.entities.iter())
    }

    /// Total entity count.
    pub fn entity_count(&self) -> usize {
        self.batches.iter().map(EntityBatch::len).sum()
    }

    /// Extents of every entity in the file.
    pub fn bounds(&self) -> Option<Bounds> {
        self.batches
            .iter()
            .filter_map(EntityBatch::bounds)
            .reduce(Bounds::union)
    }
}

/// The complete set of files produced by one conversion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputPlan {
    /// `Merged` when every page lands in a single file
    pub mode: LayoutMode,

    /// Files in write order
    pub files: Vec<OutputFile>,

    /// Translation statistics over all pages
    pub stats: ConversionStats,
}

impl OutputPlan {
    /// Destination paths in write order.
    pub fn paths(&self) -> Vec<&Path> {
        self.files.iter().map(|f| f.path.as_path()).collect()
    }
}

/// Where a page is drawn: which file and at which horizontal offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Position of the target file in the plan
    pub file: usize,

    /// Horizontal offset of the page in that file
    pub x_offset: f64,
}

/// Decides the output layout and builds the [`OutputPlan`].
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    page_gap: f64,
    parallel: bool,
}

impl DocumentAssembler {
    /// Create an assembler with the default page gap.
    pub fn new() -> Self {
        Self {
            page_gap: DEFAULT_PAGE_GAP,
            parallel: true,
        }
    }

    /// Set the gap between pages in merged layout.
    pub fn with_page_gap(mut self, gap: f64) -> Self {
        self.page_gap = gap;
        self
    }

    /// Enable or disable parallel page translation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Effective mode for a selection: a single page always yields one file.
    pub fn effective_mode(page_count: usize, layout: LayoutMode) -> LayoutMode {
        if page_count == 1 {
            LayoutMode::Merged
        } else {
            layout
        }
    }

    /// Compute the placement of each selected page.
    ///
    /// Merged pages run left to right, each starting `width + gap` after
    /// the previous one. Split pages each get their own file at offset 0.
    pub fn placements(&self, pages: &[&Page], layout: LayoutMode) -> Vec<Placement> {
        match Self::effective_mode(pages.len(), layout) {
            LayoutMode::Merged => {
                let mut x_offset = 0.0;
                pages
                    .iter()
                    .map(|page| {
                        let placement = Placement { file: 0, x_offset };
                        x_offset += page.width + self.page_gap;
                        placement
                    })
                    .collect()
            }
            LayoutMode::PerPage => (0..pages.len())
                .map(|file| Placement {
                    file,
                    x_offset: 0.0,
                })
                .collect(),
        }
    }

    /// Build the output plan for the selected pages.
    ///
    /// Pages must already be validated; an empty selection is an error.
    pub fn assemble(
        &self,
        template: impl AsRef<Path>,
        pages: &[&Page],
        layout: LayoutMode,
    ) -> Result<OutputPlan> {
        let template = template.as_ref();
        if pages.is_empty() {
            return Err(Error::NoValidPages {
                requested: 0,
                page_count: 0,
            });
        }

        let mode = Self::effective_mode(pages.len(), layout);
        let placements = self.placements(pages, layout);

        let mut files: Vec<OutputFile> = match mode {
            LayoutMode::Merged => vec![OutputFile::new(template)],
            LayoutMode::PerPage => pages
                .iter()
                .map(|page| OutputFile::new(page_output_path(template, page.ordinal())))
                .collect(),
        };

        // Indexed collect keeps page order regardless of scheduling.
        let translated: Vec<(EntityBatch, ConversionStats)> = if self.parallel {
            pages
                .par_iter()
                .zip(placements.par_iter())
                .map(|(page, placement)| process_page_with_stats(page, placement.x_offset))
                .collect()
        } else {
            pages
                .iter()
                .zip(placements.iter())
                .map(|(page, placement)| process_page_with_stats(page, placement.x_offset))
                .collect()
        };

        let mut stats = ConversionStats::new();
        for ((batch, page_stats), placement) in translated.into_iter().zip(&placements) {
            stats.merge(&page_stats);
            files[placement.file].batches.push(batch);
        }

        Ok(OutputPlan { mode, files, stats })
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the per-page file name `{base}_page_{N}{ext}` from a template.
///
/// `ordinal` is the 1-based position of the page in the source document.
pub fn page_output_path(template: &Path, ordinal: usize) -> PathBuf {
    let stem = template
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match template.extension() {
        Some(ext) => format!("{}_page_{}.{}", stem, ordinal, ext.to_string_lossy()),
        None => format!("{}_page_{}", stem, ordinal),
    };
    template.with_file_name(name)
}
