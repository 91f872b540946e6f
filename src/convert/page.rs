//! Per-page translation into an entity batch.

use super::stats::ConversionStats;
use super::translate::{translate_command, translate_span};
use crate::model::{EntityBatch, Page};

/// Translate every command and span of `page` placed at `x_offset`.
///
/// Geometry entities come first, followed by text entities; both keep
/// source order. Unmapped commands and whitespace-only spans are dropped.
pub fn process_page(page: &Page, x_offset: f64) -> EntityBatch {
    process_page_with_stats(page, x_offset).0
}

/// Like [`process_page`], also returning translation statistics.
pub fn process_page_with_stats(page: &Page, x_offset: f64) -> (EntityBatch, ConversionStats) {
    let mut batch = EntityBatch::new(page.index, x_offset);
    let mut stats = ConversionStats::new();
    stats.add_page();

    batch
        .entities
        .reserve(page.commands.len() + page.spans.len());

    for command in &page.commands {
        match translate_command(command, x_offset, page.height) {
            Some(entity) => {
                stats.add_entity(&entity.kind);
                batch.entities.push(entity);
            }
            None => stats.skip_command(),
        }
    }

    for span in &page.spans {
        match translate_span(span, x_offset, page.height) {
            Some(entity) => {
                stats.add_entity(&entity.kind);
                batch.entities.push(entity);
            }
            None => stats.skip_span(),
        }
    }

    log::debug!(
        "Page {}: {} entities ({} commands skipped, {} spans skipped)",
        page.ordinal(),
        batch.len(),
        stats.skipped_commands,
        stats.skipped_spans
    );

    (batch, stats)
}
