//! Top-level conversion pipeline.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::assemble::{DocumentAssembler, OutputPlan};
use super::options::{ConvertOptions, LayoutMode, PageSelection};
use super::stats::ConversionStats;
use crate::error::{Error, Result};
use crate::model::{Document, Page};
use crate::writer::DrawingWriter;

/// A recoverable condition met during a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A requested page index is outside the document
    OutOfRangePage {
        /// Requested index (0-based)
        index: i64,
        /// Pages in the document
        page_count: usize,
    },
    /// A requested page range lies entirely outside the document
    OutOfRangePages {
        /// First requested index of the span (0-based)
        start: i64,
        /// Last requested index of the span (0-based)
        end: i64,
        /// Pages in the document
        page_count: usize,
    },
    /// A page index was requested more than once
    DuplicatePage {
        /// Requested index (0-based)
        index: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::OutOfRangePage { index, page_count } => write!(
                f,
                "Page {} is out of range (document has {} pages), skipped",
                index, page_count
            ),
            Warning::OutOfRangePages {
                start,
                end,
                page_count,
            } => write!(
                f,
                "Pages {}-{} are out of range (document has {} pages), skipped",
                start, end, page_count
            ),
            Warning::DuplicatePage { index } => {
                write!(f, "Page {} requested more than once, converted once", index)
            }
        }
    }
}

/// Pages selected for conversion plus the warnings raised selecting them.
#[derive(Debug)]
pub struct ResolvedPages<'a> {
    /// Valid pages in request order
    pub pages: Vec<&'a Page>,

    /// Recoverable problems with the request
    pub warnings: Vec<Warning>,
}

/// Resolve a page selection against a document.
///
/// Each requested span is clamped to the document; the parts outside it
/// raise one warning per span. Fails with [`Error::NoValidPages`] when
/// nothing is left.
pub fn resolve_pages<'a>(
    doc: &'a Document,
    selection: &PageSelection,
) -> Result<ResolvedPages<'a>> {
    let page_count = doc.page_count();
    let mut resolved = ResolvedPages {
        pages: Vec::new(),
        warnings: Vec::new(),
    };

    match selection.spans() {
        None => resolved.pages.extend(doc.pages.iter()),
        Some(spans) => {
            let last = i64::try_from(page_count).unwrap_or(i64::MAX) - 1;
            let mut seen = vec![false; page_count];
            for span in spans {
                let (start, end) = (*span.start(), *span.end());
                if start > end {
                    continue;
                }
                if start < 0 {
                    resolved
                        .warnings
                        .push(out_of_range(start, end.min(-1), page_count));
                }
                if end > last {
                    resolved
                        .warnings
                        .push(out_of_range(start.max(last + 1), end, page_count));
                }
                let (lo, hi) = (start.max(0), end.min(last));
                if lo > hi {
                    continue;
                }
                for i in lo as usize..=hi as usize {
                    if seen[i] {
                        resolved.warnings.push(Warning::DuplicatePage { index: i });
                    } else {
                        seen[i] = true;
                        resolved.pages.push(&doc.pages[i]);
                    }
                }
            }
        }
    }

    for warning in &resolved.warnings {
        log::warn!("{}", warning);
    }

    if resolved.pages.is_empty() {
        return Err(Error::NoValidPages {
            requested: selection.requested().unwrap_or(0),
            page_count,
        });
    }

    Ok(resolved)
}

fn out_of_range(start: i64, end: i64, page_count: usize) -> Warning {
    if start == end {
        Warning::OutOfRangePage {
            index: start,
            page_count,
        }
    } else {
        Warning::OutOfRangePages {
            start,
            end,
            page_count,
        }
    }
}

/// Outcome of a conversion request.
#[derive(Debug)]
pub struct ConversionReport {
    /// Layout the plan ended up using
    pub mode: LayoutMode,

    /// Files successfully written, in plan order
    pub files: Vec<PathBuf>,

    /// Files whose write failed (each an [`Error::Write`])
    pub failures: Vec<Error>,

    /// Recoverable problems with the request
    pub warnings: Vec<Warning>,

    /// Translation statistics
    pub stats: ConversionStats,
}

impl ConversionReport {
    /// Check if at least one file was produced.
    pub fn is_success(&self) -> bool {
        !self.files.is_empty()
    }

    /// Check if every planned file was produced.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolves pages, plans output files and hands them to a writer.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use pdf2dxf::convert::{ConvertOptions, Pipeline};
/// use pdf2dxf::writer::DxfWriter;
///
/// let doc = pdf2dxf::load_document("pages.json")?;
/// let report = Pipeline::new(Arc::new(DxfWriter::new()))
///     .with_options(ConvertOptions::new().merged())
///     .run(&doc, "drawing.dxf")?;
/// println!("{} file(s) written", report.files.len());
/// # Ok::<(), pdf2dxf::Error>(())
/// ```
pub struct Pipeline {
    options: ConvertOptions,
    writer: Arc<dyn DrawingWriter>,
}

impl Pipeline {
    /// Create a pipeline writing through `writer` with default options.
    pub fn new(writer: Arc<dyn DrawingWriter>) -> Self {
        Self {
            options: ConvertOptions::default(),
            writer,
        }
    }

    /// Set conversion options.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Current conversion options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Build the output plan without writing anything.
    pub fn plan(
        &self,
        doc: &Document,
        template: impl AsRef<Path>,
    ) -> Result<(OutputPlan, Vec<Warning>)> {
        let resolved = resolve_pages(doc, &self.options.pages)?;
        let plan = DocumentAssembler::new()
            .with_page_gap(self.options.page_gap)
            .with_parallel(self.options.parallel)
            .assemble(template, &resolved.pages, self.options.layout)?;
        Ok((plan, resolved.warnings))
    }

    /// Convert `doc` and write every planned file.
    ///
    /// In split layout a failed file does not stop the others; the request
    /// only fails when no file could be written.
    pub fn run(&self, doc: &Document, template: impl AsRef<Path>) -> Result<ConversionReport> {
        let (plan, warnings) = self.plan(doc, template)?;

        let mut report = ConversionReport {
            mode: plan.mode,
            files: Vec::with_capacity(plan.files.len()),
            failures: Vec::new(),
            warnings,
            stats: plan.stats,
        };

        for file in &plan.files {
            match self.writer.write(file) {
                Ok(()) => {
                    log::info!(
                        "Wrote {} ({} entities) with {} writer",
                        file.path.display(),
                        file.entity_count(),
                        self.writer.name()
                    );
                    report.files.push(file.path.clone());
                }
                Err(e) => {
                    let err = Error::write_failed(&file.path, e);
                    if plan.mode == LayoutMode::Merged {
                        return Err(err);
                    }
                    log::warn!("{}", err);
                    report.failures.push(err);
                }
            }
        }

        if report.files.is_empty() {
            return Err(report
                .failures
                .into_iter()
                .next()
                .unwrap_or_else(|| Error::Other("No output files planned".into())));
        }

        Ok(report)
    }
}
