pub mod canvas;
pub mod config;
pub mod emit;
pub mod error;
pub mod manifest;
pub mod model;
pub mod parsing;
pub mod store;

use canvas::{selector_region, CanvasIndex};
use emit::CsvEmitter;
use error::BeehiveError;
use manifest::{Manifest, ManifestFetcher};
use model::{Annotation, OutputRow};
use parsing::classify::{detect_layout, Layout};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::io::Write;
use store::AnnotationSource;
use tracing::{debug, info};

pub use parsing::parse_content;

/// Counts reported after an export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    /// Data rows written (the sentinel row is not counted).
    pub rows: usize,
    pub structured: usize,
    pub unstructured: usize,
    /// Rows whose annotation had no region selector.
    pub without_selection: usize,
}

/// Fetch every manifest and index its canvases.
///
/// Any manifest that cannot be fetched or read aborts the whole load.
pub fn load_canvas_index(
    fetcher: &dyn ManifestFetcher,
    locations: &[String],
) -> Result<CanvasIndex, BeehiveError> {
    let mut manifests = Vec::with_capacity(locations.len());
    for location in locations {
        let json = fetcher.fetch(location)?;
        let manifest = Manifest::from_json(location, &json)?;
        info!(
            manifest = %location,
            title = manifest.title.as_deref().unwrap_or(""),
            canvases = manifest.canvases.len(),
            backend = fetcher.backend_name(),
            "manifest loaded"
        );
        manifests.push(manifest);
    }
    Ok(CanvasIndex::from_manifests(&manifests))
}

/// Resolve one annotation into a CSV row.
///
/// Fails when the annotation's canvas is not in the index. An annotation
/// without a region selector gets an empty `selection`.
pub fn build_row(
    annotation: &Annotation,
    canvases: &CanvasIndex,
) -> Result<OutputRow, BeehiveError> {
    let meta = canvases.resolve(&annotation.canvas)?;
    let content = parse_content(&annotation.content);

    let selection = annotation
        .coordinates
        .as_deref()
        .map(selector_region)
        .filter(|region| !region.is_empty())
        .map(|region| meta.selection_url(region))
        .unwrap_or_default();

    let row = OutputRow {
        volume: meta.volume().to_string(),
        image_number: meta.image_number().to_string(),
        selection,
        full_image: meta.image_url.clone(),
        annotation_uri: annotation.uri.clone(),
        ..OutputRow::default()
    };
    Ok(row.with_content(&content))
}

/// Write a complete CSV document for `annotations`, in the order given.
pub fn export_csv<W: Write>(
    annotations: &[Annotation],
    canvases: &CanvasIndex,
    writer: W,
) -> Result<ExportSummary, BeehiveError> {
    export_rows(annotations.iter().map(Ok), canvases, writer)
}

/// Write a complete CSV document, one row per annotation as it arrives.
///
/// The first failing annotation aborts the export; rows before it have
/// already been handed to `writer`.
pub fn export_rows<I, A, W>(
    annotations: I,
    canvases: &CanvasIndex,
    writer: W,
) -> Result<ExportSummary, BeehiveError>
where
    I: IntoIterator<Item = Result<A, BeehiveError>>,
    A: Borrow<Annotation>,
    W: Write,
{
    let mut emitter = CsvEmitter::new(writer)?;
    let mut summary = ExportSummary::default();

    for annotation in annotations {
        let annotation = annotation?;
        let annotation: &Annotation = annotation.borrow();
        let row = build_row(annotation, canvases)?;
        debug!(annotation = %annotation.uri, canvas = %annotation.canvas, "row built");

        match detect_layout(&row.line) {
            Layout::Structured => summary.structured += 1,
            Layout::Unstructured => summary.unstructured += 1,
        }
        if row.selection.is_empty() {
            summary.without_selection += 1;
        }

        emitter.write_row(&row)?;
    }

    summary.rows = emitter.finish()?;
    info!(
        rows = summary.rows,
        structured = summary.structured,
        unstructured = summary.unstructured,
        "CSV export finished"
    );
    Ok(summary)
}

/// Query `source` and export its annotations while the cursor delivers them.
pub fn export_from_source<W: Write>(
    source: &dyn AnnotationSource,
    canvases: &CanvasIndex,
    writer: W,
) -> Result<ExportSummary, BeehiveError> {
    let annotations = source.annotations()?;
    info!(source = source.source_name(), "annotation cursor opened");
    export_rows(annotations, canvases, writer)
}
