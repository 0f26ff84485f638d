use beehive_core::config::ExportConfig;
use beehive_core::error::BeehiveError;
use beehive_core::store::{AnnotationSource, ResultsFileSource, SparqlAnnotationSource};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

pub fn run(
    config: &ExportConfig,
    results_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
) -> Result<(), BeehiveError> {
    // Canvas metadata must be complete before the first row is resolved
    let fetcher = super::manifest_fetcher(config)?;
    let index = beehive_core::load_canvas_index(&fetcher, &config.manifests)?;

    let source: Box<dyn AnnotationSource> = match results_file {
        Some(path) => Box::new(ResultsFileSource::new(path)),
        None => Box::new(SparqlAnnotationSource::new(
            config.sparql_endpoint.clone(),
            config.timeout(),
        )?),
    };

    let summary = match &output_file {
        Some(path) => {
            let file = File::create(path)?;
            beehive_core::export_from_source(source.as_ref(), &index, BufWriter::new(file))?
        }
        None => {
            let stdout = std::io::stdout();
            beehive_core::export_from_source(source.as_ref(), &index, stdout.lock())?
        }
    };

    eprintln!(
        "Exported {} annotation(s) from {} canvas(es){}",
        summary.rows,
        index.len(),
        output_file
            .as_ref()
            .map(|p| format!(" to {}", p.display()))
            .unwrap_or_default()
    );
    if summary.unstructured > 0 {
        eprintln!(
            "  {} annotation(s) had no Entry:/Head: label and went to 'unparsed'",
            summary.unstructured
        );
    }
    if summary.without_selection > 0 {
        eprintln!(
            "  {} annotation(s) had no region selector",
            summary.without_selection
        );
    }

    Ok(())
}
