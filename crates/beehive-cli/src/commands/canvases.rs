use beehive_core::config::ExportConfig;
use beehive_core::error::BeehiveError;
use serde_json::json;

use crate::output;

pub fn run(config: &ExportConfig, output_format: &str) -> Result<(), BeehiveError> {
    let fetcher = super::manifest_fetcher(config)?;
    let index = beehive_core::load_canvas_index(&fetcher, &config.manifests)?;

    match output_format {
        "json" => {
            let canvases: Vec<_> = index
                .iter()
                .map(|meta| {
                    json!({
                        "canvas": meta.canvas,
                        "volume": meta.volume(),
                        "image_number": meta.image_number(),
                        "image_url": meta.image_url,
                    })
                })
                .collect();
            output::json::print(&json!(canvases))?
        }
        _ => output::table::print_canvases(&index),
    }

    Ok(())
}
