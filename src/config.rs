use crate::error::{RescoreError, Result};
use crate::types::config::WeightsConfig;
use std::path::Path;
use tracing::{info, warn};

/// Loads retailer weights and confidence settings. Files ending in `.toml`
/// are read as TOML, everything else as JSON.
pub fn load_weights(path: &Path) -> Result<WeightsConfig> {
    if !path.exists() {
        return Err(RescoreError::InputNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| RescoreError::input_format(path, e.to_string()))?;
    let cfg = parse_weights(&content, is_toml(path))
        .map_err(|detail| RescoreError::input_format(path, detail))?;
    let out_of_range = cfg.weights.out_of_range();
    if !out_of_range.is_empty() {
        warn!(
            retailers = %out_of_range.join(", "),
            "retailer weights outside (0.0, 1.0]"
        );
    }
    info!(
        retailers = cfg.weights.retailer_count(),
        target_count = cfg.confidence.target_count,
        min_scale = cfg.confidence.min_scale,
        max_scale = cfg.confidence.max_scale,
        "loaded weights config"
    );
    Ok(cfg)
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

fn parse_weights(content: &str, toml_syntax: bool) -> std::result::Result<WeightsConfig, String> {
    let cfg: WeightsConfig = if toml_syntax {
        toml::from_str(content).map_err(|e| e.to_string())?
    } else {
        serde_json::from_str(content).map_err(|e| e.to_string())?
    };
    cfg.validate()?;
    Ok(cfg)
}
