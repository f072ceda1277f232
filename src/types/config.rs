use serde::Deserialize;
use std::collections::BTreeMap;

pub const DEFAULT_RETAILER_WEIGHT: f64 = 0.7;

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    pub weights: RetailerWeights,
    pub confidence: ConfidenceConfig,
}

/// Per-retailer trust weights. Retailers not listed fall back to
/// [`DEFAULT_RETAILER_WEIGHT`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RetailerWeights(BTreeMap<String, f64>);

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ConfidenceConfig {
    pub target_count: u64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl WeightsConfig {
    /// Only the confidence settings are fatal; retailer weights do not feed
    /// the score, so out-of-range weights are reported by the loader instead.
    pub fn validate(&self) -> Result<(), String> {
        self.confidence.validate()
    }
}

impl RetailerWeights {
    pub fn weight_for(&self, retailer: &str) -> f64 {
        self.0
            .get(retailer)
            .copied()
            .unwrap_or(DEFAULT_RETAILER_WEIGHT)
    }

    pub fn retailer_count(&self) -> usize {
        self.0.len()
    }

    /// Retailers whose weight lies outside (0.0, 1.0].
    pub fn out_of_range(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, weight)| !(**weight > 0.0 && **weight <= 1.0))
            .map(|(retailer, _)| retailer.as_str())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RetailerWeights {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(retailer, weight)| (retailer.into(), weight))
                .collect(),
        )
    }
}

impl ConfidenceConfig {
    /// Interpolates between `min_scale` and `max_scale`; a saturated
    /// confidence yields exactly `max_scale`.
    pub fn scale_for(&self, confidence: f64) -> f64 {
        if confidence >= 1.0 {
            return self.max_scale;
        }
        self.min_scale + (self.max_scale - self.min_scale) * confidence
    }

    fn validate(&self) -> Result<(), String> {
        if self.target_count == 0 {
            return Err("confidence.target_count must be greater than 0".to_string());
        }
        for (name, scale) in [("min_scale", self.min_scale), ("max_scale", self.max_scale)] {
            if !(0.0..=1.0).contains(&scale) {
                return Err(format!(
                    "confidence.{name} must be between 0.0 and 1.0 (found {scale})"
                ));
            }
        }
        if self.min_scale > self.max_scale {
            return Err(format!(
                "confidence.min_scale ({}) must not exceed confidence.max_scale ({})",
                self.min_scale, self.max_scale
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confidence(target_count: u64, min_scale: f64, max_scale: f64) -> ConfidenceConfig {
        ConfidenceConfig {
            target_count,
            min_scale,
            max_scale,
        }
    }

    #[test]
    fn parse_json_config() {
        let json = r#"{
            "weights": {"Amazon": 1.0, "Currys": 0.8},
            "confidence": {"target_count": 2000, "min_scale": 0.7, "max_scale": 1.0}
        }"#;
        let cfg: WeightsConfig = serde_json::from_str(json).expect("config should parse");
        assert_eq!(cfg.weights.retailer_count(), 2);
        assert_eq!(cfg.weights.weight_for("Currys"), 0.8);
        assert_eq!(cfg.confidence.target_count, 2000);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[weights]
Amazon = 1.0

[confidence]
target_count = 500
min_scale = 0.5
max_scale = 0.9
"#;
        let cfg: WeightsConfig = toml::from_str(toml_str).expect("toml config should parse");
        assert_eq!(cfg.confidence, confidence(500, 0.5, 0.9));
    }

    #[test]
    fn missing_confidence_section_fails_to_parse() {
        let json = r#"{"weights": {"Amazon": 1.0}}"#;
        let err = serde_json::from_str::<WeightsConfig>(json).expect_err("should fail");
        assert!(err.to_string().contains("confidence"));
    }

    #[test]
    fn unknown_retailer_uses_default_weight() {
        let weights: RetailerWeights = [("Amazon", 1.0)].into_iter().collect();
        assert_eq!(weights.weight_for("Amazon"), 1.0);
        assert_eq!(weights.weight_for("Argos"), DEFAULT_RETAILER_WEIGHT);
    }

    #[test]
    fn out_of_range_lists_weights_outside_unit_interval() {
        let weights: RetailerWeights = [("Amazon", 0.0), ("Argos", 1.5), ("Currys", 0.9)]
            .into_iter()
            .collect();
        assert_eq!(weights.out_of_range(), vec!["Amazon", "Argos"]);
    }

    #[test]
    fn validate_accepts_out_of_range_retailer_weight() {
        let json = r#"{
            "weights": {"Amazon": 1.2, "Argos": 0},
            "confidence": {"target_count": 2000, "min_scale": 0.7, "max_scale": 1.0}
        }"#;
        let cfg: WeightsConfig = serde_json::from_str(json).expect("config should parse");
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.weights.out_of_range(), vec!["Amazon", "Argos"]);
    }

    #[test]
    fn validate_rejects_zero_target_count() {
        assert!(confidence(0, 0.7, 1.0).validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_scales() {
        assert!(confidence(100, 0.9, 0.8).validate().is_err());
        assert!(confidence(100, -0.1, 0.8).validate().is_err());
        assert!(confidence(100, 0.5, 1.2).validate().is_err());
    }

    #[test]
    fn validate_accepts_scale_boundaries() {
        assert!(confidence(1, 0.0, 1.0).validate().is_ok());
        assert!(confidence(1, 0.6, 0.6).validate().is_ok());
    }

    #[test]
    fn scale_interpolates_and_saturates() {
        let cfg = confidence(2000, 0.7, 1.0);
        assert_eq!(cfg.scale_for(0.0), 0.7);
        assert!((cfg.scale_for(0.5) - 0.85).abs() < 1e-12);
        assert_eq!(cfg.scale_for(1.0), 1.0);
    }
}
