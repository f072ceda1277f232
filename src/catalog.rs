use crate::error::{RescoreError, Result};
use crate::score::blend::overall_score;
use crate::types::review::ProductKey;
use crate::types::scoring::Score;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// A catalog product. Fields other than the ones scored here are kept
/// verbatim, in input order, and written back unchanged.
#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub key: ProductKey,
    pub spec: Score,
    pub value: Score,
    pub review_score: Option<Score>,
    pub overall: Score,
    fields: Map<String, Value>,
}

impl CatalogItem {
    fn from_json(index: usize, value: Value) -> std::result::Result<Self, String> {
        let Value::Object(fields) = value else {
            return Err(format!("item {index} is not a JSON object"));
        };

        let text = |name: &str| {
            fields
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| format!("item {index} is missing string field `{name}`"))
        };
        let number = |name: &str| {
            fields
                .get(name)
                .and_then(Value::as_f64)
                .ok_or_else(|| format!("item {index} is missing numeric field `{name}`"))
        };

        let key = ProductKey::new(text("brand")?, text("model")?);
        let spec = number("spec")?;
        let value = number("value")?;
        let overall = fields
            .get("overall")
            .and_then(Value::as_f64)
            .unwrap_or_default();

        Ok(Self {
            key,
            spec,
            value,
            review_score: None,
            overall,
            fields,
        })
    }

    fn into_json(self) -> Value {
        let mut fields = self.fields;
        fields.insert("review_score".to_string(), Value::from(self.review_score));
        fields.insert("overall".to_string(), Value::from(self.overall));
        Value::Object(fields)
    }

    fn rescore(&mut self, review_score: Option<Score>) {
        self.review_score = review_score;
        self.overall = overall_score(self.spec, self.value, review_score);
    }
}

pub fn load_catalog(path: &Path) -> Result<Vec<CatalogItem>> {
    if !path.exists() {
        return Err(RescoreError::InputNotFound(path.display().to_string()));
    }
    let content =
        fs::read_to_string(path).map_err(|e| RescoreError::input_format(path, e.to_string()))?;
    let items =
        parse_catalog(&content).map_err(|detail| RescoreError::input_format(path, detail))?;
    info!(items = items.len(), "loaded catalog");
    Ok(items)
}

pub(crate) fn parse_catalog(content: &str) -> std::result::Result<Vec<CatalogItem>, String> {
    let parsed: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let Value::Array(entries) = parsed else {
        return Err("catalog must be a JSON array of products".to_string());
    };
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| CatalogItem::from_json(index, entry))
        .collect()
}

/// Writes review scores and overall scores onto every item, then ranks the
/// catalog by overall score, highest first. Equal scores keep input order.
pub fn update_catalog(items: &mut [CatalogItem], review_scores: &HashMap<ProductKey, Score>) {
    for item in items.iter_mut() {
        let review_score = review_scores.get(&item.key).copied();
        item.rescore(review_score);
    }
    // slice::sort_by is stable
    items.sort_by(|a, b| b.overall.total_cmp(&a.overall));
}

pub fn render_catalog(items: Vec<CatalogItem>) -> Result<String> {
    let entries = items.into_iter().map(CatalogItem::into_json).collect();
    Ok(serde_json::to_string_pretty(&Value::Array(entries))?)
}

/// Renders the whole catalog before touching `path`, so a serialization
/// failure leaves no output file behind.
pub fn write_catalog(path: &Path, items: Vec<CatalogItem>) -> Result<()> {
    let rendered = render_catalog(items)?;
    fs::write(path, rendered).map_err(RescoreError::Io)?;
    info!(path = %path.display(), "wrote catalog");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog(json: &str) -> Vec<CatalogItem> {
        parse_catalog(json).expect("catalog should parse")
    }

    #[test]
    fn unreviewed_item_gets_null_review_and_fallback_overall() {
        let mut items = catalog(r#"[{"brand": "X", "model": "Y", "spec": 8.0, "value": 7.0}]"#);
        update_catalog(&mut items, &HashMap::new());

        assert_eq!(items[0].review_score, None);
        assert_eq!(items[0].overall, 7.6);

        let rendered = render_catalog(items).expect("catalog should render");
        let parsed: Value = serde_json::from_str(&rendered).expect("output should be json");
        assert_eq!(parsed[0]["review_score"], Value::Null);
        assert_eq!(parsed[0]["overall"], 7.6);
    }

    #[test]
    fn reviewed_item_blends_review_score() {
        let mut items = catalog(r#"[{"brand": "X", "model": "Y", "spec": 8, "value": 7}]"#);
        let scores = HashMap::from([(ProductKey::new("X", "Y"), 8.43)]);
        update_catalog(&mut items, &scores);

        assert_eq!(items[0].review_score, Some(8.43));
        assert_eq!(items[0].overall, 8.07);
    }

    #[test]
    fn update_sorts_descending_and_keeps_ties_in_input_order() {
        let mut items = catalog(
            r#"[
                {"brand": "A", "model": "tie-1", "spec": 6.0, "value": 6.0},
                {"brand": "B", "model": "top", "spec": 9.0, "value": 9.0},
                {"brand": "C", "model": "tie-2", "spec": 6.0, "value": 6.0},
                {"brand": "D", "model": "low", "spec": 2.0, "value": 1.0}
            ]"#,
        );
        update_catalog(&mut items, &HashMap::new());

        let order = items
            .iter()
            .map(|item| item.key.model.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["top", "tie-1", "tie-2", "low"]);
    }

    #[test]
    fn existing_scores_are_overwritten_and_other_fields_preserved() {
        let mut items = catalog(
            r#"[{"name": "Robo", "brand": "X", "model": "Y", "review_score": 1.0,
                 "spec": 8.0, "overall": 0.5, "value": 7.0, "price": "£399"}]"#,
        );
        update_catalog(&mut items, &HashMap::new());

        let rendered = render_catalog(items).expect("catalog should render");
        let parsed: Value = serde_json::from_str(&rendered).expect("output should be json");
        let object = parsed[0].as_object().expect("item should be an object");
        let keys = object.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec!["name", "brand", "model", "review_score", "spec", "overall", "value", "price"]
        );
        assert_eq!(object["review_score"], Value::Null);
        assert_eq!(object["overall"], 7.6);
        assert_eq!(object["price"], "£399");
    }

    #[test]
    fn render_uses_two_space_indent() {
        let mut items = catalog(r#"[{"brand": "X", "model": "Y", "spec": 8.0, "value": 7.0}]"#);
        update_catalog(&mut items, &HashMap::new());
        let rendered = render_catalog(items).expect("catalog should render");
        assert!(rendered.starts_with("[\n  {\n    \"brand\": \"X\""));
    }

    #[test]
    fn parse_rejects_missing_required_fields() {
        let err = parse_catalog(r#"[{"brand": "X", "model": "Y", "spec": 8.0}]"#)
            .expect_err("should fail");
        assert!(err.contains("item 0"));
        assert!(err.contains("`value`"));

        let err = parse_catalog(r#"[{"brand": "X", "spec": 8.0, "value": 1.0}]"#)
            .expect_err("should fail");
        assert!(err.contains("`model`"));
    }

    #[test]
    fn parse_rejects_non_array_catalog() {
        assert!(parse_catalog(r#"{"brand": "X"}"#).is_err());
        assert!(parse_catalog("[1, 2]").is_err());
        assert!(parse_catalog("not json").is_err());
    }

    #[test]
    fn load_catalog_names_file_on_format_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("performance.json");
        fs::write(&path, r#"[{"brand": "X"}]"#).expect("catalog should write");

        let err = load_catalog(&path).expect_err("should fail");
        assert!(err.to_string().contains("performance.json"));
    }

    #[test]
    fn write_catalog_round_trips_through_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("out.json");
        let mut items = catalog(
            r#"[{"brand": "X", "model": "Y", "spec": 5.0, "value": 5.0},
                {"brand": "P", "model": "Q", "spec": 9.0, "value": 8.0}]"#,
        );
        update_catalog(&mut items, &HashMap::new());
        write_catalog(&path, items).expect("catalog should write");

        let reloaded = load_catalog(&path).expect("written catalog should load");
        assert_eq!(reloaded[0].key, ProductKey::new("P", "Q"));
        assert_eq!(reloaded[0].overall, 8.6);
    }
}
