use crate::error::{RescoreError, Result};
use crate::types::review::ReviewRow;
use csv::StringRecord;
use std::path::Path;
use tracing::{debug, info};

pub const REQUIRED_COLUMNS: [&str; 5] = ["brand", "model", "retailer", "rating", "count"];

#[derive(Debug, Clone, Default)]
pub struct ReviewTable {
    pub rows: Vec<ReviewRow>,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

struct ColumnIndex {
    brand: usize,
    model: usize,
    retailer: usize,
    rating: usize,
    count: usize,
}

impl ColumnIndex {
    /// Header names are matched after trimming surrounding whitespace.
    fn resolve(headers: &StringRecord) -> std::result::Result<Self, String> {
        let positions = REQUIRED_COLUMNS
            .map(|name| headers.iter().position(|header| header.trim() == name));

        match positions {
            [Some(brand), Some(model), Some(retailer), Some(rating), Some(count)] => Ok(Self {
                brand,
                model,
                retailer,
                rating,
                count,
            }),
            _ => {
                let missing = REQUIRED_COLUMNS
                    .iter()
                    .zip(positions)
                    .filter(|(_, position)| position.is_none())
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>();
                Err(format!(
                    "missing required column(s): {}",
                    missing.join(", ")
                ))
            }
        }
    }
}

pub fn load_reviews(path: &Path) -> Result<ReviewTable> {
    if !path.exists() {
        return Err(RescoreError::InputNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| RescoreError::input_format(path, e.to_string()))?;
    let table =
        parse_reviews(&content).map_err(|detail| RescoreError::input_format(path, detail))?;
    info!(
        rows_read = table.rows_read,
        rows_kept = table.rows.len(),
        rows_dropped = table.rows_dropped,
        "loaded review table"
    );
    Ok(table)
}

pub(crate) fn parse_reviews(content: &str) -> std::result::Result<ReviewTable, String> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("unreadable header row: {e}"))?
        .clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut table = ReviewTable::default();
    for (row_idx, result) in reader.records().enumerate() {
        // header occupies line 1
        let line = row_idx + 2;
        let record = result.map_err(|e| format!("CSV parse error at line {line}: {e}"))?;
        table.rows_read += 1;

        let field = |idx: usize| record.get(idx).unwrap_or("");
        let Some(rating) = parse_rating(field(columns.rating)) else {
            debug!(line, rating = field(columns.rating), "dropping row with non-numeric rating");
            table.rows_dropped += 1;
            continue;
        };

        let brand = field(columns.brand);
        let model = field(columns.model);
        if brand.is_empty() || model.is_empty() {
            debug!(line, "dropping row without brand or model");
            table.rows_dropped += 1;
            continue;
        }

        table.rows.push(ReviewRow::new(
            brand,
            model,
            field(columns.retailer),
            rating,
            parse_count(field(columns.count)),
        ));
    }

    Ok(table)
}

/// Finite ratings only; anything else removes the row.
fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite())
}

/// Unparsable, non-finite or negative counts become 0. Fractions truncate.
fn parse_count(raw: &str) -> u64 {
    let raw = raw.trim();
    if let Ok(count) = raw.parse::<u64>() {
        return count;
    }
    match raw.parse::<f64>() {
        Ok(count) if count.is_finite() && count > 0.0 => count.trunc() as u64,
        _ => 0,
    }
}
