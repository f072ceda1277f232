use super::round2;
use crate::types::config::{ConfidenceConfig, RetailerWeights};
use crate::types::review::{ProductKey, ReviewRow};
use crate::types::scoring::{Score, ScoreBreakdown};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Logarithmically damped weight for one retailer's review count.
pub fn count_weight(count: u64) -> f64 {
    (count as f64 + 1.0).ln_1p()
}

/// How far total review volume goes towards `target_count`, capped at 1.
pub fn confidence_factor(total_count: u64, target_count: u64) -> f64 {
    let ratio = (total_count as f64 + 1.0).log10() / (target_count as f64 + 1.0).log10();
    ratio.min(1.0)
}

/// Scores one product's review rows on a 0-10 scale. `None` when there are
/// no rows to score.
pub fn score_breakdown(
    rows: &[ReviewRow],
    weights: &RetailerWeights,
    confidence: &ConfidenceConfig,
) -> Option<ScoreBreakdown> {
    if rows.is_empty() {
        return None;
    }

    let rating10 = rows.iter().map(|row| row.rating * 2.0).collect::<Vec<_>>();
    let count_w = rows.iter().map(|row| count_weight(row.count)).collect::<Vec<_>>();
    let mean_retailer_weight = rows
        .iter()
        .map(|row| weights.weight_for(&row.retailer))
        .sum::<f64>()
        / rows.len() as f64;

    let weight_sum: f64 = count_w.iter().sum();
    let base = if weight_sum == 0.0 {
        rating10.iter().sum::<f64>() / rating10.len() as f64
    } else {
        rating10
            .iter()
            .zip(&count_w)
            .map(|(rating, weight)| rating * weight)
            .sum::<f64>()
            / weight_sum
    };

    let total_count = rows
        .iter()
        .fold(0u64, |total, row| total.saturating_add(row.count));
    let conf = confidence_factor(total_count, confidence.target_count);
    let scale = confidence.scale_for(conf);

    Some(ScoreBreakdown {
        base,
        confidence: conf,
        scale,
        total_count,
        mean_retailer_weight,
        score: round2(base * scale),
    })
}

pub fn group_by_product(
    rows: impl IntoIterator<Item = ReviewRow>,
) -> BTreeMap<ProductKey, Vec<ReviewRow>> {
    let mut groups: BTreeMap<ProductKey, Vec<ReviewRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.key()).or_default().push(row);
    }
    groups
}

/// Review score for every product group. Empty groups have no entry.
pub fn review_scores(
    groups: &BTreeMap<ProductKey, Vec<ReviewRow>>,
    weights: &RetailerWeights,
    confidence: &ConfidenceConfig,
) -> HashMap<ProductKey, Score> {
    groups
        .iter()
        .filter_map(|(key, rows)| {
            let breakdown = score_breakdown(rows, weights, confidence)?;
            debug!(
                product = %key,
                retailers = rows.len(),
                total_count = breakdown.total_count,
                base = breakdown.base,
                confidence = breakdown.confidence,
                scale = breakdown.scale,
                mean_retailer_weight = breakdown.mean_retailer_weight,
                score = breakdown.score,
                "scored review group"
            );
            Some((key.clone(), breakdown.score))
        })
        .collect()
}
