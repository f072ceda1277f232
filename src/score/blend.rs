use super::round2;
use crate::types::scoring::Score;

pub const SPEC_SHARE: f64 = 0.50;
pub const REVIEW_SHARE: f64 = 0.40;
pub const VALUE_SHARE: f64 = 0.10;

// Without a review score the spec share absorbs it.
pub const UNREVIEWED_SPEC_SHARE: f64 = 0.60;
pub const UNREVIEWED_VALUE_SHARE: f64 = 0.40;

pub fn overall_score(spec: Score, value: Score, review: Option<Score>) -> Score {
    match review {
        Some(review) => round2(SPEC_SHARE * spec + REVIEW_SHARE * review + VALUE_SHARE * value),
        None => round2(UNREVIEWED_SPEC_SHARE * spec + UNREVIEWED_VALUE_SHARE * value),
    }
}
