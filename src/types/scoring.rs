pub type Score = f64;

/// Intermediate values behind one product's review score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub base: Score,
    pub confidence: f64,
    pub scale: f64,
    pub total_count: u64,
    /// Average retailer weight across the group. Reported only; the score
    /// formula does not use it.
    pub mean_retailer_weight: f64,
    pub score: Score,
}
