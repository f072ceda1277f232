use crate::catalog::CatalogItem;
use crate::cli::Band;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub band: Band,
    pub items: usize,
    pub reviewed: usize,
    pub review_groups: usize,
    pub review_rows_dropped: usize,
    pub top: Option<(String, f64)>,
    pub out_path: PathBuf,
}

impl RunSummary {
    /// Expects `items` already ranked.
    pub fn new(
        band: Band,
        items: &[CatalogItem],
        review_groups: usize,
        review_rows_dropped: usize,
        out_path: &Path,
    ) -> Self {
        Self {
            band,
            items: items.len(),
            reviewed: items
                .iter()
                .filter(|item| item.review_score.is_some())
                .count(),
            review_groups,
            review_rows_dropped,
            top: items
                .first()
                .map(|item| (item.key.to_string(), item.overall)),
            out_path: out_path.to_path_buf(),
        }
    }

    pub fn unreviewed(&self) -> usize {
        self.items - self.reviewed
    }

    pub fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("band: {}\n", self.band));
        output.push_str(&format!(
            "items: {} ({} reviewed, {} without reviews)\n",
            self.items,
            self.reviewed,
            self.unreviewed()
        ));
        output.push_str(&format!(
            "review groups: {} ({} row(s) dropped)\n",
            self.review_groups, self.review_rows_dropped
        ));
        match &self.top {
            Some((product, overall)) => {
                output.push_str(&format!("top: {product} ({overall:.2})\n"));
            }
            None => output.push_str("top: none\n"),
        }
        output.push_str(&format!("output: {}", self.out_path.display()));
        output
    }
}
