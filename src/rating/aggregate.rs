use super::grade::{rate, Grade};
use crate::dataset::ScoreRecord;
use serde::Serialize;

/// Mean score and grade for one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRating {
    pub company: String,
    pub total_score: f64,
    pub rating: Grade,
}

impl CompanyRating {
    /// Total score rounded to two decimal places for display
    pub fn rounded_total(&self) -> f64 {
        round2(self.total_score)
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rounds to two decimal places with the same tie-breaking as `{:.2}`, so a
/// rounded value always prints the way `format_score` prints the raw one.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Groups records by company and rates each group's mean score.
///
/// Output order is the order in which each company first appears in
/// `records`. An empty input yields an empty output.
pub fn aggregate(records: &[ScoreRecord]) -> Vec<CompanyRating> {
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();

    for record in records {
        match groups.iter_mut().find(|(name, _)| *name == record.company) {
            Some((_, scores)) => scores.push(record.score),
            None => groups.push((&record.company, vec![record.score])),
        }
    }

    groups
        .into_iter()
        .map(|(company, scores)| {
            let total_score = mean(&scores);
            CompanyRating {
                company: company.to_string(),
                total_score,
                rating: rate(total_score),
            }
        })
        .collect()
}

/// Finds the rating for `company`, if present
pub fn find_rating<'a>(ratings: &'a [CompanyRating], company: &str) -> Option<&'a CompanyRating> {
    ratings.iter().find(|r| r.company == company)
}
