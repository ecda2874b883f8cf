use super::error::DashboardError;
use crate::dataset::{Category, Dataset};
use crate::rating::{aggregate, find_rating, CompanyRating, Grade};
use serde::Serialize;

pub const DASHBOARD_TITLE: &str = "Pellegrino Scoring Tool - ESG Ratings Dashboard";
pub const BREAKDOWN_HEADING: &str = "ESG Score Breakdown";
pub const COMPARISON_HEADING: &str = "ESG Comparison";
pub const COMPARISON_BLURB: &str = "Compare the selected company's ESG scores against competitors.";
pub const COMPARISON_TITLE: &str = "ESG Comparison Across Companies";
pub const SCORE_AXIS_LABEL: &str = "Score (0-100)";
pub const SCORE_AXIS_MAX: u64 = 100;

/// Headline metrics for the selected company
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub company: String,
    /// Mean score rounded to two decimal places
    pub total_score: f64,
    pub rating: Grade,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBar {
    pub category: Category,
    pub score: f64,
}

/// One company's bars in the comparison chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyGroup {
    pub company: String,
    pub bars: Vec<CategoryBar>,
}

/// Everything the display surface needs for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub metrics: Metrics,
    /// Title of the breakdown chart, e.g. "Apple ESG Scores"
    pub breakdown_title: String,
    pub breakdown: Vec<CategoryBar>,
    pub comparison: Vec<CompanyGroup>,
}

/// Builds the view for `selected` from scratch.
///
/// Ratings are recomputed from the dataset on every call; nothing is cached.
pub fn build_view(dataset: &Dataset, selected: &str) -> Result<DashboardView, DashboardError> {
    let ratings = aggregate(dataset.records());
    build_view_with(dataset, &ratings, selected)
}

/// Builds the view from ratings the caller already computed
pub fn build_view_with(
    dataset: &Dataset,
    ratings: &[CompanyRating],
    selected: &str,
) -> Result<DashboardView, DashboardError> {
    let rating = find_rating(ratings, selected).ok_or_else(|| DashboardError::NotFound {
        company: selected.to_string(),
    })?;

    let metrics = Metrics {
        company: rating.company.clone(),
        total_score: rating.rounded_total(),
        rating: rating.rating,
    };

    let breakdown = dataset
        .records_for(selected)
        .map(|r| CategoryBar {
            category: r.category,
            score: r.score,
        })
        .collect();

    Ok(DashboardView {
        metrics,
        breakdown_title: format!("{} ESG Scores", selected),
        breakdown,
        comparison: comparison_groups(dataset),
    })
}

/// All records grouped by company (first-appearance order), bars in dataset order
pub fn comparison_groups(dataset: &Dataset) -> Vec<CompanyGroup> {
    dataset
        .companies()
        .into_iter()
        .map(|company| CompanyGroup {
            company: company.to_string(),
            bars: dataset
                .records_for(company)
                .map(|r| CategoryBar {
                    category: r.category,
                    score: r.score,
                })
                .collect(),
        })
        .collect()
}

/// The same records regrouped by category: one group per category, one bar per company
pub fn comparison_by_category(dataset: &Dataset) -> Vec<(Category, Vec<(String, f64)>)> {
    Category::ALL
        .iter()
        .map(|&category| {
            let bars: Vec<(String, f64)> = dataset
                .records()
                .iter()
                .filter(|r| r.category == category)
                .map(|r| (r.company.clone(), r.score))
                .collect();
            (category, bars)
        })
        .filter(|(_, bars)| !bars.is_empty())
        .collect()
}
