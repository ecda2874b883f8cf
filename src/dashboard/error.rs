use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// The selected company has no rating row
    #[error("company not found: {company}")]
    NotFound { company: String },
}
