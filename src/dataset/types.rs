use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three ESG scoring categories.
///
/// Declaration order is the display order used by every chart and table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Environmental,
    Social,
    Governance,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Environmental,
        Category::Social,
        Category::Governance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Environmental => "Environmental",
            Category::Social => "Social",
            Category::Governance => "Governance",
        }
    }

    /// Single-letter label used where chart bars are too narrow for the full name
    pub fn short_label(&self) -> &'static str {
        match self {
            Category::Environmental => "E",
            Category::Social => "S",
            Category::Governance => "G",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single (company, category, score) row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub company: String,
    pub category: Category,
    /// Expected in [0, 100]; not enforced.
    pub score: f64,
}

impl ScoreRecord {
    pub fn new(company: impl Into<String>, category: Category, score: f64) -> Self {
        Self {
            company: company.into(),
            category,
            score,
        }
    }
}
