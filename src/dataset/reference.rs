use super::types::{Category, ScoreRecord};

/// Immutable collection of score rows, in the order they were defined.
///
/// Built once at startup and passed by reference to everything that needs it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    records: Vec<ScoreRecord>,
}

/// Reference scores: (company, environmental, social, governance)
const REFERENCE_SCORES: &[(&str, f64, f64, f64)] = &[
    ("Apple", 32.0, 45.0, 38.0),
    ("Microsoft", 45.0, 50.0, 42.0),
    ("Google", 40.0, 48.0, 41.0),
    ("Amazon", 28.0, 35.0, 30.0),
];

impl Dataset {
    pub fn new(records: Vec<ScoreRecord>) -> Self {
        Self { records }
    }

    /// The built-in dataset: Apple and three competitors, one row per category.
    pub fn reference() -> Self {
        let records = REFERENCE_SCORES
            .iter()
            .flat_map(|&(company, env, social, gov)| {
                [
                    ScoreRecord::new(company, Category::Environmental, env),
                    ScoreRecord::new(company, Category::Social, social),
                    ScoreRecord::new(company, Category::Governance, gov),
                ]
            })
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct company names in order of first appearance
    pub fn companies(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.company.as_str()) {
                names.push(&record.company);
            }
        }
        names
    }

    pub fn contains_company(&self, company: &str) -> bool {
        self.records.iter().any(|r| r.company == company)
    }

    /// Rows belonging to a single company, in dataset order
    pub fn records_for<'a>(
        &'a self,
        company: &'a str,
    ) -> impl Iterator<Item = &'a ScoreRecord> + 'a {
        self.records.iter().filter(move |r| r.company == company)
    }
}
