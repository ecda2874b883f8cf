use serde::Serialize;
use std::fmt;

/// Letter grade for an ESG score. Lower scores are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// Every grade, best first
    pub const ALL: [Grade; 8] = [
        Grade::APlus,
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::CPlus,
        Grade::C,
        Grade::D,
        Grade::F,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Inclusive upper bound of the band, `None` for the F catch-all
    pub fn upper_bound(&self) -> Option<f64> {
        match self {
            Grade::APlus => Some(20.0),
            Grade::A => Some(30.0),
            Grade::BPlus => Some(40.0),
            Grade::B => Some(50.0),
            Grade::CPlus => Some(60.0),
            Grade::C => Some(70.0),
            Grade::D => Some(80.0),
            Grade::F => None,
        }
    }

    /// Human-readable band description, e.g. "30 < score <= 40"
    pub fn band_label(&self) -> String {
        let index = Grade::ALL.iter().position(|g| g == self).unwrap_or(0);
        let lower = index
            .checked_sub(1)
            .and_then(|i| Grade::ALL.get(i))
            .and_then(|g| g.upper_bound());

        match (lower, self.upper_bound()) {
            (None, Some(upper)) => format!("0 <= score <= {}", upper),
            (Some(lower), Some(upper)) => format!("{} < score <= {}", lower, upper),
            (Some(lower), None) => format!("score > {} or < 0", lower),
            (None, None) => "any score".to_string(),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts an ESG score into a letter grade.
///
/// | Range             | Grade |
/// |-------------------|-------|
/// | 0 <= s <= 20      | A+    |
/// | <= 30             | A     |
/// | <= 40             | B+    |
/// | <= 50             | B     |
/// | <= 60             | C+    |
/// | <= 70             | C     |
/// | <= 80             | D     |
/// | > 80, < 0, NaN    | F     |
///
/// Upper bounds are inclusive. Total over every `f64`.
pub fn rate(score: f64) -> Grade {
    match score {
        // Negative scores have no band and fall into the catch-all
        s if s < 0.0 => Grade::F,
        s if s <= 20.0 => Grade::APlus,
        s if s <= 30.0 => Grade::A,
        s if s <= 40.0 => Grade::BPlus,
        s if s <= 50.0 => Grade::B,
        s if s <= 60.0 => Grade::CPlus,
        s if s <= 70.0 => Grade::C,
        s if s <= 80.0 => Grade::D,
        // Includes NaN
        _ => Grade::F,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_band_boundaries() {
        assert_eq!(rate(0.0), Grade::APlus);
        assert_eq!(rate(20.0), Grade::APlus);
        assert_eq!(rate(20.0001), Grade::A);
        assert_eq!(rate(30.0), Grade::A);
        assert_eq!(rate(30.5), Grade::BPlus);
        assert_eq!(rate(40.0), Grade::BPlus);
        assert_eq!(rate(45.0), Grade::B);
        assert_eq!(rate(50.0), Grade::B);
        assert_eq!(rate(60.0), Grade::CPlus);
        assert_eq!(rate(60.01), Grade::C);
        assert_eq!(rate(70.0), Grade::C);
        assert_eq!(rate(80.0), Grade::D);
        assert_eq!(rate(80.0001), Grade::F);
        assert_eq!(rate(100.0), Grade::F);
    }

    #[test]
    fn test_rate_out_of_domain_falls_through_to_f() {
        assert_eq!(rate(1000.0), Grade::F);
        assert_eq!(rate(-5.0), Grade::F);
        assert_eq!(rate(-0.0001), Grade::F);
        assert_eq!(rate(f64::NAN), Grade::F);
        assert_eq!(rate(f64::INFINITY), Grade::F);
        assert_eq!(rate(f64::NEG_INFINITY), Grade::F);
    }

    #[test]
    fn test_rate_is_deterministic() {
        for i in 0..=1000 {
            let score = i as f64 / 10.0;
            assert_eq!(rate(score), rate(score));
        }
    }

    #[test]
    fn test_rate_matches_upper_bounds() {
        // Every band's upper bound rates as that band, just above rates as the next one
        for pair in Grade::ALL.windows(2) {
            let bound = pair[0].upper_bound().unwrap();
            assert_eq!(rate(bound), pair[0]);
            assert_eq!(rate(bound + 1e-9), pair[1]);
        }
    }

    #[test]
    fn test_rate_is_monotonic_over_domain() {
        let mut previous = rate(0.0);
        for i in 0..=1000 {
            let current = rate(i as f64 / 10.0);
            assert!(current >= previous, "grade regressed at {}", i as f64 / 10.0);
            previous = current;
        }
    }

    #[test]
    fn test_grade_display() {
        let labels: Vec<String> = Grade::ALL.iter().map(|g| g.to_string()).collect();
        assert_eq!(labels, vec!["A+", "A", "B+", "B", "C+", "C", "D", "F"]);
    }

    #[test]
    fn test_grade_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Grade::BPlus).unwrap(), "\"B+\"");
        assert_eq!(serde_json::to_string(&Grade::F).unwrap(), "\"F\"");
    }

    #[test]
    fn test_band_labels() {
        assert_eq!(Grade::APlus.band_label(), "0 <= score <= 20");
        assert_eq!(Grade::BPlus.band_label(), "30 < score <= 40");
        assert_eq!(Grade::F.band_label(), "score > 80 or < 0");
    }
}
