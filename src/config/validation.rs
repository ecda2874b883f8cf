use super::schema::Config;
use crate::dataset::Dataset;

const TICK_RATE_RANGE: std::ops::RangeInclusive<u64> = 50..=5000;

/// Parse a "#RRGGBB" colour into its components.
pub fn parse_hex_color(value: &str) -> Result<(u8, u8, u8), String> {
    let hex = value
        .strip_prefix('#')
        .ok_or_else(|| "expected a leading '#'".to_string())?;

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("expected six hex digits".to_string());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|e| e.to_string())
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Validate configuration against the loaded dataset.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config, dataset: &Dataset) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref company) = config.default_company {
        if !dataset.contains_company(company) {
            errors.push(format!(
                "default_company: '{}' is not in the dataset (known: {})",
                company,
                dataset.companies().join(", ")
            ));
        }
    }

    if let Some(ref palette) = config.palette {
        let entries = [
            ("environmental", &palette.environmental),
            ("social", &palette.social),
            ("governance", &palette.governance),
        ];
        for (name, value) in entries {
            if let Some(value) = value {
                if let Err(e) = parse_hex_color(value) {
                    errors.push(format!("palette.{}: invalid colour '{}' - {}", name, value, e));
                }
            }
        }
    }

    if !TICK_RATE_RANGE.contains(&config.tick_rate_ms) {
        errors.push(format!(
            "tick_rate_ms: must be between {} and {}",
            TICK_RATE_RANGE.start(),
            TICK_RATE_RANGE.end()
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
