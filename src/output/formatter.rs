use std::io::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{Width, terminal_size};

use crate::dashboard::DashboardView;
use crate::rating::{CompanyRating, Grade};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Format a total score with two decimals (38.333.. -> "38.33")
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Colour a grade label: green for A bands, yellow for B/C, red for D/F
fn paint_grade(grade: Grade, text: &str, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match grade {
        Grade::APlus | Grade::A => text.green().bold().to_string(),
        Grade::BPlus | Grade::B | Grade::CPlus | Grade::C => text.yellow().bold().to_string(),
        Grade::D | Grade::F => text.red().bold().to_string(),
    }
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format ratings as a table with columns: Index, Company, Score, Rating
/// Index column: 3 chars (fits "99."), right-aligned
/// Company column grows to the longest name, clamped to the terminal width
pub fn format_ratings_table(ratings: &[CompanyRating], use_colors: bool) -> String {
    if ratings.is_empty() {
        return "No companies to rate.".to_string();
    }

    let score_width = 6;
    let rating_width = 2;
    let separator = "  ";
    let fixed_width = 4 + score_width + rating_width + separator.len() * 2;

    let longest = ratings
        .iter()
        .map(|r| r.company.chars().count())
        .max()
        .unwrap_or(0)
        .max("Company".len());
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest.min(width - fixed_width),
        Some(_) => longest.min(20),
        None => longest,
    };

    let header = format!(
        "{:>3} {:<name_width$}{}{:>score_width$}{}{}",
        "#",
        "Company",
        separator,
        "Score",
        separator,
        "Rating",
        name_width = name_width,
        score_width = score_width,
    );
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    let rows = ratings.iter().enumerate().map(|(idx, rating)| {
        let index_str = format!("{:>2}.", idx + 1);
        let name = truncate_name(&rating.company, name_width);
        let score = format!("{:>width$}", format_score(rating.total_score), width = score_width);
        let grade = paint_grade(rating.rating, rating.rating.as_str(), use_colors);

        if use_colors {
            format!(
                "{} {:<name_width$}{}{}{}{}",
                index_str.dimmed(),
                name,
                separator,
                score,
                separator,
                grade,
                name_width = name_width,
            )
        } else {
            format!(
                "{} {:<name_width$}{}{}{}{}",
                index_str,
                name,
                separator,
                score,
                separator,
                grade,
                name_width = name_width,
            )
        }
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ratings as tab-separated values for scripting
/// Columns: company, total_score, rating (no headers, no colors)
pub fn format_tsv(ratings: &[CompanyRating]) -> String {
    ratings
        .iter()
        .map(|r| format!("{}\t{}\t{}", r.company, format_score(r.total_score), r.rating))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed JSON for anything serializable (ratings list or a single view)
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Text bar scaled to 0-100
fn score_bar(score: f64, width: usize) -> String {
    let ratio = (score / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Multi-line detail for one company: metrics then one bar per category
pub fn format_company_detail(view: &DashboardView, use_colors: bool) -> String {
    let metrics = &view.metrics;
    let grade = paint_grade(metrics.rating, metrics.rating.as_str(), use_colors);
    let title = if use_colors {
        view.breakdown_title.bold().to_string()
    } else {
        view.breakdown_title.clone()
    };

    let mut lines = vec![
        title,
        format!("  Total ESG Score: {}", format_score(metrics.total_score)),
        format!("  ESG Rating: {}", grade),
    ];

    for bar in &view.breakdown {
        let label = format!("{:<13}", bar.category.as_str());
        let label = if use_colors {
            label.cyan().to_string()
        } else {
            label
        };
        lines.push(format!(
            "  {} {} {:>5.1}",
            label,
            score_bar(bar.score, 20),
            bar.score
        ));
    }

    lines.join("\n")
}
