pub mod formatter;

pub use formatter::{
    format_company_detail, format_json, format_ratings_table, format_score, format_tsv,
    should_use_colors,
};
