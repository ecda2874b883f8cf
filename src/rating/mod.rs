pub mod aggregate;
pub mod grade;

pub use aggregate::{aggregate, find_rating, mean, round2, CompanyRating};
pub use grade::{rate, Grade};
