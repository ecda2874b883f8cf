pub mod reference;
pub mod types;

pub use reference::Dataset;
pub use types::{Category, ScoreRecord};
