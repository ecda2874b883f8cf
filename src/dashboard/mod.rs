//! Selection-driven view model consumed by the terminal dashboard and the
//! non-interactive `show` output.

pub mod error;
pub mod view;

pub use error::DashboardError;
pub use view::{
    build_view, build_view_with, comparison_by_category, comparison_groups, CategoryBar,
    CompanyGroup, DashboardView, Metrics,
};
