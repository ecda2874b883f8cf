use crate::dashboard::{build_view, DashboardError, DashboardView};
use crate::dataset::Dataset;
use crate::tui::theme::ThemeColors;
use std::time::Instant;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

/// How the comparison chart groups its bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    /// One group per company, one bar per category
    ByCompany,
    /// One group per category, one bar per company
    ByCategory,
}

pub struct App {
    pub dataset: Dataset,
    pub companies: Vec<String>,
    /// Index into `companies`; `None` only when the dataset is empty
    pub selected: Option<usize>,
    pub view: Option<DashboardView>,
    pub comparison_mode: ComparisonMode,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub colors: ThemeColors,
}

impl App {
    /// Create the app and render the initial selection.
    ///
    /// `initial` defaults to the first company. Naming a company that is not
    /// in the dataset is an error; an empty dataset is not.
    pub fn new(
        dataset: Dataset,
        initial: Option<&str>,
        colors: ThemeColors,
    ) -> Result<Self, DashboardError> {
        let companies: Vec<String> = dataset.companies().into_iter().map(String::from).collect();

        let selected = match initial {
            Some(name) => Some(companies.iter().position(|c| c == name).ok_or_else(|| {
                DashboardError::NotFound {
                    company: name.to_string(),
                }
            })?),
            None if companies.is_empty() => None,
            None => Some(0),
        };

        let mut app = Self {
            dataset,
            companies,
            selected: None,
            view: None,
            comparison_mode: ComparisonMode::ByCompany,
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
            colors,
        };
        if let Some(index) = selected {
            app.select_company(index);
        }
        Ok(app)
    }

    pub fn selected_company(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.companies.get(i))
            .map(String::as_str)
    }

    /// Selection-changed handler: recompute ratings and rebuild the view
    pub fn select_company(&mut self, index: usize) {
        let Some(company) = self.companies.get(index).cloned() else {
            return;
        };

        match build_view(&self.dataset, &company) {
            Ok(view) => {
                tracing::debug!(
                    company = %company,
                    total = view.metrics.total_score,
                    rating = %view.metrics.rating,
                    "selection changed"
                );
                self.selected = Some(index);
                self.view = Some(view);
            }
            Err(e) => {
                tracing::warn!(error = %e, "selection has no rating");
                self.show_flash(format!("Error: {}", e));
            }
        }
    }

    pub fn next_company(&mut self) {
        if self.companies.is_empty() {
            return;
        }
        let next = match self.selected {
            Some(i) if i + 1 < self.companies.len() => i + 1,
            _ => 0,
        };
        self.select_company(next);
    }

    pub fn previous_company(&mut self) {
        if self.companies.is_empty() {
            return;
        }
        let previous = match self.selected {
            Some(0) | None => self.companies.len() - 1,
            Some(i) => i - 1,
        };
        self.select_company(previous);
    }

    /// Jump by 1-based position, as shown in the company tabs
    pub fn select_number(&mut self, number: usize) {
        if number >= 1 && number <= self.companies.len() {
            self.select_company(number - 1);
            if let Some(company) = self.selected_company() {
                let msg = format!("Selected: {}", company);
                self.show_flash(msg);
            }
        }
    }

    pub fn toggle_comparison(&mut self) {
        self.comparison_mode = match self.comparison_mode {
            ComparisonMode::ByCompany => ComparisonMode::ByCategory,
            ComparisonMode::ByCategory => ComparisonMode::ByCompany,
        };
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }
}
