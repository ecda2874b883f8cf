use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::env;
use std::fs;

use pellegrino_esg::config::{self, Config};
use pellegrino_esg::dashboard::{build_view, DashboardError};
use pellegrino_esg::dataset::{Category, Dataset, ScoreRecord};
use pellegrino_esg::output;
use pellegrino_esg::rating::{aggregate, rate, round2, Grade};
use pellegrino_esg::tui::{self, App, ThemeColors};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn list_flow_over_reference_dataset() {
    let dataset = Dataset::reference();
    let ratings = aggregate(dataset.records());

    let tsv = output::format_tsv(&ratings);
    assert_eq!(
        tsv,
        "Apple\t38.33\tB+\nMicrosoft\t45.67\tB\nGoogle\t43.00\tB\nAmazon\t31.00\tB+"
    );

    let json = output::format_json(&ratings).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let grades: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["rating"].as_str().unwrap())
        .collect();
    assert_eq!(grades, vec!["B+", "B", "B", "B+"]);

    let table = output::format_ratings_table(&ratings, false);
    assert!(table.contains("Microsoft"));
    assert!(table.contains("45.67"));
}

#[test]
fn every_rating_matches_rate_of_its_mean() {
    let dataset = Dataset::reference();
    for rating in aggregate(dataset.records()) {
        let scores: Vec<f64> = dataset.records_for(&rating.company).map(|r| r.score).collect();
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        assert_eq!(rating.total_score, mean);
        assert_eq!(rating.rating, rate(mean));
    }
}

#[test]
fn show_flow_and_unknown_company() {
    let dataset = Dataset::reference();

    let view = build_view(&dataset, "Amazon").unwrap();
    assert_eq!(view.metrics.total_score, 31.0);
    assert_eq!(view.metrics.rating, Grade::BPlus);
    assert_eq!(view.breakdown_title, "Amazon ESG Scores");

    let detail = output::format_company_detail(&view, false);
    assert!(detail.contains("Total ESG Score: 31.00"));
    assert!(detail.contains("ESG Rating: B+"));

    let err = build_view(&dataset, "Tesla").unwrap_err();
    assert_eq!(
        err,
        DashboardError::NotFound {
            company: "Tesla".to_string()
        }
    );

    // Survives the anyhow boundary used by the binary
    let wrapped: anyhow::Error = err.into();
    assert!(wrapped.downcast_ref::<DashboardError>().is_some());
}

#[test]
fn custom_dataset_is_rated_from_scratch() {
    let dataset = Dataset::new(vec![
        ScoreRecord::new("X", Category::Environmental, 15.0),
        ScoreRecord::new("X", Category::Social, 18.0),
        ScoreRecord::new("X", Category::Governance, 20.0),
        ScoreRecord::new("Y", Category::Environmental, 60.01),
    ]);
    let ratings = aggregate(dataset.records());

    assert_eq!(ratings.len(), 2);
    assert_eq!(round2(ratings[0].total_score), 17.67);
    assert_eq!(ratings[0].rating, Grade::APlus);
    assert_eq!(ratings[1].rating, Grade::C);
}

#[test]
fn list_and_show_agree_on_a_tied_mean() {
    let dataset = Dataset::new(vec![
        ScoreRecord::new("X", Category::Environmental, 10.0),
        ScoreRecord::new("X", Category::Social, 10.25),
        ScoreRecord::new("X", Category::Governance, 10.125),
    ]);
    let ratings = aggregate(dataset.records());
    assert_eq!(output::format_tsv(&ratings), "X\t10.12\tA+");

    let view = build_view(&dataset, "X").unwrap();
    assert_eq!(view.metrics.total_score, 10.12);
    assert_eq!(output::format_score(view.metrics.total_score), "10.12");
    assert!(output::format_company_detail(&view, false).contains("Total ESG Score: 10.12"));
}

#[test]
fn empty_dataset_is_neutral() {
    let dataset = Dataset::default();
    assert!(aggregate(dataset.records()).is_empty());
    assert_eq!(
        output::format_ratings_table(&[], false),
        "No companies to rate."
    );

    let app = App::new(dataset, None, ThemeColors::dark()).unwrap();
    assert!(app.view.is_none());
    assert_eq!(app.selected_company(), None);
}

#[test]
fn dashboard_selection_rebuilds_view() {
    let mut app = App::new(Dataset::reference(), Some("Google"), ThemeColors::dark()).unwrap();
    assert_eq!(app.view.as_ref().unwrap().metrics.total_score, 43.0);

    tui::handle_key_event(&mut app, key(KeyCode::Right));
    assert_eq!(app.selected_company(), Some("Amazon"));
    assert_eq!(app.view.as_ref().unwrap().metrics.rating, Grade::BPlus);

    tui::handle_key_event(&mut app, key(KeyCode::Char('2')));
    let view = app.view.as_ref().unwrap();
    assert_eq!(view.metrics.company, "Microsoft");
    assert_eq!(view.metrics.total_score, 45.67);

    tui::handle_key_event(&mut app, key(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn dashboard_rejects_unknown_initial_company() {
    let result = App::new(Dataset::reference(), Some("Tesla"), ThemeColors::light());
    assert!(matches!(result, Err(DashboardError::NotFound { .. })));
}

#[test]
fn init_then_load_then_validate() {
    let path = env::temp_dir()
        .join(format!("pellegrino_esg_cli_flow_{}", std::process::id()))
        .join("config.yaml");
    let _ = fs::remove_file(&path);

    config::write_default_config(&path, false).unwrap();
    let loaded = config::load_config(Some(path.clone())).unwrap();
    assert_eq!(loaded, Config::template());
    assert!(config::validate_config(&loaded, &Dataset::reference()).is_ok());

    assert!(config::write_default_config(&path, false).is_err());
    assert!(config::write_default_config(&path, true).is_ok());

    let _ = fs::remove_file(&path);
}

#[test]
fn config_naming_unknown_company_fails_validation() {
    let path = env::temp_dir().join(format!(
        "pellegrino_esg_cli_flow_bad_{}.yaml",
        std::process::id()
    ));
    fs::write(&path, "default_company: Tesla\ntick_rate_ms: 10\n").unwrap();

    let loaded = config::load_config(Some(path.clone())).unwrap();
    let errors = config::validate_config(&loaded, &Dataset::reference()).unwrap_err();
    assert_eq!(errors.len(), 2);

    let _ = fs::remove_file(&path);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let path = env::temp_dir().join("pellegrino_esg_cli_flow_does_not_exist.yaml");
    assert!(config::load_config(Some(path)).is_err());
}
