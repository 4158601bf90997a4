use fraud_dashboard::document::{bundled_document, parse_document, ResultsDocument};
use fraud_dashboard::sections::{build_section, Section};
use fraud_dashboard::types::Tab;
use fraud_dashboard::view::Dashboard;

fn two_models() -> ResultsDocument {
    let path = format!(
        "{}/tests/fixtures/documents/two-models.json",
        env!("CARGO_MANIFEST_DIR")
    );
    let text = std::fs::read_to_string(path).expect("fixture");
    parse_document(&text).expect("parses")
}

fn frame(doc: ResultsDocument, tab: Tab) -> String {
    let mut dashboard = Dashboard::mount(doc).expect("mount");
    dashboard.select(tab);
    dashboard.render(120, 48).expect("render")
}

#[test]
fn evaluation_tab_shows_detection_and_false_positive_rates() {
    let out = frame(bundled_document().expect("doc"), Tab::Evaluation);
    assert!(out.contains("Detection Rate"));
    assert!(out.contains("82.63%"));
    assert!(out.contains("0.02%"));
    assert!(out.contains("49,377"));
    assert!(out.contains("Synthetic Data Warning"));
}

#[test]
fn models_tab_marks_the_selected_model() {
    let out = frame(two_models(), Tab::Models);
    let best_line = out
        .lines()
        .find(|line| line.contains("Random Forest"))
        .expect("random forest row");
    assert!(best_line.contains("★ BEST"));
    assert!(best_line.contains("99.99%"));
    assert!(best_line.contains("Selected"));

    let other_line = out
        .lines()
        .find(|line| line.contains("Lightgbm"))
        .expect("lightgbm row");
    assert!(!other_line.contains("★ BEST"));
    assert!(other_line.contains("Trained"));
    assert!(out.contains("Feature Importance (Random Forest)"));
}

#[test]
fn oversized_feature_bars_are_clamped() {
    let Section::Models(section) = build_section(&two_models(), Tab::Models).expect("section")
    else {
        panic!("expected models section");
    };
    let v3 = section
        .features
        .iter()
        .find(|bar| bar.name == "V3")
        .expect("V3");
    assert_eq!(v3.width_percent, 100.0);
    assert_eq!(v3.importance_label, "21.0%");
    let v14 = section
        .features
        .iter()
        .find(|bar| bar.name == "V14")
        .expect("V14");
    assert!((v14.width_percent - 99.0).abs() < 1e-9);
}

#[test]
fn overview_cards_summarise_the_selected_model() {
    let out = frame(bundled_document().expect("doc"), Tab::Overview);
    assert!(out.contains("568,630"));
    assert!(out.contains("Random Forest"));
    assert!(out.contains("99.99% accuracy"));
    assert!(out.contains("82.6%"));
    assert!(out.contains("234,938 detected"));
}

#[test]
fn agents_tab_lists_every_agent_with_its_status() {
    let out = frame(two_models(), Tab::Agents);
    assert!(out.contains("1. DataAgent"));
    assert!(out.contains("✓ success"));
    assert!(out.contains("✗ failure"));
    assert!(out.contains("Pipeline Flow"));
    assert!(out.contains("Multi-Agent Pipeline Finished With Issues"));
}

#[test]
fn exactly_one_section_is_visible_per_tab() {
    let markers = [
        (Tab::Overview, "Summary"),
        (Tab::Models, "Model Comparison (Test Set)"),
        (Tab::Evaluation, "Confusion Matrix"),
        (Tab::Agents, "Agent Execution Pipeline"),
    ];
    for (tab, _) in markers {
        let out = frame(bundled_document().expect("doc"), tab);
        let visible = markers
            .iter()
            .filter(|(_, marker)| out.contains(marker))
            .map(|(owner, _)| *owner)
            .collect::<Vec<_>>();
        assert_eq!(visible, vec![tab], "{tab:?}");
    }
}

#[test]
fn dashboards_do_not_share_state() {
    let mut first = Dashboard::mount(bundled_document().expect("doc")).expect("mount");
    let second = Dashboard::mount(bundled_document().expect("doc")).expect("mount");
    first.select(Tab::Agents);
    assert_eq!(first.active_tab(), Tab::Agents);
    assert_eq!(second.active_tab(), Tab::Overview);
}
