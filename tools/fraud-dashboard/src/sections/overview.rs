use super::best_model_label;
use crate::document::ResultsDocument;
use crate::errors::DashboardError;
use crate::format::{percentage, rate_label, ratio, thousands_group};
use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
    pub caption: String,
    pub accent: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewSection {
    pub cards: [SummaryCard; 4],
    pub dataset_line: String,
}

pub fn build_overview(doc: &ResultsDocument) -> Result<OverviewSection, DashboardError> {
    let eval = &doc.evaluation;
    let matrix = &doc.confusion_matrix;

    let best_caption = match doc.selected_model() {
        Some(entry) => format!("{} accuracy", percentage(entry.metrics.accuracy, 2)?),
        None => "no model selected".to_string(),
    };
    let negatives = matrix.true_negative.saturating_add(matrix.false_positive);

    let cards = [
        SummaryCard {
            title: "Dataset Size",
            value: thousands_group(doc.dataset.row_count),
            caption: "transactions".to_string(),
            accent: Color::White,
        },
        SummaryCard {
            title: "Best Model",
            value: best_model_label(doc),
            caption: best_caption,
            accent: Color::LightBlue,
        },
        SummaryCard {
            title: "Frauds Caught",
            value: rate_label(ratio(eval.frauds_caught, eval.total_fraud), 1),
            caption: format!("{} detected", thousands_group(eval.frauds_caught)),
            accent: Color::Green,
        },
        SummaryCard {
            title: "False Alarms",
            value: thousands_group(eval.false_alarms),
            caption: format!(
                "{} false positive",
                rate_label(ratio(eval.false_alarms, negatives), 2)
            ),
            accent: Color::Yellow,
        },
    ];

    let dataset_line = format!(
        "{} · {} rows × {} columns · fraud rate {} (reference {})",
        doc.dataset.name,
        thousands_group(doc.dataset.row_count),
        doc.dataset.column_count,
        doc.dataset.observed_fraud_rate,
        doc.dataset.reference_fraud_rate
    );

    Ok(OverviewSection {
        cards,
        dataset_line,
    })
}
