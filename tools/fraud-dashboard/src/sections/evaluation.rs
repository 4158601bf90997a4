use super::models::BAR_MAX_PERCENT;
use crate::document::ResultsDocument;
use crate::errors::DashboardError;
use crate::format::{bar_width, percentage, rate_label, ratio, thousands_group};
use crate::types::MetricName;
use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixCell {
    pub label: &'static str,
    pub value: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricBar {
    pub metric: MetricName,
    pub value_label: String,
    pub width_percent: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advisory {
    pub title: &'static str,
    pub body: &'static str,
}

/// Fixed copy. Carries no figures so it can never contradict the panels.
pub const SYNTHETIC_DATA_ADVISORY: Advisory = Advisory {
    title: "Synthetic Data Warning",
    body: "This dataset is balanced synthetic data. Real card fraud is a small fraction \
           of all transactions, so recall measured here will not carry over to production \
           traffic as-is. Re-evaluate on a realistically imbalanced dataset before relying \
           on these numbers.",
};

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationSection {
    /// Row-major: TN, FP, FN, TP.
    pub cells: [MatrixCell; 4],
    pub detection_rate: String,
    pub false_positive_rate: String,
    pub missed_frauds: String,
    pub metrics: Vec<MetricBar>,
    pub advisory: Advisory,
}

pub fn metric_color(metric: MetricName) -> Color {
    match metric {
        MetricName::Accuracy => Color::Blue,
        MetricName::Precision => Color::Yellow,
        MetricName::Recall => Color::Green,
        MetricName::F1 => Color::Magenta,
        MetricName::RocAuc => Color::Cyan,
    }
}

pub fn build_evaluation(doc: &ResultsDocument) -> Result<EvaluationSection, DashboardError> {
    let matrix = &doc.confusion_matrix;
    let eval = &doc.evaluation;

    let cells = [
        MatrixCell {
            label: "True Negative",
            value: thousands_group(matrix.true_negative),
            correct: true,
        },
        MatrixCell {
            label: "False Positive",
            value: thousands_group(matrix.false_positive),
            correct: false,
        },
        MatrixCell {
            label: "False Negative",
            value: thousands_group(matrix.false_negative),
            correct: false,
        },
        MatrixCell {
            label: "True Positive",
            value: thousands_group(matrix.true_positive),
            correct: true,
        },
    ];

    let detection = ratio(
        matrix.true_positive,
        matrix.true_positive.saturating_add(matrix.false_negative),
    );
    let false_positive = ratio(
        matrix.false_positive,
        matrix.false_positive.saturating_add(matrix.true_negative),
    );

    let metrics = MetricName::ALL
        .into_iter()
        .map(|metric| {
            let value = match metric {
                MetricName::Accuracy => eval.accuracy,
                MetricName::Precision => eval.precision,
                MetricName::Recall => eval.recall,
                MetricName::F1 => eval.f1,
                MetricName::RocAuc => eval.roc_auc,
            };
            Ok(MetricBar {
                metric,
                value_label: percentage(value, 2)?,
                width_percent: bar_width(value, 100.0, BAR_MAX_PERCENT)?,
                color: metric_color(metric),
            })
        })
        .collect::<Result<Vec<_>, DashboardError>>()?;

    Ok(EvaluationSection {
        cells,
        detection_rate: rate_label(detection, 2),
        false_positive_rate: rate_label(false_positive, 2),
        missed_frauds: thousands_group(matrix.false_negative),
        metrics,
        advisory: SYNTHETIC_DATA_ADVISORY,
    })
}
