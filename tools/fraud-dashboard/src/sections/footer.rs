use super::best_model_label;
use crate::document::ResultsDocument;
use crate::format::thousands_group;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactEntry {
    pub path: &'static str,
    pub note: Option<String>,
}

impl ArtifactEntry {
    fn plain(path: &'static str) -> Self {
        Self { path, note: None }
    }

    fn noted(path: &'static str, note: String) -> Self {
        Self {
            path,
            note: Some(note),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterSection {
    pub intermediate: Vec<ArtifactEntry>,
    pub outputs: Vec<ArtifactEntry>,
    pub summary: String,
}

pub fn build_footer(doc: &ResultsDocument) -> FooterSection {
    let best = best_model_label(doc);
    let matrix = &doc.confusion_matrix;
    let flagged = matrix.true_positive.saturating_add(matrix.false_positive);

    let intermediate = vec![
        ArtifactEntry::plain("data_agent_output.json"),
        ArtifactEntry::plain("eda_agent_output.json"),
        ArtifactEntry::plain("feature_agent_output.json"),
        ArtifactEntry::plain("model_agent_output.json"),
        ArtifactEntry::plain("cleaned_data.parquet"),
        ArtifactEntry::plain("features.parquet"),
    ];

    let outputs = vec![
        ArtifactEntry::noted("best_model.joblib", best.clone()),
        ArtifactEntry::noted(
            "predictions.csv",
            format!("{} rows", thousands_group(doc.dataset.row_count)),
        ),
        ArtifactEntry::noted(
            "fraud_cases.csv",
            format!("{} flagged", thousands_group(flagged)),
        ),
        ArtifactEntry::noted(
            "missed_frauds.csv",
            format!("{} missed", thousands_group(matrix.false_negative)),
        ),
        ArtifactEntry::plain("evaluation_report.csv"),
        ArtifactEntry::plain("report.md"),
        ArtifactEntry::plain("figures/class_distribution.png"),
        ArtifactEntry::plain("figures/correlation_heatmap.png"),
        ArtifactEntry::plain("figures/feature_distributions.png"),
    ];

    FooterSection {
        intermediate,
        outputs,
        summary: format!(
            "Multi-Agent Fraud Detection System • {} Agents • {best} Selected",
            doc.agents.len()
        ),
    }
}
