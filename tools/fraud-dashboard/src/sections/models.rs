use super::best_model_label;
use crate::document::ResultsDocument;
use crate::errors::DashboardError;
use crate::format::{bar_width, percentage, title_case};
use crate::types::ModelStatus;

/// Percent of the track per unit of importance. 1/6 fills the whole track.
///
/// Fixed rather than normalized so bars are comparable across runs.
pub const FEATURE_BAR_SCALE: f64 = 600.0;
pub const BAR_MAX_PERCENT: f64 = 100.0;
pub const SELECTED_MARKER: &str = "★ BEST";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRow {
    pub label: String,
    pub selected: bool,
    pub accuracy: String,
    pub precision: String,
    pub recall: String,
    pub roc_auc: String,
    pub status: ModelStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBar {
    pub name: String,
    pub importance_label: String,
    pub width_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelsSection {
    pub rows: Vec<ModelRow>,
    pub feature_heading: String,
    pub features: Vec<FeatureBar>,
}

pub fn build_models(doc: &ResultsDocument) -> Result<ModelsSection, DashboardError> {
    let rows = doc
        .models
        .iter()
        .map(|entry| {
            let metrics = &entry.metrics;
            if !metrics.roc_auc.is_finite() {
                return Err(DashboardError::InvalidMetric(format!(
                    "models.{}.rocAuc is not finite",
                    entry.id
                )));
            }
            Ok(ModelRow {
                label: title_case(&entry.id),
                selected: metrics.selected,
                accuracy: percentage(metrics.accuracy, 2)?,
                precision: percentage(metrics.precision, 2)?,
                recall: percentage(metrics.recall, 2)?,
                roc_auc: format!("{:.4}", metrics.roc_auc),
                status: ModelStatus::from_flag(metrics.selected),
            })
        })
        .collect::<Result<Vec<_>, DashboardError>>()?;

    let features = doc
        .feature_importance
        .iter()
        .map(|feature| {
            Ok(FeatureBar {
                name: feature.name.clone(),
                importance_label: format!("{:.1}%", feature.importance * 100.0),
                width_percent: bar_width(
                    feature.importance,
                    FEATURE_BAR_SCALE,
                    BAR_MAX_PERCENT,
                )?,
            })
        })
        .collect::<Result<Vec<_>, DashboardError>>()?;

    Ok(ModelsSection {
        rows,
        feature_heading: format!("Feature Importance ({})", best_model_label(doc)),
        features,
    })
}

#[cfg(test)]
mod tests {
    use super::{build_models, FEATURE_BAR_SCALE};
    use crate::document::bundled_document;
    use crate::types::ModelStatus;

    #[test]
    fn rows_keep_document_order_and_formatting() {
        let section = build_models(&bundled_document().expect("doc")).expect("models");
        let labels = section.rows.iter().map(|r| r.label.as_str()).collect::<Vec<_>>();
        assert_eq!(
            labels,
            vec!["Random Forest", "Lightgbm", "Xgboost", "Logistic Regression"]
        );
        let first = &section.rows[0];
        assert!(first.selected);
        assert_eq!(first.status, ModelStatus::Selected);
        assert_eq!(first.accuracy, "99.99%");
        assert_eq!(first.recall, "99.98%");
        assert_eq!(first.roc_auc, "0.9999");
        assert_eq!(section.rows[2].roc_auc, "0.9995");
        assert_eq!(section.rows[3].status, ModelStatus::Trained);
    }

    #[test]
    fn feature_bars_use_fixed_scale_and_clamp() {
        let mut doc = bundled_document().expect("doc");
        doc.feature_importance[0].importance = 0.4;
        let section = build_models(&doc).expect("models");
        assert_eq!(section.feature_heading, "Feature Importance (Random Forest)");
        assert_eq!(section.features[0].width_percent, 100.0);
        let v12 = &section.features[1];
        assert_eq!(v12.importance_label, "14.7%");
        assert!((v12.width_percent - 0.147 * FEATURE_BAR_SCALE).abs() < 1e-9);
        assert!(section.features.iter().all(|bar| bar.width_percent <= 100.0));
    }

    #[test]
    fn importance_above_one_still_renders_a_clamped_bar() {
        let mut doc = bundled_document().expect("doc");
        doc.feature_importance[0].importance = 1.5;
        let section = build_models(&doc).expect("models");
        assert_eq!(section.features[0].width_percent, 100.0);
        assert_eq!(section.features[0].importance_label, "150.0%");
    }
}
