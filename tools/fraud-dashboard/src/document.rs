use crate::errors::DashboardError;
use crate::types::AgentStatus;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt;

const BUNDLED_DOCUMENT: &str = include_str!("../data/creditcard-2023-results.json");

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsDocument {
    pub dataset: DatasetSummary,
    pub models: Vec<ModelEntry>,
    pub evaluation: EvaluationMetrics,
    pub confusion_matrix: ConfusionMatrix,
    pub feature_importance: Vec<FeatureImportance>,
    pub agents: Vec<AgentRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub name: String,
    pub row_count: u64,
    pub column_count: u64,
    pub observed_fraud_rate: String,
    pub reference_fraud_rate: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry {
    pub id: String,
    pub metrics: ModelMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub roc_auc: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub roc_auc: f64,
    pub frauds_caught: u64,
    pub frauds_missed: u64,
    pub false_alarms: u64,
    pub total_fraud: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_negative: u64,
    pub false_positive: u64,
    pub false_negative: u64,
    pub true_positive: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureImportance {
    pub name: String,
    pub importance: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRecord {
    pub name: String,
    pub status: AgentStatus,
    pub elapsed_label: String,
    pub output_label: String,
}

impl ResultsDocument {
    pub fn selected_model(&self) -> Option<&ModelEntry> {
        self.models.iter().find(|entry| entry.metrics.selected)
    }
}

/// Non-fatal drift between two representations of the same counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyWarning {
    NoSelectedModel,
    FraudTotalMismatch {
        caught: u64,
        missed: u64,
        total: u64,
    },
    ConfusionMatrixMismatch {
        cell: &'static str,
        matrix: u64,
        evaluation: u64,
    },
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSelectedModel => write!(f, "no model is marked as selected"),
            Self::FraudTotalMismatch {
                caught,
                missed,
                total,
            } => write!(
                f,
                "fraudsCaught ({caught}) + fraudsMissed ({missed}) != totalFraud ({total})"
            ),
            Self::ConfusionMatrixMismatch {
                cell,
                matrix,
                evaluation,
            } => write!(
                f,
                "confusionMatrix.{cell} ({matrix}) disagrees with evaluation ({evaluation})"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub warnings: Vec<ConsistencyWarning>,
}

impl ValidationReport {
    pub fn is_consistent(&self) -> bool {
        self.warnings.is_empty()
    }
}

pub fn validate(doc: &ResultsDocument) -> Result<ValidationReport, DashboardError> {
    require_text(&doc.dataset.name, "dataset.name")?;

    let mut seen = BTreeSet::new();
    for entry in &doc.models {
        require_text(&entry.id, "models.<id>")?;
        if !seen.insert(entry.id.as_str()) {
            return Err(DashboardError::InvalidDocument(format!(
                "duplicate model id '{}'",
                entry.id
            )));
        }
        let metrics = &entry.metrics;
        check_fraction(metrics.accuracy, &format!("models.{}.accuracy", entry.id))?;
        check_fraction(metrics.precision, &format!("models.{}.precision", entry.id))?;
        check_fraction(metrics.recall, &format!("models.{}.recall", entry.id))?;
        check_fraction(metrics.roc_auc, &format!("models.{}.rocAuc", entry.id))?;
    }

    let selected = doc
        .models
        .iter()
        .filter(|entry| entry.metrics.selected)
        .map(|entry| entry.id.as_str())
        .collect::<Vec<_>>();
    if selected.len() > 1 {
        return Err(DashboardError::InvalidDocument(format!(
            "more than one model is selected: {}",
            selected.join(", ")
        )));
    }

    let eval = &doc.evaluation;
    check_fraction(eval.accuracy, "evaluation.accuracy")?;
    check_fraction(eval.precision, "evaluation.precision")?;
    check_fraction(eval.recall, "evaluation.recall")?;
    check_fraction(eval.f1, "evaluation.f1")?;
    check_fraction(eval.roc_auc, "evaluation.rocAuc")?;

    for (idx, feature) in doc.feature_importance.iter().enumerate() {
        require_text(&feature.name, &format!("featureImportance[{idx}].name"))?;
        check_non_negative(
            feature.importance,
            &format!("featureImportance[{idx}].importance"),
        )?;
    }

    for (idx, agent) in doc.agents.iter().enumerate() {
        require_text(&agent.name, &format!("agents[{idx}].name"))?;
    }

    let mut report = ValidationReport::default();
    if !doc.models.is_empty() && selected.is_empty() {
        report.warnings.push(ConsistencyWarning::NoSelectedModel);
    }
    if eval.frauds_caught.checked_add(eval.frauds_missed) != Some(eval.total_fraud) {
        report.warnings.push(ConsistencyWarning::FraudTotalMismatch {
            caught: eval.frauds_caught,
            missed: eval.frauds_missed,
            total: eval.total_fraud,
        });
    }
    let matrix = &doc.confusion_matrix;
    for (cell, matrix_value, evaluation_value) in [
        ("truePositive", matrix.true_positive, eval.frauds_caught),
        ("falseNegative", matrix.false_negative, eval.frauds_missed),
        ("falsePositive", matrix.false_positive, eval.false_alarms),
    ] {
        if matrix_value != evaluation_value {
            report.warnings.push(ConsistencyWarning::ConfusionMatrixMismatch {
                cell,
                matrix: matrix_value,
                evaluation: evaluation_value,
            });
        }
    }
    Ok(report)
}

fn check_fraction(value: f64, path: &str) -> Result<(), DashboardError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(DashboardError::InvalidMetric(format!(
            "{path} = {value} is outside [0, 1]"
        )));
    }
    Ok(())
}

fn check_non_negative(value: f64, path: &str) -> Result<(), DashboardError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DashboardError::InvalidMetric(format!(
            "{path} = {value} must be finite and non-negative"
        )));
    }
    Ok(())
}

fn require_text(value: &str, path: &str) -> Result<(), DashboardError> {
    if value.trim().is_empty() {
        return Err(DashboardError::MissingData(path.to_string()));
    }
    Ok(())
}

pub fn parse_document(text: &str) -> Result<ResultsDocument, DashboardError> {
    let raw: RawResultsDocument =
        serde_json::from_str(text).map_err(|e| DashboardError::DocumentParse(e.to_string()))?;
    raw.into_document()
}

pub fn bundled_document() -> Result<ResultsDocument, DashboardError> {
    parse_document(BUNDLED_DOCUMENT)
}

pub fn bundled_document_text() -> &'static str {
    BUNDLED_DOCUMENT
}

/// Short SHA-256 prefix identifying the exact document text that was loaded.
pub fn document_fingerprint(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    digest
        .iter()
        .take(8)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResultsDocument {
    dataset: Option<RawDataset>,
    #[serde(default, deserialize_with = "ordered_models")]
    models: Option<Vec<(String, RawModelMetrics)>>,
    evaluation: Option<RawEvaluation>,
    confusion_matrix: Option<RawConfusionMatrix>,
    feature_importance: Option<Vec<RawFeature>>,
    agents: Option<Vec<RawAgent>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDataset {
    name: Option<String>,
    #[serde(alias = "rows")]
    row_count: Option<i64>,
    #[serde(alias = "columns")]
    column_count: Option<i64>,
    #[serde(alias = "fraudRate")]
    observed_fraud_rate: Option<String>,
    #[serde(alias = "realFraudRate")]
    reference_fraud_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModelMetrics {
    accuracy: Option<f64>,
    precision: Option<f64>,
    recall: Option<f64>,
    #[serde(alias = "roc_auc")]
    roc_auc: Option<f64>,
    selected: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvaluation {
    accuracy: Option<f64>,
    precision: Option<f64>,
    recall: Option<f64>,
    f1: Option<f64>,
    #[serde(alias = "roc_auc")]
    roc_auc: Option<f64>,
    frauds_caught: Option<i64>,
    frauds_missed: Option<i64>,
    false_alarms: Option<i64>,
    total_fraud: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfusionMatrix {
    #[serde(alias = "tn")]
    true_negative: Option<i64>,
    #[serde(alias = "fp")]
    false_positive: Option<i64>,
    #[serde(alias = "fn")]
    false_negative: Option<i64>,
    #[serde(alias = "tp")]
    true_positive: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    name: Option<String>,
    importance: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAgent {
    name: Option<String>,
    status: Option<AgentStatus>,
    #[serde(alias = "time")]
    elapsed_label: Option<String>,
    #[serde(alias = "output")]
    output_label: Option<String>,
}

fn ordered_models<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<(String, RawModelMetrics)>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedModels;

    impl<'de> Visitor<'de> for OrderedModels {
        type Value = Vec<(String, RawModelMetrics)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of model id to model metrics")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((id, metrics)) = map.next_entry::<String, RawModelMetrics>()? {
                entries.push((id, metrics));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedModels).map(Some)
}

fn required<T>(value: Option<T>, path: &str) -> Result<T, DashboardError> {
    value.ok_or_else(|| DashboardError::MissingData(path.to_string()))
}

fn count(value: Option<i64>, path: &str) -> Result<u64, DashboardError> {
    let value = required(value, path)?;
    u64::try_from(value).map_err(|_| {
        DashboardError::InvalidMetric(format!("{path} = {value} must be non-negative"))
    })
}

impl RawResultsDocument {
    fn into_document(self) -> Result<ResultsDocument, DashboardError> {
        let dataset = required(self.dataset, "dataset")?;
        let dataset = DatasetSummary {
            name: required(dataset.name, "dataset.name")?,
            row_count: count(dataset.row_count, "dataset.rowCount")?,
            column_count: count(dataset.column_count, "dataset.columnCount")?,
            observed_fraud_rate: required(
                dataset.observed_fraud_rate,
                "dataset.observedFraudRate",
            )?,
            reference_fraud_rate: required(
                dataset.reference_fraud_rate,
                "dataset.referenceFraudRate",
            )?,
        };

        let models = required(self.models, "models")?
            .into_iter()
            .map(|(id, raw)| {
                let metrics = ModelMetrics {
                    accuracy: required(raw.accuracy, &format!("models.{id}.accuracy"))?,
                    precision: required(raw.precision, &format!("models.{id}.precision"))?,
                    recall: required(raw.recall, &format!("models.{id}.recall"))?,
                    roc_auc: required(raw.roc_auc, &format!("models.{id}.rocAuc"))?,
                    selected: raw.selected.unwrap_or(false),
                };
                Ok(ModelEntry { id, metrics })
            })
            .collect::<Result<Vec<_>, DashboardError>>()?;

        let eval = required(self.evaluation, "evaluation")?;
        let evaluation = EvaluationMetrics {
            accuracy: required(eval.accuracy, "evaluation.accuracy")?,
            precision: required(eval.precision, "evaluation.precision")?,
            recall: required(eval.recall, "evaluation.recall")?,
            f1: required(eval.f1, "evaluation.f1")?,
            roc_auc: required(eval.roc_auc, "evaluation.rocAuc")?,
            frauds_caught: count(eval.frauds_caught, "evaluation.fraudsCaught")?,
            frauds_missed: count(eval.frauds_missed, "evaluation.fraudsMissed")?,
            false_alarms: count(eval.false_alarms, "evaluation.falseAlarms")?,
            total_fraud: count(eval.total_fraud, "evaluation.totalFraud")?,
        };

        let matrix = required(self.confusion_matrix, "confusionMatrix")?;
        let confusion_matrix = ConfusionMatrix {
            true_negative: count(matrix.true_negative, "confusionMatrix.trueNegative")?,
            false_positive: count(matrix.false_positive, "confusionMatrix.falsePositive")?,
            false_negative: count(matrix.false_negative, "confusionMatrix.falseNegative")?,
            true_positive: count(matrix.true_positive, "confusionMatrix.truePositive")?,
        };

        let feature_importance = required(self.feature_importance, "featureImportance")?
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| {
                Ok(FeatureImportance {
                    name: required(raw.name, &format!("featureImportance[{idx}].name"))?,
                    importance: required(
                        raw.importance,
                        &format!("featureImportance[{idx}].importance"),
                    )?,
                })
            })
            .collect::<Result<Vec<_>, DashboardError>>()?;

        let agents = required(self.agents, "agents")?
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| {
                Ok(AgentRecord {
                    name: required(raw.name, &format!("agents[{idx}].name"))?,
                    status: required(raw.status, &format!("agents[{idx}].status"))?,
                    elapsed_label: required(
                        raw.elapsed_label,
                        &format!("agents[{idx}].elapsedLabel"),
                    )?,
                    output_label: required(
                        raw.output_label,
                        &format!("agents[{idx}].outputLabel"),
                    )?,
                })
            })
            .collect::<Result<Vec<_>, DashboardError>>()?;

        Ok(ResultsDocument {
            dataset,
            models,
            evaluation,
            confusion_matrix,
            feature_importance,
            agents,
        })
    }
}
