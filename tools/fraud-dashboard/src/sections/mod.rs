//! Presentation models derived from a [`ResultsDocument`], one per tab.
//!
//! Everything here is pure: the same document and tab always produce the same
//! section. Drawing lives in [`crate::tui`].

pub mod agents;
pub mod evaluation;
pub mod footer;
pub mod models;
pub mod overview;

use crate::document::ResultsDocument;
use crate::errors::DashboardError;
use crate::format::title_case;
use crate::types::Tab;

pub use agents::{build_agents, AgentRow, AgentsSection, TopologyEdge, PIPELINE_TOPOLOGY};
pub use evaluation::{
    build_evaluation, metric_color, Advisory, EvaluationSection, MatrixCell, MetricBar,
    SYNTHETIC_DATA_ADVISORY,
};
pub use footer::{build_footer, ArtifactEntry, FooterSection};
pub use models::{build_models, FeatureBar, ModelRow, ModelsSection, FEATURE_BAR_SCALE};
pub use overview::{build_overview, OverviewSection, SummaryCard};

pub const UNSPECIFIED_MODEL: &str = "unspecified";

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Overview(OverviewSection),
    Models(ModelsSection),
    Evaluation(EvaluationSection),
    Agents(AgentsSection),
}

impl Section {
    pub fn tab(&self) -> Tab {
        match self {
            Self::Overview(_) => Tab::Overview,
            Self::Models(_) => Tab::Models,
            Self::Evaluation(_) => Tab::Evaluation,
            Self::Agents(_) => Tab::Agents,
        }
    }
}

pub fn build_section(doc: &ResultsDocument, tab: Tab) -> Result<Section, DashboardError> {
    Ok(match tab {
        Tab::Overview => Section::Overview(build_overview(doc)?),
        Tab::Models => Section::Models(build_models(doc)?),
        Tab::Evaluation => Section::Evaluation(build_evaluation(doc)?),
        Tab::Agents => Section::Agents(build_agents(doc)),
    })
}

/// Display label of the selected model, or `unspecified` when none is.
pub fn best_model_label(doc: &ResultsDocument) -> String {
    doc.selected_model()
        .map(|entry| title_case(&entry.id))
        .unwrap_or_else(|| UNSPECIFIED_MODEL.to_string())
}
