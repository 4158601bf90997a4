use crate::errors::DashboardError;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Overview,
    Models,
    Evaluation,
    Agents,
}

impl Tab {
    /// Display order of the tab bar.
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Models, Tab::Evaluation, Tab::Agents];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Models => "models",
            Self::Evaluation => "evaluation",
            Self::Agents => "agents",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Models => "Models",
            Self::Evaluation => "Evaluation",
            Self::Agents => "Agents",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::Models => 1,
            Self::Evaluation => 2,
            Self::Agents => 3,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn parse(value: &str) -> Result<Self, DashboardError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(Self::Overview),
            "models" => Ok(Self::Models),
            "evaluation" => Ok(Self::Evaluation),
            "agents" => Ok(Self::Agents),
            _ => Err(DashboardError::UnknownTab(format!(
                "'{value}' is not one of overview, models, evaluation, agents"
            ))),
        }
    }
}

impl FromStr for Tab {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Success,
    Failure,
    Skipped,
    Running,
    Pending,
}

impl AgentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Skipped => "skipped",
            Self::Running => "running",
            Self::Pending => "pending",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Failure => "✗",
            Self::Skipped => "↷",
            Self::Running => "▶",
            Self::Pending => "…",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    Selected,
    Trained,
}

impl ModelStatus {
    pub fn from_flag(selected: bool) -> Self {
        if selected {
            Self::Selected
        } else {
            Self::Trained
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Selected => "Selected",
            Self::Trained => "Trained",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricName {
    Accuracy,
    Precision,
    Recall,
    F1,
    RocAuc,
}

impl MetricName {
    pub const ALL: [MetricName; 5] = [
        MetricName::Accuracy,
        MetricName::Precision,
        MetricName::Recall,
        MetricName::F1,
        MetricName::RocAuc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Accuracy => "Accuracy",
            Self::Precision => "Precision",
            Self::Recall => "Recall",
            Self::F1 => "F1-Score",
            Self::RocAuc => "ROC-AUC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AgentStatus, Tab};
    use crate::errors::DashboardError;

    #[test]
    fn tab_cycle_wraps_in_display_order() {
        assert_eq!(Tab::Overview.next(), Tab::Models);
        assert_eq!(Tab::Agents.next(), Tab::Overview);
        assert_eq!(Tab::Overview.previous(), Tab::Agents);
        assert_eq!(Tab::Evaluation.previous(), Tab::Models);
    }

    #[test]
    fn tab_parse_accepts_case_and_whitespace() {
        assert_eq!(Tab::parse(" Models ").expect("models"), Tab::Models);
        assert_eq!("AGENTS".parse::<Tab>().expect("agents"), Tab::Agents);
        assert!(matches!(
            Tab::parse("settings"),
            Err(DashboardError::UnknownTab(_))
        ));
    }

    #[test]
    fn agent_status_round_trips_through_serde_names() {
        let status: AgentStatus = serde_json::from_str("\"skipped\"").expect("status");
        assert_eq!(status, AgentStatus::Skipped);
        assert_eq!(status.as_str(), "skipped");
        assert!(serde_json::from_str::<AgentStatus>("\"exploded\"").is_err());
    }
}
