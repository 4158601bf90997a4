use crate::document::ResultsDocument;
use crate::types::AgentStatus;

pub const ORCHESTRATOR: &str = "Orchestrator";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyEdge {
    pub to: &'static str,
    pub produces: &'static str,
    pub on_demand: bool,
}

/// Reference fan-out from the orchestrator. Independent of the agent records.
pub const PIPELINE_TOPOLOGY: [TopologyEdge; 7] = [
    TopologyEdge {
        to: "DataAgent",
        produces: "cleaned_data.parquet",
        on_demand: false,
    },
    TopologyEdge {
        to: "EDAAgent",
        produces: "stats, plots, imbalance_ratio",
        on_demand: false,
    },
    TopologyEdge {
        to: "FeatureAgent",
        produces: "features.parquet, transformers",
        on_demand: false,
    },
    TopologyEdge {
        to: "ModelAgent",
        produces: "best_model.joblib",
        on_demand: false,
    },
    TopologyEdge {
        to: "ReporterAgent",
        produces: "report.md",
        on_demand: false,
    },
    TopologyEdge {
        to: "PredictorAgent",
        produces: "predictions.csv",
        on_demand: true,
    },
    TopologyEdge {
        to: "EvaluatorAgent",
        produces: "evaluation_report.csv",
        on_demand: true,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRow {
    pub position: usize,
    pub name: String,
    pub output: String,
    pub elapsed: String,
    pub status: AgentStatus,
    pub pill: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentsSection {
    pub rows: Vec<AgentRow>,
    pub topology: Vec<String>,
}

pub fn build_agents(doc: &ResultsDocument) -> AgentsSection {
    let rows = doc
        .agents
        .iter()
        .enumerate()
        .map(|(idx, agent)| AgentRow {
            position: idx + 1,
            name: agent.name.clone(),
            output: agent.output_label.clone(),
            elapsed: agent.elapsed_label.clone(),
            status: agent.status,
            pill: format!("{} {}", agent.status.icon(), agent.status.as_str()),
        })
        .collect();

    AgentsSection {
        rows,
        topology: topology_lines(),
    }
}

pub fn topology_lines() -> Vec<String> {
    let name_width = PIPELINE_TOPOLOGY
        .iter()
        .map(|edge| edge.to.len())
        .max()
        .unwrap_or(0);
    let unconditional = PIPELINE_TOPOLOGY
        .iter()
        .filter(|edge| !edge.on_demand)
        .collect::<Vec<_>>();
    let on_demand = PIPELINE_TOPOLOGY
        .iter()
        .filter(|edge| edge.on_demand)
        .collect::<Vec<_>>();

    let mut lines = vec![ORCHESTRATOR.to_string(), "    │".to_string()];
    for edge in &unconditional {
        lines.push(format!(
            "    ├─→ {:<name_width$}  → {}",
            edge.to, edge.produces
        ));
    }
    if !on_demand.is_empty() {
        lines.push("    │".to_string());
        lines.push("    └─→ [On Demand]".to_string());
        for (idx, edge) in on_demand.iter().enumerate() {
            let branch = if idx + 1 == on_demand.len() { "└─→" } else { "├─→" };
            lines.push(format!(
                "        {branch} {:<name_width$}  → {}",
                edge.to, edge.produces
            ));
        }
    }
    lines
}
