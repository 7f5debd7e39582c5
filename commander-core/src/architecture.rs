//! Static architecture content: the agent pipeline and the telemetry
//! indices it is described as reading. Nothing here is queried.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub role: String,
    pub tool_group: Vec<String>,
    pub receives: String,
    pub emits: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,
    pub index: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Architecture {
    pub agents: Vec<Agent>,
    pub data_sources: Vec<DataSource>,
}

fn agent(name: &str, role: &str, tools: &[&str], receives: &str, emits: &str) -> Agent {
    Agent {
        name: name.into(),
        role: role.into(),
        tool_group: tools.iter().map(ToString::to_string).collect(),
        receives: receives.into(),
        emits: emits.into(),
    }
}

/// Agents in pipeline order.
pub fn agents() -> Vec<Agent> {
    vec![
        agent(
            "Incident Commander",
            "Orchestrator",
            &["severity_classifier", "escalation_workflow"],
            "Incoming alert context",
            "Severity + specialist routing",
        ),
        agent(
            "Triage Agent",
            "Scope and Correlation",
            &["alert_correlator", "service_dependency", "logs_search"],
            "Commander routing",
            "Blast radius and impacted services",
        ),
        agent(
            "Diagnosis Agent",
            "Root Cause Detection",
            &["log_analyzer", "metric_anomaly", "trace_correlator", "apm_search"],
            "Triage evidence",
            "Root cause hypothesis",
        ),
        agent(
            "Remediation Agent",
            "Automated Recovery",
            &["pod_restart", "scale_service", "fix_verifier"],
            "Diagnosis output",
            "Runbook action + verification",
        ),
        agent(
            "Communication Agent",
            "Stakeholder Updates",
            &["incident_timeline", "slack_notify", "postmortem_generate"],
            "Execution timeline",
            "Status updates and postmortem",
        ),
    ]
}

pub fn data_sources() -> Vec<DataSource> {
    [
        ("Logs", "logs-*"),
        ("Metrics", "metrics-*"),
        ("Traces", "traces-apm-*"),
        ("Alerts", ".alerts-*"),
    ]
    .into_iter()
    .map(|(name, index)| DataSource {
        name: name.into(),
        index: index.into(),
    })
    .collect()
}

/// Short stage names for the landing page flow strip.
pub fn agent_flow() -> Vec<&'static str> {
    vec![
        "Incident Commander",
        "Triage",
        "Diagnosis",
        "Remediation",
        "Communication",
    ]
}

pub fn architecture() -> Architecture {
    Architecture {
        agents: agents(),
        data_sources: data_sources(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_matches_agent_order() {
        let agents = agents();
        let flow = agent_flow();
        assert_eq!(agents.len(), flow.len());
        for (agent, stage) in agents.iter().zip(flow) {
            assert!(agent.name.starts_with(stage), "{} vs {stage}", agent.name);
        }
    }

    #[test]
    fn every_agent_has_tools() {
        assert!(agents().iter().all(|a| !a.tool_group.is_empty()));
    }

    #[test]
    fn data_source_indices() {
        let indices: Vec<_> = data_sources().into_iter().map(|d| d.index).collect();
        assert_eq!(indices, ["logs-*", "metrics-*", "traces-apm-*", ".alerts-*"]);
    }
}
