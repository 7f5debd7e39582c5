//! Scenario catalog: the canned incident narratives shown by the demo.
//!
//! A [`Catalog`] is validated once at construction and never mutated
//! afterwards. Controllers hold it behind an `Arc` and derive everything
//! else from it.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Urgency levels, most urgent first. Display only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    P1,
    P2,
    P3,
    P4,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::P1 => "P1",
            Severity::P2 => "P2",
            Severity::P3 => "P3",
            Severity::P4 => "P4",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Severity::P1 => "severity-p1",
            Severity::P2 => "severity-p2",
            Severity::P3 => "severity-p3",
            Severity::P4 => "severity-p4",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub agent: String,
    pub title: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl Step {
    fn new(agent: &str, title: &str, detail: &str) -> Self {
        Self {
            agent: agent.into(),
            title: title.into(),
            detail: detail.into(),
            severity: None,
        }
    }

    fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub service: String,
    pub summary: String,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Headline severity: the first tagged step.
    pub fn severity(&self) -> Option<Severity> {
        self.steps.iter().find_map(|s| s.severity)
    }

    /// Name without the "Scenario N: " ordinal prefix.
    pub fn short_name(&self) -> &str {
        match self.name.split_once(": ") {
            Some((prefix, rest)) if prefix.starts_with("Scenario") => rest,
            _ => &self.name,
        }
    }
}

/// Landing page teaser for a scenario.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioCard {
    pub id: String,
    pub name: String,
    pub severity: Option<Severity>,
    pub description: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Catalog {
    scenarios: Vec<Scenario>,
}

impl Catalog {
    /// Validates and wraps an ordered scenario list.
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self> {
        validate(&scenarios)?;
        Ok(Self { scenarios })
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn first(&self) -> &Scenario {
        // Non-empty by construction.
        &self.scenarios[0]
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn cards(&self) -> Vec<ScenarioCard> {
        self.scenarios
            .iter()
            .map(|s| ScenarioCard {
                id: s.id.clone(),
                name: s.short_name().to_string(),
                severity: s.severity(),
                description: s.summary.clone(),
            })
            .collect()
    }
}

fn validate(scenarios: &[Scenario]) -> Result<()> {
    if scenarios.is_empty() {
        return Err(Error::EmptyCatalog);
    }
    let mut seen = BTreeSet::new();
    for scenario in scenarios {
        if !seen.insert(scenario.id.as_str()) {
            return Err(Error::DuplicateScenario {
                id: scenario.id.clone(),
            });
        }
        if scenario.steps.is_empty() {
            return Err(Error::EmptyScenario {
                id: scenario.id.clone(),
            });
        }
    }
    Ok(())
}

const COMMANDER: &str = "Incident Commander";
const TRIAGE: &str = "Triage Agent";
const DIAGNOSIS: &str = "Diagnosis Agent";
const REMEDIATION: &str = "Remediation Agent";
const COMMUNICATION: &str = "Communication Agent";

/// The three bundled scenarios, validated like any other catalog.
pub fn builtin() -> Result<Catalog> {
    let scenarios = vec![
        Scenario {
            id: "cpu-spike".into(),
            name: "Scenario 1: CPU Spike".into(),
            service: "payment-service".into(),
            summary: "CPU rises to 95% on 3 hosts after deployment. System should classify, \
                      triage, diagnose query regression, scale, and notify."
                .into(),
            steps: vec![
                Step::new(
                    COMMANDER,
                    "Severity classification",
                    "Analyzed active alerts + host spread and classified incident as P2 with \
                     immediate triage handoff.",
                )
                .with_severity(Severity::P2),
                Step::new(
                    TRIAGE,
                    "Correlated blast radius",
                    "Found 3 correlated alerts in payment-service and checkout dependency chain. \
                     Scope constrained to two services.",
                ),
                Step::new(
                    DIAGNOSIS,
                    "Root cause hypothesis",
                    "Detected latency jump after recent deploy and linked spikes to inefficient \
                     SQL query pattern in checkout endpoint.",
                ),
                Step::new(
                    REMEDIATION,
                    "Runbook execution",
                    "Triggered scale_service_workflow (3→6 replicas) and validated latency \
                     recovery below SLO in 4 minutes.",
                ),
                Step::new(
                    COMMUNICATION,
                    "Stakeholder update",
                    "Posted #incidents update with impact, action taken, and next update ETA: \
                     15 minutes.",
                ),
            ],
        },
        Scenario {
            id: "memory-leak".into(),
            name: "Scenario 2: Memory Leak".into(),
            service: "user-service".into(),
            summary: "Progressive memory growth causes OOM kills and degraded login reliability."
                .into(),
            steps: vec![
                Step::new(
                    COMMANDER,
                    "Severity classification",
                    "Classified as P2 and initiated diagnostics for memory pressure conditions.",
                )
                .with_severity(Severity::P2),
                Step::new(
                    TRIAGE,
                    "Pattern confirmation",
                    "Mapped OOMKill events to same deployment window and pod set.",
                ),
                Step::new(
                    DIAGNOSIS,
                    "Leak evidence",
                    "Correlated allocation growth with session cache miss handling path.",
                ),
                Step::new(
                    REMEDIATION,
                    "Stabilization",
                    "Executed pod_restart_workflow and created follow-up refactor recommendation.",
                ),
                Step::new(
                    COMMUNICATION,
                    "Incident note",
                    "Published workaround and next action items to incident channel.",
                ),
            ],
        },
        Scenario {
            id: "cascading-failure".into(),
            name: "Scenario 3: Cascading Failure".into(),
            service: "inventory-db".into(),
            summary: "Primary datastore outage cascades into timeout storms and gateway errors."
                .into(),
            steps: vec![
                Step::new(
                    COMMANDER,
                    "Severity classification",
                    "Classified as P1 due to broad customer impact and elevated error budget burn.",
                )
                .with_severity(Severity::P1),
                Step::new(
                    TRIAGE,
                    "Dependency map",
                    "Identified impact chain: inventory → order-service → gateway.",
                ),
                Step::new(
                    DIAGNOSIS,
                    "Root cause confirmation",
                    "Confirmed database connection refusals and circuit breaker opens.",
                ),
                Step::new(
                    REMEDIATION,
                    "Containment",
                    "Applied failover workflow and reduced gateway error rate to baseline.",
                ),
                Step::new(
                    COMMUNICATION,
                    "Executive summary",
                    "Sent high-priority updates and initiated postmortem draft creation.",
                ),
            ],
        },
    ];

    Catalog::new(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(id: &str, steps: usize) -> Scenario {
        Scenario {
            id: id.into(),
            name: format!("Scenario: {id}"),
            service: "svc".into(),
            summary: String::new(),
            steps: (0..steps)
                .map(|i| Step::new("Agent", &format!("step {i}"), ""))
                .collect(),
        }
    }

    #[test]
    fn builtin_catalog_loads_through_validation() {
        let catalog = builtin().expect("builtin catalog");
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.first().id, "cpu-spike");
    }

    #[test]
    fn cpu_spike_has_five_steps_ending_with_communication() {
        let catalog = builtin().expect("catalog");
        let cpu = catalog.get("cpu-spike").expect("cpu-spike");
        assert_eq!(cpu.steps.len(), 5);
        assert_eq!(cpu.steps[4].agent, "Communication Agent");
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(Catalog::new(Vec::new()), Err(Error::EmptyCatalog)));
    }

    #[test]
    fn rejects_scenario_without_steps() {
        let err = Catalog::new(vec![scenario("a", 2), scenario("b", 0)]).unwrap_err();
        assert!(matches!(err, Error::EmptyScenario { id } if id == "b"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![scenario("a", 1), scenario("a", 3)]).unwrap_err();
        assert!(matches!(err, Error::DuplicateScenario { id } if id == "a"));
    }

    #[test]
    fn severities_order_most_urgent_first() {
        assert!(Severity::P1 < Severity::P2);
        assert!(Severity::P3 < Severity::P4);
        assert_eq!(Severity::P1.css_class(), "severity-p1");
    }

    #[test]
    fn cards_strip_ordinal_prefix_and_carry_headline_severity() {
        let cards = builtin().expect("catalog").cards();
        let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["CPU Spike", "Memory Leak", "Cascading Failure"]);
        assert_eq!(cards[2].severity, Some(Severity::P1));
    }

    #[test]
    fn step_severity_is_omitted_from_json_when_absent() {
        let step = Step::new("Triage Agent", "t", "d");
        let json = serde_json::to_value(&step).expect("json");
        assert!(json.get("severity").is_none());
    }
}
