//! Incident list/detail view state.

use crate::catalog::Severity;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Detected,
    Triaging,
    Diagnosing,
    Remediating,
    Resolved,
}

impl IncidentStatus {
    pub fn is_resolved(self) -> bool {
        matches!(self, IncidentStatus::Resolved)
    }

    pub fn label(self) -> &'static str {
        match self {
            IncidentStatus::Detected => "detected",
            IncidentStatus::Triaging => "triaging",
            IncidentStatus::Diagnosing => "diagnosing",
            IncidentStatus::Remediating => "remediating",
            IncidentStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub title: String,
    pub service: String,
    pub severity: Severity,
    pub status: IncidentStatus,
    pub started_at: String,
    pub summary: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentFilter {
    #[default]
    All,
    Active,
    Resolved,
}

impl IncidentFilter {
    pub const ALL: [IncidentFilter; 3] = [
        IncidentFilter::All,
        IncidentFilter::Active,
        IncidentFilter::Resolved,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IncidentFilter::All => "All",
            IncidentFilter::Active => "Active",
            IncidentFilter::Resolved => "Resolved",
        }
    }

    pub fn matches(self, incident: &Incident) -> bool {
        match self {
            IncidentFilter::All => true,
            IncidentFilter::Active => !incident.status.is_resolved(),
            IncidentFilter::Resolved => incident.status.is_resolved(),
        }
    }
}

/// Selected incident plus a re-render tick over an immutable incident list.
///
/// Counts are recomputed on every read; nothing here changes an incident's
/// status.
#[derive(Clone, Debug)]
pub struct IncidentBoard {
    incidents: Vec<Incident>,
    selected_id: String,
    ticks: u64,
}

impl IncidentBoard {
    /// Rejects an empty list or duplicate ids. The first incident starts
    /// selected.
    pub fn new(incidents: Vec<Incident>) -> Result<Self> {
        let Some(first) = incidents.first() else {
            return Err(Error::EmptyIncidentList);
        };
        let selected_id = first.id.clone();

        let mut seen = BTreeSet::new();
        for incident in &incidents {
            if !seen.insert(incident.id.as_str()) {
                return Err(Error::DuplicateIncident {
                    id: incident.id.clone(),
                });
            }
        }

        Ok(Self {
            incidents,
            selected_id,
            ticks: 0,
        })
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }

    pub fn selected(&self) -> &Incident {
        self.incidents
            .iter()
            .find(|i| i.id == self.selected_id)
            .unwrap_or(&self.incidents[0])
    }

    pub fn select(&mut self, id: &str) -> Result<()> {
        if !self.incidents.iter().any(|i| i.id == id) {
            return Err(Error::unknown_incident(id));
        }
        debug!("incident selected: {id}");
        self.selected_id = id.to_string();
        Ok(())
    }

    pub fn active_count(&self) -> usize {
        self.filtered(IncidentFilter::Active).count()
    }

    pub fn resolved_today(&self) -> usize {
        self.filtered(IncidentFilter::Resolved).count()
    }

    pub fn filtered(&self, filter: IncidentFilter) -> impl Iterator<Item = &Incident> + '_ {
        self.incidents.iter().filter(move |i| filter.matches(i))
    }

    pub fn tick(&mut self) -> u64 {
        self.ticks += 1;
        self.ticks
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            active_count: self.active_count(),
            resolved_today: self.resolved_today(),
            ticks: self.ticks,
            selected_id: self.selected_id.clone(),
            incidents: self.incidents.clone(),
        }
    }
}

/// Snapshot handed to renderers and the JSON API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub active_count: usize,
    pub resolved_today: usize,
    pub ticks: u64,
    pub selected_id: String,
    pub incidents: Vec<Incident>,
}

fn incident(
    id: &str,
    title: &str,
    service: &str,
    severity: Severity,
    status: IncidentStatus,
    started_at: &str,
    summary: &str,
) -> Incident {
    Incident {
        id: id.into(),
        title: title.into(),
        service: service.into(),
        severity,
        status,
        started_at: started_at.into(),
        summary: summary.into(),
    }
}

/// Fixed incident list for the board view.
pub fn mock_incidents() -> Vec<Incident> {
    vec![
        incident(
            "INC-2041",
            "CPU saturation on payment hosts",
            "payment-service",
            Severity::P2,
            IncidentStatus::Remediating,
            "2024-11-14T09:12:00Z",
            "CPU at 95% on prod-node-01..03 after deploy; scaling 3→6 replicas.",
        ),
        incident(
            "INC-2040",
            "OOM kills on login pods",
            "user-service",
            Severity::P2,
            IncidentStatus::Diagnosing,
            "2024-11-14T08:47:00Z",
            "Heap grows steadily until OOMKill; session cache suspected.",
        ),
        incident(
            "INC-2042",
            "Notification queue backlog",
            "notification-service",
            Severity::P3,
            IncidentStatus::Triaging,
            "2024-11-14T09:30:00Z",
            "Consumer lag above 40k messages on the email topic.",
        ),
        incident(
            "INC-2039",
            "Inventory database outage",
            "inventory-db",
            Severity::P1,
            IncidentStatus::Resolved,
            "2024-11-14T06:05:00Z",
            "Primary refused connections; failover restored gateway error rate.",
        ),
        incident(
            "INC-2038",
            "Gateway 5xx burst",
            "gateway-service",
            Severity::P4,
            IncidentStatus::Resolved,
            "2024-11-14T04:22:00Z",
            "Short burst of upstream timeouts cleared without action.",
        ),
    ]
}
