//! Server-rendered HTML for the fixed views.

use commander_core::architecture::{self, Architecture};
use commander_core::catalog::{Catalog, Severity};
use commander_core::incidents::{BoardSummary, IncidentFilter};
use commander_core::nav::{Page, REPOSITORY_URL, SITE_TITLE};
use commander_core::stepper::StepController;
use std::fmt::Write;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn severity_badge(severity: Option<Severity>) -> String {
    match severity {
        Some(s) => format!(r#"<span class="badge {}">{}</span>"#, s.css_class(), s.label()),
        None => String::new(),
    }
}

fn layout(active: Page, title: &str, body: &str) -> String {
    let mut nav = String::new();
    for page in Page::NAV {
        let class = if page == active { " class=\"active\"" } else { "" };
        let _ = write!(
            nav,
            r#"<a href="{}"{class}>{}</a>"#,
            page.path(),
            page.label()
        );
    }
    format!(
        r#"<!doctype html>
<html lang="en" class="dark">
<head><meta charset="utf-8"><title>{title} · {site}</title></head>
<body>
<header><a href="/" class="brand">{site}</a><nav>{nav}<a href="{repo}" rel="noreferrer">GitHub</a></nav></header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        site = SITE_TITLE,
        repo = REPOSITORY_URL,
    )
}

pub fn home(catalog: &Catalog) -> String {
    let mut body = String::new();
    body.push_str(
        r#"<section class="hero">
<h1>DevOps Incident Commander</h1>
<p>A visual companion for a multi-agent incident response system. Five agents coordinate severity triage, diagnosis, remediation, and communication in one flow.</p>
<a href="/demo">Open Live Demo</a> <a href="/architecture">View Architecture</a>
</section>
<section><h2>How it works</h2><ol class="flow">"#,
    );
    for (idx, stage) in architecture::agent_flow().into_iter().enumerate() {
        let _ = write!(body, "<li><small>Step {}</small> {}</li>", idx + 1, escape(stage));
    }
    body.push_str("</ol></section>\n<section><h2>Incident scenarios</h2>");
    for card in catalog.cards() {
        let _ = write!(
            body,
            "<article><h3>{}</h3>{}<p>{}</p></article>",
            escape(&card.name),
            severity_badge(card.severity),
            escape(&card.description)
        );
    }
    body.push_str("</section>");
    layout(Page::Home, "Home", &body)
}

pub fn architecture(arch: &Architecture) -> String {
    let mut body = String::from("<h1>Architecture</h1>\n<section class=\"agents\">");
    for (idx, agent) in arch.agents.iter().enumerate() {
        let tools: String = agent
            .tool_group
            .iter()
            .map(|t| format!("<code>{}</code>", escape(t)))
            .collect();
        let _ = write!(
            body,
            "<article><small>Stage {}</small><h2>{}</h2><p class=\"role\">{}</p>\
             <p>In: {}</p><p>Out: {}</p><div class=\"tools\">{tools}</div></article>",
            idx + 1,
            escape(&agent.name),
            escape(&agent.role),
            escape(&agent.receives),
            escape(&agent.emits),
        );
    }
    body.push_str("</section>\n<section><h2>Data flow</h2><ul class=\"sources\">");
    for source in &arch.data_sources {
        let _ = write!(
            body,
            "<li>{} <code>{}</code></li>",
            escape(&source.name),
            escape(&source.index)
        );
    }
    body.push_str("</ul></section>");
    layout(Page::Architecture, "Architecture", &body)
}

pub fn demo(ctl: &StepController) -> String {
    let current = ctl.scenario();
    let mut body = String::from("<h1>Interactive Demo</h1>\n<section class=\"scenarios\">");
    for scenario in ctl.catalog().scenarios() {
        let selected = if scenario.id == current.id { " selected" } else { "" };
        let _ = write!(
            body,
            "<div class=\"scenario{selected}\" data-id=\"{}\"><p>{}</p><small>{}</small></div>",
            escape(&scenario.id),
            escape(&scenario.name),
            escape(&scenario.service)
        );
    }
    let _ = write!(
        body,
        "</section>\n<section class=\"timeline\"><h2>{}</h2><p>{}</p>",
        escape(&current.name),
        escape(&current.summary)
    );
    for (idx, step) in ctl.visible_steps().iter().enumerate() {
        let _ = write!(
            body,
            "<article><small>Step {}</small><p class=\"agent\">{}</p>{}<p class=\"title\">{}</p><p>{}</p></article>",
            idx + 1,
            escape(&step.agent),
            severity_badge(step.severity),
            escape(&step.title),
            escape(&step.detail)
        );
    }
    let next_label = if ctl.is_complete() {
        "Scenario complete"
    } else {
        "Next step"
    };
    let _ = write!(
        body,
        "<div class=\"controls\"><button disabled>Previous step</button><button>{next_label}</button></div></section>"
    );
    layout(Page::Demo, "Demo", &body)
}

pub fn incidents(summary: &BoardSummary) -> String {
    let mut body = format!(
        "<h1>Incidents</h1>\n<p class=\"counts\"><span>{} active</span> <span>{} resolved today</span></p>\n<div class=\"filters\">",
        summary.active_count, summary.resolved_today
    );
    for filter in IncidentFilter::ALL {
        let _ = write!(body, "<button>{}</button>", filter.label());
    }
    body.push_str("</div>\n<ul class=\"incidents\">");
    for incident in &summary.incidents {
        let selected = if incident.id == summary.selected_id { " class=\"selected\"" } else { "" };
        let _ = write!(
            body,
            "<li{selected}><b>{}</b> {} <span class=\"status\">{}</span><p>{}</p><small>{} · {}</small></li>",
            escape(&incident.id),
            severity_badge(Some(incident.severity)),
            incident.status,
            escape(&incident.title),
            escape(&incident.service),
            escape(&incident.started_at)
        );
    }
    body.push_str("</ul>");
    if let Some(selected) = summary.incidents.iter().find(|i| i.id == summary.selected_id) {
        let _ = write!(
            body,
            "\n<section class=\"detail\"><h2>{}</h2><p>{}</p></section>",
            escape(&selected.title),
            escape(&selected.summary)
        );
    }
    layout(Page::Incidents, "Incidents", &body)
}

pub fn not_found(path: &str) -> String {
    let body = format!(
        "<h1>Not found</h1><p>No view at <code>{}</code>.</p>",
        escape(path)
    );
    layout(Page::Home, "Not found", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use commander_core::catalog;
    use commander_core::incidents::{mock_incidents, IncidentBoard};
    use std::sync::Arc;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn home_lists_flow_and_scenario_cards() {
        let html = home(&catalog::builtin().expect("catalog"));
        assert!(html.contains("DevOps Incident Commander"));
        assert!(html.contains("<small>Step 5</small> Communication"));
        assert!(html.contains("<h3>Cascading Failure</h3>"));
        assert!(html.contains("severity-p1"));
    }

    #[test]
    fn demo_renders_only_visible_steps() {
        let mut ctl = StepController::new(Arc::new(catalog::builtin().expect("catalog")));
        let html = demo(&ctl);
        assert_eq!(html.matches("<small>Step ").count(), 1);
        assert!(html.contains("Next step"));

        while ctl.advance() {}
        let html = demo(&ctl);
        assert_eq!(html.matches("<small>Step ").count(), 5);
        assert!(html.contains("Scenario complete"));
        assert!(html.contains("Communication Agent"));
    }

    #[test]
    fn architecture_lists_tools_and_indices() {
        let html = architecture(&architecture::architecture());
        assert!(html.contains("<code>trace_correlator</code>"));
        assert!(html.contains("<code>traces-apm-*</code>"));
        assert!(html.contains("Stage 5"));
    }

    #[test]
    fn incidents_marks_selection_and_counts() {
        let mut board = IncidentBoard::new(mock_incidents()).expect("board");
        board.select("INC-2039").expect("select");
        let html = incidents(&board.summary());
        assert!(html.contains("3 active"));
        assert!(html.contains("2 resolved today"));
        assert!(html.contains("<li class=\"selected\"><b>INC-2039</b>"));
        assert!(html.contains("<h2>Inventory database outage</h2>"));
    }

    #[test]
    fn active_nav_link_is_marked() {
        let html = architecture(&architecture::architecture());
        assert!(html.contains(r#"<a href="/architecture" class="active">"#));
    }
}
