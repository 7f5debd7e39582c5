//! Plain-text rendering of every scenario, revealed one step at a time.

use commander_core::catalog::Catalog;
use commander_core::stepper::StepController;
use std::fmt::Write;
use std::sync::Arc;

pub fn render(catalog: Arc<Catalog>) -> String {
    let mut ctl = StepController::new(catalog);
    let ids: Vec<String> = ctl
        .catalog()
        .scenarios()
        .iter()
        .map(|s| s.id.clone())
        .collect();

    let mut out = String::new();
    for id in ids {
        ctl.select_scenario(&id);
        let scenario = ctl.scenario();
        let _ = writeln!(out, "== {} ({})", scenario.name, scenario.service);
        let _ = writeln!(out, "   {}", scenario.summary);

        loop {
            let index = ctl.reveal_index();
            let step = &ctl.visible_steps()[index];
            let tag = step
                .severity
                .map(|s| format!(" [{s}]"))
                .unwrap_or_default();
            let _ = writeln!(out, "  Step {} · {}{tag}", index + 1, step.agent);
            let _ = writeln!(out, "     {}: {}", step.title, step.detail);
            if !ctl.advance() {
                break;
            }
        }
        let _ = writeln!(out, "  Scenario complete\n");
    }
    out
}
