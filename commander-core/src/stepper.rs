//! Scenario step-through controller.
//!
//! The controller is a bounded counter over the selected scenario's steps.
//! What the view shows is never stored: [`visible_steps`] and [`is_complete`]
//! derive it from the catalog and the current [`Selection`] on every call.
//! Every command that changes the selection is recorded in a [`Navigation`]
//! log, and [`replay`] folds a log back into the selection it produced.
//! Boundary no-ops are not recorded.

use crate::catalog::{Catalog, Scenario, Step};
use crate::error::{Error, Result};
use crate::event_log::EventLog;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Which scenario is chosen and how far it has been revealed.
///
/// `reveal_index` is always `<= steps.len() - 1` for `scenario_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub scenario_id: String,
    pub reveal_index: usize,
}

impl Selection {
    pub fn initial(catalog: &Catalog) -> Self {
        Self {
            scenario_id: catalog.first().id.clone(),
            reveal_index: 0,
        }
    }

    fn apply(&mut self, catalog: &Catalog, nav: &Navigation) {
        match nav {
            Navigation::Selected { scenario_id } => {
                self.scenario_id = scenario_id.clone();
                self.reveal_index = 0;
            }
            Navigation::FellBack { .. } => *self = Self::initial(catalog),
            Navigation::Advanced => {
                let last = scenario_for(catalog, self).last_index();
                self.reveal_index = (self.reveal_index + 1).min(last);
            }
            Navigation::Retreated => self.reveal_index = self.reveal_index.saturating_sub(1),
        }
    }
}

/// A navigation command as it was applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Navigation {
    Selected { scenario_id: String },
    /// Unknown id requested; the first scenario was selected instead.
    FellBack { requested: String },
    Advanced,
    Retreated,
}

fn scenario_for<'a>(catalog: &'a Catalog, selection: &Selection) -> &'a Scenario {
    catalog
        .get(&selection.scenario_id)
        .unwrap_or_else(|| catalog.first())
}

/// `steps[0..=reveal_index]` of the selected scenario.
pub fn visible_steps<'a>(catalog: &'a Catalog, selection: &Selection) -> &'a [Step] {
    let steps = &scenario_for(catalog, selection).steps;
    let end = (selection.reveal_index + 1).min(steps.len());
    &steps[..end]
}

pub fn is_complete(catalog: &Catalog, selection: &Selection) -> bool {
    selection.reveal_index >= scenario_for(catalog, selection).last_index()
}

/// Rebuilds the selection a sequence of commands produced, starting from the
/// initial state.
pub fn replay(catalog: &Catalog, log: &EventLog<Navigation>) -> Selection {
    let mut selection = Selection::initial(catalog);
    for nav in log.kinds() {
        selection.apply(catalog, nav);
    }
    selection
}

#[derive(Clone, Debug)]
pub struct StepController {
    catalog: Arc<Catalog>,
    selection: Selection,
    log: EventLog<Navigation>,
}

impl StepController {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let selection = Selection::initial(&catalog);
        Self {
            catalog,
            selection,
            log: EventLog::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn log(&self) -> &EventLog<Navigation> {
        &self.log
    }

    pub fn scenario(&self) -> &Scenario {
        scenario_for(&self.catalog, &self.selection)
    }

    pub fn reveal_index(&self) -> usize {
        self.selection.reveal_index
    }

    pub fn visible_steps(&self) -> &[Step] {
        visible_steps(&self.catalog, &self.selection)
    }

    pub fn is_complete(&self) -> bool {
        is_complete(&self.catalog, &self.selection)
    }

    /// Selects `id` and rewinds to its first step. Unknown ids leave the
    /// state untouched.
    pub fn try_select_scenario(&mut self, id: &str) -> Result<()> {
        if !self.catalog.contains(id) {
            return Err(Error::unknown_scenario(id));
        }
        self.record(Navigation::Selected {
            scenario_id: id.to_string(),
        });
        Ok(())
    }

    /// Selects `id`, falling back to the first scenario when the id is not
    /// cataloged. The fallback panics in debug builds.
    pub fn select_scenario(&mut self, id: &str) {
        let Err(err) = self.try_select_scenario(id) else {
            return;
        };
        warn!(
            "{err}; falling back to '{}'",
            self.catalog.first().id
        );
        self.record(Navigation::FellBack {
            requested: id.to_string(),
        });
        if cfg!(debug_assertions) {
            panic!("{err}");
        }
    }

    /// Reveals the next step. Returns false at the last step.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.record(Navigation::Advanced);
        true
    }

    /// Hides the latest step. Returns false at the first step.
    pub fn retreat(&mut self) -> bool {
        if self.selection.reveal_index == 0 {
            return false;
        }
        self.record(Navigation::Retreated);
        true
    }

    fn record(&mut self, nav: Navigation) {
        self.selection.apply(&self.catalog, &nav);
        debug!(
            scenario = %self.selection.scenario_id,
            reveal_index = self.selection.reveal_index,
            "navigation: {nav:?}"
        );
        let description = format!("{nav:?}");
        self.log.append(nav, description);
    }
}
