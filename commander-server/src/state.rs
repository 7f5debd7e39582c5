use commander_core::catalog::{self, Catalog};
use commander_core::incidents::{mock_incidents, BoardSummary, IncidentBoard};
use commander_core::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    board: Arc<Mutex<IncidentBoard>>,
}

impl AppState {
    pub fn new(catalog: Catalog, board: IncidentBoard) -> Self {
        Self {
            catalog: Arc::new(catalog),
            board: Arc::new(Mutex::new(board)),
        }
    }

    /// Bundled scenarios and mock incidents. Either failing startup
    /// validation is returned as an error.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(
            catalog::builtin()?,
            IncidentBoard::new(mock_incidents())?,
        ))
    }

    fn board(&self) -> MutexGuard<'_, IncidentBoard> {
        // The board holds no invariant a panicking holder could break.
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn board_summary(&self) -> BoardSummary {
        self.board().summary()
    }

    pub fn select_incident(&self, id: &str) -> Result<()> {
        self.board().select(id)
    }

    pub fn tick(&self) -> u64 {
        self.board().tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commander_core::Error;

    #[test]
    fn builtin_state_loads_validated_data() {
        let state = AppState::builtin().expect("state");
        assert_eq!(state.catalog.len(), 3);
        assert_eq!(state.board_summary().selected_id, "INC-2041");
    }

    #[test]
    fn invalid_catalog_is_rejected_before_state_exists() {
        let err = Catalog::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyCatalog));
    }
}
