//! View-state core for the incident commander showcase: the scenario
//! catalog, the step-through controller, and the incident board.

pub mod architecture;
pub mod catalog;
pub mod error;
pub mod event_log;
pub mod incidents;
pub mod nav;
pub mod stepper;

#[cfg(feature = "runtime")]
pub mod logging;
#[cfg(feature = "runtime")]
pub mod ticker;

pub use error::{Error, Result};
