// src/gui/actions/mod.rs
//
// Button actions. Layout stays in components/, the operational logic lives here.

mod copy;  // src/gui/actions/copy.rs
mod run;   // src/gui/actions/run.rs

pub use copy::copy;
pub use run::{poll_run, start_run};
