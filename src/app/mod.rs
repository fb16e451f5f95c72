// PlantCare - app/mod.rs
//
// Application layer: view-controller state, background requests, session
// persistence, headless mode.
// Dependencies: core, util.
// Must NOT depend on: ui, platform specifics.

pub mod headless;
pub mod predict;
pub mod session;
pub mod state;
