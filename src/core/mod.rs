// PlantCare - core/mod.rs
//
// Core layer: image model, preview decoding, markdown model, the prediction
// service contract, and article export.
// Dependencies: util.
// Must NOT depend on: app, ui, platform.

pub mod export;
pub mod markdown;
pub mod model;
pub mod predict;
pub mod preview;
