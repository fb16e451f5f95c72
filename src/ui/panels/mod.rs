// PlantCare - ui/panels/mod.rs

pub mod about;
pub mod header;
pub mod preview;
pub mod result;
pub mod upload;
