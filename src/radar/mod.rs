//! Radar scope simulation: world model, integrator, detector, renderer and
//! pointer interaction.

pub mod detect;
pub mod geometry;
pub mod integrate;
pub mod interact;
pub mod render;
pub mod scope;
pub mod surface;
pub mod threat;
pub mod types;

pub use scope::RadarScope;
pub use types::{RadarConfig, RadarEvent, RadarStats, Target, TargetKind};
