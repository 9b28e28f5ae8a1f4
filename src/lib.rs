//! Snowline library - procedural snowy terrain and path-following agents

pub mod camera;
pub mod cli;
pub mod geometry;
pub mod heightfield;
pub mod noise;
pub mod params;
pub mod path;
pub mod rendering;
pub mod rock;
pub mod scene;
pub mod scroll;
pub mod snow;
pub mod terrain;
pub mod trail;
