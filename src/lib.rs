//! Swellrover library - truck driving on procedural wavy terrain

pub mod camera;
pub mod cli;
pub mod geometry;
pub mod input;
pub mod params;
pub mod rendering;
pub mod terrain;
pub mod transform;
pub mod vehicle;
