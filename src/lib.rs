//! Vehicle input layer: input providers, the scene-scoped session that
//! combines them, and the gameplay pieces driven by the combined input.

pub mod config;
pub mod error;
pub mod gamepad;
pub mod input;
pub mod scene;
pub mod vehicle;

#[cfg(test)]
mod test_utils;
