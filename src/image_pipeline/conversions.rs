//! Pipeline conversions module
//!
//! This module contains orchestration logic that takes canvas uploads all the
//! way to canonical vectors, previews and predictions.

mod canvas_to_vector;


pub use canvas_to_vector::CanvasToVectorPipeline;
