//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod gallery;
mod ids;
mod pending;
mod product;
mod result;
mod undo;
mod upload;

// Re-export all models for convenient imports
pub use gallery::*;
pub use ids::*;
pub use pending::*;
pub use product::*;
pub use result::*;
pub use undo::*;
pub use upload::*;
