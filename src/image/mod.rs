//! Image references and which registry they belong to


mod inventory;
mod partition;

pub use inventory::{unique_tags, ImageSummary};
pub use partition::{contains_registry_host, images_for_registry};
