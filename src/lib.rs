//! Resolve container image references against configured registries
//!
//! Given the registries an operator configured and the images a container
//! engine already knows about, this crate works out the prefix that goes in
//! front of an image name on each registry, which images plausibly came from
//! which registry, and which registries to offer for selection.

#[macro_use] extern crate lazy_static;
#[macro_use] extern crate serde;

pub mod errors;
pub mod form;
pub mod image;
pub mod memo;
pub mod registry;
pub mod source;

pub use crate::{
    form::ImageForm,
    registry::{Registry, RegistryId},
};
