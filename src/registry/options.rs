use crate::registry::{Registry, RegistryId, ANONYMOUS_DOCKER_HUB_NAME};
use std::cmp::Ordering;

/// One entry in a registry selector
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: RegistryId,
}

impl From<&Registry> for SelectOption {
    fn from(registry: &Registry) -> Self {
        SelectOption {
            label: registry.name().to_owned(),
            value: registry.id(),
        }
    }
}

/// Build the options for a registry selector
///
/// Options follow the order of `registries`. Unless a Docker Hub registry is
/// already present or `show_default_registry` is false, the virtual anonymous
/// Docker Hub entry is placed first.
pub fn build_options(registries: &[Registry], show_default_registry: bool) -> Vec<SelectOption> {
    for registry in registries {
        if registry.id() == RegistryId::Persisted(0) {
            log::warn!(
                "registry {:?} has id 0, which selectors read as {:?}",
                registry.name(),
                ANONYMOUS_DOCKER_HUB_NAME
            );
        }
    }
    let options = registries.iter().map(SelectOption::from);
    if offers_default_registry(registries, show_default_registry) {
        std::iter::once(SelectOption::from(&Registry::AnonymousDockerHub))
            .chain(options)
            .collect()
    } else {
        options.collect()
    }
}

/// Add the virtual anonymous Docker Hub entry to a registry list
///
/// Same rule as [build_options], applied to the registries themselves.
pub fn with_default_registry(registries: Vec<Registry>, hide_default: bool) -> Vec<Registry> {
    if offers_default_registry(&registries, !hide_default) {
        let mut result = Vec::with_capacity(registries.len() + 1);
        result.push(Registry::AnonymousDockerHub);
        result.extend(registries);
        result
    } else {
        registries
    }
}

/// Sort registries by name, ignoring case
pub fn sort_by_name(registries: &mut [Registry]) {
    registries.sort_by(|a, b| compare_names(a.name(), b.name()));
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Is the virtual anonymous Docker Hub entry part of the selector?
pub fn offers_default_registry(registries: &[Registry], show_default_registry: bool) -> bool {
    show_default_registry && !registries.iter().any(Registry::is_docker_hub)
}
