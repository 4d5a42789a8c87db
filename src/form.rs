//! State behind an image field: registry selector, prefix, and suggestions

use crate::{
    image::{images_for_registry, unique_tags},
    memo::Memo,
    registry::{
        build_options, offers_default_registry, sort_by_name, DefaultRegistry, Registry,
        RegistryId, SelectOption,
    },
    source::{EnvironmentId, Source},
};
use std::sync::Arc;

static ANONYMOUS_DOCKER_HUB: Registry = Registry::AnonymousDockerHub;

/// Data for choosing a registry and an image name on it
///
/// Derived lists are cached and only recomputed when the registries, the
/// inventory, or the selection change.
#[derive(Debug)]
pub struct ImageForm {
    defaults: DefaultRegistry,
    registries: Arc<Vec<Registry>>,
    inventory: Arc<Vec<String>>,
    selected: Option<RegistryId>,
    options: Memo<(Arc<Vec<Registry>>, bool), Vec<SelectOption>>,
    suggestions: Memo<SuggestionInputs, Vec<String>>,
}

type SuggestionInputs = (Arc<Vec<String>>, Arc<Vec<Registry>>, Option<Registry>);

impl ImageForm {
    /// Build a form from data that's already available
    ///
    /// Registries are kept sorted by name.
    pub fn new(defaults: DefaultRegistry, registries: Vec<Registry>, inventory: Vec<String>) -> Self {
        let mut form = ImageForm {
            defaults,
            registries: Arc::new(Vec::new()),
            inventory: Arc::new(inventory),
            selected: None,
            options: Memo::new(),
            suggestions: Memo::new(),
        };
        form.set_registries(registries);
        form
    }

    /// Fetch everything the form needs from a [Source]
    ///
    /// The registry list is only requested once the public settings are
    /// known, since they decide how the list is presented. The inventory is
    /// requested regardless. Failed queries are logged and leave the
    /// corresponding list empty.
    pub fn load<S: Source + ?Sized>(source: &S, environment: EnvironmentId) -> Self {
        let defaults = match source.default_registry_hidden() {
            Ok(hidden) => Some(DefaultRegistry::new().hidden(hidden)),
            Err(err) => {
                log::warn!("unable to retrieve public settings: {}", err);
                None
            }
        };

        let registries = match defaults {
            None => {
                log::debug!("not requesting registries without public settings");
                Vec::new()
            }
            Some(_) => source.registries().unwrap_or_else(|err| {
                log::warn!("unable to retrieve registries: {}", err);
                Vec::new()
            }),
        };

        let inventory = match source.images(environment) {
            Ok(images) => unique_tags(&images),
            Err(err) => {
                log::warn!(
                    "unable to retrieve images for environment {}: {}",
                    environment,
                    err
                );
                Vec::new()
            }
        };

        log::debug!(
            "loaded {} registries and {} image references",
            registries.len(),
            inventory.len()
        );
        ImageForm::new(defaults.unwrap_or_default(), registries, inventory)
    }

    pub fn defaults(&self) -> &DefaultRegistry {
        &self.defaults
    }

    pub fn registries(&self) -> &[Registry] {
        &self.registries
    }

    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    /// Replace the registry list
    pub fn set_registries(&mut self, mut registries: Vec<Registry>) {
        sort_by_name(&mut registries);
        self.registries = Arc::new(registries);
    }

    /// Replace the image inventory
    pub fn set_inventory(&mut self, inventory: Vec<String>) {
        self.inventory = Arc::new(inventory);
    }

    /// Choose a registry by the id its selector option carries
    pub fn select(&mut self, id: Option<RegistryId>) {
        self.selected = id;
    }

    /// The chosen registry, if the selection refers to one the selector offers
    pub fn selected(&self) -> Option<&Registry> {
        lookup(
            &self.registries,
            self.defaults.show_default_registry(),
            self.selected,
        )
    }

    /// Prefix to show in front of the image name
    pub fn prefix(&self) -> String {
        self.defaults.display_prefix(self.selected())
    }

    /// Should a "search on Docker Hub" link be offered?
    ///
    /// Yes for anonymous Docker Hub, and also when nothing is selected, since
    /// the prefix shown then is the Docker Hub one.
    pub fn shows_docker_hub_search(&self) -> bool {
        self.defaults.is_default(self.selected())
    }

    /// Options for the registry selector
    pub fn options(&mut self) -> &[SelectOption] {
        let registries = &self.registries;
        let show_default = self.defaults.show_default_registry();
        self.options
            .get_or_compute((Arc::clone(registries), show_default), || {
                build_options(registries, show_default)
            })
    }

    /// Image names to suggest for the chosen registry
    pub fn suggestions(&mut self) -> &[String] {
        let registries = &self.registries;
        let inventory = &self.inventory;
        let show_default = self.defaults.show_default_registry();
        let selected = lookup(registries, show_default, self.selected);
        let key = (Arc::clone(inventory), Arc::clone(registries), selected.cloned());
        self.suggestions.get_or_compute(key, || {
            images_for_registry(inventory, registries, selected)
        })
    }
}

/// Resolve a selection against what the selector offers
fn lookup(
    registries: &[Registry],
    show_default: bool,
    id: Option<RegistryId>,
) -> Option<&Registry> {
    match id? {
        RegistryId::AnonymousDockerHub => {
            if offers_default_registry(registries, show_default) {
                Some(&ANONYMOUS_DOCKER_HUB)
            } else {
                log::debug!("virtual Docker Hub entry is not offered, ignoring selection");
                None
            }
        }
        id => registries.iter().find(|registry| registry.id() == id),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        errors::SourceError,
        image::ImageSummary,
        registry::{GenericRegistry, RegistryConfig, RegistryKind},
    };

    fn docker_hub(id: u32, url: &str) -> Registry {
        Registry::Configured(RegistryConfig {
            id,
            name: "hub".to_owned(),
            url: url.to_owned(),
            username: Some("me".to_owned()),
            kind: RegistryKind::DockerHub,
        })
    }
    use std::cell::Cell;

    fn custom(id: u32, name: &str, url: &str) -> Registry {
        Registry::Configured(RegistryConfig {
            id,
            name: name.to_owned(),
            url: url.to_owned(),
            username: None,
            kind: RegistryKind::Generic(GenericRegistry::Custom),
        })
    }

    struct FakeSource {
        hidden: Option<bool>,
        registries: Option<Vec<Registry>>,
        images: Option<Vec<ImageSummary>>,
        registry_requests: Cell<usize>,
    }

    impl FakeSource {
        fn new() -> Self {
            FakeSource {
                hidden: Some(false),
                registries: Some(vec![
                    custom(2, "zebra", "zebra.io"),
                    custom(1, "acme", "myregistry.io"),
                ]),
                images: Some(vec![ImageSummary {
                    id: "sha256:aa".to_owned(),
                    repo_tags: Some(vec![
                        "myregistry.io/app:1".to_owned(),
                        "nginx:latest".to_owned(),
                        "nginx:latest".to_owned(),
                    ]),
                }]),
                registry_requests: Cell::new(0),
            }
        }
    }

    fn unavailable<T>(value: &Option<T>) -> Result<T, SourceError>
    where
        T: Clone,
    {
        value
            .clone()
            .ok_or_else(|| SourceError::Unavailable("fake".to_owned()))
    }

    impl Source for FakeSource {
        fn default_registry_hidden(&self) -> Result<bool, SourceError> {
            unavailable(&self.hidden)
        }

        fn registries(&self) -> Result<Vec<Registry>, SourceError> {
            self.registry_requests.set(self.registry_requests.get() + 1);
            unavailable(&self.registries)
        }

        fn images(&self, _environment: EnvironmentId) -> Result<Vec<ImageSummary>, SourceError> {
            unavailable(&self.images)
        }
    }

    #[test]
    fn load_everything() {
        let source = FakeSource::new();
        let mut form = ImageForm::load(&source, 1);
        assert_eq!(source.registry_requests.get(), 1);
        assert_eq!(form.inventory(), &["myregistry.io/app:1", "nginx:latest"]);

        let labels: Vec<&str> = form.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Docker Hub (anonymous)", "acme", "zebra"]);

        assert_eq!(form.prefix(), "docker.io");
        assert!(form.shows_docker_hub_search());
        assert_eq!(form.suggestions(), &["nginx:latest"]);

        form.select(Some(RegistryId::Persisted(1)));
        assert_eq!(form.prefix(), "myregistry.io");
        assert!(!form.shows_docker_hub_search());
        assert_eq!(form.suggestions(), &["app:1"]);

        form.select(Some(RegistryId::AnonymousDockerHub));
        assert_eq!(form.selected(), Some(&Registry::AnonymousDockerHub));
        assert_eq!(form.prefix(), "docker.io");
        assert!(form.shows_docker_hub_search());
        assert_eq!(form.suggestions(), &["nginx:latest"]);
    }

    #[test]
    fn hidden_default_registry() {
        let mut source = FakeSource::new();
        source.hidden = Some(true);
        let mut form = ImageForm::load(&source, 1);
        let labels: Vec<&str> = form.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["acme", "zebra"]);

        form.select(Some(RegistryId::AnonymousDockerHub));
        assert_eq!(form.selected(), None);
        assert_eq!(form.suggestions(), &["nginx:latest"]);
    }

    #[test]
    fn virtual_entry_only_when_offered() {
        let mut form = ImageForm::new(
            DefaultRegistry::new(),
            vec![docker_hub(3, "")],
            vec!["nginx:latest".to_owned()],
        );
        let values: Vec<RegistryId> = form.options().iter().map(|o| o.value).collect();
        assert_eq!(values, vec![RegistryId::Persisted(3)]);

        form.select(Some(RegistryId::AnonymousDockerHub));
        assert_eq!(form.selected(), None);
        form.select(Some(RegistryId::Persisted(3)));
        assert_eq!(form.selected().map(Registry::id), Some(RegistryId::Persisted(3)));
    }

    #[test]
    fn docker_hub_search_link() {
        let mut form = ImageForm::new(
            DefaultRegistry::new(),
            vec![docker_hub(3, ""), docker_hub(4, "hub.example.com")],
            Vec::new(),
        );
        assert_eq!(form.selected(), None);
        assert!(form.shows_docker_hub_search());

        form.select(Some(RegistryId::Persisted(3)));
        assert!(form.shows_docker_hub_search());

        form.select(Some(RegistryId::Persisted(4)));
        assert!(!form.shows_docker_hub_search());

        form.select(Some(RegistryId::Persisted(99)));
        assert!(form.shows_docker_hub_search());
    }

    #[test]
    fn registries_wait_for_settings() {
        let mut source = FakeSource::new();
        source.hidden = None;
        let mut form = ImageForm::load(&source, 1);
        assert_eq!(source.registry_requests.get(), 0);
        assert!(form.registries().is_empty());
        assert_eq!(form.options().len(), 1);
        assert_eq!(form.suggestions(), &["nginx:latest"]);
    }

    #[test]
    fn failures_mean_nothing_known() {
        let mut source = FakeSource::new();
        source.registries = None;
        source.images = None;
        let mut form = ImageForm::load(&source, 1);
        assert_eq!(source.registry_requests.get(), 1);
        assert!(form.registries().is_empty());
        assert!(form.inventory().is_empty());
        assert!(form.suggestions().is_empty());
        assert_eq!(form.prefix(), "docker.io");
    }

    #[test]
    fn unknown_selection() {
        let mut form = ImageForm::load(&FakeSource::new(), 1);
        form.select(Some(RegistryId::Persisted(77)));
        assert_eq!(form.selected(), None);
        assert_eq!(form.prefix(), "docker.io");
        assert_eq!(form.suggestions(), &["nginx:latest"]);
    }

    #[test]
    fn derived_lists_are_cached() {
        let mut form = ImageForm::load(&FakeSource::new(), 1);
        let first = form.options().to_vec();
        assert_eq!(form.options(), &first[..]);
        assert_eq!(form.options.misses(), 1);

        form.suggestions();
        form.suggestions();
        assert_eq!(form.suggestions.misses(), 1);

        form.select(Some(RegistryId::Persisted(1)));
        form.suggestions();
        assert_eq!(form.suggestions.misses(), 2);
        form.options();
        assert_eq!(form.options.misses(), 1);

        form.set_inventory(vec!["myregistry.io/other:2".to_owned()]);
        assert_eq!(form.suggestions(), &["other:2"]);
        assert_eq!(form.suggestions.misses(), 3);

        form.set_registries(vec![custom(5, "hub", "")]);
        assert_eq!(form.options().len(), 2);
        assert_eq!(form.options.misses(), 2);
    }
}
