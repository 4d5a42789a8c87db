//! Settings for the default registry used when none is chosen

use crate::registry::{registry_url, Registry};
use url::Url;

/// Additional settings for the default registry
///
/// Images with no registry in their name are pulled from Docker Hub. Unless an
/// operator hides it, a virtual anonymous Docker Hub entry is offered
/// alongside the configured registries.
#[derive(Clone, Debug)]
pub struct DefaultRegistry {
    /// Prefix shown when the selected registry has no prefix of its own
    pub display_name: String,
    /// Docker Hub image search page
    pub search_url: Url,
    /// Don't offer the virtual anonymous entry
    pub hidden: bool,
}

/// Publicly readable settings of the management layer
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicSettings {
    #[serde(default)]
    pub default_registry: DefaultRegistrySettings,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DefaultRegistrySettings {
    #[serde(default)]
    pub hide: bool,
}

impl Default for DefaultRegistry {
    fn default() -> Self {
        DefaultRegistry::new()
    }
}

impl From<&PublicSettings> for DefaultRegistry {
    fn from(settings: &PublicSettings) -> Self {
        DefaultRegistry::new().hidden(settings.default_registry.hide)
    }
}

impl DefaultRegistry {
    /// Return the built-in defaults
    pub fn new() -> Self {
        DefaultRegistry {
            display_name: "docker.io".to_owned(),
            search_url: "https://hub.docker.com/search".parse().unwrap(),
            hidden: false,
        }
    }

    /// Change whether the virtual anonymous entry is hidden
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Should selectors offer the virtual anonymous entry?
    pub fn show_default_registry(&self) -> bool {
        !self.hidden
    }

    /// Check whether a particular registry is the default under these settings
    ///
    /// Returns true if the given registry is None or if it's Docker Hub
    /// without a URL of its own.
    pub fn is_default(&self, registry: Option<&Registry>) -> bool {
        match registry {
            None => true,
            Some(registry) => registry.is_anonymous_docker_hub(),
        }
    }

    /// Prefix to display in front of an image name
    pub fn display_prefix(&self, registry: Option<&Registry>) -> String {
        let url = registry_url(registry);
        if url.is_empty() {
            self.display_name.clone()
        } else {
            url
        }
    }

    /// Link to search Docker Hub for an image
    ///
    /// The digest and tag, if any, are left out of the query.
    ///
    /// ```
    /// # use imagescope::registry::DefaultRegistry;
    /// let url = DefaultRegistry::new().search_url("nginx:1.19");
    /// assert_eq!(url.as_str(), "https://hub.docker.com/search?type=image&q=nginx");
    /// ```
    pub fn search_url(&self, image: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("type", "image")
            .append_pair("q", search_term(image));
        url
    }
}

/// Image name without its digest and tag
pub(crate) fn search_term(image: &str) -> &str {
    let image = match image.find('@') {
        Some(pos) => &image[..pos],
        None => image,
    };
    let name_start = image.rfind('/').map(|pos| pos + 1).unwrap_or(0);
    match image[name_start..].rfind(':') {
        Some(pos) => &image[..name_start + pos],
        None => image,
    }
}
