use crate::registry::{Registry, RegistryConfig, RegistryKind};

/// Addressing prefix of an optional registry
///
/// Returns an empty string when there's no registry; callers usually show a
/// fallback such as `docker.io` in that case (see
/// [crate::registry::DefaultRegistry::display_prefix]).
pub fn registry_url(registry: Option<&Registry>) -> String {
    registry.map(Registry::url_prefix).unwrap_or_default()
}

impl Registry {
    /// The string that prefixes image names hosted on this registry
    ///
    /// ```
    /// # use imagescope::registry::Registry;
    /// assert_eq!(Registry::AnonymousDockerHub.url_prefix(), "");
    /// ```
    pub fn url_prefix(&self) -> String {
        match self {
            Registry::AnonymousDockerHub => String::new(),
            Registry::Configured(config) => config.url_prefix(),
        }
    }
}

impl RegistryConfig {
    /// See [Registry::url_prefix]
    pub fn url_prefix(&self) -> String {
        match &self.kind {
            RegistryKind::Gitlab(gitlab) => format!(
                "{}/{}",
                self.url,
                gitlab.project_path.as_deref().unwrap_or("")
            ),
            RegistryKind::Github(github) => format!(
                "{}/{}",
                self.url,
                github.namespace(self.username.as_deref())
            ),
            RegistryKind::Anonymous | RegistryKind::DockerHub | RegistryKind::Generic(_) => {
                self.url.clone()
            }
        }
    }
}
