//! Configured container image registries and how images are addressed on them


mod default;
mod kind;
mod options;
mod prefix;

pub use default::{DefaultRegistry, DefaultRegistrySettings, PublicSettings};
pub use kind::{GenericRegistry, GithubConfig, GitlabConfig, RegistryKind};
pub use options::{
    build_options, offers_default_registry, sort_by_name, with_default_registry, SelectOption,
};
pub use prefix::registry_url;

use crate::errors::ConfigError;
use std::{convert::TryFrom, fmt, str::FromStr};

/// Display name of the virtual Docker Hub entry
pub static ANONYMOUS_DOCKER_HUB_NAME: &str = "Docker Hub (anonymous)";

/// A registry that images can be pulled from
///
/// Most registries are [Registry::Configured], persisted by the management
/// layer with their own id. When no Docker Hub registry is configured, a
/// virtual [Registry::AnonymousDockerHub] entry stands in for pulling public
/// images without credentials. It has no id of its own, so it can't be
/// confused with a persisted registry.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRegistry", into = "RawRegistry")]
pub enum Registry {
    AnonymousDockerHub,
    Configured(RegistryConfig),
}

/// A registry as persisted by the management layer
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RegistryConfig {
    pub id: u32,
    pub name: String,
    pub url: String,
    pub username: Option<String>,
    pub kind: RegistryKind,
}

/// Identity of a selectable registry
///
/// Selection widgets carry plain integers, where `0` means the virtual Docker
/// Hub entry. Inside this crate the two cases stay distinct: a persisted
/// registry whose id happens to be zero is still [RegistryId::Persisted].
/// Its option value is also `0` though, so it can't be chosen through a
/// selector; [build_options] logs a warning when it sees one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum RegistryId {
    AnonymousDockerHub,
    Persisted(u32),
}

impl Registry {
    /// Identity used for selection
    pub fn id(&self) -> RegistryId {
        match self {
            Registry::AnonymousDockerHub => RegistryId::AnonymousDockerHub,
            Registry::Configured(config) => RegistryId::Persisted(config.id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Registry::AnonymousDockerHub => ANONYMOUS_DOCKER_HUB_NAME,
            Registry::Configured(config) => &config.name,
        }
    }

    /// Base URL as configured, empty for the virtual entry
    pub fn url(&self) -> &str {
        match self {
            Registry::AnonymousDockerHub => "",
            Registry::Configured(config) => &config.url,
        }
    }

    pub fn kind(&self) -> &RegistryKind {
        static DOCKER_HUB: RegistryKind = RegistryKind::DockerHub;
        match self {
            Registry::AnonymousDockerHub => &DOCKER_HUB,
            Registry::Configured(config) => &config.kind,
        }
    }

    /// Is this a Docker Hub registry, real or virtual?
    pub fn is_docker_hub(&self) -> bool {
        *self.kind() == RegistryKind::DockerHub
    }

    /// Docker Hub without a configured URL
    ///
    /// Images on such a registry can be looked up with the public Docker Hub
    /// search.
    pub fn is_anonymous_docker_hub(&self) -> bool {
        self.is_docker_hub() && self.url().is_empty()
    }

    /// Can image references be attributed to this registry?
    ///
    /// True for any registry with a non-empty URL that isn't of the anonymous
    /// type. Only these registries take part in matching inventory entries.
    pub fn is_addressable(&self) -> bool {
        *self.kind() != RegistryKind::Anonymous && !self.url().is_empty()
    }
}

impl From<RegistryConfig> for Registry {
    fn from(config: RegistryConfig) -> Self {
        Registry::Configured(config)
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}

impl RegistryId {
    /// Interpret an integer coming from a selection widget
    ///
    /// `0` is always the virtual entry, never `Persisted(0)`.
    pub fn from_option_value(value: u32) -> Self {
        match value {
            0 => RegistryId::AnonymousDockerHub,
            id => RegistryId::Persisted(id),
        }
    }

    /// The integer a selection widget carries for this id
    pub fn option_value(&self) -> u32 {
        match self {
            RegistryId::AnonymousDockerHub => 0,
            RegistryId::Persisted(id) => *id,
        }
    }
}

impl FromStr for RegistryId {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(RegistryId::from_option_value)
            .map_err(|_| ConfigError::InvalidRegistryId(s.to_owned()))
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.option_value())
    }
}

impl serde::Serialize for RegistryId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.option_value())
    }
}

/// Registry descriptor as it appears in the management API
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawRegistry {
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(rename = "Type")]
    type_code: u8,
    #[serde(rename = "URL", default)]
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gitlab: Option<GitlabConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    github: Option<GithubConfig>,
}

impl TryFrom<RawRegistry> for Registry {
    type Error = ConfigError;
    fn try_from(raw: RawRegistry) -> Result<Self, Self::Error> {
        let kind = RegistryKind::from_parts(raw.type_code, raw.gitlab, raw.github)?;
        Ok(Registry::Configured(RegistryConfig {
            id: raw.id,
            name: raw.name,
            url: raw.url,
            username: raw.username.filter(|name| !name.is_empty()),
            kind,
        }))
    }
}

impl From<Registry> for RawRegistry {
    fn from(registry: Registry) -> Self {
        match registry {
            Registry::AnonymousDockerHub => RawRegistry {
                id: 0,
                name: ANONYMOUS_DOCKER_HUB_NAME.to_owned(),
                type_code: RegistryKind::DockerHub.type_code(),
                ..RawRegistry::default()
            },
            Registry::Configured(config) => {
                let type_code = config.kind.type_code();
                let (gitlab, github) = match config.kind {
                    RegistryKind::Gitlab(gitlab) => (Some(gitlab), None),
                    RegistryKind::Github(github) => (None, Some(github)),
                    _ => (None, None),
                };
                RawRegistry {
                    id: config.id,
                    name: config.name,
                    type_code,
                    url: config.url,
                    username: config.username,
                    gitlab,
                    github,
                }
            }
        }
    }
}
