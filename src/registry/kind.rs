use crate::errors::ConfigError;

/// Addressing scheme of a registry, with any scheme-specific settings
///
/// GitLab and GitHub registries host images under a project or namespace path
/// below the registry URL, so their variants carry the settings needed to
/// build that path. Every other registry type is addressed by its URL alone.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum RegistryKind {
    Anonymous,
    DockerHub,
    Gitlab(GitlabConfig),
    Github(GithubConfig),
    Generic(GenericRegistry),
}

/// Registry types addressed by a plain URL
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GenericRegistry {
    Quay,
    Azure,
    Custom,
    ProGet,
    Ecr,
}

/// Settings for a GitLab project registry
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GitlabConfig {
    /// Path of the project, like `group/project`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
}

/// Settings for the GitHub container registry
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GithubConfig {
    /// Images live under an organisation instead of the registry user
    #[serde(default)]
    pub use_organisation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisation_name: Option<String>,
}

impl GithubConfig {
    /// The namespace images are pushed under
    ///
    /// This is the organisation name when `use_organisation` is set, otherwise
    /// the username the registry was configured with. A missing value yields
    /// an empty namespace.
    pub fn namespace<'a>(&'a self, username: Option<&'a str>) -> &'a str {
        let namespace = if self.use_organisation {
            self.organisation_name.as_deref()
        } else {
            username
        };
        namespace.unwrap_or("")
    }
}

impl RegistryKind {
    /// Numeric type code used by the management API
    pub fn type_code(&self) -> u8 {
        match self {
            RegistryKind::Anonymous => 0,
            RegistryKind::Generic(GenericRegistry::Quay) => 1,
            RegistryKind::Generic(GenericRegistry::Azure) => 2,
            RegistryKind::Generic(GenericRegistry::Custom) => 3,
            RegistryKind::Gitlab(_) => 4,
            RegistryKind::Generic(GenericRegistry::ProGet) => 5,
            RegistryKind::DockerHub => 6,
            RegistryKind::Generic(GenericRegistry::Ecr) => 7,
            RegistryKind::Github(_) => 8,
        }
    }

    /// Assemble a kind from its type code and whichever settings blocks came
    /// along with it
    ///
    /// Settings blocks that don't belong to the type are dropped. A GitLab or
    /// GitHub type without its block gets empty settings, which later resolve
    /// to an incomplete path rather than an error.
    pub fn from_parts(
        type_code: u8,
        gitlab: Option<GitlabConfig>,
        github: Option<GithubConfig>,
    ) -> Result<Self, ConfigError> {
        Ok(match type_code {
            0 => RegistryKind::Anonymous,
            1 => RegistryKind::Generic(GenericRegistry::Quay),
            2 => RegistryKind::Generic(GenericRegistry::Azure),
            3 => RegistryKind::Generic(GenericRegistry::Custom),
            4 => RegistryKind::Gitlab(gitlab.unwrap_or_else(|| {
                log::debug!("gitlab registry without project settings");
                GitlabConfig::default()
            })),
            5 => RegistryKind::Generic(GenericRegistry::ProGet),
            6 => RegistryKind::DockerHub,
            7 => RegistryKind::Generic(GenericRegistry::Ecr),
            8 => RegistryKind::Github(github.unwrap_or_else(|| {
                log::debug!("github registry without namespace settings");
                GithubConfig::default()
            })),
            other => return Err(ConfigError::UnknownRegistryType(other)),
        })
    }
}
