use std::collections::HashSet;

/// One image as listed by the container engine
///
/// Only the fields needed for building image suggestions are kept; everything
/// else in the engine's response is ignored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageSummary {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub repo_tags: Option<Vec<String>>,
}

/// Flatten the tags of every image into one list of references
///
/// Untagged placeholders like `<none>:<none>` are skipped, and each reference
/// appears once, at the position it was first seen.
pub fn unique_tags(images: &[ImageSummary]) -> Vec<String> {
    let mut seen = HashSet::new();
    images
        .iter()
        .filter_map(|image| image.repo_tags.as_ref())
        .flatten()
        .filter(|tag| !tag.contains("<none>"))
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}
