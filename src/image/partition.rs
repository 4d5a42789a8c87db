use crate::registry::Registry;
use regex::Regex;
use std::collections::HashSet;

/// Images from the inventory that belong to a registry
///
/// Inventory entries aren't tagged with the registry they came from, so
/// membership is guessed: an image belongs to a registry if its reference
/// contains the registry's addressing prefix anywhere. This is deliberately
/// permissive. A prefix like `registry.io` also matches
/// `registry.io.mirror.net/app`.
///
/// With an addressable `target` (see [Registry::is_addressable]), the result
/// is every matching image with the prefix and one following slash removed,
/// so it can be entered after the prefix shown for that registry.
///
/// Otherwise the result is every image not matched by any addressable
/// registry in `registries` that also doesn't name a registry host of its
/// own, without duplicates.
///
/// Inventory order is preserved in both cases.
pub fn images_for_registry(
    images: &[String],
    registries: &[Registry],
    target: Option<&Registry>,
) -> Vec<String> {
    match target.filter(|registry| registry.is_addressable()) {
        Some(target) => {
            let prefix = target.url_prefix();
            log::debug!("images for registry {}, prefix {:?}", target, prefix);
            images
                .iter()
                .filter(|image| image.contains(&prefix))
                .map(|image| strip_registry_prefix(image, &prefix))
                .collect()
        }
        None => unregistered_images(images, registries),
    }
}

/// Does the first path segment of this image reference look like a host?
///
/// Follows the Docker heuristic: the reference has a slash, and the part
/// before it contains a dot or a colon or is `localhost`. This also catches
/// references with a URL scheme, like `https://host/app`.
pub fn contains_registry_host(image: &str) -> bool {
    lazy_static! {
        static ref HAS_REGISTRY: Regex = Regex::new(concat!(
            "^",
            "(?:", // alternatives group
            /* */ "[^/]*[.:][^/]*", // a dot or colon somewhere in the first segment
            /* */ "|localhost",     // special case for localhost
            ")",
            "/", // the slash is not optional here
        ))
        .unwrap();
    }
    HAS_REGISTRY.is_match(image)
}

fn unregistered_images(images: &[String], registries: &[Registry]) -> Vec<String> {
    let prefixes: Vec<String> = registries
        .iter()
        .filter(|registry| registry.is_addressable())
        .map(Registry::url_prefix)
        .collect();
    log::debug!("unregistered images, excluding prefixes {:?}", prefixes);

    let owned: HashSet<&str> = images
        .iter()
        .filter(|image| prefixes.iter().any(|prefix| image.contains(prefix.as_str())))
        .map(String::as_str)
        .collect();

    let mut seen = HashSet::new();
    images
        .iter()
        .filter(|image| !owned.contains(image.as_str()))
        .filter(|image| !contains_registry_host(image))
        .filter(|image| seen.insert(image.as_str()))
        .cloned()
        .collect()
}

/// Remove the first occurrence of `prefix`, plus a slash right after it
fn strip_registry_prefix(image: &str, prefix: &str) -> String {
    match image.find(prefix) {
        None => image.to_owned(),
        Some(pos) => {
            let rest = &image[pos + prefix.len()..];
            let rest = rest.strip_prefix('/').unwrap_or(rest);
            format!("{}{}", &image[..pos], rest)
        }
    }
}
