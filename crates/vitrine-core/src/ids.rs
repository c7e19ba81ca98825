//! Identifier utilities.
//!
//! Records are identified by kebab-case slugs (`risc-zero`, `ecdsa-verify`).
//! The same slug shows up in three shapes: as typed by an editor, as the
//! detail-page URL segment, and as the underscore form embedded in telemetry
//! filenames.

/// Lowercase kebab-case form of an id typed by an editor or taken from a
/// file name. Whitespace and underscores both separate words.
///
/// ```
/// use vitrine_core::ids::normalize_id;
///
/// assert_eq!(normalize_id("Risc Zero"), "risc-zero");
/// assert_eq!(normalize_id("ecdsa_verify"), "ecdsa-verify");
/// assert_eq!(normalize_id("  Mixed   Case  "), "mixed-case");
/// ```
pub fn normalize_id(id: &str) -> String {
    id.split(|c: char| c.is_whitespace() || c == '_')
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Map an id's hyphens to underscores, as used in telemetry filenames.
///
/// ```
/// use vitrine_core::ids::underscore_id;
///
/// assert_eq!(underscore_id("ecdsa-verify"), "ecdsa_verify");
/// assert_eq!(underscore_id("fibonacci"), "fibonacci");
/// ```
pub fn underscore_id(id: &str) -> String {
    id.replace('-', "_")
}

/// Build the detail-page path for a record: `/<section>/<id>`.
///
/// Surrounding slashes on either part are ignored.
///
/// ```
/// use vitrine_core::ids::detail_path;
///
/// assert_eq!(detail_path("zkvms", "sp1"), "/zkvms/sp1");
/// assert_eq!(detail_path("/blog/", "hello-world"), "/blog/hello-world");
/// ```
pub fn detail_path(section: &str, id: &str) -> String {
    format!(
        "/{}/{}",
        section.trim_matches('/'),
        id.trim_matches('/')
    )
}
