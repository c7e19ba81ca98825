//! Content files in the wild use both `id`/`slug` and `name`/`title` for the
//! same thing, sometimes side by side. Types read them into separate
//! optional fields and settle on one here.

/// The primary value, else the secondary; an error naming both keys when
/// neither is present.
pub(crate) fn either_key(
    primary: Option<String>,
    secondary: Option<String>,
    keys: (&str, &str),
) -> Result<String, String> {
    primary
        .or(secondary)
        .ok_or_else(|| format!("missing field `{}` (or `{}`)", keys.0, keys.1))
}
