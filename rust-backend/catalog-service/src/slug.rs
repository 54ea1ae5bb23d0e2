/// Derive a URL slug from a display name.
///
/// Lowercases, turns each run of whitespace into one `-`, then drops every
/// character outside `[A-Za-z0-9_-]`. Used wherever a record has no stored
/// slug, so the same name always links to the same path.
pub fn derive_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.to_lowercase().chars() {
        if c.is_whitespace() || c == '\u{feff}' {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            slug.push(c);
        }
    }

    slug
}
