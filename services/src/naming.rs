//! File naming for published code.
//!
//! Titles become file names by lowercasing and replacing everything outside `[a-z0-9]`
//! with `_`. The mapping is deterministic and not injective: distinct titles can collide,
//! which the publisher resolves with numeric suffixes.

/// Maximum length of an extension, not counting the dot.
const MAX_EXTENSION_LEN: usize = 10;

/// Longest accepted title, in characters. Each character sanitizes to one byte, so a
/// numbered file name stays under the 255-byte limit on a path segment.
pub const MAX_TITLE_CHARS: usize = 200;

/// Lowercases `title` and replaces every character outside `[a-z0-9]` with `_`.
///
/// Multi-byte characters become a single `_` each.
pub fn sanitize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn dotted(extension: &str) -> String {
    if extension.starts_with('.') {
        extension.to_owned()
    } else {
        format!(".{extension}")
    }
}

/// Derives the file name for `title`, e.g. `("Hello, World!", "py")` gives `hello__world_.py`.
pub fn compute_file_name(title: &str, extension: &str) -> String {
    format!("{}{}", sanitize_title(title), dotted(extension))
}

/// The `n`th collision candidate: `n == 0` is the plain name, otherwise `_n` is inserted
/// before the extension.
pub fn numbered_file_name(title: &str, extension: &str, n: u32) -> String {
    if n == 0 {
        compute_file_name(title, extension)
    } else {
        format!("{}_{n}{}", sanitize_title(title), dotted(extension))
    }
}

/// Normalizes a user-supplied extension to a leading-dot form such as `.cpp`.
///
/// Returns `None` when the extension is empty or contains anything other than ASCII
/// letters and digits.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let bare = raw.trim().trim_start_matches('.');
    if bare.is_empty()
        || bare.len() > MAX_EXTENSION_LEN
        || !bare.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(format!(".{}", bare.to_ascii_lowercase()))
}

/// Folder that holds a subject's published files: `{root}/{semester}/{subject}/`.
///
/// `/` and `\` inside the semester or subject name are replaced, and names made only of
/// dots (`.`, `..`) become underscores, so the folder depth stays fixed.
pub fn folder_path(root: &str, semester: &str, subject_name: &str) -> String {
    let root = root.trim().trim_matches('/');

    if root.is_empty() {
        format!("{}/{}/", folder_segment(semester), folder_segment(subject_name))
    } else {
        format!("{root}/{}/{}/", folder_segment(semester), folder_segment(subject_name))
    }
}

fn folder_segment(name: &str) -> String {
    let name = name.trim().replace(['/', '\\'], "_");
    if name.chars().all(|c| c == '.') {
        "_".repeat(name.len().max(1))
    } else {
        name
    }
}
