//! Naming conventions inside an OCFL object.
//!
//! - A content directory is a single path segment: no `/`, not empty, and
//!   not `.` or `..`
//! - A content path is `v<digits>/<contentDirectory>/<rest>` with a
//!   non-empty `<rest>`
//! - An object id conventionally starts with a naming authority followed by
//!   `:`, e.g. `ark:/13030/tf5p30086k` or `info:example/1`

/// Returns `true` if `name` may be used as the `contentDirectory` of an
/// inventory.
///
/// # Examples
///
/// ```
/// use ocfl_types::naming::is_valid_content_directory;
///
/// assert!(is_valid_content_directory("content"));
/// assert!(!is_valid_content_directory("a/b"));
/// assert!(!is_valid_content_directory(".."));
/// ```
pub fn is_valid_content_directory(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && name != "." && name != ".."
}

/// Returns `true` if `path` names a file under the content directory of
/// some version directory.
pub fn is_content_path(path: &str, content_directory: &str) -> bool {
    let Some(rest) = path.strip_prefix('v') else {
        return false;
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return false;
    }
    rest[digits..]
        .strip_prefix('/')
        .and_then(|r| r.strip_prefix(content_directory))
        .and_then(|r| r.strip_prefix('/'))
        .is_some_and(|file| !file.is_empty())
}

/// Returns `true` if `id` has a `<authority>:<local id>` shape, where the
/// authority is made of word characters.
pub fn has_authority_prefix(id: &str) -> bool {
    match id.split_once(':') {
        Some((authority, local)) => {
            !authority.is_empty()
                && authority.chars().all(|c| c.is_alphanumeric() || c == '_')
                && local.chars().next().is_some_and(|c| c != '\n')
        }
        None => false,
    }
}
