use std::borrow::Cow;
use std::env;
use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Route segment under which assets are surfaced to callers
pub const DEFAULT_ROUTE_PREFIX: &str = "serve_model";

// Characters to percent-encode in a route path ('/' stays literal between segments)
const ROUTE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'[')
    .add(b']');

/// Builds the public display route for an asset's dataset-relative path
///
/// # Examples
///
/// ```
/// use asset_search::utils::display_path;
///
/// assert_eq!(display_path("serve_model", "glbs/000-001/a1.glb"), "/serve_model/glbs/000-001/a1.glb");
/// assert_eq!(display_path("serve_model", "glbs/red chair.glb"), "/serve_model/glbs/red%20chair.glb");
/// ```
pub fn display_path(route_prefix: &str, local_path: &str) -> String {
    let prefix = route_prefix.trim_matches('/');
    let relative = local_path.trim_start_matches('/');
    format!("/{}/{}", prefix, utf8_percent_encode(relative, ROUTE_ENCODE_SET))
}

/// Recovers the dataset-relative path from a display route
///
/// The `/<route_prefix>/` prefix is stripped when present and the remainder is
/// percent-decoded. A bare relative path is accepted as-is.
///
/// # Errors
///
/// Returns an error if the decoded path is empty, absolute, or contains `..` components.
pub fn relative_asset_path(route_prefix: &str, display: &str) -> Result<PathBuf> {
    let prefix = format!("/{}/", route_prefix.trim_matches('/'));
    let stripped = display.strip_prefix(&prefix).unwrap_or(display);

    let decoded = percent_decode_str(stripped).decode_utf8_lossy();
    let decoded_str = match decoded {
        Cow::Borrowed(s) => s,
        Cow::Owned(ref s) => s.as_str(),
    };

    let relative = PathBuf::from(decoded_str);
    validate_relative_path(&relative)?;
    Ok(relative)
}

/// Resolves a display route to a file under the dataset root
///
/// # Errors
///
/// Same as [`relative_asset_path`].
pub fn resolve_asset_path(dataset_root: &Path, route_prefix: &str, display: &str) -> Result<PathBuf> {
    Ok(dataset_root.join(relative_asset_path(route_prefix, display)?))
}

/// Validates that a path stays inside whatever directory it is joined onto
///
/// # Errors
///
/// Returns an error if:
/// - The path is empty
/// - The path is absolute or has a root/prefix component
/// - The path contains '..' components (path traversal)
pub fn validate_relative_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("Asset path is empty");
    }

    for component in path.components() {
        match component {
            Component::ParentDir => bail!("Path contains '..' component: {}", path.display()),
            Component::RootDir | Component::Prefix(_) => {
                bail!("Path must be relative to the dataset root: {}", path.display())
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    path_str.into_owned()
}
