//! `${NAME}` interpolation inside secret file paths.

use super::SecretError;

/// Replace every `${NAME}` marker in `path` using `lookup`.
///
/// Fails on the first marker whose variable is unknown, or when a marker is
/// unterminated or empty. Text outside markers (including a lone `$`) is kept
/// as-is.
pub fn interpolate_with<F>(path: &str, label: &str, lookup: F) -> Result<String, SecretError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut resolved = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(start) = rest.find("${") {
        resolved.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err(SecretError::MalformedInterpolation {
                label: label.to_string(),
                path: path.to_string(),
            });
        };

        let name = &after[..end];
        if name.is_empty() {
            return Err(SecretError::MalformedInterpolation {
                label: label.to_string(),
                path: path.to_string(),
            });
        }

        let value = lookup(name).ok_or_else(|| SecretError::MissingInterpolationVariable {
            variable: name.to_string(),
            label: label.to_string(),
        })?;
        resolved.push_str(&value);
        rest = &after[end + 1..];
    }

    resolved.push_str(rest);
    Ok(resolved)
}

/// [`interpolate_with`] against the process environment.
pub fn interpolate_env(path: &str, label: &str) -> Result<String, SecretError> {
    interpolate_with(path, label, |name| std::env::var(name).ok())
}
