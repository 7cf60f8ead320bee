//! Path expansion and resolution.
//!
//! Configured paths may start with `~` and may reference environment
//! variables as `$VAR` or `${VAR}`. Relative paths are resolved against the
//! directory the consuming program runs from.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default base directory name under the user's home.
pub const DEFAULT_BASE_DIR: &str = ".vostrack";

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Errors raised while expanding a configured path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("environment variable '{0}' is not set")]
    UnsetVariable(String),

    #[error("unterminated '${{' in '{0}'")]
    Unterminated(String),

    #[error("cannot determine the home directory")]
    NoHome,
}

/// Returns `~/.vostrack`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR))
}

/// Returns `~/.vostrack/config.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|dir| dir.join(DEFAULT_CONFIG_FILE))
}

/// Expands `~` and environment variables using the process environment.
pub fn expand(raw: &str) -> Result<String, PathError> {
    expand_with(raw, |name| std::env::var(name).ok())
}

/// Expands `~` and `$VAR`/`${VAR}` references using `lookup` for variables.
pub fn expand_with<F>(raw: &str, lookup: F) -> Result<String, PathError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    if rest == "~" || rest.starts_with("~/") {
        let home = dirs::home_dir().ok_or(PathError::NoHome)?;
        out.push_str(&home.to_string_lossy());
        rest = &rest[1..];
    }

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, tail) = if let Some(braced) = after.strip_prefix('{') {
            let end = braced
                .find('}')
                .ok_or_else(|| PathError::Unterminated(raw.to_string()))?;
            (&braced[..end], &braced[end + 1..])
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], &after[end..])
        };

        if name.is_empty() {
            // A lone '$' is kept literally.
            out.push('$');
        } else {
            let value = lookup(name).ok_or_else(|| PathError::UnsetVariable(name.to_string()))?;
            out.push_str(&value);
        }
        rest = tail;
    }
    out.push_str(rest);

    Ok(out)
}

/// Expands `raw` and joins it onto `base_dir` when relative.
pub fn resolve(raw: &Path, base_dir: &Path) -> Result<PathBuf, PathError> {
    let expanded = PathBuf::from(expand(&raw.to_string_lossy())?);
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base_dir.join(expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(name: &str) -> Option<String> {
        match name {
            "DATA" => Some("/mnt/data".to_string()),
            "USER_DIR" => Some("alice".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_expand_plain() {
        assert_eq!(expand_with("release/model/joint/", env).unwrap(), "release/model/joint/");
    }

    #[test]
    fn test_expand_variables() {
        assert_eq!(expand_with("$DATA/davis", env).unwrap(), "/mnt/data/davis");
        assert_eq!(expand_with("${DATA}/davis", env).unwrap(), "/mnt/data/davis");
        assert_eq!(
            expand_with("/home/${USER_DIR}_x/$DATA", env).unwrap(),
            "/home/alice_x//mnt/data"
        );
        assert_eq!(expand_with("cost$", env).unwrap(), "cost$");
    }

    #[test]
    fn test_expand_errors() {
        assert_eq!(
            expand_with("$MISSING/x", env),
            Err(PathError::UnsetVariable("MISSING".to_string()))
        );
        assert!(matches!(
            expand_with("${DATA/x", env),
            Err(PathError::Unterminated(_))
        ));
    }

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        let expanded = expand_with("~/fbms", env).unwrap();
        assert_eq!(PathBuf::from(expanded), home.join("fbms"));
        assert_eq!(expand_with("a~b", env).unwrap(), "a~b");
    }

    #[test]
    fn test_resolve() {
        let base = Path::new("/work");
        assert_eq!(
            resolve(Path::new("release/outputs"), base).unwrap(),
            PathBuf::from("/work/release/outputs")
        );
        assert_eq!(
            resolve(Path::new("/data/davis"), base).unwrap(),
            PathBuf::from("/data/davis")
        );
    }

    #[test]
    fn test_default_paths() {
        let path = default_config_path().unwrap();
        assert!(path.ends_with(".vostrack/config.yaml"));
    }
}
