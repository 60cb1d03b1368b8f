//! Pipeline actions over an app project's `common.gradle`.
//!
//! Each action locates the build file inside the project dir, reads the
//! current value and, for the mutating actions, writes the new one back.
//! Values handed to later pipeline steps go into a caller-owned
//! [`PipelineState`] instead of any process-wide context.

use crate::error::VersioningError;
use crate::gradle::{self, locator};
use crate::version::{self, BumpType};
use anyhow::Result;
use log::{debug, info, warn};
use std::path::Path;

pub const VERSION_CODE_KEY: &str = "versionCode";
pub const VERSION_NAME_KEY: &str = "versionName";

pub const VERSION_CODE_OUTPUT: &str = "VERSION_CODE";
pub const VERSION_NAME_OUTPUT: &str = "VERSION_NAME";

/// Results published by the increment actions for downstream steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineState {
    pub version_code: Option<String>,
    pub version_name: Option<String>,
}

impl PipelineState {
    /// `(name, value)` pairs for every output that has been set.
    pub fn outputs(&self) -> Vec<(&'static str, &str)> {
        let mut outputs = vec![];
        if let Some(code) = &self.version_code {
            outputs.push((VERSION_CODE_OUTPUT, code.as_str()));
        }
        if let Some(name) = &self.version_name {
            outputs.push((VERSION_NAME_OUTPUT, name.as_str()));
        }
        outputs
    }
}

fn require_key(key: &str) -> Result<(), VersioningError> {
    if key.is_empty() {
        return Err(VersioningError::Configuration("The property key must not be empty".to_string()));
    }
    Ok(())
}

/// Value of `key`, or an empty string when the key or the build file is absent.
pub fn get_value(project_dir: impl AsRef<Path>, key: &str) -> Result<String> {
    require_key(key)?;
    let Some(path) = locator::locate(project_dir) else {
        return Ok(String::new());
    };
    Ok(gradle::find_value(&path, key)?.unwrap_or_default())
}

/// Sets `key` to `value`. Does nothing when there is no build file.
pub fn set_value(project_dir: impl AsRef<Path>, key: &str, value: &str) -> Result<()> {
    require_key(key)?;
    let project_dir = project_dir.as_ref();
    match locator::locate(project_dir) {
        Some(path) => gradle::set_value(&path, key, value),
        None => {
            debug!("No build file in '{}', skipping {}", project_dir.display(), key);
            Ok(())
        }
    }
}

pub fn get_version_code(project_dir: impl AsRef<Path>) -> Result<String> {
    get_value(project_dir, VERSION_CODE_KEY)
}

pub fn get_version_name(project_dir: impl AsRef<Path>) -> Result<String> {
    get_value(project_dir, VERSION_NAME_KEY)
}

/// Bumps `versionCode` by one, or sets it to `explicit`.
pub fn increment_version_code(
    project_dir: impl AsRef<Path>,
    explicit: Option<u64>,
    state: &mut PipelineState,
) -> Result<String> {
    let project_dir = project_dir.as_ref();
    let current = get_version_code(project_dir)?;
    if current.is_empty() && explicit.is_none() {
        warn!("No current version code found in '{}'", project_dir.display());
    }

    let next = version::next_version_code(&current, explicit)?.to_string();
    info!("Incrementing version code from {:?} -> {}", current, next);
    set_value(project_dir, VERSION_CODE_KEY, &next)?;

    state.version_code = Some(next.clone());
    Ok(next)
}

/// Bumps `versionName` by `bump`, or sets it to a non-empty `explicit`.
pub fn increment_version_name(
    project_dir: impl AsRef<Path>,
    bump: BumpType,
    explicit: Option<&str>,
    state: &mut PipelineState,
) -> Result<String> {
    let project_dir = project_dir.as_ref();
    let current = get_version_name(project_dir)?;

    let next = version::next_version_name(&current, bump, explicit)?;
    info!("Incrementing version name ({}) from {:?} -> {}", bump, current, next);
    set_value(project_dir, VERSION_NAME_KEY, &next)?;

    state.version_name = Some(next.clone());
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outputs_empty_by_default() {
        assert!(PipelineState::default().outputs().is_empty());
    }

    #[test]
    fn test_outputs_order() {
        let state = PipelineState {
            version_code: Some("12".to_string()),
            version_name: Some("1.4.0".to_string()),
        };
        assert_eq!(
            state.outputs(),
            vec![(VERSION_CODE_OUTPUT, "12"), (VERSION_NAME_OUTPUT, "1.4.0")]
        );
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let err = get_value("android/app", "").unwrap_err();
        assert_eq!(
            err.downcast_ref::<VersioningError>(),
            Some(&VersioningError::Configuration(
                "The property key must not be empty".to_string()
            ))
        );
    }
}
