use log::debug;
use std::path::{Path, PathBuf};

/// File holding the version assignments, relative to the app project dir.
pub const BUILD_FILE_NAME: &str = "common.gradle";

/// Application source folder of a conventional Android project layout.
pub const DEFAULT_APP_PROJECT_DIR: &str = "android/app";

/// Path of the build file inside `project_dir`. No existence check.
pub fn resolve_config_path(project_dir: impl AsRef<Path>) -> PathBuf {
    project_dir.as_ref().join(BUILD_FILE_NAME)
}

/// The build file inside `project_dir`, if it exists.
pub fn locate(project_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let path = resolve_config_path(project_dir);
    if !path.is_file() {
        debug!("No build file at '{}'", path.display());
        return None;
    }
    Some(path)
}
