use crate::error::VersioningError;
use clap::ValueEnum;
use regex::Regex;
use semver::Version;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// Shape gate only. `.` is unescaped, so any separator passes here; the
// components themselves are split on a literal `.`.
static VERSION_NAME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+.\d+.\d+").expect("hardcoded regex must compile"));

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Default)]
pub enum BumpType {
    #[default]
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpType::Patch => "patch",
            BumpType::Minor => "minor",
            BumpType::Major => "major",
        };
        f.write_str(name)
    }
}

impl FromStr for BumpType {
    type Err = VersioningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patch" => Ok(BumpType::Patch),
            "minor" => Ok(BumpType::Minor),
            "major" => Ok(BumpType::Major),
            _ => Err(VersioningError::Configuration(
                "Available values are 'patch', 'minor' and 'major'".to_string(),
            )),
        }
    }
}

/// Parses `current` as exactly three `.`-separated integers.
pub fn parse_version_name(current: &str) -> Result<Version, VersioningError> {
    let format_error = || VersioningError::Format { value: current.to_string() };
    if !VERSION_NAME_SHAPE.is_match(current) {
        return Err(format_error());
    }

    let components = current
        .split('.')
        .map(|component| component.parse::<u64>().map_err(|_| format_error()))
        .collect::<Result<Vec<u64>, VersioningError>>()?;
    match components[..] {
        [major, minor, patch] => Ok(Version::new(major, minor, patch)),
        _ => Err(format_error()),
    }
}

/// Next version name for `bump`. A non-empty `explicit` is returned as is.
pub fn next_version_name(
    current: &str,
    bump: BumpType,
    explicit: Option<&str>,
) -> Result<String, VersioningError> {
    if let Some(explicit) = explicit.filter(|v| !v.is_empty()) {
        return Ok(explicit.to_string());
    }

    let mut version = parse_version_name(current)?;
    match bump {
        BumpType::Patch => {
            version.patch += 1;
        }
        BumpType::Minor => {
            version.minor += 1;
            version.patch = 0;
        }
        BumpType::Major => {
            version.major += 1;
            version.minor = 0;
            version.patch = 0;
        }
    }
    Ok(version.to_string())
}

/// Next version code. An empty `current` counts as 0.
pub fn next_version_code(current: &str, explicit: Option<u64>) -> Result<u64, VersioningError> {
    if let Some(explicit) = explicit {
        return Ok(explicit);
    }
    if current.is_empty() {
        return Ok(1);
    }
    let code = current
        .parse::<u64>()
        .map_err(|_| VersioningError::VersionCode { value: current.to_string() })?;
    Ok(code + 1)
}
