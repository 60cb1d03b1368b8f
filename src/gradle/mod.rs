//! Line-oriented access to `key value` assignments in a Gradle build file.
//!
//! A line belongs to `key` when it contains `"<key> "`, so `versionCode 3`
//! matches `versionCode` but not `version`. Only the first matching line is
//! ever read or rewritten. This is a substring match, not a Groovy parser:
//! a comment or string mentioning `"<key> "` earlier in the file wins too.

use anyhow::{Context, Result};
use log::debug;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub mod locator;

/// Returns the value of the first line assigning `key`, with every `"` and
/// `'` removed. A missing file reads as `None`, same as a missing key.
///
/// Lines are matched as raw bytes, so text that is not valid UTF-8 elsewhere
/// in the file does not get in the way.
pub fn find_value(path: impl AsRef<Path>, key: &str) -> Result<Option<String>> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("'{}' does not exist, nothing to scan", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to open '{}'", path.display()));
        }
    };

    let needle = key_needle(key);
    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        if read == 0 {
            break;
        }
        if !contains(&line, &needle) {
            continue;
        }
        let value = last_token(&line).map(unquote).unwrap_or_default();
        debug!("Found {} = {} in '{}'", key, value, path.display());
        return Ok(Some(value));
    }

    debug!("No '{}' assignment in '{}'", key, path.display());
    Ok(None)
}

/// Rewrites the value of the first line assigning `key` and atomically
/// replaces `path` with the result.
///
/// The whole trailing token (quotes included) is replaced by `value`, so a
/// quoted value comes back unquoted. Every other line, including its line
/// ending, is copied byte for byte. When no line matches, the file is
/// rewritten unchanged. The new content is staged in a temporary file next to
/// `path` and renamed over it, so readers see either the old or the new file.
pub fn set_value(path: impl AsRef<Path>, key: &str, value: &str) -> Result<()> {
    let path = path.as_ref();
    let source = File::open(path).with_context(|| format!("Failed to open '{}'", path.display()))?;
    let permissions = source.metadata()?.permissions();

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create a temporary file in '{}'", dir.display()))?;

    let needle = key_needle(key);
    let mut replaced = false;
    {
        let mut reader = BufReader::new(source);
        let mut writer = BufWriter::new(staged.as_file_mut());
        let mut line = Vec::new();
        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            if read == 0 {
                break;
            }
            if !replaced && contains(&line, &needle) {
                if let Some(updated) = replace_last_token(&line, value.as_bytes()) {
                    line = updated;
                }
                replaced = true;
                debug!("Set {} = {} in '{}'", key, value, path.display());
            }
            writer.write_all(&line)?;
        }
        writer.flush()?;
    }

    if !replaced {
        debug!("No '{}' assignment in '{}', content left as is", key, path.display());
    }

    staged.as_file().sync_all()?;
    fs::set_permissions(staged.path(), permissions)?;
    staged
        .persist(path)
        .with_context(|| format!("Failed to replace '{}'", path.display()))?;
    Ok(())
}

fn key_needle(key: &str) -> Vec<u8> {
    format!("{key} ").into_bytes()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn contains(line: &[u8], needle: &[u8]) -> bool {
    find(line, needle).is_some()
}

fn last_token(line: &[u8]) -> Option<&[u8]> {
    line.split(u8::is_ascii_whitespace).filter(|token| !token.is_empty()).last()
}

fn unquote(token: &[u8]) -> String {
    String::from_utf8_lossy(token).replace(['"', '\''], "")
}

/// `line` with the first occurrence of its last token replaced by `value`.
fn replace_last_token(line: &[u8], value: &[u8]) -> Option<Vec<u8>> {
    let token = last_token(line)?;
    let start = find(line, token)?;
    let mut updated = Vec::with_capacity(line.len() - token.len() + value.len());
    updated.extend_from_slice(&line[..start]);
    updated.extend_from_slice(value);
    updated.extend_from_slice(&line[start + token.len()..]);
    Some(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_build_file(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("common.gradle");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_unquote_removes_every_quote() {
        assert_eq!(unquote(b"\"1.2.3\""), "1.2.3");
        assert_eq!(unquote(b"'1.2.3'"), "1.2.3");
        assert_eq!(unquote(b"\"it's\""), "its");
        assert_eq!(unquote(b"42"), "42");
    }

    #[test]
    fn test_last_token() {
        assert_eq!(last_token(b"    versionCode 42\n"), Some(&b"42"[..]));
        assert_eq!(last_token(b"\tversionName \"1.0.0\"\r\n"), Some(&b"\"1.0.0\""[..]));
        assert_eq!(last_token(b"   "), None);
    }

    #[test]
    fn test_replace_last_token() {
        assert_eq!(
            replace_last_token(b"    versionName \"1.2.3\"\r\n", b"1.2.4"),
            Some(b"    versionName 1.2.4\r\n".to_vec())
        );
        assert_eq!(replace_last_token(b"\n", b"1"), None);
    }

    #[test]
    fn test_find_value_first_match_wins() {
        let dir = TempDir::new().unwrap();
        let path = write_build_file(&dir, "    versionCode 42\n    versionCode 99\n");
        assert_eq!(find_value(&path, "versionCode").unwrap(), Some("42".to_string()));
    }

    #[test]
    fn test_find_value_requires_trailing_space() {
        let dir = TempDir::new().unwrap();
        let path = write_build_file(&dir, "    versionCode 42\n    version \"9.9.9\"\n");
        assert_eq!(find_value(&path, "version").unwrap(), Some("9.9.9".to_string()));
    }

    #[test]
    fn test_find_value_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("common.gradle");
        assert_eq!(find_value(&path, "versionCode").unwrap(), None);
    }

    #[test]
    fn test_set_value_drops_quotes() {
        let dir = TempDir::new().unwrap();
        let path = write_build_file(&dir, "android {\n    versionCode \"3\"\n}\n");

        set_value(&path, "versionCode", "7").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "android {\n    versionCode 7\n}\n");
    }

    #[test]
    fn test_set_value_keeps_crlf_and_missing_final_newline() {
        let dir = TempDir::new().unwrap();
        let path = write_build_file(&dir, "a 1\r\n    versionCode 3\r\nb 2");

        set_value(&path, "versionCode", "4").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "a 1\r\n    versionCode 4\r\nb 2");
    }

    #[test]
    fn test_non_utf8_lines_are_opaque() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("common.gradle");
        fs::write(&path, b"// caf\xe9\n    versionCode 3\n// na\xefve\n").unwrap();

        assert_eq!(find_value(&path, "versionCode").unwrap(), Some("3".to_string()));

        set_value(&path, "versionCode", "4").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"// caf\xe9\n    versionCode 4\n// na\xefve\n");
    }

    #[test]
    fn test_set_value_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("common.gradle");
        assert!(set_value(&path, "versionCode", "1").is_err());
    }
}
