use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::Path;

/// Write `content` to `path` atomically.
///
/// Missing parent directories are created first. The bytes go to a temporary
/// file in the target directory which is then renamed over `path`, so readers
/// see either the previous report or the complete new one.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file.flush()?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Serialize `value` as pretty JSON and write it atomically.
pub fn write_json_atomic<T: serde::Serialize>(
    path: &Path,
    value: &T,
) -> Result<(), InfrastructureError> {
    let mut body = serde_json::to_vec_pretty(value).map_err(|source| {
        InfrastructureError::JsonError {
            path: path.to_path_buf(),
            source,
        }
    })?;
    body.push(b'\n');
    atomic_write(path, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_parent_dirs() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("target").join("nested").join("out.json");

        atomic_write(&file_path, "{}")?;

        assert_eq!(fs::read_to_string(file_path)?, "{}");
        Ok(())
    }

    #[test]
    fn test_atomic_write_replaces_previous_report() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("quality_results.json");

        atomic_write(&file_path, "first run")?;
        atomic_write(&file_path, "second run")?;

        assert_eq!(fs::read_to_string(&file_path)?, "second run");
        // No temp files left behind
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_write_json_is_pretty_and_newline_terminated() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("out.json");

        write_json_atomic(&file_path, &serde_json::json!({ "a": 1 }))?;

        let text = fs::read_to_string(&file_path)?;
        assert_eq!(text, "{\n  \"a\": 1\n}\n");
        Ok(())
    }
}
