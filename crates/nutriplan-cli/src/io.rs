//! Input and output paths where `-` means stdin or stdout.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn is_std_stream(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read a UTF-8 file, or stdin for `-`.
pub async fn read_input(path: &Path) -> Result<String> {
    if is_std_stream(path) {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

/// Write to a file, or stdout for `None` and `-`.
pub async fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) if !is_std_stream(path) => tokio::fs::write(path, bytes)
            .await
            .with_context(|| format!("failed to write {}", path.display())),
        _ => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(bytes).await?;
            stdout.flush().await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.txt");
        write_output(Some(&path), "الغداء سمك".as_bytes()).await.unwrap();
        assert_eq!(read_input(&path).await.unwrap(), "الغداء سمك");
    }

    #[tokio::test]
    async fn test_missing_input_names_the_file() {
        let err = read_input(Path::new("/nonexistent/plan.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/plan.txt"));
    }

    #[test]
    fn test_dash_is_std_stream() {
        assert!(is_std_stream(Path::new("-")));
        assert!(!is_std_stream(Path::new("-.txt")));
    }
}
