use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::schema::Config;

const HEADER: &str = "\
# Pellegrino ESG dashboard preferences.
# Rating thresholds are fixed and cannot be configured here.
#
# theme: auto | dark | light
# palette colours are \"#RRGGBB\"
";

/// Write the template config to `path`.
///
/// Refuses to replace an existing file unless `force` is set. Parent
/// directories are created as needed and the write is atomic.
pub fn write_default_config(path: &Path, force: bool) -> Result<PathBuf> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Pass --force to overwrite.",
            path.display()
        );
    }

    let yaml = serde_saphyr::to_string(&Config::template())
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes())
        .and_then(|_| file.write_all(yaml.as_bytes()))
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote default config");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::env;

    #[test]
    fn test_write_then_load_roundtrip() {
        let path = env::temp_dir()
            .join("pellegrino_esg_test_init")
            .join("config.yaml");
        let _ = std::fs::remove_file(&path);

        write_default_config(&path, false).unwrap();
        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded, Config::template());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_refuses_overwrite_without_force() {
        let path = env::temp_dir().join("pellegrino_esg_test_init_existing.yaml");
        std::fs::write(&path, "theme: dark\n").unwrap();

        let err = write_default_config(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "theme: dark\n");

        write_default_config(&path, true).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Pellegrino ESG"));

        let _ = std::fs::remove_file(&path);
    }
}
