// ============================================================
// Layer 6 — Config Store
// ============================================================
// Saves and loads a BenchConfig as pretty-printed JSON so a
// sweep can be reproduced exactly or tweaked by hand:
//
//   neural-operator-bench init-config --path bench.json
//   $EDITOR bench.json
//   neural-operator-bench run --config bench.json
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use std::{fs, path::PathBuf};

use crate::application::bench_use_case::BenchConfig;

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Write the config as JSON.
    /// Fails if the file exists and `overwrite` is false.
    pub fn save(&self, cfg: &BenchConfig, overwrite: bool) -> Result<()> {
        if self.path.exists() && !overwrite {
            bail!(
                "'{}' already exists (use --force to overwrite)",
                self.path.display()
            );
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write config to '{}'", self.path.display()))?;

        tracing::debug!("Saved benchmark config to '{}'", self.path.display());
        Ok(())
    }

    /// Read a config back from JSON. Missing fields fall back to defaults.
    pub fn load(&self) -> Result<BenchConfig> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read config from '{}'", self.path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Invalid benchmark config in '{}'", self.path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::operator::BackendKind;
    use std::path::Path;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("neural-operator-bench-{}", std::process::id()))
            .join(name)
    }

    /// Remove a scratch file, and its directory once no other test uses it.
    fn clean_up(path: &Path) {
        let _ = fs::remove_file(path);
        if let Some(dir) = path.parent() {
            // Fails while sibling tests still have files there
            let _ = fs::remove_dir(dir);
        }
    }

    #[test]
    fn test_save_then_load_preserves_settings() {
        let store = ConfigStore::new(scratch_path("roundtrip.json"));
        let mut cfg = BenchConfig::default();
        cfg.backend      = BackendKind::Wgpu;
        cfg.layer_counts = vec![2, 4];
        cfg.fno.n_modes  = 8;

        store.save(&cfg, true).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.backend, BackendKind::Wgpu);
        assert_eq!(loaded.layer_counts, vec![2, 4]);
        assert_eq!(loaded.fno.n_modes, 8);
        assert_eq!(loaded.deeponet.iterations, cfg.deeponet.iterations);
        clean_up(store.path());
    }

    #[test]
    fn test_refuses_to_overwrite_without_flag() {
        let store = ConfigStore::new(scratch_path("existing.json"));
        store.save(&BenchConfig::default(), true).unwrap();
        assert!(store.save(&BenchConfig::default(), false).is_err());
        clean_up(store.path());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = scratch_path("partial.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "layer_counts": [3] }"#).unwrap();

        let cfg = ConfigStore::new(&path).load().unwrap();
        assert_eq!(cfg.layer_counts, vec![3]);
        assert_eq!(cfg.fno.iterations, BenchConfig::default().fno.iterations);
        clean_up(&path);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let store = ConfigStore::new(scratch_path("does-not-exist.json"));
        assert!(store.load().is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_clean_up_removes_scratch_file() {
        let store = ConfigStore::new(scratch_path("cleanup.json"));
        store.save(&BenchConfig::default(), true).unwrap();
        clean_up(store.path());
        assert!(!store.path().exists());
    }
}
