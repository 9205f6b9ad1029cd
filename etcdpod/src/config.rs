//! Cluster configuration loading
//!
//! Settings come from, in increasing priority:
//! 1. Defaults on `ClusterConfiguration`
//! 2. Configuration file (YAML)
//! 3. Environment variables

use etcdpod_common::{ClusterConfiguration, Error, LocalEtcd, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a specific file path
pub fn load_from_file(path: &Path) -> Result<ClusterConfiguration> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| Error::ConfigFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Find a configuration file in the standard locations
pub fn find_config_file() -> Option<PathBuf> {
    let paths = [
        // Environment variable override
        std::env::var("ETCDPOD_CONFIG").ok().map(PathBuf::from),
        // Standard locations
        Some(PathBuf::from("/etc/etcdpod/config.yaml")),
        Some(PathBuf::from("./etcdpod.yaml")),
    ];

    paths.into_iter().flatten().find(|p| p.exists())
}

/// Load the configuration from `path`, or the first standard location found,
/// then apply environment overrides and validate.
pub fn load(path: Option<&Path>) -> Result<ClusterConfiguration> {
    let mut config = match path.map(Path::to_path_buf).or_else(find_config_file) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            load_from_file(&path)?
        }
        None => ClusterConfiguration::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config.validate()?;

    Ok(config)
}

/// Apply `ETCDPOD_*` overrides read through `lookup`
pub fn apply_env_overrides<F>(config: &mut ClusterConfiguration, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(version) = lookup("ETCDPOD_KUBERNETES_VERSION") {
        config.kubernetes_version = version;
    }
    if let Some(repository) = lookup("ETCDPOD_IMAGE_REPOSITORY") {
        config.image_repository = repository;
    }

    let data_dir = lookup("ETCDPOD_ETCD_DATA_DIR");
    let image = lookup("ETCDPOD_ETCD_IMAGE");
    if data_dir.is_none() && image.is_none() {
        return;
    }

    let local = config.etcd.local.get_or_insert_with(LocalEtcd::default);
    if let Some(data_dir) = data_dir {
        local.data_dir = data_dir;
    }
    if let Some(image) = image {
        local.image = image;
    }
}
