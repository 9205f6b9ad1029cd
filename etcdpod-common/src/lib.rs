//! Common types shared between the etcdpod library and its CLI

pub mod constants;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Cluster bootstrap configuration consumed by the control-plane phases
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfiguration {
    /// Target Kubernetes version (e.g. "v1.30.0")
    #[serde(default)]
    pub kubernetes_version: String,
    /// Registry prefix used for images that are not set explicitly
    #[serde(default = "default_image_repository")]
    pub image_repository: String,
    #[serde(default)]
    pub etcd: Etcd,
}

fn default_image_repository() -> String {
    constants::DEFAULT_IMAGE_REPOSITORY.to_string()
}

impl Default for ClusterConfiguration {
    fn default() -> Self {
        Self {
            kubernetes_version: String::new(),
            image_repository: default_image_repository(),
            etcd: Etcd::default(),
        }
    }
}

/// etcd topology for the cluster
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Etcd {
    /// Stacked etcd running as a static pod on the control-plane node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<LocalEtcd>,
}

/// Settings for a node-local etcd member
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocalEtcd {
    /// Host directory holding the etcd data
    pub data_dir: String,
    /// Image override; empty means derive from the Kubernetes version
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,
    /// Flag overrides keyed by flag name without the leading dashes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_args: BTreeMap<String, String>,
}

impl ClusterConfiguration {
    /// Configuration with a local etcd member rooted at `data_dir`
    pub fn with_local_etcd(kubernetes_version: &str, data_dir: &str) -> Self {
        Self {
            kubernetes_version: kubernetes_version.to_string(),
            etcd: Etcd {
                local: Some(LocalEtcd {
                    data_dir: data_dir.to_string(),
                    ..LocalEtcd::default()
                }),
            },
            ..Self::default()
        }
    }

    /// Local etcd settings, or a configuration error when absent
    pub fn local_etcd(&self) -> Result<&LocalEtcd> {
        self.etcd
            .local
            .as_ref()
            .ok_or_else(|| Error::InvalidConfig("etcd.local is not configured".to_string()))
    }

    /// Check the preconditions the etcd phase relies on
    pub fn validate(&self) -> Result<()> {
        let local = self.local_etcd()?;

        if local.data_dir.is_empty() {
            return Err(Error::InvalidConfig(
                "etcd.local.dataDir must not be empty".to_string(),
            ));
        }
        if !Path::new(&local.data_dir).is_absolute() {
            return Err(Error::InvalidConfig(format!(
                "etcd.local.dataDir must be an absolute path, got '{}'",
                local.data_dir
            )));
        }
        if local.image.is_empty() && self.kubernetes_version.is_empty() {
            return Err(Error::InvalidConfig(
                "kubernetesVersion is required when etcd.local.image is unset".to_string(),
            ));
        }

        Ok(())
    }
}

/// etcdpod error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read configuration file {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Attach a path to an IO error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
