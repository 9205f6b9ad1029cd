//! Static pod manifest files
//!
//! Manifests are written to a temporary file in the target directory and
//! renamed into place, so the kubelet never observes a partial file.

use crate::etcd;
use etcdpod_common::{constants, ClusterConfiguration, Error, Result};
use k8s_openapi::api::core::v1::Pod;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Path of the manifest for `component` inside `manifest_dir`
pub fn manifest_path(manifest_dir: &Path, component: &str) -> PathBuf {
    manifest_dir.join(format!("{}.yaml", component))
}

/// Write `pod` as `<manifest_dir>/<component>.yaml`, replacing any existing file
pub fn write_static_pod_manifest(component: &str, manifest_dir: &Path, pod: &Pod) -> Result<PathBuf> {
    std::fs::create_dir_all(manifest_dir).map_err(|e| Error::io(manifest_dir, e))?;

    let serialized = serde_yaml::to_string(pod)
        .map_err(|e| Error::Serialization(format!("Failed to encode {} manifest: {}", component, e)))?;

    let path = manifest_path(manifest_dir, component);

    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{}.", component))
        .suffix(".tmp")
        .tempfile_in(manifest_dir)
        .map_err(|e| Error::io(manifest_dir, e))?;

    tmp.write_all(serialized.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| Error::io(tmp.path(), e))?;

    tmp.persist(&path).map_err(|e| Error::io(&path, e.error))?;

    tracing::info!(component, path = %path.display(), "Wrote static pod manifest");

    Ok(path)
}

/// Assemble the local etcd pod for `cfg` and write it into `manifest_dir`
pub fn create_local_etcd_static_pod_manifest_file(
    manifest_dir: &Path,
    cfg: &ClusterConfiguration,
) -> Result<PathBuf> {
    let pod = etcd::etcd_pod_spec(cfg)?;
    write_static_pod_manifest(constants::ETCD, manifest_dir, &pod)
}
