//! etcd command line construction

use super::flags::{self, FlagSet};
use etcdpod_common::{constants, ClusterConfiguration, Error, Result};
use std::path::{Component, Path};

/// Effective flag set for the local etcd member: defaults plus ExtraArgs
pub fn etcd_flags(cfg: &ClusterConfiguration) -> Result<FlagSet> {
    let local = cfg.local_etcd()?;

    if local.data_dir.is_empty() {
        return Err(Error::InvalidConfig(
            "etcd.local.dataDir must not be empty".to_string(),
        ));
    }

    let defaults = flags::default_flags(&local.data_dir);

    for key in flags::unrecognized_overrides(&defaults, &local.extra_args) {
        tracing::warn!(flag = key, "Ignoring etcd extra arg with no matching default flag");
    }

    let merged = flags::merge_flags(&defaults, &local.extra_args);
    check_mounted_paths(&merged)?;

    Ok(merged)
}

/// Reject flag values the pod volumes cannot satisfy.
///
/// `--data-dir` becomes a container mount path and must be absolute; the
/// certificate flags must stay inside the read-only certificates mount.
fn check_mounted_paths(flags: &[(String, String)]) -> Result<()> {
    let data_dir = flags::flag_value(flags, "data-dir").unwrap_or_default();
    if data_dir.is_empty() || !Path::new(data_dir).is_absolute() {
        return Err(Error::InvalidConfig(format!(
            "--data-dir must be an absolute path, got '{}'",
            data_dir
        )));
    }

    for name in flags::CERTIFICATE_FLAGS {
        let value = flags::flag_value(flags, name).unwrap_or_default();
        if !is_under_certs_dir(value) {
            return Err(Error::InvalidConfig(format!(
                "--{} must point inside {}, got '{}'",
                name,
                constants::ETCD_CERTS_DIR,
                value
            )));
        }
    }

    Ok(())
}

fn is_under_certs_dir(value: &str) -> bool {
    let path = Path::new(value);
    path.starts_with(constants::ETCD_CERTS_DIR)
        && path != Path::new(constants::ETCD_CERTS_DIR)
        && !path.components().any(|c| c == Component::ParentDir)
}

/// Argument vector for an already merged flag set, executable first
pub fn command_from_flags(flags: &[(String, String)]) -> Vec<String> {
    let mut command = Vec::with_capacity(flags.len() + 1);
    command.push(constants::ETCD.to_string());
    command.extend(flags::to_args(flags));
    command
}

/// Full argument vector for the etcd container, executable first
pub fn etcd_command(cfg: &ClusterConfiguration) -> Result<Vec<String>> {
    let command = command_from_flags(&etcd_flags(cfg)?);

    tracing::debug!(args = command.len(), "Built etcd command");

    Ok(command)
}
