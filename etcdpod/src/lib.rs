//! etcdpod - static pod manifests for node-local etcd
//!
//! Computes the etcd command line and pod definition for a control-plane
//! node from the cluster configuration, and writes it where the kubelet
//! picks up static pods.
//!
//! - [`etcd::flags`] - default flags and ExtraArgs overlay
//! - [`etcd::command`] - etcd argument vector
//! - [`etcd::pod`] - pod assembly
//! - [`manifest`] - manifest file writing

pub mod config;
pub mod etcd;
pub mod logging;
pub mod manifest;
pub mod output;

pub use etcdpod_common::{constants, ClusterConfiguration, Error, Result};
pub use manifest::create_local_etcd_static_pod_manifest_file;
