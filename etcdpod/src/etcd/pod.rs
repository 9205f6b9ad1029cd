//! Static pod definition for a local etcd member

use super::command::{command_from_flags, etcd_flags};
use super::flags;
use etcdpod_common::{constants, ClusterConfiguration, Error, Result};
use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use std::collections::BTreeMap;

const CRITICAL_POD_ANNOTATION: &str = "scheduler.alpha.kubernetes.io/critical-pod";
const SYSTEM_NODE_CRITICAL: &str = "system-node-critical";
const HOST_PATH_DIRECTORY_OR_CREATE: &str = "DirectoryOrCreate";

/// Image for the etcd container.
///
/// An explicit image is used verbatim, otherwise the image is derived from
/// the repository prefix and the Kubernetes version.
pub fn etcd_image(cfg: &ClusterConfiguration) -> Result<String> {
    let local = cfg.local_etcd()?;

    if !local.image.is_empty() {
        return Ok(local.image.clone());
    }

    if cfg.kubernetes_version.is_empty() {
        return Err(Error::InvalidConfig(
            "kubernetesVersion is required when etcd.local.image is unset".to_string(),
        ));
    }

    Ok(format!(
        "{}/{}:{}",
        cfg.image_repository.trim_end_matches('/'),
        constants::ETCD,
        cfg.kubernetes_version
    ))
}

/// Build the etcd static pod for `cfg`
pub fn etcd_pod_spec(cfg: &ClusterConfiguration) -> Result<corev1::Pod> {
    let local = cfg.local_etcd()?;
    let flags = etcd_flags(cfg)?;
    let image = etcd_image(cfg)?;

    // The process reads its data from wherever --data-dir points, so the
    // mount must follow the effective flag rather than the raw config.
    // etcd_flags has already checked it is absolute.
    let data_mount_path = flags::flag_value(&flags, "data-dir")
        .unwrap_or(local.data_dir.as_str())
        .to_string();
    let listen_client_urls = flags::flag_value(&flags, "listen-client-urls")
        .unwrap_or(constants::ETCD_DEFAULT_CLIENT_URL);

    let command = command_from_flags(&flags);

    tracing::debug!(image = %image, data_dir = %local.data_dir, "Assembling etcd pod");

    let labels = BTreeMap::from([
        ("component".to_string(), constants::ETCD.to_string()),
        ("tier".to_string(), "control-plane".to_string()),
    ]);

    Ok(corev1::Pod {
        metadata: metav1::ObjectMeta {
            name: Some(constants::ETCD.to_string()),
            namespace: Some(constants::KUBE_SYSTEM_NAMESPACE.to_string()),
            labels: Some(labels),
            annotations: Some(BTreeMap::from([(
                CRITICAL_POD_ANNOTATION.to_string(),
                String::new(),
            )])),
            ..metav1::ObjectMeta::default()
        },
        spec: Some(corev1::PodSpec {
            containers: vec![corev1::Container {
                name: constants::ETCD.to_string(),
                image: Some(image),
                command: Some(command),
                volume_mounts: Some(vec![
                    corev1::VolumeMount {
                        name: constants::ETCD_DATA_VOLUME_NAME.to_string(),
                        mount_path: data_mount_path,
                        read_only: Some(false),
                        ..corev1::VolumeMount::default()
                    },
                    corev1::VolumeMount {
                        name: constants::ETCD_CERTS_VOLUME_NAME.to_string(),
                        mount_path: constants::ETCD_CERTS_DIR.to_string(),
                        read_only: Some(true),
                        ..corev1::VolumeMount::default()
                    },
                ]),
                liveness_probe: Some(etcd_liveness_probe(listen_client_urls)),
                ..corev1::Container::default()
            }],
            volumes: Some(vec![
                host_path_volume(constants::ETCD_DATA_VOLUME_NAME, &local.data_dir),
                host_path_volume(constants::ETCD_CERTS_VOLUME_NAME, constants::ETCD_CERTS_DIR),
            ]),
            host_network: Some(true),
            priority_class_name: Some(SYSTEM_NODE_CRITICAL.to_string()),
            ..corev1::PodSpec::default()
        }),
        ..corev1::Pod::default()
    })
}

fn host_path_volume(name: &str, path: &str) -> corev1::Volume {
    corev1::Volume {
        name: name.to_string(),
        host_path: Some(corev1::HostPathVolumeSource {
            path: path.to_string(),
            type_: Some(HOST_PATH_DIRECTORY_OR_CREATE.to_string()),
        }),
        ..corev1::Volume::default()
    }
}

/// Liveness check that reads a key through etcdctl with the healthcheck client cert
fn etcd_liveness_probe(listen_client_urls: &str) -> corev1::Probe {
    let endpoint = listen_client_urls
        .split(',')
        .next()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(constants::ETCD_DEFAULT_CLIENT_URL);

    let etcdctl = format!(
        "ETCDCTL_API=3 etcdctl --endpoints={} --cacert={} --cert={} --key={} get foo",
        endpoint,
        constants::ETCD_CA_CERT_PATH,
        constants::ETCD_HEALTHCHECK_CLIENT_CERT_PATH,
        constants::ETCD_HEALTHCHECK_CLIENT_KEY_PATH,
    );

    corev1::Probe {
        exec: Some(corev1::ExecAction {
            command: Some(vec!["/bin/sh".to_string(), "-ec".to_string(), etcdctl]),
        }),
        initial_delay_seconds: Some(15),
        timeout_seconds: Some(15),
        failure_threshold: Some(8),
        ..corev1::Probe::default()
    }
}
