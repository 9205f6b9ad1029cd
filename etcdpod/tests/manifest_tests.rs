//! Manifest Generation Tests
//! End-to-end tests from cluster configuration to the etcd manifest on disk

use etcdpod::etcd::{etcd_command, etcd_pod_spec};
use etcdpod::{config, constants, create_local_etcd_static_pod_manifest_file, ClusterConfiguration};
use k8s_openapi::api::core::v1::Pod;
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

fn config_with_args(data_dir: &str, args: &[(&str, &str)]) -> ClusterConfiguration {
    let mut cfg = ClusterConfiguration::with_local_etcd("v1.30.0", data_dir);
    cfg.etcd.local.as_mut().unwrap().extra_args = args
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<BTreeMap<_, _>>();
    cfg
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn read_pod(path: &Path) -> Pod {
    serde_yaml::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// ============== Command Tests ==============

#[test]
fn test_default_command_scenario() {
    let command = etcd_command(&config_with_args("/var/lib/etcd", &[])).unwrap();

    assert_eq!(command.len(), 13);
    assert_eq!(command[0], "etcd");
    assert!(command.contains(&"--data-dir=/var/lib/etcd".to_string()));
    assert!(command.contains(&"--listen-client-urls=https://127.0.0.1:2379".to_string()));
}

#[test]
fn test_override_command_scenario() {
    let defaults = etcd_command(&config_with_args("/var/lib/etcd", &[])).unwrap();
    let command = etcd_command(&config_with_args(
        "/var/lib/etcd",
        &[
            ("listen-client-urls", "https://10.0.1.10:2379"),
            ("advertise-client-urls", "https://10.0.1.10:2379"),
        ],
    ))
    .unwrap();

    assert_eq!(command.len(), defaults.len());
    for (actual, default) in command.iter().zip(&defaults) {
        if actual.starts_with("--listen-client-urls=")
            || actual.starts_with("--advertise-client-urls=")
        {
            assert!(actual.ends_with("=https://10.0.1.10:2379"));
        } else {
            assert_eq!(actual, default);
        }
    }
    assert!(command.contains(&"--snapshot-count=10000".to_string()));
    assert!(command.contains(&format!("--cert-file={}", constants::ETCD_SERVER_CERT_PATH)));
}

#[test]
fn test_unrecognized_extra_args_are_dropped() {
    let command = etcd_command(&config_with_args(
        "/var/lib/etcd",
        &[("initial-cluster-state", "existing")],
    ))
    .unwrap();

    assert_eq!(command.len(), 13);
    assert!(!command.iter().any(|arg| arg.contains("initial-cluster-state")));
}

// ============== Pod Spec Tests ==============

#[test]
fn test_single_etcd_container_for_any_config() {
    let configs = vec![
        config_with_args("/var/lib/etcd", &[]),
        config_with_args("/data/etcd", &[("snapshot-count", "1")]),
        {
            let mut cfg = config_with_args("/var/lib/etcd", &[]);
            cfg.etcd.local.as_mut().unwrap().image = "quay.io/coreos/etcd:v3.5.15".to_string();
            cfg
        },
    ];

    for cfg in configs {
        let pod = etcd_pod_spec(&cfg).unwrap();
        let containers = &pod.spec.as_ref().unwrap().containers;
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].name, constants::ETCD);
        assert!(!containers[0].image.as_deref().unwrap_or_default().is_empty());
    }
}

// ============== Manifest Writer Tests ==============

#[test]
fn test_manifest_written_to_empty_directory() {
    let tmpdir = TempDir::new().unwrap();
    let manifests = tmpdir.path().join("manifests");

    create_local_etcd_static_pod_manifest_file(&manifests, &config_with_args("/var/lib/etcd", &[]))
        .unwrap();

    assert_eq!(dir_entries(&manifests), vec!["etcd.yaml".to_string()]);
}

#[test]
fn test_second_run_overwrites_manifest() {
    let tmpdir = TempDir::new().unwrap();

    create_local_etcd_static_pod_manifest_file(
        tmpdir.path(),
        &config_with_args("/var/lib/etcd", &[]),
    )
    .unwrap();
    let path = create_local_etcd_static_pod_manifest_file(
        tmpdir.path(),
        &config_with_args("/mnt/etcd", &[("snapshot-count", "2000")]),
    )
    .unwrap();

    assert_eq!(dir_entries(tmpdir.path()), vec!["etcd.yaml".to_string()]);

    let pod = read_pod(&path);
    let command = pod.spec.unwrap().containers[0].command.clone().unwrap();
    assert!(command.contains(&"--data-dir=/mnt/etcd".to_string()));
    assert!(command.contains(&"--snapshot-count=2000".to_string()));
}

#[test]
fn test_manifest_from_config_file() {
    let tmpdir = TempDir::new().unwrap();
    let config_path = tmpdir.path().join("etcdpod.yaml");
    std::fs::write(
        &config_path,
        r#"
kubernetesVersion: v1.30.0
etcd:
  local:
    dataDir: /var/lib/etcd
    extraArgs:
      advertise-client-urls: https://10.0.1.10:2379
"#,
    )
    .unwrap();

    let cfg = config::load_from_file(&config_path).unwrap();
    let manifests = tmpdir.path().join("manifests");
    let path = create_local_etcd_static_pod_manifest_file(&manifests, &cfg).unwrap();

    let pod = read_pod(&path);
    assert_eq!(pod.metadata.namespace.as_deref(), Some(constants::KUBE_SYSTEM_NAMESPACE));

    let container = &pod.spec.as_ref().unwrap().containers[0];
    assert_eq!(container.image.as_deref(), Some("registry.k8s.io/etcd:v1.30.0"));
    assert!(container
        .command
        .as_ref()
        .unwrap()
        .contains(&"--advertise-client-urls=https://10.0.1.10:2379".to_string()));
}
