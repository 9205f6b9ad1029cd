//! Well-known names and paths shared by the flag defaults and the pod volumes
//!
//! The certificate paths below are referenced both by the etcd flags and by
//! the certificate volume mount, so they must only be defined here.

/// Component identifier: container name, pod name and manifest file stem
pub const ETCD: &str = "etcd";

/// Namespace the kubelet mirrors static pods into
pub const KUBE_SYSTEM_NAMESPACE: &str = "kube-system";

/// Directory the kubelet watches for static pod manifests
pub const DEFAULT_MANIFESTS_DIR: &str = "/etc/kubernetes/manifests";

/// Registry prefix for images derived from the Kubernetes version
pub const DEFAULT_IMAGE_REPOSITORY: &str = "registry.k8s.io";

/// Directory holding the etcd PKI material on the host and in the container
pub const ETCD_CERTS_DIR: &str = "/etc/kubernetes/pki/etcd";

pub const ETCD_CA_CERT_PATH: &str = "/etc/kubernetes/pki/etcd/ca.crt";
pub const ETCD_SERVER_CERT_PATH: &str = "/etc/kubernetes/pki/etcd/server.crt";
pub const ETCD_SERVER_KEY_PATH: &str = "/etc/kubernetes/pki/etcd/server.key";
pub const ETCD_PEER_CERT_PATH: &str = "/etc/kubernetes/pki/etcd/peer.crt";
pub const ETCD_PEER_KEY_PATH: &str = "/etc/kubernetes/pki/etcd/peer.key";
pub const ETCD_HEALTHCHECK_CLIENT_CERT_PATH: &str =
    "/etc/kubernetes/pki/etcd/healthcheck-client.crt";
pub const ETCD_HEALTHCHECK_CLIENT_KEY_PATH: &str =
    "/etc/kubernetes/pki/etcd/healthcheck-client.key";

/// Client endpoint etcd listens on and advertises by default
pub const ETCD_DEFAULT_CLIENT_URL: &str = "https://127.0.0.1:2379";

pub const ETCD_DEFAULT_SNAPSHOT_COUNT: &str = "10000";

pub const ETCD_DATA_VOLUME_NAME: &str = "etcd-data";
pub const ETCD_CERTS_VOLUME_NAME: &str = "etcd-certs";
