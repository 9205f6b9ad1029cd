//! Default etcd flags and ExtraArgs overlay
//!
//! Defaults are kept as an ordered list of pairs so the generated command,
//! and therefore the manifest, is byte-for-byte reproducible.

use etcdpod_common::constants;
use std::collections::BTreeMap;

/// Ordered (flag name, value) pairs without leading dashes
pub type FlagSet = Vec<(String, String)>;

/// Flags whose values are files inside the certificates mount
pub const CERTIFICATE_FLAGS: [&str; 6] = [
    "cert-file",
    "key-file",
    "trusted-ca-file",
    "peer-cert-file",
    "peer-key-file",
    "peer-trusted-ca-file",
];

/// Built-in etcd flags for a local member storing data in `data_dir`
pub fn default_flags(data_dir: &str) -> FlagSet {
    [
        ("listen-client-urls", constants::ETCD_DEFAULT_CLIENT_URL),
        ("advertise-client-urls", constants::ETCD_DEFAULT_CLIENT_URL),
        ("data-dir", data_dir),
        ("cert-file", constants::ETCD_SERVER_CERT_PATH),
        ("key-file", constants::ETCD_SERVER_KEY_PATH),
        ("trusted-ca-file", constants::ETCD_CA_CERT_PATH),
        ("client-cert-auth", "true"),
        ("peer-cert-file", constants::ETCD_PEER_CERT_PATH),
        ("peer-key-file", constants::ETCD_PEER_KEY_PATH),
        ("peer-trusted-ca-file", constants::ETCD_CA_CERT_PATH),
        ("snapshot-count", constants::ETCD_DEFAULT_SNAPSHOT_COUNT),
        ("peer-client-cert-auth", "true"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

/// Overlay `overrides` onto `defaults`.
///
/// The result has exactly the keys of `defaults`, in the same order. Keys in
/// `overrides` that name no default are ignored.
pub fn merge_flags(defaults: &[(String, String)], overrides: &BTreeMap<String, String>) -> FlagSet {
    defaults
        .iter()
        .map(|(name, default)| {
            let value = overrides.get(name).unwrap_or(default);
            (name.clone(), value.clone())
        })
        .collect()
}

/// Override keys that do not correspond to any default flag, sorted
pub fn unrecognized_overrides<'a>(
    defaults: &[(String, String)],
    overrides: &'a BTreeMap<String, String>,
) -> Vec<&'a str> {
    overrides
        .keys()
        .filter(|key| !defaults.iter().any(|(name, _)| name == *key))
        .map(String::as_str)
        .collect()
}

/// Value of `name` in a flag set
pub fn flag_value<'a>(flags: &'a [(String, String)], name: &str) -> Option<&'a str> {
    flags
        .iter()
        .find(|(flag, _)| flag == name)
        .map(|(_, value)| value.as_str())
}

/// Render a flag set as `--name=value` tokens
pub fn to_args(flags: &[(String, String)]) -> Vec<String> {
    flags
        .iter()
        .map(|(name, value)| format!("--{}={}", name, value))
        .collect()
}
