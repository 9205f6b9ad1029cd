//! Local etcd phase
//!
//! Derives the etcd flags, command and static pod for a control-plane node.

pub mod command;
pub mod flags;
pub mod pod;

pub use command::{etcd_command, etcd_flags};
pub use pod::{etcd_image, etcd_pod_spec};
