//! Boundary to the kubeconfig updater.
//!
//! The kubernetes export format does not write files itself: it hands the
//! credentials to an external collaborator that merges them into (or
//! creates) the target kubeconfig. This module defines that seam. The
//! engine forwards the bundle and never interprets the merged file's
//! internal structure.

use crate::bundle::CredentialBundle;
use crate::{Error, Result};
use std::path::Path;

/// Everything the updater needs to merge one identity into a kubeconfig.
#[derive(Debug)]
pub struct Values<'a> {
    /// Name of the issuing cluster.
    pub cluster_name: &'a str,
    /// Address clients should reach the cluster at.
    pub cluster_addr: &'a str,
    /// The credentials to embed.
    pub credentials: &'a CredentialBundle,
}

/// Merges credentials into a kubeconfig file at `path`.
///
/// Implementations own the config format entirely: whether the target is
/// created or merged, and how conflicts are resolved, is not the export
/// engine's concern.
pub trait ConfigUpdater {
    fn update(&self, path: &Path, values: &Values<'_>) -> Result<()>;
}

/// Placeholder for callers that never export the kubernetes format.
///
/// `update` always fails, so selecting [`Format::Kubernetes`] through this
/// updater reports a clean error instead of producing files.
///
/// [`Format::Kubernetes`]: crate::Format::Kubernetes
pub struct Unsupported;

impl ConfigUpdater for Unsupported {
    fn update(&self, path: &Path, _values: &Values<'_>) -> Result<()> {
        Err(Error::InvalidArgument(format!(
            "kubernetes format requires a kubeconfig updater (target {})",
            path.display()
        )))
    }
}
