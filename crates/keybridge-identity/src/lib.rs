//! Credential bundle export engine for keybridge.
//!
//! An issued identity (a private key plus its SSH and TLS certificates and
//! the trusted-authority material of every federated cluster) has to land on
//! disk in whatever shape the consuming tool expects. This crate owns that
//! last step: one in-memory [`CredentialBundle`], one requested [`Format`],
//! and a deterministic set of files with correct byte layout, trust-material
//! ordering, and permissions.
//!
//! # Components
//!
//! - [`bundle`] - Credential bundle and trusted authority data model
//! - [`format`] - The closed set of on-disk export formats
//! - [`trust`] - Trust chain serialization (host lines, CA bundles)
//! - [`kubeconfig`] - Boundary to the external kubeconfig updater
//! - [`writer`] - The export dispatcher and per-format writers
//!
//! # Example
//!
//! ```no_run
//! use keybridge_identity::{kubeconfig, write, CredentialBundle, Format};
//!
//! let bundle = CredentialBundle {
//!     private_key: std::fs::read("id_ed25519").expect("key material"),
//!     ..CredentialBundle::default()
//! };
//! let written = write("/home/alice/.keybridge/id", &bundle, Format::OpenSsh, "", &kubeconfig::Unsupported)?;
//! for path in &written {
//!     println!("wrote {}", path.display());
//! }
//! # Ok::<(), keybridge_identity::Error>(())
//! ```

pub mod bundle;
pub mod format;
pub mod kubeconfig;
pub mod trust;
pub mod writer;

pub use bundle::{CredentialBundle, TrustedAuthority};
pub use format::Format;
pub use kubeconfig::{ConfigUpdater, Values};
pub use writer::write;

use std::path::PathBuf;

/// Errors that can occur while exporting a credential bundle.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied argument was rejected. Raised before any
    /// filesystem I/O is attempted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A filesystem operation failed. Always attributed to the specific
    /// path being touched.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Trust material could not be rendered into its wire form.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, Error>;
