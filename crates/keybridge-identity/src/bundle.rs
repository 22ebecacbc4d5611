//! Credential bundle data model.
//!
//! A [`CredentialBundle`] is the in-memory form of one issued identity: the
//! private key, the certificates minted for it, and the trust material of
//! every cluster the issuer federates with. The export engine treats all of
//! it as opaque bytes; cryptographic validity is the issuer's concern.

use std::fmt;

/// One issued identity, ready for export.
///
/// The bundle is immutable input to the writers: it is only ever borrowed,
/// never mutated, and the engine holds no reference to it after a write
/// returns.
#[derive(Clone, Default)]
pub struct CredentialBundle {
    /// Raw private key material. Opaque to the engine.
    pub private_key: Vec<u8>,
    /// SSH-format certificate for the private key. May be empty.
    pub ssh_certificate: Vec<u8>,
    /// PEM-format TLS certificate for the private key. May be empty.
    pub tls_certificate: Vec<u8>,
    /// Name of the issuing cluster. Required by the kubernetes format.
    pub cluster_name: String,
    /// Trusted authorities in insertion order. The order is semantically
    /// significant and is preserved bit-exact in all serialized output.
    pub trusted_authorities: Vec<TrustedAuthority>,
}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("private_key", &"[REDACTED]")
            .field("ssh_certificate", &self.ssh_certificate.len())
            .field("tls_certificate", &self.tls_certificate.len())
            .field("cluster_name", &self.cluster_name)
            .field("trusted_authorities", &self.trusted_authorities)
            .finish()
    }
}

/// Trust material of one federated cluster.
///
/// Host certificates are serialized before TLS certificates within an
/// authority; across authorities, input order is preserved. Duplicates are
/// kept verbatim: trust federation semantics belong to the issuer, not to
/// the export engine.
#[derive(Debug, Clone, Default)]
pub struct TrustedAuthority {
    /// Name of the cluster this authority speaks for.
    pub cluster_name: String,
    /// SSH host-authority public keys, in issuer order.
    pub host_certificates: Vec<Vec<u8>>,
    /// PEM CA certificates, in issuer order.
    pub tls_certificates: Vec<Vec<u8>>,
}
