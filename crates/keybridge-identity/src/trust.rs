//! Trust chain serialization.
//!
//! Turns an ordered sequence of [`TrustedAuthority`] records into the two
//! byte streams downstream consumers expect: SSH "authorized host" lines
//! scoped to the owning cluster, and concatenated PEM CA material. Pure
//! functions, no I/O. Input order is preserved exactly and duplicates are
//! kept verbatim; trust federation semantics are owned by the issuer.

use crate::bundle::TrustedAuthority;
use crate::{Error, Result};
use ssh_key::PublicKey;

/// Renders one SSH host-authority public key as a `@cert-authority` line
/// scoped to `cluster_name` and its subdomains.
///
/// The key must be in OpenSSH `authorized_keys` public key format; any
/// comment is dropped from the rendered line. Malformed material is an
/// error, never silently skipped.
pub fn authorized_hosts_line(cluster_name: &str, public_key: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(public_key).map_err(|err| {
        Error::Serialization(format!(
            "host certificate for cluster {cluster_name:?} is not valid UTF-8: {err}"
        ))
    })?;
    let mut key = PublicKey::from_openssh(text.trim()).map_err(|err| {
        Error::Serialization(format!(
            "malformed host certificate for cluster {cluster_name:?}: {err}"
        ))
    })?;
    key.set_comment("");
    let rendered = key.to_openssh().map_err(|err| {
        Error::Serialization(format!(
            "failed to render host certificate for cluster {cluster_name:?}: {err}"
        ))
    })?;
    Ok(format!(
        "@cert-authority *.{cluster_name},{cluster_name} {}",
        rendered.trim_end()
    ))
}

/// Renders every host certificate of one authority, in issuer order.
pub fn host_certificate_lines(authority: &TrustedAuthority) -> Result<Vec<String>> {
    authority
        .host_certificates
        .iter()
        .map(|key| authorized_hosts_line(&authority.cluster_name, key))
        .collect()
}

/// Concatenates the TLS CA certificates of every authority, in authority
/// input order. Host certificates never appear in this stream.
pub fn tls_ca_bundle(authorities: &[TrustedAuthority]) -> Vec<u8> {
    let mut bundle = Vec::new();
    for authority in authorities {
        for cert in &authority.tls_certificates {
            bundle.extend_from_slice(cert);
        }
    }
    bundle
}
