//! Export command - assemble a bundle from files and write it out.

use anyhow::{Context, Result};
use clap::Args;
use keybridge_identity::{kubeconfig, write, CredentialBundle, Format, TrustedAuthority};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write a credential bundle to disk in the requested format
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Private key file
    #[arg(long)]
    pub key: PathBuf,

    /// SSH certificate file for the key
    #[arg(long)]
    pub ssh_cert: Option<PathBuf>,

    /// PEM TLS certificate file for the key
    #[arg(long)]
    pub tls_cert: Option<PathBuf>,

    /// Name of the issuing cluster
    #[arg(long, default_value = "")]
    pub cluster: String,

    /// Cluster name the trusted authority material belongs to
    #[arg(long)]
    pub ca_cluster: Option<String>,

    /// File of SSH host-authority public keys, one per line
    #[arg(long, requires = "ca_cluster")]
    pub host_ca: Option<PathBuf>,

    /// PEM bundle of trusted CA certificates
    #[arg(long, requires = "ca_cluster")]
    pub tls_ca: Option<PathBuf>,

    /// Output path the format derives its file names from
    #[arg(long, short)]
    pub out: PathBuf,

    /// Output format: file, openssh, tls, kubernetes or db
    #[arg(long, default_value_t = Format::File)]
    pub format: Format,

    /// Cluster address, consumed by the kubernetes format
    #[arg(long, default_value = "")]
    pub proxy: String,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let bundle = assemble_bundle(&args)?;
    debug!(format = %args.format, out = %args.out.display(), "assembled credential bundle");

    let written = write(&args.out, &bundle, args.format, &args.proxy, &kubeconfig::Unsupported)?;
    for path in &written {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn assemble_bundle(args: &ExportArgs) -> Result<CredentialBundle> {
    let mut bundle = CredentialBundle {
        private_key: read_blob(&args.key)?,
        cluster_name: args.cluster.clone(),
        ..CredentialBundle::default()
    };

    if let Some(path) = &args.ssh_cert {
        bundle.ssh_certificate = read_blob(path)?;
    }
    if let Some(path) = &args.tls_cert {
        bundle.tls_certificate = read_blob(path)?;
    }

    if let Some(ca_cluster) = &args.ca_cluster {
        let mut authority = TrustedAuthority {
            cluster_name: ca_cluster.clone(),
            ..TrustedAuthority::default()
        };
        if let Some(path) = &args.host_ca {
            let keys = String::from_utf8(read_blob(path)?)
                .with_context(|| format!("host CA file {} is not UTF-8", path.display()))?;
            authority.host_certificates = keys
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| line.as_bytes().to_vec())
                .collect();
        }
        if let Some(path) = &args.tls_ca {
            authority.tls_certificates = vec![read_blob(path)?];
        }
        bundle.trusted_authorities.push(authority);
    }

    Ok(bundle)
}

fn read_blob(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(dir: &std::path::Path) -> ExportArgs {
        ExportArgs {
            key: dir.join("key"),
            ssh_cert: None,
            tls_cert: None,
            cluster: "root".to_string(),
            ca_cluster: None,
            host_ca: None,
            tls_ca: None,
            out: dir.join("id"),
            format: Format::File,
            proxy: String::new(),
        }
    }

    #[test]
    fn test_assemble_reads_key_material() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("key"), "KEY").unwrap();

        let bundle = assemble_bundle(&args(dir.path())).unwrap();
        assert_eq!(bundle.private_key, b"KEY");
        assert_eq!(bundle.cluster_name, "root");
        assert!(bundle.trusted_authorities.is_empty());
    }

    #[test]
    fn test_assemble_splits_host_ca_lines() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("key"), "KEY").unwrap();
        fs::write(dir.path().join("hosts"), "ssh-ed25519 AAAA first\n\nssh-ed25519 BBBB second\n")
            .unwrap();

        let mut args = args(dir.path());
        args.ca_cluster = Some("leaf".to_string());
        args.host_ca = Some(dir.path().join("hosts"));

        let bundle = assemble_bundle(&args).unwrap();
        assert_eq!(bundle.trusted_authorities.len(), 1);
        assert_eq!(bundle.trusted_authorities[0].host_certificates.len(), 2);
    }

    #[test]
    fn test_assemble_missing_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = assemble_bundle(&args(dir.path())).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
