//! The export dispatcher and per-format writers.
//!
//! One synchronous call per export: the dispatcher validates its input,
//! selects the writer for the requested [`Format`], and returns the paths
//! written in creation order. Files are opened, fully written and closed one
//! at a time; handles are released on every exit path by scope. Writers stop
//! at the first error and never roll back files already written in the same
//! call, so callers must treat any error as "state on disk is indeterminate".

use crate::bundle::CredentialBundle;
use crate::format::Format;
use crate::kubeconfig::{ConfigUpdater, Values};
use crate::trust;
use crate::{Error, Result};
use std::fs::{DirBuilder, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Secret-bearing files are readable and writable by the owner only.
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Directories created on the way to the target path.
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;

/// Writes `bundle` to disk at paths derived from `path`, laid out per
/// `format`, and returns the list of files written in creation order.
///
/// `cluster_addr` is consumed only by [`Format::Kubernetes`]; it is ignored
/// (not an error) for every other format. The kubernetes format delegates to
/// `kubeconfig` instead of writing files itself; callers that never export
/// it can pass [`kubeconfig::Unsupported`].
///
/// Files are created if absent and truncated if present; pre-existing
/// unrelated files are never deleted. An empty `path` fails with
/// [`Error::InvalidArgument`] before any I/O.
///
/// [`kubeconfig::Unsupported`]: crate::kubeconfig::Unsupported
pub fn write(
    path: impl AsRef<Path>,
    bundle: &CredentialBundle,
    format: Format,
    cluster_addr: &str,
    kubeconfig: &dyn ConfigUpdater,
) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidArgument(
            "identity output path is not specified".to_string(),
        ));
    }

    debug!(path = %path.display(), %format, "exporting credential bundle");

    let written = match format {
        Format::File => write_single_file(path, bundle)?,
        Format::OpenSsh => write_openssh(path, bundle)?,
        Format::Tls | Format::Database => write_tls(path, bundle)?,
        Format::Kubernetes => {
            kubeconfig.update(
                path,
                &Values {
                    cluster_name: &bundle.cluster_name,
                    cluster_addr,
                    credentials: bundle,
                },
            )?;
            vec![path.to_path_buf()]
        }
    };

    info!(path = %path.display(), %format, files = written.len(), "credential bundle exported");
    Ok(written)
}

/// Everything concatenated into one file: private key, SSH certificate, TLS
/// certificate, then per trusted authority its host-certificate lines
/// followed by its TLS CA certificates. Every chunk is newline-terminated.
fn write_single_file(path: &Path, bundle: &CredentialBundle) -> Result<Vec<PathBuf>> {
    let mut file = create_secure(path)?;

    write_with_newline(&mut file, &bundle.private_key).map_err(|source| io_error(path, source))?;
    write_with_newline(&mut file, &bundle.ssh_certificate).map_err(|source| io_error(path, source))?;
    write_with_newline(&mut file, &bundle.tls_certificate).map_err(|source| io_error(path, source))?;

    for authority in &bundle.trusted_authorities {
        for line in trust::host_certificate_lines(authority)? {
            write_with_newline(&mut file, line.as_bytes()).map_err(|source| io_error(path, source))?;
        }
        for cert in &authority.tls_certificates {
            write_with_newline(&mut file, cert).map_err(|source| io_error(path, source))?;
        }
    }

    Ok(vec![path.to_path_buf()])
}

/// Split key and SSH certificate: the key at `path`, the certificate at
/// `path` + `-cert.pub`. Each file is a full overwrite of one blob.
fn write_openssh(path: &Path, bundle: &CredentialBundle) -> Result<Vec<PathBuf>> {
    let key_path = path.to_path_buf();
    let cert_path = suffixed(path, "-cert.pub");

    write_secure(&key_path, &bundle.private_key)?;
    write_secure(&cert_path, &bundle.ssh_certificate)?;

    Ok(vec![key_path, cert_path])
}

/// TLS client layout, also used for database mutual TLS: key at `.key`, TLS
/// certificate at `.crt`, and the concatenated CA certificates of every
/// trusted authority at `.cas`. Host certificates never appear here.
fn write_tls(path: &Path, bundle: &CredentialBundle) -> Result<Vec<PathBuf>> {
    let key_path = suffixed(path, ".key");
    let crt_path = suffixed(path, ".crt");
    let cas_path = suffixed(path, ".cas");

    write_secure(&key_path, &bundle.private_key)?;
    write_secure(&crt_path, &bundle.tls_certificate)?;
    write_secure(&cas_path, &trust::tls_ca_bundle(&bundle.trusted_authorities))?;

    Ok(vec![key_path, crt_path, cas_path])
}

/// Appends `suffix` to the final path component.
fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Opens `path` for writing with owner-only permissions, creating missing
/// parent directories (owner-only as well) and truncating any existing file.
fn create_secure(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            let mut builder = DirBuilder::new();
            builder.recursive(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::DirBuilderExt;
                builder.mode(DIR_MODE);
            }
            builder.create(parent).map_err(|source| io_error(parent, source))?;
        }
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path).map_err(|source| io_error(path, source))
}

/// Full overwrite of `path` with `data`, owner-only permissions.
fn write_secure(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = create_secure(path)?;
    file.write_all(data).map_err(|source| io_error(path, source))
}

/// Writes `data` followed by a newline unless the data already ends in one.
fn write_with_newline(writer: &mut impl Write, data: &[u8]) -> std::io::Result<()> {
    writer.write_all(data)?;
    if !data.ends_with(b"\n") {
        writer.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_with_newline_appends_once() {
        let mut out = Vec::new();
        write_with_newline(&mut out, b"KEY").unwrap();
        assert_eq!(out, b"KEY\n");
    }

    #[test]
    fn test_write_with_newline_is_idempotent_on_terminated_input() {
        let mut out = Vec::new();
        write_with_newline(&mut out, b"KEY\n").unwrap();
        assert_eq!(out, b"KEY\n");
    }

    #[test]
    fn test_write_with_newline_empty_blob_is_lone_newline() {
        let mut out = Vec::new();
        write_with_newline(&mut out, b"").unwrap();
        assert_eq!(out, b"\n");
    }

    #[test]
    fn test_suffixed_appends_to_final_component() {
        assert_eq!(
            suffixed(Path::new("/out/id"), "-cert.pub"),
            PathBuf::from("/out/id-cert.pub")
        );
        assert_eq!(suffixed(Path::new("id"), ".cas"), PathBuf::from("id.cas"));
    }
}
