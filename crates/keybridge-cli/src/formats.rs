//! Formats command - list the supported export formats.

use anyhow::Result;
use keybridge_identity::Format;

fn description(format: Format) -> &'static str {
    match format {
        Format::File => "key, certificates and trust material in one file (default)",
        Format::OpenSsh => "key and SSH certificate as an OpenSSH file pair",
        Format::Tls => "key, certificate and CA bundle for generic TLS clients",
        Format::Kubernetes => "credentials merged into a kubeconfig file",
        Format::Database => "key, certificate and CA bundle for database mutual TLS",
    }
}

pub fn list() -> Result<()> {
    for format in Format::ALL {
        println!("{:<12} {}", format.token(), description(format));
    }
    Ok(())
}
