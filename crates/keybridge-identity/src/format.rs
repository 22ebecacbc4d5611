//! On-disk export formats.
//!
//! The set of formats is closed: each downstream consumer parses its layout
//! rigidly, so dispatch is an exhaustive enum match rather than string
//! branching. The string tokens here are a wire contract for every CLI or
//! config surface built on top; their exact spelling matters.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an exported identity is laid out on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Key, certificates and trust material concatenated into a single file.
    #[default]
    File,
    /// OpenSSH-compatible: key and SSH certificate in two separate files.
    OpenSsh,
    /// Standard TLS layout used by generic TLS/RPC clients: key, certificate
    /// and CA bundle in separate files.
    Tls,
    /// Credentials merged into a kubeconfig file.
    Kubernetes,
    /// CA and key pair for configuring a database for mutual TLS. Identical
    /// on-disk layout to [`Format::Tls`]; exists as a distinct selector for
    /// caller intent only.
    #[serde(rename = "db")]
    Database,
}

impl Format {
    /// Every supported format, in the order they are documented.
    pub const ALL: [Format; 5] = [
        Format::File,
        Format::OpenSsh,
        Format::Tls,
        Format::Kubernetes,
        Format::Database,
    ];

    /// The wire token for this format.
    pub fn token(&self) -> &'static str {
        match self {
            Format::File => "file",
            Format::OpenSsh => "openssh",
            Format::Tls => "tls",
            Format::Kubernetes => "kubernetes",
            Format::Database => "db",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.token() == s)
            .ok_or_else(|| {
                let known = Format::ALL.map(|f| format!("{:?}", f.token())).join(", ");
                Error::InvalidArgument(format!(
                    "unsupported identity format {s:?}, use one of {known}"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        for format in Format::ALL {
            assert_eq!(format.token().parse::<Format>().unwrap(), format);
        }
    }

    #[test]
    fn test_display_matches_token() {
        assert_eq!(Format::Database.to_string(), "db");
        assert_eq!(Format::OpenSsh.to_string(), "openssh");
    }

    #[test]
    fn test_default_is_file() {
        assert_eq!(Format::default(), Format::File);
    }

    #[test]
    fn test_unknown_token_lists_all_formats() {
        let err = "yaml".parse::<Format>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("\"yaml\""));
        for format in Format::ALL {
            assert!(message.contains(format.token()), "missing {format}");
        }
    }

    #[test]
    fn test_serde_uses_wire_tokens() {
        assert_eq!(serde_json::to_string(&Format::Database).unwrap(), "\"db\"");
        assert_eq!(
            serde_json::from_str::<Format>("\"openssh\"").unwrap(),
            Format::OpenSsh
        );
    }
}
