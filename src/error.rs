//! Error types for assemble-prune
//!
//! Only fatal conditions are errors. Unresolvable entries, missing paths,
//! protected roots and unsupported file types are reported as warnings.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// assemble-prune error type
#[derive(Debug)]
pub enum PruneError {
    /// The manifest (structure file) does not exist
    ManifestNotFound(PathBuf),
    /// The manifest exists but could not be read
    ManifestRead { path: PathBuf, source: io::Error },
    /// The OS refused to remove a file or directory
    DeleteFailed { path: PathBuf, source: io::Error },
    /// The current working directory could not be determined
    CurrentDir(io::Error),
    /// An explicitly requested config file does not exist
    ConfigNotFound(PathBuf),
    /// The config file exists but could not be read
    ConfigRead { path: PathBuf, source: io::Error },
    /// The config file is not valid TOML or has unknown keys
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl PruneError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ManifestNotFound(_)
            | Self::ManifestRead { .. }
            | Self::DeleteFailed { .. }
            | Self::CurrentDir(_)
            | Self::ConfigNotFound(_)
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. } => 1,
        }
    }

    /// Message shown on stderr before the process exits
    pub fn user_message(&self) -> String {
        match self {
            Self::ManifestNotFound(path) => {
                format!("manifest not found: {}", path.display())
            }
            Self::ManifestRead { path, source } => {
                format!("cannot read manifest '{}': {}", path.display(), source)
            }
            Self::DeleteFailed { path, source } => {
                format!("cannot remove '{}': {}", path.display(), source)
            }
            Self::CurrentDir(e) => {
                format!("cannot determine current directory: {}", e)
            }
            Self::ConfigNotFound(path) => {
                format!("config file not found: {}", path.display())
            }
            Self::ConfigRead { path, source } => {
                format!("cannot read config '{}': {}", path.display(), source)
            }
            Self::ConfigParse { path, source } => {
                format!("invalid config '{}': {}", path.display(), source)
            }
        }
    }
}

impl fmt::Display for PruneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for PruneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ManifestRead { source, .. } | Self::DeleteFailed { source, .. } => Some(source),
            Self::ConfigRead { source, .. } | Self::CurrentDir(source) => Some(source),
            Self::ConfigParse { source, .. } => Some(source),
            Self::ManifestNotFound(_) | Self::ConfigNotFound(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_exit_code_fatal_errors_return_1() {
        assert_eq!(
            PruneError::ManifestNotFound(PathBuf::from("assemble.txt")).exit_code(),
            1
        );
        assert_eq!(
            PruneError::DeleteFailed {
                path: PathBuf::from("../up/locked.txt"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            }
            .exit_code(),
            1
        );
        assert_eq!(
            PruneError::CurrentDir(io::Error::new(io::ErrorKind::NotFound, "gone")).exit_code(),
            1
        );
    }

    #[test]
    fn test_user_message_manifest_not_found() {
        let err = PruneError::ManifestNotFound(PathBuf::from("assemble.txt"));
        let msg = err.user_message();
        assert!(msg.contains("manifest not found"));
        assert!(msg.contains("assemble.txt"));
    }

    #[test]
    fn test_user_message_manifest_read() {
        let err = PruneError::ManifestRead {
            path: PathBuf::from("assemble.txt"),
            source: io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        };
        let msg = err.user_message();
        assert!(msg.contains("assemble.txt"));
        assert!(msg.contains("valid UTF-8"));
    }

    #[test]
    fn test_user_message_delete_failed() {
        let err = PruneError::DeleteFailed {
            path: PathBuf::from("../up/locked"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let msg = err.user_message();
        assert!(msg.contains("cannot remove '../up/locked'"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_display_trait() {
        let err = PruneError::ManifestNotFound(PathBuf::from("missing.txt"));
        assert!(format!("{}", err).contains("missing.txt"));
    }

    #[test]
    fn test_source_delete_failed() {
        let err = PruneError::DeleteFailed {
            path: PathBuf::from("x"),
            source: io::Error::new(io::ErrorKind::Other, "io test"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_source_manifest_not_found_is_none() {
        let err = PruneError::ManifestNotFound(PathBuf::from("assemble.txt"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_config_parse_error_message_and_source() {
        let source = toml::from_str::<toml::Table>("invalid[[[toml").unwrap_err();
        let err = PruneError::ConfigParse {
            path: PathBuf::from("assemble-prune.toml"),
            source,
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_message().contains("invalid config 'assemble-prune.toml'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_not_found_message() {
        let err = PruneError::ConfigNotFound(PathBuf::from("/tmp/custom.toml"));
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_message().contains("/tmp/custom.toml"));
        assert!(err.source().is_none());
    }
}
