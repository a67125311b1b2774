//! Credentials input resolution for `host add`
//!
//! A host can be added with an existing credentials document, a
//! username/password pair, or a client certificate pair read from disk.

use std::path::PathBuf;

use adm_api::links::{self, link_for};
use adm_api::AuthCredentials;

use crate::error::{AdmError, UsageError};

/// Credential-related flags as given on the command line
#[derive(Debug, Clone, Default)]
pub struct CredentialsInput {
    pub existing: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub public_cert: Option<PathBuf>,
    pub private_cert: Option<PathBuf>,
}

/// What the host should authenticate with
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialsChoice {
    /// Link to credentials already stored by the service
    Existing(String),
    /// Credentials that must be created first
    New(AuthCredentials),
}

impl CredentialsInput {
    /// Decide which credentials to use.
    ///
    /// An existing credentials id wins over everything else. Half-specified
    /// pairs are rejected; certificate files are read eagerly so a missing
    /// file fails before any remote call.
    pub fn resolve(&self) -> Result<Option<CredentialsChoice>, AdmError> {
        if let Some(id) = &self.existing {
            return Ok(Some(CredentialsChoice::Existing(link_for(
                links::CREDENTIALS,
                id,
            ))));
        }

        match (&self.username, &self.password) {
            (Some(user), Some(password)) => {
                return Ok(Some(CredentialsChoice::New(AuthCredentials::password(
                    user, password,
                ))));
            }
            (None, None) => {}
            _ => return Err(UsageError::IncompletePasswordCredentials.into()),
        }

        match (&self.public_cert, &self.private_cert) {
            (Some(public), Some(private)) => {
                let public_key = std::fs::read_to_string(public)?;
                let private_key = std::fs::read_to_string(private)?;
                Ok(Some(CredentialsChoice::New(AuthCredentials::certificate(
                    public_key,
                    private_key,
                ))))
            }
            (None, None) => Ok(None),
            _ => Err(UsageError::IncompleteCertificateCredentials.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adm_api::CredentialsType;

    #[test]
    fn test_no_credentials() {
        assert_eq!(CredentialsInput::default().resolve().unwrap(), None);
    }

    #[test]
    fn test_existing_wins() {
        let input = CredentialsInput {
            existing: Some("cred-1".to_string()),
            username: Some("root".to_string()),
            password: Some("pw".to_string()),
            ..Default::default()
        };
        assert_eq!(
            input.resolve().unwrap(),
            Some(CredentialsChoice::Existing(
                "/core/auth/credentials/cred-1".to_string()
            ))
        );
    }

    #[test]
    fn test_password_pair() {
        let input = CredentialsInput {
            username: Some("root".to_string()),
            password: Some("pw".to_string()),
            ..Default::default()
        };
        match input.resolve().unwrap() {
            Some(CredentialsChoice::New(creds)) => {
                assert_eq!(creds.kind, CredentialsType::Password);
                assert_eq!(creds.user_email.as_deref(), Some("root"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_half_password_pair_rejected() {
        let input = CredentialsInput {
            username: Some("root".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            input.resolve(),
            Err(AdmError::Usage(UsageError::IncompletePasswordCredentials))
        ));
    }

    #[test]
    fn test_certificate_pair_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("cert.pem");
        let private = dir.path().join("key.pem");
        std::fs::write(&public, "PUBLIC PEM").unwrap();
        std::fs::write(&private, "PRIVATE PEM").unwrap();

        let input = CredentialsInput {
            public_cert: Some(public),
            private_cert: Some(private),
            ..Default::default()
        };
        match input.resolve().unwrap() {
            Some(CredentialsChoice::New(creds)) => {
                assert_eq!(creds.kind, CredentialsType::PublicKey);
                assert_eq!(creds.public_key.as_deref(), Some("PUBLIC PEM"));
                assert_eq!(creds.private_key, "PRIVATE PEM");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_certificate_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = CredentialsInput {
            public_cert: Some(dir.path().join("missing.pem")),
            private_cert: Some(dir.path().join("missing.key")),
            ..Default::default()
        };
        assert!(matches!(input.resolve(), Err(AdmError::Io(_))));
    }

    #[test]
    fn test_half_certificate_pair_rejected() {
        let input = CredentialsInput {
            private_cert: Some(PathBuf::from("key.pem")),
            ..Default::default()
        };
        assert!(matches!(
            input.resolve(),
            Err(AdmError::Usage(UsageError::IncompleteCertificateCredentials))
        ));
    }
}
