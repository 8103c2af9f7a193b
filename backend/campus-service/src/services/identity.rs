//! Identity verification seam
//!
//! Signup only checks that an address belongs to the institution. Proving the
//! caller owns that address is the job of an external auth provider, plugged in
//! through [`IdentityVerifier`].

use async_trait::async_trait;

use crate::error::{ServiceError, ServiceResult};
use crate::validators;

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Accept or reject an already-normalised (trimmed, lowercase) email
    async fn verify_email(&self, email: &str) -> ServiceResult<()>;
}

/// Accepts any well-formed address on the configured institutional domain
#[derive(Debug, Clone)]
pub struct InstitutionalDomainVerifier {
    domain: String,
}

impl InstitutionalDomainVerifier {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into().trim_start_matches('@').to_ascii_lowercase(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

#[async_trait]
impl IdentityVerifier for InstitutionalDomainVerifier {
    async fn verify_email(&self, email: &str) -> ServiceResult<()> {
        if !validators::validate_email(email) {
            return Err(ServiceError::InvalidInput(format!(
                "invalid email address: {}",
                validators::mask_email(email)
            )));
        }

        match validators::email_domain(email) {
            Some(domain) if domain == self.domain => Ok(()),
            _ => Err(ServiceError::InvalidInput(format!(
                "email must be a @{} address",
                self.domain
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_accepts_institutional_address() {
        let verifier = InstitutionalDomainVerifier::new("@MyLaurier.ca");
        assert_eq!(verifier.domain(), "mylaurier.ca");
        assert!(verifier.verify_email("ada@mylaurier.ca").await.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_other_domains() {
        let verifier = InstitutionalDomainVerifier::new("mylaurier.ca");

        let err = verifier.verify_email("ada@gmail.com").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        // suffix match is not enough
        assert!(verifier.verify_email("ada@evilmylaurier.ca").await.is_err());
        assert!(verifier.verify_email("not an email").await.is_err());
    }
}
