use super::domain::CandidateSubmission;

/// Identity fields after boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CandidateIdentity {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("candidate name is required")]
    MissingName,
    #[error("'{0}' is not a valid e-mail address")]
    InvalidEmail(String),
}

/// Trims and checks the identity fields. Ratings are not validated here; scoring
/// clamps them.
pub(crate) fn validate_identity(
    submission: &CandidateSubmission,
) -> Result<CandidateIdentity, IntakeError> {
    let name = submission.name.trim();
    if name.is_empty() {
        return Err(IntakeError::MissingName);
    }

    let email = submission.email.trim();
    if !is_plausible_email(email) {
        return Err(IntakeError::InvalidEmail(email.to_string()));
    }

    Ok(CandidateIdentity {
        name: name.to_string(),
        email: email.to_string(),
    })
}

fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
