//! Contact form validation.
//!
//! Independent of the weather path. All three fields are checked on every
//! submission; nothing short-circuits, so the user sees every applicable
//! error at once.

pub const ACKNOWLEDGMENT: &str = "Thank you! Your message has been submitted.";

/// One submission attempt's input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Per-field error text; `None` means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn ok(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

/// Validate a submission. Fields are trimmed before the required checks.
pub fn validate(form: &ContactForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if form.name.trim().is_empty() {
        errors.name = Some("Name is required.");
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.email = Some("Email is required.");
    } else if !is_valid_email(email) {
        errors.email = Some("Enter a valid email.");
    }

    if form.message.trim().is_empty() {
        errors.message = Some("Message cannot be empty.");
    }

    errors
}

/// Basic `local@domain.tld` shape check: one `@`, no whitespace, and a dot
/// in the domain with non-empty parts on both sides.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}
