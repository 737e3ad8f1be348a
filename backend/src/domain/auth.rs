//! Credential validation for the sign-in and sign-up forms.
//!
//! Raw form strings are parsed into closed credential types before an
//! account service sees them. Failures are reported per field using the wire
//! names (`email`, `password`, `confirmPassword`).

use zeroize::Zeroizing;

use super::{EmailAddress, FieldErrors};

/// Minimum password length accepted at sign-up.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Wire name of the email field.
pub const EMAIL_FIELD: &str = "email";
/// Wire name of the password field.
pub const PASSWORD_FIELD: &str = "password";
/// Wire name of the password confirmation field.
pub const CONFIRM_PASSWORD_FIELD: &str = "confirmPassword";

fn parse_email(raw: &str, errors: &mut FieldErrors) -> Option<EmailAddress> {
    EmailAddress::parse(raw)
        .map_err(|err| errors.push(EMAIL_FIELD, err.to_string()))
        .ok()
}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `email` is well formed and normalised.
/// - `password` is non-empty; whitespace is preserved.
///
/// # Examples
/// ```
/// use backend::domain::SignInCredentials;
///
/// let creds = SignInCredentials::try_from_parts("ada@example.com", "secret").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
///
/// let errors = SignInCredentials::try_from_parts("ada", "").unwrap_err();
/// assert!(errors.contains("email"));
/// assert!(errors.contains("password"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignInCredentials {
    /// Validate raw sign-in input.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = parse_email(email, &mut errors);
        if password.is_empty() {
            errors.push(PASSWORD_FIELD, "Password is required");
        }

        match email {
            Some(email) if errors.is_empty() => Ok(Self {
                email,
                password: Zeroizing::new(password.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    /// Email used to look the account up.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-up credentials.
///
/// ## Invariants
/// - `email` is well formed and normalised.
/// - `password` has at least [`PASSWORD_MIN_LEN`] characters and matched its
///   confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignUpCredentials {
    /// Validate raw sign-up input.
    ///
    /// The confirmation is only compared once every field passes on its own,
    /// so a mismatch is never reported alongside other failures.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::SignUpCredentials;
    ///
    /// let errors = SignUpCredentials::try_from_parts("ada@example.com", "abcdef", "abcxyz")
    ///     .unwrap_err();
    /// assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["confirmPassword"]);
    /// ```
    pub fn try_from_parts(
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = parse_email(email, &mut errors);
        if password.chars().count() < PASSWORD_MIN_LEN {
            errors.push(
                PASSWORD_FIELD,
                format!("Password must be at least {PASSWORD_MIN_LEN} characters"),
            );
        }
        if confirm_password.is_empty() {
            errors.push(CONFIRM_PASSWORD_FIELD, "Please confirm your password");
        }
        if errors.is_empty() && password != confirm_password {
            errors.push(CONFIRM_PASSWORD_FIELD, "Passwords do not match");
        }

        match email {
            Some(email) if errors.is_empty() => Ok(Self {
                email,
                password: Zeroizing::new(password.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    /// Email for the new account.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plain-text password to hash before storage.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
