//! Tests for the user identity model.

use super::*;
use rstest::rstest;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_serialises_as_string() {
    let id = UserId::new(VALID_ID).expect("valid id");
    let json = serde_json::to_string(&id).expect("serialise");
    assert_eq!(json, format!("\"{VALID_ID}\""));
}

#[rstest]
#[case("ada@example.com", "ada@example.com")]
#[case("  Ada.Lovelace+tracker@Example.co.UK ", "ada.lovelace+tracker@example.co.uk")]
#[case("o'brien@mail.example.org", "o'brien@mail.example.org")]
fn email_accepts_and_normalises(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::parse(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("ada.example.com", UserValidationError::InvalidEmail)]
#[case("ada@", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
#[case("ada@example", UserValidationError::InvalidEmail)]
#[case(".ada@example.com", UserValidationError::InvalidEmail)]
#[case("ada..l@example.com", UserValidationError::InvalidEmail)]
#[case("ada lovelace@example.com", UserValidationError::InvalidEmail)]
fn email_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::parse(raw), Err(expected));
}

#[rstest]
#[case(EMAIL_MAX_LEN, true)]
#[case(EMAIL_MAX_LEN + 1, false)]
fn email_length_is_capped(#[case] length: usize, #[case] ok: bool) {
    let domain = "@example.com";
    let raw = format!("{}{domain}", "a".repeat(length - domain.len()));
    let parsed = EmailAddress::parse(&raw);
    if ok {
        assert_eq!(parsed.expect("email at the limit").as_ref(), raw);
    } else {
        assert_eq!(parsed, Err(UserValidationError::EmailTooLong));
    }
}

#[rstest]
fn password_digest_is_redacted_in_debug_output() {
    let digest = PasswordDigest::new("$argon2id$v=19$secret").expect("digest");
    assert_eq!(format!("{digest:?}"), "PasswordDigest(<redacted>)");
}

#[rstest]
fn password_digest_rejects_blank_input() {
    assert_eq!(
        PasswordDigest::new("  "),
        Err(UserValidationError::EmptyPasswordDigest)
    );
}
