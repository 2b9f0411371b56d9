//! Profile form checks.

use thiserror::Error;

use crate::images::{self, UploadError};
use crate::models::ProfileUpdate;

pub const YEAR_OPTIONS: &[&str] = &[
    "1st Year",
    "2nd Year",
    "3rd Year",
    "4th Year",
    "Graduate",
    "Post Graduate",
    "PhD",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Phone number must be 10 digits")]
    PhoneDigits,
    #[error("New passwords do not match")]
    PasswordMismatch,
    #[error("New password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Please select an image file")]
    NotAnImage,
    #[error("Image size must be less than 5MB")]
    ImageTooLarge,
}

/// An empty phone number is allowed; otherwise exactly ten digits after stripping separators
pub fn validate_phone(phone: &str) -> Result<(), ProfileError> {
    if phone.is_empty() {
        return Ok(());
    }
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if digits != 10 {
        return Err(ProfileError::PhoneDigits);
    }
    Ok(())
}

pub fn validate_profile(update: &ProfileUpdate) -> Result<(), ProfileError> {
    validate_phone(&update.phone_number)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.new_password != self.confirm_password {
            return Err(ProfileError::PasswordMismatch);
        }
        if self.new_password.chars().count() < crate::auth_flow::MIN_PASSWORD_LEN {
            return Err(ProfileError::PasswordTooShort);
        }
        Ok(())
    }
}

/// Same limits as report images, profile wording
pub fn validate_picture(mime: &str, size: u64) -> Result<(), ProfileError> {
    images::validate_file(mime, size).map_err(|e| match e {
        UploadError::TooLarge => ProfileError::ImageTooLarge,
        _ => ProfileError::NotAnImage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_must_have_ten_digits() {
        assert_eq!(validate_phone(""), Ok(()));
        assert_eq!(validate_phone("98765 43210"), Ok(()));
        assert_eq!(validate_phone("+91-98765"), Err(ProfileError::PhoneDigits));
        assert_eq!(validate_phone("98765432101"), Err(ProfileError::PhoneDigits));
        assert_eq!(ProfileError::PhoneDigits.to_string(), "Phone number must be 10 digits");
    }

    #[test]
    fn test_password_change_checks() {
        let mismatch = PasswordChange {
            old_password: "old".into(),
            new_password: "secret1".into(),
            confirm_password: "secret2".into(),
        };
        assert_eq!(mismatch.validate(), Err(ProfileError::PasswordMismatch));

        let short = PasswordChange {
            new_password: "abc".into(),
            confirm_password: "abc".into(),
            ..mismatch.clone()
        };
        assert_eq!(short.validate().unwrap_err().to_string(), "New password must be at least 6 characters");

        let ok = PasswordChange {
            new_password: "secret1".into(),
            confirm_password: "secret1".into(),
            ..mismatch
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_picture_messages() {
        assert_eq!(validate_picture("text/plain", 1), Err(ProfileError::NotAnImage));
        assert_eq!(validate_picture("image/png", 6 * 1024 * 1024), Err(ProfileError::ImageTooLarge));
        assert_eq!(validate_picture("image/webp", 1024), Ok(()));
    }
}
