//! Form validation for registration, profile edits and payout details.

use domains::{DomainError, NewAd, NewUser, PayoutMethod, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
// Indian mobile numbers, optionally prefixed with +91. Matched after spaces
// and hyphens are removed. ASCII digits only: `\d` would admit any script.
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+91)?[6-9][0-9]{9}$").expect("valid phone regex"));
static BANK_ACCOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{9,18}$").expect("valid account regex"));
static IFSC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("valid ifsc regex"));
static UPI_VPA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.\-_]{2,256}@[a-zA-Z]{2,64}$").expect("valid upi regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();
    PHONE.is_match(&compact)
}

pub fn is_valid_bank_account(account: &str) -> bool {
    BANK_ACCOUNT.is_match(account.trim())
}

pub fn is_valid_ifsc(ifsc: &str) -> bool {
    IFSC.is_match(&ifsc.trim().to_ascii_uppercase())
}

pub fn is_valid_upi(vpa: &str) -> bool {
    UPI_VPA.is_match(vpa.trim())
}

/// Reduces a phone number to its ten significant digits so "+91 98450 12345"
/// and "9845012345" identify the same account.
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        12 if digits.starts_with("91") => digits[2..].to_string(),
        _ => digits,
    }
}

pub fn validate_payout_method(method: &PayoutMethod) -> Result<()> {
    match method {
        PayoutMethod::BankTransfer {
            account_holder,
            account_number,
            ifsc,
        } => {
            if account_holder.trim().is_empty() {
                return Err(invalid("account holder name is required"));
            }
            if !is_valid_bank_account(account_number) {
                return Err(invalid("account number must be 9 to 18 digits"));
            }
            if !is_valid_ifsc(ifsc) {
                return Err(invalid("IFSC code is malformed"));
            }
        }
        PayoutMethod::Upi { vpa } => {
            if !is_valid_upi(vpa) {
                return Err(invalid("UPI ID is malformed"));
            }
        }
    }
    Ok(())
}

pub fn validate_new_user(user: &NewUser) -> Result<()> {
    if user.name.trim().is_empty() {
        return Err(invalid("name is required"));
    }
    if !is_valid_email(&user.email) {
        return Err(invalid("email address is malformed"));
    }
    if !is_valid_phone(&user.phone) {
        return Err(invalid("phone number is malformed"));
    }
    Ok(())
}

pub fn validate_new_ad(ad: &NewAd) -> Result<()> {
    if ad.title.trim().is_empty() {
        return Err(invalid("title is required"));
    }
    if !(ad.reward.is_finite() && ad.reward > 0.0) {
        return Err(invalid("reward must be a positive amount"));
    }
    if ad.duration_secs == 0 {
        return Err(invalid("duration must be at least one second"));
    }
    if ad.content_url.trim().is_empty() || ad.thumbnail_url.trim().is_empty() {
        return Err(invalid("content and thumbnail URLs are required"));
    }
    Ok(())
}

fn invalid(msg: &str) -> DomainError {
    DomainError::Validation(msg.to_string())
}
