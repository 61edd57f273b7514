// File: shroud-core/src/validators.rs
//! Programmatic validation functions for specific sensitive data types.
//!
//! This module provides additional validation logic beyond regular expression
//! matching for sensitive information such as SSNs and payment card numbers.
//! These functions help reduce false positives by applying structural and
//! checksum checks. Rules opt in via `programmatic_validation`; the default
//! rule table ships with validation disabled so pattern matches pass through
//! untouched.
//!
//! License: MIT OR APACHE 2.0

/// Helper function to validate SSN based on US Social Security Administration rules.
///
/// This implementation aims for a robust programmatic check without external data.
/// It validates the structural components against known invalid patterns.
///
/// # Arguments
///
/// * `ssn` - The SSN string slice to validate. Hyphens are optional, so both
///   "XXX-XX-XXXX" and "XXXXXXXXX" are accepted.
///
/// # Returns
///
/// `true` if the SSN passes basic structural and invalid pattern checks, `false` otherwise.
pub fn is_valid_ssn_programmatically(ssn: &str) -> bool {
    let digits: String = ssn.chars().filter(|c| *c != '-').collect();

    if digits.len() != 9 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let (area, rest) = digits.split_at(3);
    let (group, serial) = rest.split_at(2);

    let Some(area_num) = area.parse::<u16>().ok() else { return false; };
    let Some(group_num) = group.parse::<u8>().ok() else { return false; };
    let Some(serial_num) = serial.parse::<u16>().ok() else { return false; };

    // Check for invalid SSN patterns based on historical and current rules.
    let invalid_area = (area_num == 0) || (area_num == 666) || (area_num >= 800);
    let invalid_group = group_num == 0;
    let invalid_serial = serial_num == 0;

    !(invalid_area || invalid_group || invalid_serial)
}

/// Validates a number using the Luhn algorithm.
///
/// The Luhn algorithm, also known as the Mod 10 algorithm, is a simple checksum
/// formula used to validate a variety of identification numbers, such as
/// credit card numbers.
///
/// # Arguments
///
/// * `num_str` - A string slice containing only digits.
///
/// # Returns
///
/// `true` if the number is valid according to the Luhn algorithm, `false` otherwise.
pub fn is_valid_luhn(num_str: &str) -> bool {
    let mut sum = 0;
    let mut alternate = false;

    for c in num_str.chars().rev() {
        let Some(mut digit) = c.to_digit(10) else { return false; };

        if alternate {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        alternate = !alternate;
    }

    sum % 10 == 0
}

/// Helper function to validate credit card numbers based on the Luhn algorithm.
///
/// This function first strips all non-digit characters from the input string
/// and then applies the Luhn algorithm to the resulting digit string.
///
/// # Arguments
///
/// * `cc_number` - The credit card number string slice to validate.
///
/// # Returns
///
/// `true` if the number is valid according to the Luhn algorithm, `false` otherwise.
pub fn is_valid_credit_card_programmatically(cc_number: &str) -> bool {
    let digits: String = cc_number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return false;
    }
    is_valid_luhn(&digits)
}
