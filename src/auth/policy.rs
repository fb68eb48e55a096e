//! The single authoritative password/email policy.
//!
//! Signup and login validate against the same rules; the strength score is
//! what the web client renders next to the password field on every
//! keystroke, recomputed here once per request.

use regex::Regex;
use serde::Serialize;

/// Minimum password length accepted by the policy.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Special characters that satisfy the "special" requirement.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Boolean requirement flags for a password, one per policy rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordRequirements {
    pub has_min_length: bool,
    pub has_upper_case: bool,
    pub has_lower_case: bool,
    pub has_number: bool,
    pub has_special: bool,
}

impl PasswordRequirements {
    /// Evaluate every requirement flag for `password`. Pure, no side effects.
    #[must_use]
    pub fn evaluate(password: &str) -> Self {
        Self {
            has_min_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            has_upper_case: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lower_case: password.chars().any(|c| c.is_ascii_lowercase()),
            has_number: password.chars().any(|c| c.is_ascii_digit()),
            has_special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    /// Number of satisfied requirements, 0 to 5.
    #[must_use]
    pub const fn satisfied(&self) -> u8 {
        self.has_min_length as u8
            + self.has_upper_case as u8
            + self.has_lower_case as u8
            + self.has_number as u8
            + self.has_special as u8
    }

    /// True when every requirement is met.
    #[must_use]
    pub const fn all(&self) -> bool {
        self.satisfied() == 5
    }
}

/// Qualitative strength bucket derived from the requirement flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub score: u8,
    pub label: &'static str,
}

/// Map a password to its strength band.
///
/// Empty password scores 0 with no label; otherwise the band is a pure
/// function of how many requirements are satisfied.
#[must_use]
pub fn strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength {
            score: 0,
            label: "",
        };
    }

    match PasswordRequirements::evaluate(password).satisfied() {
        0 | 1 => PasswordStrength {
            score: 1,
            label: "Fraca",
        },
        2 | 3 => PasswordStrength {
            score: 2,
            label: "Média",
        },
        4 => PasswordStrength {
            score: 3,
            label: "Forte",
        },
        _ => PasswordStrength {
            score: 4,
            label: "Muito forte",
        },
    }
}

/// Email sanity check shared by signup and login.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .is_ok_and(|re| re.is_match(email))
}
