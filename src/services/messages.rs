//! Maps raw failure text to the short messages shown to users.

/// Keyword groups checked in order; the first hit wins.
const RULES: &[(&[&str], &str)] = &[
    (
        &["timeout", "timed out"],
        "The server took too long to respond. Try again.",
    ),
    (&["already", "email_exists"], "This email is already registered"),
    (&["weak"], "The password must be at least 6 characters"),
    (
        &["invalid_email", "invalid email", "badly formatted"],
        "The email address is not valid",
    ),
    (
        &["email_not_found", "not found", "no user"],
        "User not found",
    ),
    (
        &[
            "invalid_password",
            "invalid_login_credentials",
            "invalid credentials",
            "wrong password",
        ],
        "Incorrect email or password",
    ),
];

#[must_use]
pub fn friendly_message(raw: &str) -> String {
    let lowered = raw.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map_or_else(
            || format!("Something went wrong: {raw}"),
            |(_, message)| (*message).to_string(),
        )
}
