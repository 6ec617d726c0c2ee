use rom_schemas::Credentials;

use crate::error::ClientError;

pub const FILL_ALL_FIELDS: &str = "please fill in all fields";
pub const USERNAME_CHARSET: &str = "username may only contain letters, numbers and underscore";

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Keystroke filter for the username field: drops anything outside
/// `[A-Za-z0-9_]`.
pub fn sanitize_username(raw: &str) -> String {
    raw.chars().filter(|c| is_username_char(*c)).collect()
}

/// Checks shared by login and register. Runs before any request is built.
pub fn validate_credentials(username: &str, password: &str) -> Result<Credentials, ClientError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ClientError::Validation(FILL_ALL_FIELDS.to_string()));
    }
    if !username.chars().all(is_username_char) {
        return Err(ClientError::Validation(USERNAME_CHARSET.to_string()));
    }
    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
