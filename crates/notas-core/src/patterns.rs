//! Regex patterns for fiscal identifiers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Identifier attribute of an information block: a 3-letter schema
    /// prefix ("NFe", "CTe") followed by the 44-digit access key.
    pub static ref ACCESS_KEY_ID: Regex = Regex::new(
        r"^([A-Za-z]{3})(\d{44})$"
    ).unwrap();

    /// A four-digit CFOP code.
    pub static ref CFOP_CODE: Regex = Regex::new(
        r"^\d{4}$"
    ).unwrap();
}

/// Length of an access key.
pub const ACCESS_KEY_LEN: usize = 44;

/// Extract the access key from an identifier attribute.
///
/// Well-formed identifiers drop their 3-character prefix. Anything else
/// falls back to its trailing 44 characters, or to an empty key when shorter.
pub fn access_key_from_id(id: &str) -> String {
    let id = id.trim();
    if let Some(caps) = ACCESS_KEY_ID.captures(id) {
        return caps[2].to_string();
    }

    let chars: Vec<char> = id.chars().collect();
    if chars.len() < ACCESS_KEY_LEN {
        return String::new();
    }
    chars[chars.len() - ACCESS_KEY_LEN..].iter().collect()
}
