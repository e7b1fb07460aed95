//! Grouping of validation messages by field name.
//!
//! Validation messages follow the `"<field> <description>"` convention, so the
//! first space-delimited token is taken as the field. This breaks for field
//! names containing spaces; swap out [`group_violations`] if that matters.

use std::collections::BTreeMap;

/// Key used for messages that do not start with a field name
pub const GENERAL_KEY: &str = "general";

/// Field name to the messages reported against it, in input order
pub type ViolationDetails = BTreeMap<String, Vec<String>>;

pub fn group_violations<S: AsRef<str>>(messages: &[S]) -> ViolationDetails {
    let mut grouped = ViolationDetails::new();

    for message in messages {
        let message = message.as_ref();
        let key = match message.find(' ') {
            Some(idx) if idx > 0 => &message[..idx],
            _ => GENERAL_KEY,
        };
        grouped
            .entry(key.to_string())
            .or_default()
            .push(message.to_string());
    }

    grouped
}
