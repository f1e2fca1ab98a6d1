//! Storage key derivation for membership records.
//!
//! Records live at `users/<encoded email>.json` inside the `membership`
//! namespace. Encoding matches JavaScript's `encodeURIComponent`, so keys
//! written by the old site code and by this crate line up.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::domain::foundation::Email;

/// Blob store namespace holding membership records.
pub const MEMBERSHIP_NAMESPACE: &str = "membership";

/// Characters `encodeURIComponent` leaves alone besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes `value` the way `encodeURIComponent` does.
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Key of a membership record inside the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Derives the key for `email`. The email is encoded verbatim.
    pub fn for_email(email: &Email) -> Self {
        Self(format!("users/{}.json", encode_uri_component(email.as_str())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;
    use proptest::prelude::*;

    fn key(raw: &str) -> String {
        StorageKey::for_email(&Email::new(raw).unwrap()).as_str().to_string()
    }

    #[test]
    fn encodes_at_sign() {
        assert_eq!(key("test@example.com"), "users/test%40example.com.json");
    }

    #[test]
    fn encodes_space_as_percent_twenty() {
        assert_eq!(key("a b@x.com"), "users/a%20b%40x.com.json");
    }

    #[test]
    fn encodes_plus_and_slash() {
        assert_eq!(key("a+tag/x@y.jp"), "users/a%2Btag%2Fx%40y.jp.json");
    }

    #[test]
    fn leaves_uri_component_marks_alone() {
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
    }

    #[test]
    fn encodes_multibyte_as_utf8() {
        assert_eq!(encode_uri_component("競馬"), "%E7%AB%B6%E9%A6%AC");
    }

    #[test]
    fn keeps_case() {
        assert_ne!(key("Test@Example.com"), key("test@example.com"));
    }

    proptest! {
        #[test]
        fn encoding_round_trips(raw in "\\PC{1,40}") {
            let encoded = encode_uri_component(&raw);
            let decoded = percent_decode_str(&encoded).decode_utf8().unwrap();
            prop_assert_eq!(decoded.as_ref(), raw.as_str());
        }

        #[test]
        fn encoded_component_never_contains_path_separators(raw in "\\PC{1,40}") {
            let encoded = encode_uri_component(&raw);
            prop_assert!(!encoded.contains('/'));
            prop_assert!(!encoded.contains('\\'));
        }

        #[test]
        fn distinct_emails_get_distinct_keys(a in "[a-zA-Z0-9@. +]{1,20}", b in "[a-zA-Z0-9@. +]{1,20}") {
            prop_assume!(a != b);
            prop_assert_ne!(key(&a), key(&b));
        }
    }
}
