//! Stripe webhook signature verification.
//!
//! Checks the `Stripe-Signature` header (HMAC-SHA256 over
//! `"<timestamp>.<raw body>"`) and the signing timestamp before the body is
//! trusted as a [`StripeWebhookEvent`].

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use super::webhook_types::StripeWebhookEvent;

/// Oldest signature accepted, in seconds.
const MAX_EVENT_AGE_SECS: i64 = 300;

/// How far in the future a signature may be, in seconds.
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Reasons a webhook delivery is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    #[error("malformed signature header: {0}")]
    MalformedHeader(String),

    #[error("no signature matches the payload")]
    InvalidSignature,

    #[error("signature timestamp is too old")]
    TimestampOutOfRange,

    #[error("signature timestamp is in the future")]
    InvalidTimestamp,

    #[error("invalid event payload: {0}")]
    InvalidPayload(String),
}

/// Parsed `Stripe-Signature` header.
///
/// Stripe sends one `v1` entry per active signing secret, so there may be
/// several; any one matching is enough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses `t=<unix>,v1=<hex>[,v1=<hex>...]`. Other schemes are ignored.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| WebhookError::MalformedHeader(format!("bad entry {part:?}")))?;

            match key {
                "t" => {
                    timestamp = Some(value.parse::<i64>().map_err(|_| {
                        WebhookError::MalformedHeader("invalid timestamp".to_string())
                    })?);
                }
                "v1" => {
                    let signature = hex::decode(value).map_err(|_| {
                        WebhookError::MalformedHeader("invalid v1 signature".to_string())
                    })?;
                    v1_signatures.push(signature);
                }
                _ => {}
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| WebhookError::MalformedHeader("missing timestamp".to_string()))?;
        if v1_signatures.is_empty() {
            return Err(WebhookError::MalformedHeader(
                "missing v1 signature".to_string(),
            ));
        }

        Ok(Self {
            timestamp,
            v1_signatures,
        })
    }
}

/// Verifies deliveries against the endpoint's signing secret.
pub struct StripeWebhookVerifier {
    secret: SecretString,
}

impl StripeWebhookVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Verifies `payload` against `signature_header` and parses the event.
    ///
    /// # Errors
    ///
    /// - `MalformedHeader` if the header cannot be parsed
    /// - `TimestampOutOfRange` / `InvalidTimestamp` outside the tolerance window
    /// - `InvalidSignature` if no `v1` signature matches
    /// - `InvalidPayload` if the verified body is not an event envelope
    pub fn verify(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeWebhookEvent, WebhookError> {
        self.verify_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    fn verify_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<StripeWebhookEvent, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;
        check_timestamp(header.timestamp, now)?;

        let expected = self.signature(header.timestamp, payload)?;
        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_eq(&expected, candidate));
        if !matched {
            return Err(WebhookError::InvalidSignature);
        }

        serde_json::from_slice(payload).map_err(|e| WebhookError::InvalidPayload(e.to_string()))
    }

    fn signature(&self, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, WebhookError> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| WebhookError::InvalidSignature)?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

fn check_timestamp(timestamp: i64, now: i64) -> Result<(), WebhookError> {
    let age = now - timestamp;
    if age > MAX_EVENT_AGE_SECS {
        return Err(WebhookError::TimestampOutOfRange);
    }
    if age < -MAX_CLOCK_SKEW_SECS {
        return Err(WebhookError::InvalidTimestamp);
    }
    Ok(())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret_12345";
    const NOW: i64 = 1_717_200_000;
    const PAYLOAD: &str = r#"{"id":"evt_1","type":"checkout.session.completed","data":{"object":{}}}"#;

    fn verifier() -> StripeWebhookVerifier {
        StripeWebhookVerifier::new(SecretString::new(SECRET.to_string()))
    }

    fn sign(secret: &str, timestamp: i64, payload: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{timestamp}.{payload}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn header(timestamp: i64, signature: &str) -> String {
        format!("t={timestamp},v1={signature}")
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Header Parsing
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn parses_timestamp_and_signatures() {
        let parsed =
            SignatureHeader::parse(&format!("t=42,v1={},v1={},v0=ignored", "a".repeat(64), "b".repeat(64)))
                .unwrap();

        assert_eq!(parsed.timestamp, 42);
        assert_eq!(parsed.v1_signatures.len(), 2);
        assert_eq!(parsed.v1_signatures[0].len(), 32);
    }

    #[test]
    fn rejects_incomplete_headers() {
        for raw in ["v1=abcd", "t=42", "t=soon,v1=abcd", "t=42,v1=xyz", "t42"] {
            assert!(
                matches!(SignatureHeader::parse(raw), Err(WebhookError::MalformedHeader(_))),
                "{raw}"
            );
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Verification
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn accepts_valid_signature() {
        let signature = sign(SECRET, NOW, PAYLOAD);

        let event = verifier()
            .verify_at(PAYLOAD.as_bytes(), &header(NOW, &signature), NOW)
            .unwrap();

        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, "checkout.session.completed");
    }

    #[test]
    fn accepts_any_matching_signature_when_secrets_roll() {
        let stale = sign("whsec_old", NOW, PAYLOAD);
        let current = sign(SECRET, NOW, PAYLOAD);
        let raw = format!("t={NOW},v1={stale},v1={current}");

        assert!(verifier().verify_at(PAYLOAD.as_bytes(), &raw, NOW).is_ok());
    }

    #[test]
    fn rejects_wrong_secret_and_tampered_body() {
        let foreign = sign("whsec_other", NOW, PAYLOAD);
        assert_eq!(
            verifier()
                .verify_at(PAYLOAD.as_bytes(), &header(NOW, &foreign), NOW)
                .unwrap_err(),
            WebhookError::InvalidSignature
        );

        let signature = sign(SECRET, NOW, PAYLOAD);
        let tampered = PAYLOAD.replace("evt_1", "evt_2");
        assert_eq!(
            verifier()
                .verify_at(tampered.as_bytes(), &header(NOW, &signature), NOW)
                .unwrap_err(),
            WebhookError::InvalidSignature
        );
    }

    #[test]
    fn enforces_timestamp_window() {
        let at = |timestamp: i64| {
            let signature = sign(SECRET, timestamp, PAYLOAD);
            verifier().verify_at(PAYLOAD.as_bytes(), &header(timestamp, &signature), NOW)
        };

        assert!(at(NOW - MAX_EVENT_AGE_SECS).is_ok());
        assert_eq!(
            at(NOW - MAX_EVENT_AGE_SECS - 1).unwrap_err(),
            WebhookError::TimestampOutOfRange
        );
        assert!(at(NOW + MAX_CLOCK_SKEW_SECS).is_ok());
        assert_eq!(
            at(NOW + MAX_CLOCK_SKEW_SECS + 1).unwrap_err(),
            WebhookError::InvalidTimestamp
        );
    }

    #[test]
    fn signed_garbage_is_invalid_payload() {
        let signature = sign(SECRET, NOW, "not json");
        assert!(matches!(
            verifier().verify_at(b"not json", &header(NOW, &signature), NOW),
            Err(WebhookError::InvalidPayload(_))
        ));
    }

    #[test]
    fn constant_time_eq_checks_length_and_content() {
        assert!(constant_time_eq(&[1, 2, 3], &[1, 2, 3]));
        assert!(!constant_time_eq(&[1, 2, 3], &[1, 2, 4]));
        assert!(!constant_time_eq(&[1, 2], &[1, 2, 3]));
    }
}
