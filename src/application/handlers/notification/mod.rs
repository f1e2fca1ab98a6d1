//! Notification handlers.

mod trigger_expiry_check;

pub use trigger_expiry_check::{
    ExpiryCheckReport, TriggerExpiryCheckCommand, TriggerExpiryCheckHandler,
};
