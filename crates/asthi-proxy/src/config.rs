use std::fmt;

use crate::error::ProxyError;

pub const LOVABLE_API_KEY: &str = "LOVABLE_API_KEY";
pub const ELEVENLABS_API_KEY: &str = "ELEVENLABS_API_KEY";
pub const TWILIO_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
pub const TWILIO_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
pub const TWILIO_PHONE_NUMBER: &str = "TWILIO_PHONE_NUMBER";
pub const SENDGRID_API_KEY: &str = "SENDGRID_API_KEY";
pub const SENDGRID_FROM_EMAIL: &str = "SENDGRID_FROM_EMAIL";
pub const SENDGRID_FROM_NAME: &str = "SENDGRID_FROM_NAME";

const DEFAULT_FROM_NAME: &str = "Asthi Care";

/// A credential that never prints itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Vendor credentials and sender identities.
///
/// Every field is optional: a missing value fails only the operation that
/// needs it, with [`ProxyError::Configuration`].
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub ai_gateway_key: Option<Secret>,
    pub elevenlabs_key: Option<Secret>,
    pub twilio: TwilioConfig,
    pub sendgrid: SendGridConfig,
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<Secret>,
    pub from_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SendGridConfig {
    pub api_key: Option<Secret>,
    pub from_email: Option<String>,
    pub from_name: String,
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            ai_gateway_key: get(LOVABLE_API_KEY).map(Secret),
            elevenlabs_key: get(ELEVENLABS_API_KEY).map(Secret),
            twilio: TwilioConfig {
                account_sid: get(TWILIO_ACCOUNT_SID),
                auth_token: get(TWILIO_AUTH_TOKEN).map(Secret),
                from_number: get(TWILIO_PHONE_NUMBER),
            },
            sendgrid: SendGridConfig {
                api_key: get(SENDGRID_API_KEY).map(Secret),
                from_email: get(SENDGRID_FROM_EMAIL),
                from_name: get(SENDGRID_FROM_NAME).unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            },
        }
    }

    /// Names of the variables that are not set, for a startup summary.
    pub fn missing(&self) -> Vec<&'static str> {
        let checks = [
            (LOVABLE_API_KEY, self.ai_gateway_key.is_some()),
            (ELEVENLABS_API_KEY, self.elevenlabs_key.is_some()),
            (TWILIO_ACCOUNT_SID, self.twilio.account_sid.is_some()),
            (TWILIO_AUTH_TOKEN, self.twilio.auth_token.is_some()),
            (TWILIO_PHONE_NUMBER, self.twilio.from_number.is_some()),
            (SENDGRID_API_KEY, self.sendgrid.api_key.is_some()),
            (SENDGRID_FROM_EMAIL, self.sendgrid.from_email.is_some()),
        ];
        checks
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect()
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

pub(crate) fn require<'a, T>(value: &'a Option<T>, name: &'static str) -> Result<&'a T, ProxyError> {
    value.as_ref().ok_or(ProxyError::Configuration(name))
}
