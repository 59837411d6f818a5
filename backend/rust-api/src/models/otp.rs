use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending one-time password. All records for an email are dropped once any
/// of them is redeemed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRecord {
    pub email: String,
    pub otp: String,
    #[serde(rename = "created", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}
