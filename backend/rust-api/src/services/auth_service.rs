use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::errors::AppError;
use crate::middlewares::auth::{JwtClaims, JwtService};
use crate::models::user::{AuthResponse, User, VerifyOtpRequest};
use crate::models::OtpRecord;
use crate::services::email_service::EmailService;
use crate::storage::Database;

/// Email OTP authentication: a six-digit code per request, users created on
/// first successful verification, JWT issued afterwards.
pub struct AuthService {
    db: Database,
    jwt: JwtService,
    email: EmailService,
}

impl AuthService {
    pub fn new(db: Database, jwt: JwtService, email: EmailService) -> Self {
        Self { db, jwt, email }
    }

    pub async fn request_otp(&self, email: String) -> Result<(), AppError> {
        let otp = generate_otp();

        let record = OtpRecord {
            email: email.clone(),
            otp: otp.clone(),
            created_at: Utc::now(),
        };

        self.db
            .update::<_, AppError, _>(move |doc| {
                doc.otps.push(record);
                Ok(())
            })
            .await?;

        // Delivery failure is not surfaced to the caller; the OTP stays
        // redeemable and the operator sees the mail error in the log.
        if let Err(e) = self.email.send_otp_email(&email, &otp).await {
            tracing::error!("Mail error: {:#}", e);
        }

        Ok(())
    }

    pub async fn verify_otp(&self, req: VerifyOtpRequest) -> Result<AuthResponse, AppError> {
        let VerifyOtpRequest { email, otp, name } = req;
        let (email, otp) = match (email, otp) {
            (Some(email), Some(otp)) if !email.is_empty() && !otp.is_empty() => (email, otp),
            _ => return Err(AppError::validation("email and otp required")),
        };

        let user = self
            .db
            .update::<_, AppError, _>(move |doc| {
                let matched = doc
                    .otps
                    .iter()
                    .any(|record| record.email == email && record.otp == otp);
                if !matched {
                    return Err(AppError::validation("invalid otp"));
                }

                let user = match doc.users.iter().find(|u| u.email == email) {
                    Some(user) => user.clone(),
                    None => {
                        let user = User {
                            id: Uuid::new_v4().to_string(),
                            email: email.clone(),
                            name: name
                                .filter(|n| !n.is_empty())
                                .unwrap_or_else(|| local_part(&email).to_string()),
                            created_at: Utc::now(),
                            avatar: None,
                        };
                        doc.users.push(user.clone());
                        user
                    }
                };

                // every outstanding OTP for this email is spent at once
                doc.otps.retain(|record| record.email != user.email);

                Ok(user)
            })
            .await?;

        let token = self
            .jwt
            .issue_for(&user.id, &user.email)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to issue token: {}", e)))?;

        Ok(AuthResponse {
            ok: true,
            token,
            user,
        })
    }

    pub async fn current_user(&self, claims: &JwtClaims) -> Result<User, AppError> {
        let doc = self.db.read().await?;
        doc.users
            .into_iter()
            .find(|u| u.id == claims.sub)
            .ok_or(AppError::NotFound("user"))
    }
}

fn generate_otp() -> String {
    rand::rng().random_range(100_000..1_000_000u32).to_string()
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
