use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub data_file: String,
    pub jwt_secret: String,
    /// SMTP transport for OTP mail. When absent, OTPs are logged instead of
    /// mailed (dev behavior).
    pub smtp: Option<SmtpConfig>,
    pub rate_limit_per_minute: u32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let config_builder = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", env)).required(false), // Allow missing config file, fallback to ENV
            )
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let settings = config_builder.build()?;

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let data_file = settings
            .get_string("storage.data_file")
            .or_else(|_| env::var("DATA_FILE"))
            .unwrap_or_else(|_| "db.json".to_string());

        let jwt_secret = settings
            .get_string("auth.jwt_secret")
            .or_else(|_| env::var("JWT_SECRET"))
            .unwrap_or_else(|_| {
                if env == "prod" {
                    panic!("FATAL: JWT_SECRET must be set in production!");
                }
                eprintln!("WARNING: Using default JWT_SECRET (dev mode only!)");
                "dev-secret-only-for-local-testing".to_string()
            });

        let smtp = Self::load_smtp(&settings);

        let rate_limit_per_minute = settings
            .get_string("rate_limit.per_minute")
            .ok()
            .or_else(|| env::var("RATE_LIMIT_PER_MINUTE").ok())
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(60);

        Ok(Config {
            bind_addr,
            data_file,
            jwt_secret,
            smtp,
            rate_limit_per_minute,
        })
    }

    fn load_smtp(settings: &config::Config) -> Option<SmtpConfig> {
        let host = settings
            .get_string("smtp.host")
            .or_else(|_| env::var("SMTP_HOST"))
            .ok()?;
        let user = settings
            .get_string("smtp.user")
            .or_else(|_| env::var("SMTP_USER"))
            .ok()?;
        let password = settings
            .get_string("smtp.password")
            .or_else(|_| env::var("SMTP_PASS"))
            .ok()?;

        let port = settings
            .get_string("smtp.port")
            .ok()
            .or_else(|| env::var("SMTP_PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(587);

        let from = settings
            .get_string("smtp.from")
            .ok()
            .or_else(|| env::var("SMTP_FROM").ok())
            .unwrap_or_else(|| user.clone());

        Some(SmtpConfig {
            host,
            port,
            user,
            password,
            from,
        })
    }

    /// Defaults suitable for tests: in-repo data file path is never touched
    /// because tests inject a memory store.
    pub fn for_tests() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            data_file: "db-test.json".to_string(),
            jwt_secret: "test-secret".to_string(),
            smtp: None,
            rate_limit_per_minute: 600,
        }
    }
}
