use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub session_secret: String,
    pub smtp: SmtpConfig,
}

#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Mailbox used as the From header, e.g. `Congreso de Tecnología <congreso@example.org>`.
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = required("DATABASE_URL")?;
        let session_secret = required("SESSION_SECRET")?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let smtp_user = required("SMTP_USER")?;
        let smtp = SmtpConfig {
            host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            password: required("SMTP_PASS")?,
            from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| format!("Congreso de Tecnología <{}>", smtp_user)),
            username: smtp_user,
        };

        Ok(Config {
            database_url,
            host,
            port,
            session_secret,
            smtp,
        })
    }
}

fn required(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("{} debe estar definido en .env", name))
}
