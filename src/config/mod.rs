use std::env;
use std::fmt;

/// Which of the two service variants this process runs. Both share the
/// same server shape; only the store and routes differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Utility,
    Theater,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::Utility => f.write_str("utility"),
            ServiceKind::Theater => f.write_str("theater"),
        }
    }
}

pub struct Config {
    pub service: ServiceKind,
    pub port: u16,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let service = match env::var("SERVICE").as_deref() {
            Ok("theater") => ServiceKind::Theater,
            Ok("utility") | Err(_) => ServiceKind::Utility,
            Ok(other) => {
                tracing::warn!(service = other, "Unknown SERVICE value, defaulting to utility");
                ServiceKind::Utility
            }
        };

        Self {
            service,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8088),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite::memory:".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceKind;

    #[test]
    fn service_kind_displays_lowercase() {
        assert_eq!(ServiceKind::Utility.to_string(), "utility");
        assert_eq!(ServiceKind::Theater.to_string(), "theater");
    }
}
