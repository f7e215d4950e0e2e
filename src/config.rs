use crate::cache::CacheConfig;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// How bearer tokens are verified.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthConfig {
    Supabase {
        project_ref: String,
        anon_key: String,
    },
    SharedSecret(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub redis_url: String,
    pub port: u16,
    pub auth: AuthConfig,
    pub run_migrations: bool,
    pub cache: CacheConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::from_lookup(|name| std::env::var(name).ok())?;
        config.cache = CacheConfig::from_env();
        Ok(config)
    }

    /// Build from any variable source. Cache TTLs stay at their defaults.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let port = match var("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("'{raw}' is not a port number"),
            })?,
            None => 8080,
        };

        let auth = match (var("SUPABASE_URL"), var("JWT_SECRET")) {
            (Some(url), _) => AuthConfig::Supabase {
                project_ref: project_ref(&url)?,
                anon_key: required("SUPABASE_ANON_KEY")?,
            },
            (None, Some(secret)) => AuthConfig::SharedSecret(secret),
            (None, None) => return Err(ConfigError::Missing("SUPABASE_URL or JWT_SECRET")),
        };

        let run_migrations = var("RUN_MIGRATIONS")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            redis_url: required("REDIS_URL")?,
            port,
            auth,
            run_migrations,
            cache: CacheConfig::default(),
        })
    }
}

/// `https://PROJECT.supabase.co` -> `PROJECT`.
fn project_ref(supabase_url: &str) -> Result<String, ConfigError> {
    supabase_url
        .trim_end_matches('/')
        .strip_prefix("https://")
        .and_then(|s| s.strip_suffix(".supabase.co"))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::Invalid {
            name: "SUPABASE_URL",
            reason: "expected https://PROJECT.supabase.co".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const BASE: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/artlink"),
        ("REDIS_URL", "redis://localhost"),
    ];

    #[test]
    fn shared_secret_mode_with_defaults() {
        let mut vars = BASE.to_vec();
        vars.push(("JWT_SECRET", "s3cret"));

        let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.port, 8080);
        assert!(!config.run_migrations);
        assert_eq!(config.auth, AuthConfig::SharedSecret("s3cret".into()));
    }

    #[test]
    fn supabase_url_takes_precedence() {
        let mut vars = BASE.to_vec();
        vars.extend([
            ("SUPABASE_URL", "https://abcd.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("JWT_SECRET", "ignored"),
            ("RUN_MIGRATIONS", "true"),
            ("PORT", "9000"),
        ]);

        let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.port, 9000);
        assert!(config.run_migrations);
        assert_eq!(
            config.auth,
            AuthConfig::Supabase {
                project_ref: "abcd".into(),
                anon_key: "anon".into(),
            }
        );
    }

    #[test]
    fn missing_auth_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&BASE)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SUPABASE_URL or JWT_SECRET"));
    }

    #[test]
    fn rejects_bad_port_and_bad_supabase_url() {
        let mut vars = BASE.to_vec();
        vars.extend([("JWT_SECRET", "s"), ("PORT", "eighty")]);
        assert!(matches!(
            AppConfig::from_lookup(lookup(&vars)),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));

        assert!(project_ref("http://abcd.supabase.co").is_err());
        assert_eq!(project_ref("https://abcd.supabase.co/").unwrap(), "abcd");
    }
}
