use std::env;

/// Porta fixa do servidor HTTP
pub const PORT: u16 = 8080;

/// Configuration read from the environment (normally populated from `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Base path the user routes are mounted under, e.g. `/api/users`
    pub api_uri: String,
    pub db_name: String,
    pub collection_name: String,
    pub mongo_uri: String,
    pub host: String,
    pub swagger_ui: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| format!("{} must be set", key))
        };

        let api_uri = normalize_base_path(&required("API_URI")?)?;

        Ok(Self {
            api_uri,
            db_name: required("DB_NAME")?,
            collection_name: required("COLLECTION_NAME")?,
            mongo_uri: required("MONGO_URI")?,
            host: lookup("HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            swagger_ui: lookup("ENABLE_SWAGGER_UI")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), PORT)
    }
}

/// `/users/` e `/users` registram as mesmas rotas
fn normalize_base_path(raw: &str) -> Result<String, String> {
    if !raw.starts_with('/') {
        return Err(format!("API_URI must start with '/', got '{}'", raw));
    }

    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("API_URI must not be the root path".to_string());
    }

    Ok(trimmed.to_string())
}

/// Strips the `user:password@` part so the URI can be logged.
pub fn redact_uri(uri: &str) -> String {
    match (uri.find("://"), uri.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}***{}", &uri[..scheme_end + 3], &uri[at..])
        }
        _ => uri.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("API_URI", "/api/users/"),
        ("DB_NAME", "demo"),
        ("COLLECTION_NAME", "users"),
        ("MONGO_URI", "mongodb://localhost:27017"),
    ];

    #[test]
    fn test_loads_required_values() {
        let config = Config::from_lookup(lookup_from(BASE)).unwrap();
        assert_eq!(config.api_uri, "/api/users");
        assert_eq!(config.db_name, "demo");
        assert_eq!(config.collection_name, "users");
        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 8080));
        assert!(!config.swagger_ui);
    }

    #[test]
    fn test_missing_variable_is_named() {
        let pairs: Vec<_> = BASE.iter().copied().filter(|(k, _)| *k != "DB_NAME").collect();
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert_eq!(err, "DB_NAME must be set");
    }

    #[test]
    fn test_base_path_must_be_absolute() {
        let mut pairs = BASE.to_vec();
        pairs[0] = ("API_URI", "users");
        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());

        pairs[0] = ("API_URI", "/");
        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());
    }

    #[test]
    fn test_swagger_flag() {
        let mut pairs = BASE.to_vec();
        pairs.push(("ENABLE_SWAGGER_UI", "true"));
        assert!(Config::from_lookup(lookup_from(&pairs)).unwrap().swagger_ui);
    }

    #[test]
    fn test_redact_uri() {
        assert_eq!(
            redact_uri("mongodb://admin:secret@db:27017/?authSource=admin"),
            "mongodb://***@db:27017/?authSource=admin"
        );
        assert_eq!(redact_uri("mongodb://localhost:27017"), "mongodb://localhost:27017");
    }
}
