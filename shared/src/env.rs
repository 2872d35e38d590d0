use std::env;

#[derive(Default, Debug, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

// Debug builds default to development, release builds to production.
// `ENV` overrides either way.
pub fn which() -> Environment {
    #[cfg(debug_assertions)]
    let default_env = Environment::Development;
    #[cfg(not(debug_assertions))]
    let default_env = Environment::Production;

    match env::var("ENV") {
        Err(_) => default_env,
        Ok(v) => match v.as_str() {
            "production" => Environment::Production,
            "development" => Environment::Development,
            _ => default_env,
        },
    }
}
