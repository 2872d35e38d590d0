use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub workflow: WorkflowConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse::<u16>()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?.parse::<u16>()?,
        };
        let workflow = WorkflowConfig {
            allow_redecision: match std::env::var("SCHEDULE_ALLOW_REDECISION") {
                Ok(v) => v.parse::<bool>()?,
                Err(_) => false,
            },
        };
        Ok(Self {
            database,
            redis,
            workflow,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

/// Knobs of the schedule approval workflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowConfig {
    /// When `false`, an approved or rejected schedule cannot be decided again.
    pub allow_redecision: bool,
}
