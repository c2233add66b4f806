use plansub_domain::validation::ValidationFlags;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_env: String,
    pub log_level: String,
    pub data_backend: String,
    pub require_statutory_attestation: bool,
    pub enable_dsnp_questions: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let cfg = config::Config::builder()
            .set_default("app_env", "development")?
            .set_default("log_level", "info")?
            .set_default("data_backend", "memory")?
            .set_default("require_statutory_attestation", false)?
            .set_default("enable_dsnp_questions", false)?
            .add_source(config::Environment::default().separator("__"))
            .build()?;
        cfg.try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    pub fn validation_flags(&self) -> ValidationFlags {
        ValidationFlags {
            require_statutory_attestation: self.require_statutory_attestation,
            enable_dsnp_questions: self.enable_dsnp_questions,
        }
    }
}
