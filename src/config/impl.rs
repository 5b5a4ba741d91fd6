use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::{AppConfig, PortalSettings};

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

impl AppConfig {
    /// 加载配置
    ///
    /// 优先级（低到高）：config.toml → config.{APP_ENV}.toml → PORTAL_* 环境变量 → 常用环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{environment}")).required(false))
            .add_source(
                Environment::with_prefix("PORTAL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option(
                "database.pool_size",
                std::env::var("DATABASE_POOL_SIZE").ok(),
            )?;

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        app_config.validate()?;
        Ok(app_config)
    }

    /// 校验配置的一致性
    fn validate(&self) -> Result<(), ConfigError> {
        if self.is_production()
            && (self.jwt.secret.is_empty() || self.jwt.secret == DEFAULT_JWT_SECRET)
        {
            return Err(ConfigError::Message(
                "jwt.secret must be set to a non-default value in production".to_string(),
            ));
        }

        if self.portal.default_assignment_max_marks <= 0 {
            return Err(ConfigError::Message(
                "portal.default_assignment_max_marks must be positive".to_string(),
            ));
        }

        if self.portal.notice_default_limit == 0
            || self.portal.notice_default_limit > self.portal.notice_max_limit
        {
            return Err(ConfigError::Message(
                "portal.notice_default_limit must be within 1..=notice_max_limit".to_string(),
            ));
        }

        Ok(())
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

impl PortalSettings {
    /// 将请求的公告条数收敛到允许范围内
    pub fn notice_limit(&self, requested: Option<u64>) -> u64 {
        match requested {
            Some(0) | None => self.notice_default_limit,
            Some(n) => n.min(self.notice_max_limit),
        }
    }
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            notice_default_limit: 20,
            notice_max_limit: 100,
            default_assignment_max_marks: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_limit_defaults_and_clamps() {
        let settings = PortalSettings::default();
        assert_eq!(settings.notice_limit(None), 20);
        assert_eq!(settings.notice_limit(Some(0)), 20);
        assert_eq!(settings.notice_limit(Some(5)), 5);
        assert_eq!(settings.notice_limit(Some(10_000)), 100);
    }
}
