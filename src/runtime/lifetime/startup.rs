use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;

const ADMIN_EMAIL: &str = "admin@localhost";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 数据库中没有任何账号时创建默认管理层账号
pub async fn seed_admin(storage: &Arc<dyn Storage>) -> Result<Option<i64>> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!("Database already has {} user(s), skipping admin seed", count);
        return Ok(None);
    }
    info!("No users found in database, creating default management account...");

    // 优先使用环境变量中的密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = hash_password(&password)?;

    let admin = storage
        .create_user(CreateUserRequest {
            name: "Administrator".to_string(),
            email: ADMIN_EMAIL.to_string(),
            password: password_hash,
            role: UserRole::Management,
            department: None,
            semester: None,
            enrollment_no: None,
        })
        .await?;

    info!(
        "Default management account created (ID: {}, email: {})",
        admin.id, admin.email
    );
    Ok(Some(admin.id))
}

/// 准备服务器启动的上下文：加密库、存储与迁移、初始账号
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    if let Err(e) = seed_admin(&storage).await {
        warn!("Failed to seed admin account: {}", e);
    }

    Ok(StartupContext { storage })
}
