//! 服务层测试共用的内存库与请求构造

use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, test::TestRequest, web};

use crate::config::DatabaseConfig;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;

/// 已迁移的内存 SQLite
pub(crate) async fn memory_storage() -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 10,
    };
    Arc::new(SeaOrmStorage::connect(&config).await.unwrap())
}

pub(crate) async fn add_user(storage: &Arc<dyn Storage>, email: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            password: "$argon2id$placeholder".to_string(),
            role,
            department: Some("CSE".to_string()),
            semester: (role == UserRole::Student).then_some(5),
            enrollment_no: None,
        })
        .await
        .unwrap()
}

/// 以 `user` 身份发起的请求，等同于通过了 RequireJWT
pub(crate) fn request_as(storage: &Arc<dyn Storage>, user: &User) -> HttpRequest {
    let req = TestRequest::default()
        .app_data(web::Data::new(storage.clone()))
        .to_http_request();
    req.extensions_mut().insert(user.clone());
    req
}

pub(crate) async fn body_json(response: HttpResponse) -> serde_json::Value {
    let bytes = actix_web::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
