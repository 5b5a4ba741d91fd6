pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::notices::{
    entities::Notice,
    requests::{CreateNoticeRequest, NoticeListQuery, UpdateNoticeRequest},
    responses::NoticeView,
};
use crate::storage::Storage;

pub struct NoticeService {
    storage: Option<Arc<dyn Storage>>,
}

impl NoticeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_notices(
        &self,
        query: NoticeListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_notices(self, query, request).await
    }

    pub async fn get_notice(
        &self,
        notice_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_notice(self, notice_id, request).await
    }

    pub async fn create_notice(
        &self,
        notice_request: CreateNoticeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_notice(self, notice_request, request).await
    }

    pub async fn update_notice(
        &self,
        notice_id: i64,
        update_request: UpdateNoticeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_notice(self, notice_id, update_request, request).await
    }

    pub async fn delete_notice(
        &self,
        notice_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_notice(self, notice_id, request).await
    }
}

/// 补充发布者姓名，保持输入顺序
pub(crate) async fn notice_views(
    storage: &Arc<dyn Storage>,
    notices: Vec<Notice>,
) -> Result<Vec<NoticeView>> {
    let author_ids: Vec<i64> = notices.iter().filter_map(|n| n.created_by).collect();
    let authors = storage.get_users_by_ids(&author_ids).await?;

    Ok(notices
        .into_iter()
        .map(|notice| NoticeView {
            created_by_name: notice
                .created_by
                .and_then(|id| authors.get(&id))
                .map(|u| u.name.clone()),
            notice,
        })
        .collect())
}
