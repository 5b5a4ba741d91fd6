pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::grievances::{
    entities::Grievance,
    requests::{CreateGrievanceRequest, GrievanceListQuery, UpdateGrievanceStatusRequest},
    responses::GrievanceResponse,
};
use crate::storage::Storage;

pub struct GrievanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl GrievanceService {
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

    pub async fn list_grievances(
        &self,
        query: GrievanceListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_grievances(self, query, request).await
    }

    pub async fn get_grievance(
        &self,
        grievance_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_grievance(self, grievance_id, request).await
    }

    pub async fn create_grievance(
        &self,
        grievance_request: CreateGrievanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grievance(self, grievance_request, request).await
    }

    // 状态推进
    pub async fn update_status(
        &self,
        grievance_id: i64,
        status_request: UpdateGrievanceStatusRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        status::update_status(self, grievance_id, status_request, request).await
    }

    pub async fn delete_grievance(
        &self,
        grievance_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_grievance(self, grievance_id, request).await
    }
}

/// 申诉对外输出的唯一途径，匿名申诉在这里脱敏
pub(crate) async fn grievance_responses(
    storage: &Arc<dyn Storage>,
    grievances: Vec<Grievance>,
) -> Result<Vec<GrievanceResponse>> {
    let author_ids: Vec<i64> = grievances
        .iter()
        .filter(|g| !g.is_anonymous)
        .map(|g| g.user_id)
        .collect();
    let authors = storage.get_users_by_ids(&author_ids).await?;

    Ok(grievances
        .into_iter()
        .map(|grievance| {
            let author = authors.get(&grievance.user_id);
            GrievanceResponse::from_parts(grievance, author)
        })
        .collect())
}

pub(crate) async fn grievance_response(
    storage: &Arc<dyn Storage>,
    grievance: Grievance,
) -> Result<GrievanceResponse> {
    let author = if grievance.is_anonymous {
        None
    } else {
        storage.get_user_by_id(grievance.user_id).await?
    };
    Ok(GrievanceResponse::from_parts(grievance, author.as_ref()))
}
