use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GrievanceService, grievance_response};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{current_requester, not_found};

pub async fn get_grievance(
    service: &GrievanceService,
    grievance_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    let grievance = match storage.get_grievance_by_id(grievance_id).await {
        Ok(grievance) => grievance,
        Err(e) => return Ok(e.to_response("get grievance")),
    };

    // 不存在与无权访问对学生返回同样的 403
    let owner = grievance.as_ref().map(|g| g.user_id);
    if let Err(e) = AccessPolicy::check(&requester, Resource::Grievance, Action::Read, owner) {
        return Ok(e.to_response("get grievance"));
    }

    let Some(grievance) = grievance else {
        return Ok(not_found(ErrorCode::GrievanceNotFound, "Grievance not found"));
    };

    match grievance_response(&storage, grievance).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Grievance retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("get grievance")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    use crate::models::grievances::requests::CreateGrievanceRequest;
    use crate::models::users::entities::UserRole;
    use crate::services::testing::{add_user, body_json, memory_storage, request_as};

    #[actix_web::test]
    async fn test_student_denial_does_not_reveal_existence() {
        let storage = memory_storage().await;
        let owner = add_user(&storage, "owner@campus.edu", UserRole::Student).await;
        let other = add_user(&storage, "other@campus.edu", UserRole::Student).await;
        let grievance = storage
            .create_grievance(
                owner.id,
                CreateGrievanceRequest {
                    category: "Exam".to_string(),
                    description: "Re-evaluation".to_string(),
                    is_anonymous: false,
                },
            )
            .await
            .unwrap();

        let service = GrievanceService::new_lazy();
        let req = request_as(&storage, &other);

        let existing = get_grievance(&service, grievance.id, &req).await.unwrap();
        let missing = get_grievance(&service, grievance.id + 1000, &req)
            .await
            .unwrap();

        assert_eq!(existing.status(), StatusCode::FORBIDDEN);
        assert_eq!(missing.status(), StatusCode::FORBIDDEN);

        let existing = body_json(existing).await;
        let missing = body_json(missing).await;
        assert_eq!(existing["success"], false);
        assert_eq!(existing["code"], missing["code"]);
        assert_eq!(existing["message"], missing["message"]);
        assert!(existing.get("data").is_none());
        assert!(missing.get("data").is_none());
    }

    #[actix_web::test]
    async fn test_owner_reads_own_and_staff_get_not_found() {
        let storage = memory_storage().await;
        let owner = add_user(&storage, "mine@campus.edu", UserRole::Student).await;
        let admin = add_user(&storage, "admin@campus.edu", UserRole::Management).await;
        let grievance = storage
            .create_grievance(
                owner.id,
                CreateGrievanceRequest {
                    category: "Hostel".to_string(),
                    description: "Leaking tap".to_string(),
                    is_anonymous: true,
                },
            )
            .await
            .unwrap();

        let service = GrievanceService::new_lazy();

        let own = get_grievance(&service, grievance.id, &request_as(&storage, &owner))
            .await
            .unwrap();
        assert_eq!(own.status(), StatusCode::OK);

        let missing = get_grievance(&service, grievance.id + 1000, &request_as(&storage, &admin))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let body = body_json(missing).await;
        assert_eq!(body["code"], ErrorCode::GrievanceNotFound as i32);
    }
}
