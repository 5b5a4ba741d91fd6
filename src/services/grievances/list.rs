use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GrievanceService, grievance_responses};
use crate::models::grievances::{
    entities::{GrievanceFilter, GrievanceStatus},
    requests::GrievanceListQuery,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Requester, Resource};
use crate::services::{bad_request, current_requester};

/// 将查询参数转换为存储层筛选条件；学生与家长总是只看自己的
fn build_filter(requester: &Requester, query: GrievanceListQuery) -> Result<GrievanceFilter, String> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("All") => None,
        Some(value) => Some(value.parse::<GrievanceStatus>()?),
    };

    let own_only = !requester.role.is_staff() || query.my_grievances.unwrap_or(false);

    Ok(GrievanceFilter {
        user_id: own_only.then_some(requester.id),
        status,
    })
}

pub async fn list_grievances(
    service: &GrievanceService,
    query: GrievanceListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };

    let filter = match build_filter(&requester, query) {
        Ok(filter) => filter,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Grievance, Action::Read, filter.user_id)
    {
        return Ok(e.to_response("fetch grievances"));
    }

    let storage = service.get_storage(request);
    let grievances = match storage.list_grievances(filter).await {
        Ok(grievances) => grievances,
        Err(e) => return Ok(e.to_response("fetch grievances")),
    };

    match grievance_responses(&storage, grievances).await {
        Ok(responses) => Ok(HttpResponse::Ok().json(ApiResponse::success_list(
            responses,
            "Grievances retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("fetch grievances")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn query(status: Option<&str>, mine: Option<bool>) -> GrievanceListQuery {
        GrievanceListQuery {
            status: status.map(str::to_string),
            my_grievances: mine,
        }
    }

    #[test]
    fn test_student_always_scoped_to_self() {
        let student = Requester { id: 4, role: UserRole::Student };
        let filter = build_filter(&student, query(None, Some(false))).unwrap();
        assert_eq!(filter.user_id, Some(4));
    }

    #[test]
    fn test_staff_sees_all_unless_asked() {
        let admin = Requester { id: 1, role: UserRole::Management };
        assert_eq!(build_filter(&admin, query(None, None)).unwrap().user_id, None);
        assert_eq!(
            build_filter(&admin, query(None, Some(true))).unwrap().user_id,
            Some(1)
        );
    }

    #[test]
    fn test_status_all_means_no_filter() {
        let admin = Requester { id: 1, role: UserRole::Management };
        assert!(build_filter(&admin, query(Some("All"), None)).unwrap().status.is_none());
        assert_eq!(
            build_filter(&admin, query(Some("In Progress"), None)).unwrap().status,
            Some(GrievanceStatus::InProgress)
        );
        assert!(build_filter(&admin, query(Some("Closed"), None)).is_err());
    }
}
