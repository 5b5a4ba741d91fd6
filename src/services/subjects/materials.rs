use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::materials::{
    entities::ResourceType, requests::CreateMaterialRequest, responses::group_by_unit,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{bad_request, current_requester, not_found};
use crate::utils::validate::validate_required_text;

fn validate_material(req: &CreateMaterialRequest) -> Result<(), String> {
    validate_required_text(&req.unit_title, "Unit title")?;
    validate_required_text(&req.resource_name, "Resource name")?;

    let has_url = req
        .resource_url
        .as_deref()
        .is_some_and(|url| !url.trim().is_empty());
    if req.resource_type == ResourceType::Link && !has_url {
        return Err("Resource URL is required for links".to_string());
    }
    Ok(())
}

pub async fn list_materials(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::StudyMaterial, Action::Read, None) {
        return Ok(e.to_response("fetch materials"));
    }

    let storage = service.get_storage(request);
    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => return Ok(e.to_response("fetch materials")),
    }

    match storage.list_materials(subject_id).await {
        Ok(materials) => Ok(HttpResponse::Ok().json(ApiResponse::success_list(
            group_by_unit(materials),
            "Study materials retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("fetch materials")),
    }
}

pub async fn create_material(
    service: &SubjectService,
    subject_id: i64,
    mut material_request: CreateMaterialRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::StudyMaterial, Action::Write, None)
    {
        return Ok(e.to_response("upload material"));
    }

    if let Err(msg) = validate_material(&material_request) {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }
    material_request.unit_title = material_request.unit_title.trim().to_string();
    material_request.resource_name = material_request.resource_name.trim().to_string();

    let storage = service.get_storage(request);
    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => return Ok(e.to_response("upload material")),
    }

    match storage
        .create_material(subject_id, requester.id, material_request)
        .await
    {
        Ok(material) => Ok(HttpResponse::Created().json(ApiResponse::success(
            material,
            "Study material uploaded successfully",
        ))),
        Err(e) => Ok(e.to_response("upload material")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(resource_type: ResourceType, url: Option<&str>) -> CreateMaterialRequest {
        CreateMaterialRequest {
            unit_title: "Unit 1: Sorting".to_string(),
            resource_name: "Merge sort slides".to_string(),
            resource_type,
            resource_url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_link_requires_url() {
        assert!(validate_material(&request(ResourceType::Link, None)).is_err());
        assert!(validate_material(&request(ResourceType::Link, Some(" "))).is_err());
        assert!(validate_material(&request(ResourceType::Link, Some("https://x.test"))).is_ok());
        assert!(validate_material(&request(ResourceType::Pdf, None)).is_ok());
    }
}
