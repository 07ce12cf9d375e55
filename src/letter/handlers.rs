//! HTTP handlers for letter generation.

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::employee::{fetch_raw_employee, normalize, CanonicalRecord, EmployeeError, TravelExtras};
use crate::odoo::StoreError;
use crate::state::AppState;
use crate::ErrorResponse;

use super::validation::{validate_letter_date, validate_required, ValidationErrors, Validator};
use super::{LetterError, LetterKind};

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Request to generate one letter.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateLetterRequest {
    pub template: LetterKind,
    /// Employee identification number as stored in the HR suite.
    pub identification: String,
    /// Destination country; embassy letter only.
    #[serde(default)]
    pub country: String,
    /// Travel start date (DD/MM/YYYY); embassy letter only.
    #[serde(default)]
    pub start_date: String,
    /// Travel end date (DD/MM/YYYY); embassy letter only.
    #[serde(default)]
    pub end_date: String,
}

impl Validator for GenerateLetterRequest {
    fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();

        validate_required(
            &self.identification,
            "identification",
            "Employee identification number",
            &mut errors,
        );
        if self.template.requires_travel_details() {
            validate_required(&self.country, "country", "Destination country", &mut errors);
            validate_letter_date(&self.start_date, "start_date", "Travel start date", &mut errors);
            validate_letter_date(&self.end_date, "end_date", "Travel end date", &mut errors);
        }

        errors.into_result()
    }
}

/// One selectable letter template.
#[derive(Debug, Serialize, ToSchema)]
pub struct TemplateInfo {
    pub kind: LetterKind,
    pub label: String,
    pub requires_travel_details: bool,
}

#[utoipa::path(
    context_path = "/api",
    tag = "Letter Service",
    get,
    path = "/letters/templates",
    responses(
        (status = 200, description = "Available letter templates", body = [TemplateInfo])
    )
)]
pub async fn list_templates() -> impl Responder {
    let templates: Vec<TemplateInfo> = LetterKind::ALL
        .into_iter()
        .map(|kind| TemplateInfo {
            kind,
            label: kind.label().to_string(),
            requires_travel_details: kind.requires_travel_details(),
        })
        .collect();
    HttpResponse::Ok().json(templates)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Employee Service",
    get,
    path = "/employees/{identification}",
    responses(
        (status = 200, description = "Normalized employee record", body = CanonicalRecord),
        (status = 404, description = "No employee matches the identification number", body = ErrorResponse),
        (status = 502, description = "Record store unreachable or rejected the session", body = ErrorResponse)
    ),
    params(
        ("identification" = String, Path, description = "Employee identification number")
    )
)]
pub async fn get_employee(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let identification = path.into_inner();
    let result = async {
        let raw = fetch_raw_employee(data.store.as_ref(), &identification).await?;
        normalize(data.store.as_ref(), &raw, TravelExtras::default()).await
    }
    .await;

    match result {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => employee_error_response(err),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Letter Service",
    post,
    path = "/letters",
    request_body = GenerateLetterRequest,
    responses(
        (status = 200, description = "Generated letter as a .docx attachment", body = Vec<u8>,
            content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "No employee matches the identification number", body = ErrorResponse),
        (status = 502, description = "Record store unreachable or rejected the session", body = ErrorResponse)
    )
)]
pub async fn generate_letter(
    req: web::Json<GenerateLetterRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    if let Err(message) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }

    let extras = TravelExtras {
        country: req.country.trim().to_string(),
        start_date: req.start_date.trim().to_string(),
        end_date: req.end_date.trim().to_string(),
    };

    match data
        .generator
        .generate(data.store.as_ref(), req.template, &req.identification, extras)
        .await
    {
        Ok(letter) => {
            log::info!(
                "generated {} for '{}' ({} bytes)",
                letter.filename,
                req.identification.trim(),
                letter.docx.len()
            );
            HttpResponse::Ok()
                .content_type(DOCX_MIME)
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", letter.filename),
                ))
                .body(letter.docx)
        }
        Err(err) => letter_error_response(err),
    }
}

fn employee_error_response(err: EmployeeError) -> HttpResponse {
    match &err {
        EmployeeError::NotFound(_) => {
            HttpResponse::NotFound().json(ErrorResponse::not_found(&err.to_string()))
        }
        EmployeeError::Store(StoreError::Authentication)
        | EmployeeError::Store(StoreError::Transport(_)) => {
            log::error!("record store unavailable: {err}");
            HttpResponse::BadGateway().json(ErrorResponse::new("BadGateway", &err.to_string()))
        }
        _ => {
            log::error!("employee lookup failed: {err}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&err.to_string()))
        }
    }
}

fn letter_error_response(err: LetterError) -> HttpResponse {
    match err {
        LetterError::Employee(inner) => employee_error_response(inner),
        other => {
            log::error!("letter generation failed: {other}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&other.to_string()))
        }
    }
}

/// Configure letter + employee routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/letters").route(web::post().to(generate_letter)),
    )
    .service(web::resource("/letters/templates").route(web::get().to(list_templates)))
    .service(web::resource("/employees/{identification}").route(web::get().to(get_employee)));
}
