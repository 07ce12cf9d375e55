use hr_letters_server::employee::EmployeeError;
use hr_letters_server::letter::LetterError;
use hr_letters_server::odoo::StoreError;
use hr_letters_server::ErrorResponse;

#[test]
fn error_response_constructors_tag_the_kind() {
    let response = ErrorResponse::bad_request("Invalid template kind");
    assert_eq!(response.error, "BadRequest");
    assert!(response.message.contains("Invalid template"));

    let response = ErrorResponse::not_found("No employee");
    assert_eq!(response.error, "NotFound");

    let response = ErrorResponse::internal_error("boom");
    assert_eq!(response.error, "InternalServerError");
    assert!(!response.timestamp.is_empty());
}

#[test]
fn store_errors_render_human_readable_causes() {
    let err = StoreError::Authentication;
    assert!(err.to_string().contains("authentication"));

    let err = StoreError::Fault("Access Denied: hr.contract".to_string());
    assert!(err.to_string().contains("Access Denied"));
}

#[test]
fn employee_not_found_carries_the_identification() {
    let err = EmployeeError::NotFound("EMP-404".to_string());
    assert!(err.to_string().contains("EMP-404"));
}

#[test]
fn template_errors_name_the_template() {
    let err = LetterError::TemplateNotFound {
        name: "employment_letter.docx".to_string(),
    };
    assert!(err.to_string().contains("employment_letter.docx"));

    let err = LetterError::TemplateCorrupt {
        name: "embassy_letter.docx".to_string(),
        reason: "invalid Zip archive".to_string(),
    };
    let rendered = err.to_string();
    assert!(rendered.contains("embassy_letter.docx"));
    assert!(rendered.contains("invalid Zip archive"));
}

#[test]
fn store_errors_surface_through_letter_errors() {
    let err = LetterError::from(EmployeeError::from(StoreError::Authentication));
    assert!(matches!(
        err,
        LetterError::Employee(EmployeeError::Store(StoreError::Authentication))
    ));
}
