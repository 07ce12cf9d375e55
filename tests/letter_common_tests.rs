use chrono::NaiveDate;

use hr_letters_server::employee::CanonicalRecord;
use hr_letters_server::letter::common::{format_letter_date, sanitize_filename};
use hr_letters_server::letter::{build_placeholders, LetterKind};

#[test]
fn test_sanitize_filename() {
    assert_eq!(sanitize_filename("John Doe", "fallback"), "john-doe");
    assert_eq!(sanitize_filename("  Spaces  ", "fallback"), "spaces");
    assert_eq!(sanitize_filename("", "fallback"), "fallback");
    assert_eq!(sanitize_filename("Test--Name", "fb"), "test-name");
    assert_eq!(sanitize_filename("جين دو", "employee"), "employee");
}

#[test]
fn test_format_letter_date() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert_eq!(format_letter_date(date), "01/01/2024");
}

#[test]
fn letter_kinds_map_to_their_templates() {
    assert_eq!(
        LetterKind::Employment.template_file(),
        "employment_letter.docx"
    );
    assert_eq!(
        LetterKind::EmploymentArabic.template_file(),
        "employment_letter_arabic.docx"
    );
    assert_eq!(LetterKind::Embassy.template_file(), "embassy_letter.docx");
    assert_eq!(
        LetterKind::Experience.template_file(),
        "experience_letter.docx"
    );

    assert!(LetterKind::Embassy.requires_travel_details());
    assert!(!LetterKind::Employment.requires_travel_details());
    assert!(LetterKind::EmploymentArabic.is_arabic());
}

#[test]
fn vocabulary_covers_every_token() {
    let record = CanonicalRecord {
        full_name: "Jane Doe".to_string(),
        first_name: "Jane".to_string(),
        wage: 5500.0,
        ..CanonicalRecord::default()
    };
    let table = build_placeholders(&record, "01/01/2024", false);

    for token in [
        "(Current Date)",
        "(First and Last Name)",
        "(First Name)",
        "(Position)",
        "(Salary)",
        "(DD/MM/YYYY)",
        "(Country)",
        "(Start Date)",
        "(End Date)",
        "(Company)",
        "(Work address)",
        "(Work Address)",
        "(Arabic Work address)",
        "(CR)",
        "(Company Country)",
        "(CompanyA)",
        "(P&C)",
        "(AP&C)",
        "(Contract End Date)",
        "(Department)",
        "(الاسم الكامل)",
        "(بلد الوجهة)",
        "(تاريخ البداية)",
        "(تاريخ النهاية)",
    ] {
        assert!(table.get(token).is_some(), "vocabulary misses {token}");
    }
    assert_eq!(table.len(), 24);
    assert_eq!(table.get("(Current Date)"), Some("01/01/2024"));
    assert_eq!(table.get("(Salary)"), Some("5500"));
    // Empty record fields resolve to empty strings, never to the token.
    assert_eq!(table.get("(Position)"), Some(""));
}

#[test]
fn arabic_name_token_depends_on_letter_locale() {
    let record = CanonicalRecord {
        full_name: "Jane Doe".to_string(),
        arabic_name: "جين دو".to_string(),
        ..CanonicalRecord::default()
    };

    let latin = build_placeholders(&record, "01/01/2024", false);
    assert_eq!(latin.get("(الاسم الكامل)"), Some("Jane Doe"));

    let arabic = build_placeholders(&record, "01/01/2024", true);
    assert_eq!(arabic.get("(الاسم الكامل)"), Some("جين دو"));
}
