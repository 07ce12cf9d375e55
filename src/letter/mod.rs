//! Letter generation - merging a normalized employee record into `.docx`
//! letter templates.
//!
//! Four letter kinds are supported, each backed by its own template file
//! with its own subset of the placeholder vocabulary:
//! - `Employment` - plain employment letter
//! - `EmploymentArabic` - Arabic employment letter
//! - `Embassy` - travel letter addressed to an embassy
//! - `Experience` - experience letter

pub mod common;
pub mod docx;
pub mod generator;
pub mod handlers;
pub mod paragraph;
pub mod placeholder;
pub mod store;
pub mod validation;

pub use docx::DocxTemplate;
pub use generator::LetterGenerator;
pub use placeholder::{build_placeholders, PlaceholderTable};
pub use store::TemplateStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::employee::EmployeeError;

/// The letter templates this service can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LetterKind {
    Employment,
    EmploymentArabic,
    Embassy,
    Experience,
}

impl LetterKind {
    pub const ALL: [LetterKind; 4] = [
        LetterKind::Employment,
        LetterKind::EmploymentArabic,
        LetterKind::Embassy,
        LetterKind::Experience,
    ];

    /// Template file name under the template directory.
    pub fn template_file(self) -> &'static str {
        match self {
            LetterKind::Employment => "employment_letter.docx",
            LetterKind::EmploymentArabic => "employment_letter_arabic.docx",
            LetterKind::Embassy => "embassy_letter.docx",
            LetterKind::Experience => "experience_letter.docx",
        }
    }

    /// Operator-facing label.
    pub fn label(self) -> &'static str {
        match self {
            LetterKind::Employment => "Employment letter",
            LetterKind::EmploymentArabic => "Employment letter - Arabic",
            LetterKind::Embassy => "Employment letter to embassies",
            LetterKind::Experience => "Experience letter",
        }
    }

    /// Stem for the suggested output filename.
    pub fn file_stem(self) -> &'static str {
        match self {
            LetterKind::Employment => "employment-letter",
            LetterKind::EmploymentArabic => "employment-letter-arabic",
            LetterKind::Embassy => "embassy-letter",
            LetterKind::Experience => "experience-letter",
        }
    }

    /// Whether the Arabic full-name placeholder resolves to the Arabic name.
    pub fn is_arabic(self) -> bool {
        matches!(self, LetterKind::EmploymentArabic)
    }

    /// The embassy letter needs destination country and travel dates.
    pub fn requires_travel_details(self) -> bool {
        matches!(self, LetterKind::Embassy)
    }
}

/// Errors that can occur during letter generation.
#[derive(Debug, Error)]
pub enum LetterError {
    #[error("template '{name}' was not found")]
    TemplateNotFound { name: String },
    #[error("failed to read template: {0}")]
    TemplateIo(#[source] std::io::Error),
    #[error("template '{name}' could not be parsed as a document archive: {reason}")]
    TemplateCorrupt { name: String, reason: String },
    #[error(transparent)]
    Employee(#[from] EmployeeError),
}

/// Result of a successful letter generation.
#[derive(Debug)]
pub struct GeneratedLetter {
    pub filename: String,
    pub docx: Vec<u8>,
    pub generated_on: String,
}
