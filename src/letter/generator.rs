//! Letter generation orchestration: fetch, normalize, fill, name.

use crate::employee::{fetch_raw_employee, normalize, CanonicalRecord, TravelExtras};
use crate::odoo::RecordStore;

use super::common::{current_letter_date, sanitize_filename};
use super::docx::DocxTemplate;
use super::placeholder::build_placeholders;
use super::store::TemplateStore;
use super::{GeneratedLetter, LetterError, LetterKind};

pub struct LetterGenerator {
    templates: TemplateStore,
}

impl LetterGenerator {
    pub fn new(templates: TemplateStore) -> Self {
        Self { templates }
    }

    /// Generate a letter for the employee matching `identification`.
    ///
    /// Travel extras only apply to the embassy letter; for every other kind
    /// they are blanked before normalization.
    pub async fn generate(
        &self,
        store: &dyn RecordStore,
        kind: LetterKind,
        identification: &str,
        extras: TravelExtras,
    ) -> Result<GeneratedLetter, LetterError> {
        let extras = if kind.requires_travel_details() {
            extras
        } else {
            TravelExtras::default()
        };

        let raw = fetch_raw_employee(store, identification).await?;
        let record = normalize(store, &raw, extras).await?;
        self.fill_for(kind, &record, &current_letter_date())
    }

    /// Fill `kind`'s template for an already-normalized record.
    ///
    /// Split out of [`LetterGenerator::generate`] so the current date can be
    /// pinned by callers that need reproducible output.
    pub fn fill_for(
        &self,
        kind: LetterKind,
        record: &CanonicalRecord,
        current_date: &str,
    ) -> Result<GeneratedLetter, LetterError> {
        let placeholders = build_placeholders(record, current_date, kind.is_arabic());
        let bytes = self.templates.load(kind)?;
        let template = DocxTemplate::parse(kind.template_file(), &bytes)?;
        let docx = template.fill(&placeholders)?;

        let safe_name = sanitize_filename(&record.full_name, "employee");
        Ok(GeneratedLetter {
            filename: format!("{}-{}.docx", kind.file_stem(), safe_name),
            docx,
            generated_on: current_date.to_string(),
        })
    }
}
