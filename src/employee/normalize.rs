//! Flatten a raw store record into the canonical field set used by the
//! letter templates.
//!
//! Normalization never fails on missing optional data; every field degrades
//! to an empty string. The only hard failure is a record carrying neither an
//! id nor a name.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use chrono::NaiveDate;

use crate::odoo::{RawRecord, RecordStore};

use super::lookup;
use super::record::{first_alias_value, text_field, RelationValue};
use super::EmployeeError;

/// Business default when no head of people & culture is on record.
pub const FALLBACK_HEAD_OF_PEOPLE_CULTURE: &str = "Head of People & Culture";
pub const FALLBACK_HEAD_OF_PEOPLE_CULTURE_ARABIC: &str = "مدير الموارد البشرية";

/// Normalized flat record consumed by the substitution engine.
///
/// Every string field is present, possibly empty, never null.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct CanonicalRecord {
    pub id: i64,
    pub full_name: String,
    pub first_name: String,
    pub job_title: String,
    pub identification: String,
    pub wage: f64,
    pub joining_date: String,
    pub contract_end_date: String,
    pub department: String,
    pub arabic_name: String,
    pub company: String,
    pub company_registrar: String,
    pub company_country: String,
    pub company_arabic_name: String,
    pub head_of_people_culture: String,
    pub head_of_people_culture_arabic: String,
    pub work_address: String,
    pub arabic_work_address: String,
    pub country: String,
    pub start_date: String,
    pub end_date: String,
}

/// Caller-supplied travel details for the embassy letter; empty for every
/// other letter kind.
#[derive(Debug, Clone, Default)]
pub struct TravelExtras {
    pub country: String,
    pub start_date: String,
    pub end_date: String,
}

/// Derive the canonical record from a raw employee record plus its
/// secondary company/partner lookups.
pub async fn normalize(
    store: &dyn RecordStore,
    raw: &RawRecord,
    extras: TravelExtras,
) -> Result<CanonicalRecord, EmployeeError> {
    let id = raw.get("id").and_then(Value::as_i64);
    let full_name = text_field(raw, "name");
    if id.is_none() && full_name.is_empty() {
        return Err(EmployeeError::RecordIncomplete);
    }
    let id = id.unwrap_or(0);

    let (wage, contract_end_raw) = lookup::contract_terms(store, id).await;

    let company_relation = RelationValue::decode(raw.get("company_id"));
    let company = company_relation.display();
    let mut company_registrar = String::new();
    let mut company_arabic_name = String::new();
    let mut head_of_people_culture = String::new();
    let mut head_of_people_culture_arabic = String::new();
    if let Some(company_id) = company_relation.id() {
        company_registrar = lookup::company_registrar(store, company_id).await;
        company_arabic_name = lookup::company_arabic_name(store, company_id).await;
        head_of_people_culture = lookup::head_of_people_culture(store, company_id).await;
        head_of_people_culture_arabic =
            lookup::head_of_people_culture_arabic(store, company_id).await;
    }
    if company_arabic_name.is_empty() {
        company_arabic_name = company.clone();
    }
    if head_of_people_culture.is_empty() {
        head_of_people_culture = FALLBACK_HEAD_OF_PEOPLE_CULTURE.to_string();
    }
    if head_of_people_culture_arabic.is_empty() {
        head_of_people_culture_arabic = FALLBACK_HEAD_OF_PEOPLE_CULTURE_ARABIC.to_string();
    }

    let mut work_address = String::new();
    let mut arabic_work_address = String::new();
    if let Some(partner_id) = RelationValue::decode(raw.get("address_id")).id() {
        work_address = lookup::partner_address(store, partner_id).await;
        arabic_work_address = lookup::partner_arabic_address(store, partner_id).await;
    }
    if arabic_work_address.is_empty() {
        arabic_work_address = work_address.clone();
    }
    let company_country = derive_country_from_address(&work_address);

    Ok(CanonicalRecord {
        id,
        first_name: first_name_of(&full_name),
        job_title: text_field(raw, "job_title"),
        identification: text_field(raw, "identification_id"),
        wage,
        joining_date: normalize_date(&text_field(raw, "create_date")),
        contract_end_date: normalize_date(&contract_end_raw),
        department: RelationValue::decode(raw.get("department_id")).display(),
        arabic_name: arabic_name(raw),
        company,
        company_registrar,
        company_country,
        company_arabic_name,
        head_of_people_culture,
        head_of_people_culture_arabic,
        work_address,
        arabic_work_address,
        country: extras.country,
        start_date: extras.start_date,
        end_date: extras.end_date,
        full_name,
    })
}

/// First whitespace-delimited token of the full name.
pub fn first_name_of(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_string()
}

/// Arabic name through the alias chain, Latin name as final fallback.
pub fn arabic_name(record: &RawRecord) -> String {
    let name = first_alias_value(record, lookup::ARABIC_NAME_ALIASES);
    if name.is_empty() {
        text_field(record, "name")
    } else {
        name
    }
}

/// Reformat `YYYY-MM-DD[ time]` to `DD/MM/YYYY`; anything unparseable is
/// passed through unchanged so downstream output still shows the raw value.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    let date_part = raw.split(' ').next().unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Last non-empty segment of a composed address, taken as the country.
/// Newline-separated addresses split on lines, otherwise on commas.
pub fn derive_country_from_address(address: &str) -> String {
    if address.trim().is_empty() {
        return String::new();
    }
    if address.contains('\n') {
        if let Some(line) = address
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
        {
            return line.to_string();
        }
    }
    address
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .last()
        .map(str::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_name_of_empty_name_is_empty() {
        assert_eq!(first_name_of(""), "");
        assert_eq!(first_name_of("   "), "");
        assert_eq!(first_name_of("Jane Doe"), "Jane");
    }

    #[test]
    fn dates_reformat_or_pass_through() {
        assert_eq!(normalize_date("2023-05-01"), "01/05/2023");
        assert_eq!(normalize_date("2023-05-01 09:30:00"), "01/05/2023");
        assert_eq!(normalize_date("not-a-date"), "not-a-date");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn country_is_last_address_segment() {
        assert_eq!(
            derive_country_from_address("12 Main St, Springfield, USA"),
            "USA"
        );
        assert_eq!(
            derive_country_from_address("12 Main St, Springfield\nJordan"),
            "Jordan"
        );
        assert_eq!(derive_country_from_address(""), "");
        assert_eq!(derive_country_from_address("  ,  , "), "");
    }
}
