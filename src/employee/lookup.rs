//! Store lookups for the primary employee record and its enrichments.
//!
//! The primary fetch is fatal when it cannot identify a record; every
//! secondary lookup degrades to an empty value on failure so one missing
//! permission or schema gap never aborts a whole letter.

use serde_json::json;

use crate::odoo::{RawRecord, RecordStore, StoreError};

use super::record::{first_alias_value, number_field, text_field, RelationValue};
use super::EmployeeError;

const EMPLOYEE_MODEL: &str = "hr.employee";
const CONTRACT_MODEL: &str = "hr.contract";
const COMPANY_MODEL: &str = "res.company";
const PARTNER_MODEL: &str = "res.partner";

/// Arabic-name field aliases, newest first. The source schema grew these
/// over time, so the chain stays configurable rather than hard-coded at the
/// call sites.
pub const ARABIC_NAME_ALIASES: &[&str] =
    &["x_studio_employee_arabic_name", "x_studio_arabic_name"];

/// Arabic address aliases on partner records, same chain pattern.
pub const ARABIC_ADDRESS_ALIASES: &[&str] =
    &["x_studio_arabic_address", "x_studio_address_arabic"];

const HEAD_OF_PEOPLE_CULTURE_TITLE: &str = "head of people and culture";

const EMPLOYEE_FIELDS: &[&str] = &[
    "id",
    "name",
    "job_title",
    "create_date",
    "identification_id",
    "company_id",
    "department_id",
    "address_id",
    "x_studio_employee_arabic_name",
    "x_studio_arabic_name",
];

/// Find the employee record for an identification number.
///
/// Multiple matches are legal in the store; the first one wins and an
/// informational notice is logged.
pub async fn fetch_raw_employee(
    store: &dyn RecordStore,
    identification: &str,
) -> Result<RawRecord, EmployeeError> {
    let identification = identification.trim();
    let ids = store
        .search(
            EMPLOYEE_MODEL,
            json!([["identification_id", "=", identification]]),
        )
        .await?;
    if ids.is_empty() {
        return Err(EmployeeError::NotFound(identification.to_string()));
    }

    let records = store.read(EMPLOYEE_MODEL, &ids, EMPLOYEE_FIELDS).await?;
    if records.len() > 1 {
        let names: Vec<String> = records.iter().map(|r| text_field(r, "name")).collect();
        log::info!(
            "identification number '{identification}' matches {} employees ({}); using the first",
            records.len(),
            names.join(", ")
        );
    }
    records
        .into_iter()
        .next()
        .ok_or_else(|| EmployeeError::NotFound(identification.to_string()))
}

/// Wage and contract end date from the employee's contract, degraded to
/// `(0.0, "")` when the caller lacks contract access.
pub async fn contract_terms(store: &dyn RecordStore, employee_id: i64) -> (f64, String) {
    let result = store
        .search_read(
            CONTRACT_MODEL,
            json!([["employee_id", "=", employee_id]]),
            &["wage", "date_end"],
            Some(1),
        )
        .await;
    match result {
        Ok(contracts) => contracts
            .first()
            .map(|contract| {
                (
                    number_field(contract, "wage", 0.0),
                    text_field(contract, "date_end"),
                )
            })
            .unwrap_or((0.0, String::new())),
        Err(err) => {
            log::warn!("contract lookup for employee {employee_id} degraded to defaults: {err}");
            (0.0, String::new())
        }
    }
}

async fn read_first(
    store: &dyn RecordStore,
    model: &str,
    id: i64,
    fields: &[&str],
) -> Result<Option<RawRecord>, StoreError> {
    let records = store.read(model, &[id], fields).await?;
    Ok(records.into_iter().next())
}

/// Composed postal address of a partner record, comma separated.
pub async fn partner_address(store: &dyn RecordStore, partner_id: i64) -> String {
    let fields = &["street", "street2", "city", "zip", "country_id"];
    match read_first(store, PARTNER_MODEL, partner_id, fields).await {
        Ok(Some(partner)) => {
            let country = RelationValue::decode(partner.get("country_id")).display();
            let parts = [
                text_field(&partner, "street"),
                text_field(&partner, "street2"),
                text_field(&partner, "city"),
                text_field(&partner, "zip"),
                country,
            ];
            parts
                .iter()
                .filter(|part| !part.is_empty())
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        }
        Ok(None) => String::new(),
        Err(err) => {
            log::warn!("partner address lookup for {partner_id} failed: {err}");
            String::new()
        }
    }
}

/// Arabic variant of the partner address; empty when the store has none,
/// the caller falls back to the Latin address.
pub async fn partner_arabic_address(store: &dyn RecordStore, partner_id: i64) -> String {
    match read_first(store, PARTNER_MODEL, partner_id, ARABIC_ADDRESS_ALIASES).await {
        Ok(Some(partner)) => first_alias_value(&partner, ARABIC_ADDRESS_ALIASES),
        Ok(None) => String::new(),
        Err(err) => {
            log::warn!("arabic address lookup for partner {partner_id} failed: {err}");
            String::new()
        }
    }
}

/// Commercial-registry number of the employing company.
pub async fn company_registrar(store: &dyn RecordStore, company_id: i64) -> String {
    match read_first(store, COMPANY_MODEL, company_id, &["company_registry"]).await {
        Ok(Some(company)) => text_field(&company, "company_registry"),
        Ok(None) => String::new(),
        Err(err) => {
            log::warn!("company registrar lookup for {company_id} failed: {err}");
            String::new()
        }
    }
}

pub async fn company_arabic_name(store: &dyn RecordStore, company_id: i64) -> String {
    match read_first(store, COMPANY_MODEL, company_id, &["arabic_name"]).await {
        Ok(Some(company)) => text_field(&company, "arabic_name"),
        Ok(None) => String::new(),
        Err(err) => {
            log::warn!("company arabic name lookup for {company_id} failed: {err}");
            String::new()
        }
    }
}

async fn head_of_people_culture_record(
    store: &dyn RecordStore,
    company_id: i64,
    fields: &[&str],
) -> Result<Option<RawRecord>, StoreError> {
    let domain = json!([
        ["company_id", "=", company_id],
        ["job_id.name", "ilike", HEAD_OF_PEOPLE_CULTURE_TITLE]
    ]);
    let ids = store.search(EMPLOYEE_MODEL, domain).await?;
    match ids.first() {
        Some(id) => read_first(store, EMPLOYEE_MODEL, *id, fields).await,
        None => Ok(None),
    }
}

/// Name of the company's head of people & culture, empty when the role is
/// unfilled.
pub async fn head_of_people_culture(store: &dyn RecordStore, company_id: i64) -> String {
    match head_of_people_culture_record(store, company_id, &["name"]).await {
        Ok(Some(head)) => text_field(&head, "name"),
        Ok(None) => String::new(),
        Err(err) => {
            log::warn!("head of people & culture lookup for company {company_id} failed: {err}");
            String::new()
        }
    }
}

/// Arabic name of the head of people & culture, falling back to their Latin
/// name through the usual alias chain.
pub async fn head_of_people_culture_arabic(store: &dyn RecordStore, company_id: i64) -> String {
    let mut fields: Vec<&str> = ARABIC_NAME_ALIASES.to_vec();
    fields.push("name");
    match head_of_people_culture_record(store, company_id, &fields).await {
        Ok(Some(head)) => {
            let arabic = first_alias_value(&head, ARABIC_NAME_ALIASES);
            if arabic.is_empty() {
                text_field(&head, "name")
            } else {
                arabic
            }
        }
        Ok(None) => String::new(),
        Err(err) => {
            log::warn!(
                "head of people & culture (arabic) lookup for company {company_id} failed: {err}"
            );
            String::new()
        }
    }
}
