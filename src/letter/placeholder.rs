//! Placeholder vocabulary and the table mapping tokens to resolved values.
//!
//! Tokens are literal bracketed strings embedded in the templates, in both
//! Latin and Arabic script. A table is built fresh for every generation run
//! and never persisted.

use crate::employee::CanonicalRecord;

/// Insertion-ordered token → replacement mapping.
///
/// The bracket delimiters keep the current vocabulary prefix-free (no token
/// is a literal substring of another; [`PlaceholderTable::overlapping_tokens`]
/// checks this). Substitution still walks tokens longest-first via
/// [`PlaceholderTable::substitution_order`], so a future token that embeds
/// another cannot be partially eaten by it.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderTable {
    entries: Vec<(String, String)>,
}

impl PlaceholderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a token. Overwriting keeps the original position.
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        let token = token.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(t, _)| *t == token) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((token, value)),
        }
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    /// Tokens ordered for substitution: longest first, insertion order
    /// within equal lengths.
    pub fn substitution_order(&self) -> Vec<(&str, &str)> {
        let mut ordered: Vec<(&str, &str)> = self.iter().collect();
        ordered.sort_by_key(|(token, _)| std::cmp::Reverse(token.len()));
        ordered
    }

    /// First pair where one token is a literal substring of another, if any.
    pub fn overlapping_tokens(&self) -> Option<(&str, &str)> {
        for (i, (a, _)) in self.entries.iter().enumerate() {
            for (b, _) in self.entries.iter().skip(i + 1) {
                if a.contains(b.as_str()) {
                    return Some((b.as_str(), a.as_str()));
                }
                if b.contains(a.as_str()) {
                    return Some((a.as_str(), b.as_str()));
                }
            }
        }
        None
    }
}

/// Build the full vocabulary for one generation run.
///
/// `current_date` is injected so output is reproducible under test. On the
/// Arabic letter the Arabic full-name token resolves to the Arabic name;
/// everywhere else it carries the Latin name.
pub fn build_placeholders(
    record: &CanonicalRecord,
    current_date: &str,
    arabic_letter: bool,
) -> PlaceholderTable {
    let arabic_full_name = if arabic_letter {
        record.arabic_name.clone()
    } else {
        record.full_name.clone()
    };

    let mut table = PlaceholderTable::new();
    table.insert("(Current Date)", current_date);
    table.insert("(First and Last Name)", record.full_name.clone());
    table.insert("(First Name)", record.first_name.clone());
    table.insert("(Position)", record.job_title.clone());
    table.insert("(Salary)", record.wage.to_string());
    table.insert("(DD/MM/YYYY)", record.joining_date.clone());
    table.insert("(Country)", record.country.clone());
    table.insert("(Start Date)", record.start_date.clone());
    table.insert("(End Date)", record.end_date.clone());
    table.insert("(Company)", record.company.clone());
    table.insert("(Work address)", record.work_address.clone());
    table.insert("(Work Address)", record.work_address.clone());
    table.insert("(Arabic Work address)", record.arabic_work_address.clone());
    table.insert("(CR)", record.company_registrar.clone());
    table.insert("(Company Country)", record.company_country.clone());
    table.insert("(CompanyA)", record.company_arabic_name.clone());
    table.insert("(P&C)", record.head_of_people_culture.clone());
    table.insert("(AP&C)", record.head_of_people_culture_arabic.clone());
    table.insert("(Contract End Date)", record.contract_end_date.clone());
    table.insert("(Department)", record.department.clone());
    table.insert("(الاسم الكامل)", arabic_full_name);
    table.insert("(بلد الوجهة)", record.country.clone());
    table.insert("(تاريخ البداية)", record.start_date.clone());
    table.insert("(تاريخ النهاية)", record.end_date.clone());
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_in_place() {
        let mut table = PlaceholderTable::new();
        table.insert("(A)", "1");
        table.insert("(B)", "2");
        table.insert("(A)", "3");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("(A)"), Some("3"));
        let order: Vec<&str> = table.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["(A)", "(B)"]);
    }

    #[test]
    fn substitution_order_is_longest_first() {
        let mut table = PlaceholderTable::new();
        table.insert("(Work address)", "short");
        table.insert("(Arabic Work address)", "long");
        let ordered = table.substitution_order();
        assert_eq!(ordered[0].0, "(Arabic Work address)");
        assert_eq!(ordered[1].0, "(Work address)");
    }

    #[test]
    fn vocabulary_tokens_do_not_overlap() {
        let record = CanonicalRecord::default();
        let table = build_placeholders(&record, "01/01/2024", false);
        // Both case variants of the work-address token coexist, but the
        // bracket delimiters keep every token free of the others.
        assert_eq!(table.overlapping_tokens(), None);
    }
}
