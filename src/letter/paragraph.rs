//! Pure substitution strategies over a paragraph's run texts.
//!
//! A paragraph is modeled as an ordered slice of run texts; formatting stays
//! with the caller. Two tiers: a precise run-local pass that keeps every run
//! intact, and a lossy paragraph-level fallback for tokens split across run
//! boundaries by the template author's editor.

use super::placeholder::PlaceholderTable;

/// Replace `token` inside every run that contains it verbatim.
///
/// Returns whether any run contained the token, i.e. whether the precise
/// strategy succeeded and the fallback can be skipped.
pub fn replace_in_runs(runs: &mut [String], token: &str, value: &str) -> bool {
    let mut replaced = false;
    for run in runs.iter_mut() {
        if run.contains(token) {
            *run = run.replace(token, value);
            replaced = true;
        }
    }
    replaced
}

/// Paragraph-level fallback: substitute on the concatenation of all runs and
/// write the result into the first run, clearing the rest.
///
/// This collapses the independent formatting of the remaining runs, which is
/// accepted: a split token can never survive substitution.
pub fn replace_across_runs(runs: &mut [String], token: &str, value: &str) -> bool {
    if runs.is_empty() {
        return false;
    }
    let joined = runs.concat();
    if !joined.contains(token) {
        return false;
    }
    let replaced = joined.replace(token, value);
    for run in runs.iter_mut() {
        run.clear();
    }
    runs[0] = replaced;
    true
}

/// Apply the two-tier strategy for every token in the table.
pub fn substitute_paragraph(runs: &mut [String], placeholders: &PlaceholderTable) {
    for (token, value) in placeholders.substitution_order() {
        if !replace_in_runs(runs, token, value) {
            replace_across_runs(runs, token, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn run_local_replacement_keeps_other_runs() {
        let mut paragraph = runs(&["Dear ", "(First Name)", ","]);
        assert!(replace_in_runs(&mut paragraph, "(First Name)", "Jane"));
        assert_eq!(paragraph, runs(&["Dear ", "Jane", ","]));
    }

    #[test]
    fn split_token_falls_back_to_paragraph_level() {
        let mut paragraph = runs(&["Dear (First ", "Name),"]);
        assert!(!replace_in_runs(&mut paragraph, "(First Name)", "Jane"));
        assert!(replace_across_runs(&mut paragraph, "(First Name)", "Jane"));
        assert_eq!(paragraph, runs(&["Dear Jane,", ""]));
    }

    #[test]
    fn absent_token_touches_nothing() {
        let mut paragraph = runs(&["No placeholders here"]);
        assert!(!replace_in_runs(&mut paragraph, "(Salary)", "100"));
        assert!(!replace_across_runs(&mut paragraph, "(Salary)", "100"));
        assert_eq!(paragraph, runs(&["No placeholders here"]));
    }

    #[test]
    fn empty_paragraph_is_a_no_op() {
        let mut paragraph: Vec<String> = Vec::new();
        assert!(!replace_across_runs(&mut paragraph, "(Salary)", "100"));
    }

    #[test]
    fn similar_tokens_resolve_independently() {
        let mut table = PlaceholderTable::new();
        table.insert("(Work address)", "Latin address");
        table.insert("(Arabic Work address)", "عنوان");
        let mut paragraph = runs(&["(Arabic Work address) / (Work address)"]);
        substitute_paragraph(&mut paragraph, &table);
        assert_eq!(paragraph[0], "عنوان / Latin address");
    }
}
