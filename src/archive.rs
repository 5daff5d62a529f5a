use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::model::issue::Issue;

static PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\D)(\d{4})-(\d{2})(?:\D|$)").expect("valid period pattern"));

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest first.
    #[default]
    Desc,
    Asc,
}

/// Year and period embedded in an issue name as `YYYY-PP`; `(0, 0)` when absent.
pub fn issue_period(name: &str) -> (u32, u32) {
    PERIOD
        .captures(name)
        .and_then(|caps| {
            let year = caps.get(1)?.as_str().parse().ok()?;
            let period = caps.get(2)?.as_str().parse().ok()?;
            Some((year, period))
        })
        .unwrap_or((0, 0))
}

/// Stable: issues of the same period keep their input order.
pub fn sort_issues(issues: &mut [Issue], order: SortOrder) {
    issues.sort_by(|a, b| {
        let ord: Ordering = issue_period(&a.name).cmp(&issue_period(&b.name));
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

pub fn filter_issues(issues: &[Issue], query: &str) -> Vec<Issue> {
    let query = query.to_lowercase();
    issues
        .iter()
        .filter(|issue| issue.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Filter, then sort.
pub fn arrange(issues: &[Issue], query: &str, order: SortOrder) -> Vec<Issue> {
    let mut arranged = filter_issues(issues, query);
    sort_issues(&mut arranged, order);
    arranged
}

pub fn latest(issues: &[Issue]) -> Option<Issue> {
    arrange(issues, "", SortOrder::Desc).into_iter().next()
}
