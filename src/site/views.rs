use serde::Serialize;

use crate::{
    archive::SortOrder,
    model::issue::{Issue, Preview, SearchResult},
};

pub const LOAD_ERROR: &str = "Fehler beim Laden der PDFs.";

#[derive(Serialize, Debug, PartialEq)]
pub struct PreviewView {
    pub state: &'static str,
    pub url: Option<String>,
}

impl From<Option<Preview>> for PreviewView {
    fn from(preview: Option<Preview>) -> Self {
        match preview {
            None => PreviewView {
                state: "off",
                url: None,
            },
            Some(Preview::Loading) => PreviewView {
                state: "loading",
                url: None,
            },
            Some(Preview::Ready(url)) => PreviewView {
                state: "ready",
                url: Some(url),
            },
            Some(Preview::Unavailable) => PreviewView {
                state: "unavailable",
                url: None,
            },
        }
    }
}

#[derive(Serialize, Debug)]
pub struct IssueCard {
    pub name: String,
    pub title: String,
    pub url: String,
    pub delay_ms: usize,
    pub preview: PreviewView,
}

impl IssueCard {
    pub fn new(index: usize, issue: &Issue, preview: Option<Preview>) -> Self {
        Self {
            name: issue.name.clone(),
            title: issue.title(),
            url: issue.url.clone(),
            delay_ms: index * 100,
            preview: preview.into(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct HomeView {
    pub latest: Option<IssueCard>,
}

#[derive(Serialize, Debug)]
pub struct ArchiveView {
    pub error: Option<&'static str>,
    pub query: String,
    pub order: &'static str,
    pub thumbnails: bool,
    pub total: usize,
    pub issues: Vec<IssueCard>,
}

impl ArchiveView {
    pub fn order_name(order: SortOrder) -> &'static str {
        match order {
            SortOrder::Desc => "desc",
            SortOrder::Asc => "asc",
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ResultCard {
    pub card: IssueCard,
    pub matches: u32,
    pub snippet: String,
}

impl ResultCard {
    pub fn new(index: usize, result: SearchResult, preview: Option<Preview>) -> Self {
        Self {
            card: IssueCard::new(index, &result.issue, preview),
            matches: result.matches,
            snippet: result.snippet,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct SearchView {
    pub term: String,
    pub searched: bool,
    pub error: Option<&'static str>,
    pub results: Vec<ResultCard>,
}

#[derive(Serialize, Debug)]
pub struct LayoutView<'a> {
    pub title: &'a str,
    pub active: &'a str,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_view() {
        let cases = vec![
            (None, "off", None),
            (Some(Preview::Loading), "loading", None),
            (Some(Preview::Ready("u".to_string())), "ready", Some("u".to_string())),
            (Some(Preview::Unavailable), "unavailable", None),
        ];

        for (preview, state, url) in cases {
            assert_eq!(PreviewView::from(preview), PreviewView { state, url });
        }
    }
}
