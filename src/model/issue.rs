use serde::Serialize;

/// One published newsletter, resolved to a download link.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Issue {
    /// Object name without its folder, e.g. `1986-04.pdf`. Unique per folder.
    pub name: String,
    pub url: String,
}

impl Issue {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn title(&self) -> String {
        let stem = match self.name.char_indices().rev().nth(3) {
            Some((pos, _)) => &self.name[..pos],
            None => "",
        };

        format!("MTV-Rundschau {}", stem)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Preview {
    Loading,
    Ready(String),
    Unavailable,
}

/// An issue decorated with a simulated hit count. The count is not derived
/// from document content.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub issue: Issue,
    pub matches: u32,
    pub snippet: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title() {
        let cases = vec![
            ("1986-04.pdf", "MTV-Rundschau 1986-04"),
            ("x.pdf", "MTV-Rundschau x"),
            (".pdf", "MTV-Rundschau "),
            ("pdf", "MTV-Rundschau "),
            ("Ausgabe-ä.pdf", "MTV-Rundschau Ausgabe-ä"),
        ];

        for (name, expected) in cases {
            let issue = Issue::new(name, "https://example.test");
            assert_eq!(issue.title(), expected, "failed title for case: {}", name);
        }
    }
}
