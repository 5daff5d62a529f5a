use liquid::{
    partials::{EagerCompiler, InMemorySource},
    ParserBuilder, Template,
};
use serde::Serialize;

use crate::site::views::LayoutView;

const LAYOUT: &str = include_str!("../../templates/layout.liquid");
const HOME: &str = include_str!("../../templates/home.liquid");
const ARCHIVE: &str = include_str!("../../templates/archive.liquid");
const SEARCH: &str = include_str!("../../templates/search.liquid");
const ISSUE_CARD: &str = include_str!("../../templates/issue_card.liquid");

type Partials = EagerCompiler<InMemorySource>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Archive,
    Search,
}

impl Page {
    fn title(&self) -> &'static str {
        match self {
            Page::Home => "MTV Geismar",
            Page::Archive => "Archiv",
            Page::Search => "PDF Suche",
        }
    }

    fn nav_key(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Archive => "archive",
            Page::Search => "search",
        }
    }
}

/// Page templates, parsed once at startup.
pub struct Templates {
    layout: Template,
    home: Template,
    archive: Template,
    search: Template,
}

impl Templates {
    pub fn new() -> Result<Self, liquid::Error> {
        let mut partials = Partials::empty();
        partials.add("issue_card", ISSUE_CARD);

        let parser = ParserBuilder::with_stdlib().partials(partials).build()?;

        Ok(Self {
            layout: parser.parse(LAYOUT)?,
            home: parser.parse(HOME)?,
            archive: parser.parse(ARCHIVE)?,
            search: parser.parse(SEARCH)?,
        })
    }

    pub fn render<V: Serialize>(&self, page: Page, view: &V) -> Result<String, liquid::Error> {
        let template = match page {
            Page::Home => &self.home,
            Page::Archive => &self.archive,
            Page::Search => &self.search,
        };

        let content = template.render(&liquid::to_object(view)?)?;
        let layout = LayoutView {
            title: page.title(),
            active: page.nav_key(),
            content,
        };

        self.layout.render(&liquid::to_object(&layout)?)
    }
}
