use std::sync::Arc;

use crate::{adapters::ObjectAdapter, config::SiteConfig, issues::IssueSource};

use super::templates::Templates;

pub struct State {
    pub issues: IssueSource,
    pub templates: Templates,
}

impl State {
    pub fn new(client: Arc<dyn ObjectAdapter>, config: &SiteConfig) -> Result<Arc<Self>, liquid::Error> {
        Ok(Arc::new(Self {
            issues: IssueSource::new(client, config),
            templates: Templates::new()?,
        }))
    }
}
