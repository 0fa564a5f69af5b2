use crate::app_config::AppConfig;
use crate::sheets::DataSource;
use crate::web::WebError;
use handlebars::Handlebars;
use std::sync::Arc;

pub const PAGE_TEMPLATE: &str = "page";

/// Immutable state shared by all requests. Every request is still its own run.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn DataSource>,
    config: Arc<AppConfig>,
    templates: Handlebars<'static>,
}

impl AppState {
    pub fn new(source: Arc<dyn DataSource>, config: Arc<AppConfig>) -> Result<Self, WebError> {
        let mut templates = Handlebars::new();
        templates.register_template_string(PAGE_TEMPLATE, include_str!("templates/page.hbs"))?;

        Ok(AppState {
            inner: Arc::new(Inner { source, config, templates }),
        })
    }

    pub fn source(&self) -> &dyn DataSource {
        self.inner.source.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn templates(&self) -> &Handlebars<'static> {
        &self.inner.templates
    }
}
