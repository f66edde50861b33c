//! Compile and render entry points.

use crate::{Config, TemplateError};
use stencil_eval::{BlockBody, Context, TemplateParser};
use stencil_value::Data;
use tracing::{debug, instrument};

/// A compiled template. Immutable; render it as often as needed.
#[derive(Debug)]
pub struct Template {
    body: BlockBody,
    source: String,
}

impl Template {
    pub fn body(&self) -> &BlockBody {
        &self.body
    }

    /// The source the template was compiled from, for locating errors.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Compiles and renders templates with one [`Config`].
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: Config,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Engine { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Compile `source`. Any syntax error aborts the whole compilation.
    #[instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn compile(&self, source: &str) -> Result<Template, TemplateError> {
        let body = TemplateParser::new(source, &self.config.tags, self.config.lex_mode)?
            .parse_document()?;
        debug!(nodes = body.nodes.len(), "compiled template");
        Ok(Template {
            body,
            source: source.to_owned(),
        })
    }

    /// Render `template` against `data`.
    ///
    /// `assign` and `capture` write into `data`; loop bindings are restored
    /// before this returns. Each call gets a fresh context, so counters,
    /// cycles and `ifchanged` state never carry over between renders.
    #[instrument(level = "debug", skip_all, fields(nodes = template.body.nodes.len()))]
    pub fn render(&self, template: &Template, data: &mut Data) -> Result<String, TemplateError> {
        let mut context = Context::new(data, &self.config.filters);
        let mut out = String::with_capacity(template.source.len());
        template.body.render(&mut context, &mut out)?;
        Ok(out)
    }

    /// Render against an empty hash.
    pub fn render_empty(&self, template: &Template) -> Result<String, TemplateError> {
        self.render(template, &mut Data::hash())
    }

    /// Compile and render in one step.
    pub fn parse_and_render(&self, source: &str, data: &mut Data) -> Result<String, TemplateError> {
        let template = self.compile(source)?;
        self.render(&template, data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test code")]
mod tests;
