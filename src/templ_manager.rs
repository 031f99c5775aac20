use tera::Tera;
use tracing::info;

/// Glob of all the templates, relative to the working directory.
pub const TEMPLATES_GLOB: &str = "templates/**/*";

#[derive(Debug)]
pub struct TemplateManager {
    tera: Tera,
}

impl TemplateManager {
    pub fn init() -> Result<Self, tera::Error> {
        Self::init_from(TEMPLATES_GLOB)
    }

    pub fn init_from(glob: &str) -> Result<Self, tera::Error> {
        info!(
            "{:<20} - Initializing the Template manager",
            "templ manager"
        );
        let tera = Tera::new(glob)?;
        Ok(Self { tera })
    }

    /// A helper function to render a template file from 'html/' directory to String
    pub fn render_html_to_string(
        &self,
        ctx: &tera::Context,
        template_file: &str,
    ) -> Result<String, tera::Error> {
        let template = format!("html/{template_file}");
        self.tera.render(&template, ctx)
    }
}
