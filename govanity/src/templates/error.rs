//! Page template errors.

/// Errors from compiling or rendering the page template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The page template did not compile.
    #[error("Failed to compile page template: {0}")]
    Compile(#[from] handlebars::TemplateError),

    /// A page could not be rendered, e.g. an unknown variable in strict mode.
    #[error("Failed to render page: {0}")]
    Render(#[from] handlebars::RenderError),
}
