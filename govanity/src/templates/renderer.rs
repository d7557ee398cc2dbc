//! Template renderer.

use super::{TemplateError, PAGE_TEMPLATE, PAGE_TEMPLATE_NAME};
use crate::package::VanityPackage;
use handlebars::Handlebars;
use serde::Serialize;

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - HTML escaping (the default), since values land in attributes
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    hbs
}

/// Values the page template is rendered with.
#[derive(Serialize)]
struct PageContext<'a> {
    import_prefix: &'a str,
    #[serde(flatten)]
    package: &'a VanityPackage,
}

/// Renders the redirect page for a package.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Creates a renderer with the page template compiled.
    ///
    /// # Errors
    ///
    /// Returns an error if the page template fails to compile.
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_template(PAGE_TEMPLATE)
    }

    /// Creates a renderer using a custom page template.
    ///
    /// The template receives `import_prefix` plus the package fields
    /// `import_path`, `repo_url` and `depth`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to compile.
    pub fn with_template(template: &str) -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(PAGE_TEMPLATE_NAME, template)?;
        Ok(Self { handlebars })
    }

    /// Renders the page for a package.
    ///
    /// # Arguments
    ///
    /// * `import_prefix` - Repository root import path for the meta tags
    /// * `package` - The matched package
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_page(
        &self,
        import_prefix: &str,
        package: &VanityPackage,
    ) -> Result<String, TemplateError> {
        let context = PageContext {
            import_prefix,
            package,
        };

        Ok(self.handlebars.render(PAGE_TEMPLATE_NAME, &context)?)
    }
}
