//! Page templates rendered with Handlebars.
//!
//! Each page carries the `go-import` and `go-source` meta tags the `go`
//! tool looks for, plus a refresh redirect so browsers land on the
//! repository.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};

/// Name the page template is registered under.
pub const PAGE_TEMPLATE_NAME: &str = "page";

/// HTML written for every matched package.
pub const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<head>
  <meta http-equiv="content-type" content="text/html; charset=utf-8">
  <meta name="go-import" content="{{import_prefix}} git {{repo_url}}">
  <meta name="go-source" content="{{import_prefix}} {{repo_url}} {{repo_url}}/tree/master{/dir} {{repo_url}}/blob/master{/dir}/{file}#L{line}">
  <meta http-equiv="refresh" content="0; url={{repo_url}}">
</head>
</html>
"#;
