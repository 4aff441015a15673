//! Template engine adapter backed by minijinja.
//!
//! This is the only place template helpers are registered. The environment
//! starts empty, so templates see `lower`, `title` and `plural` and nothing
//! else, each usable as a function or a filter.

use std::sync::Arc;

use minijinja::{Environment, UndefinedBehavior};

use kubeforge_core::{
    application::ports::{TemplateEngine, TemplateError},
    domain::{EnglishPluralizer, Pluralizer, TemplateData, inflection::title},
};

pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        Self::with_pluralizer(Arc::new(EnglishPluralizer))
    }

    pub fn with_pluralizer(pluralizer: Arc<dyn Pluralizer>) -> Self {
        let mut env = Environment::empty();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        env.add_function("lower", lower);
        env.add_filter("lower", lower);
        env.add_function("title", title_helper);
        env.add_filter("title", title_helper);

        let for_function = Arc::clone(&pluralizer);
        env.add_function("plural", move |word: &str| for_function.pluralize(word));
        env.add_filter("plural", move |word: &str| pluralizer.pluralize(word));

        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn lower(value: &str) -> String {
    value.to_lowercase()
}

fn title_helper(value: &str) -> String {
    title(value)
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, name: &str, body: &str, data: &TemplateData) -> Result<String, TemplateError> {
        self.env
            .render_named_str(name, body, data)
            .map_err(|err| TemplateError::new(describe(&err)))
    }
}

fn describe(err: &minijinja::Error) -> String {
    match err.line() {
        Some(line) => format!("{} (line {})", err, line),
        None => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubeforge_core::domain::{ProjectContext, ResourceDescriptor};

    fn data() -> TemplateData {
        let mut resource = ResourceDescriptor::new("crew", "v1", "FirstMate");
        resource.validate().unwrap();
        let project = ProjectContext {
            repo: "example.com/fleet".into(),
            domain: "example.com".into(),
            ..ProjectContext::default()
        };
        TemplateData::new(&project, Some(&resource))
    }

    fn render(body: &str) -> Result<String, TemplateError> {
        MiniJinjaEngine::new().render("test.go", body, &data())
    }

    #[test]
    fn renders_resource_fields() {
        assert_eq!(
            render("type {{ resource.kind }} struct{} // {{ resource.qualified_group }}").unwrap(),
            "type FirstMate struct{} // crew.example.com"
        );
    }

    #[test]
    fn helpers_work_as_functions_and_filters() {
        assert_eq!(render("{{ lower(resource.kind) }}").unwrap(), "firstmate");
        assert_eq!(render("{{ resource.kind | lower }}").unwrap(), "firstmate");
        assert_eq!(render("{{ title(resource.group) }}").unwrap(), "Crew");
        assert_eq!(render("{{ resource.group | title }}").unwrap(), "Crew");
        assert_eq!(render("{{ plural('policy') }}").unwrap(), "policies");
        assert_eq!(render("{{ 'box' | plural }}").unwrap(), "boxes");
    }

    #[test]
    fn trailing_newline_is_kept() {
        assert_eq!(render("package {{ resource.version }}\n").unwrap(), "package v1\n");
    }

    #[test]
    fn undefined_variable_is_an_error() {
        assert!(render("{{ resource.nickname }}").is_err());
        assert!(render("{{ nothing }}").is_err());
    }

    #[test]
    fn builtin_filters_are_not_available() {
        assert!(render("{{ resource.kind | upper }}").is_err());
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = render("{% if %}").unwrap_err();
        assert!(!err.reason.is_empty());
    }

    #[test]
    fn injected_pluralizer_is_used() {
        struct Always;
        impl Pluralizer for Always {
            fn pluralize(&self, _: &str) -> String {
                "many".into()
            }
        }

        let engine = MiniJinjaEngine::with_pluralizer(Arc::new(Always));
        assert_eq!(
            engine.render("x", "{{ plural('ship') }}", &data()).unwrap(),
            "many"
        );
    }
}
