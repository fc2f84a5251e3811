/// Lifecycle step a template is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Tooling configuration, copied verbatim.
    Configuring,
    /// Project sources and documents.
    Writing,
}

/// A template file embedded in the binary.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    /// Path relative to the project root.
    pub name: &'static str,
    pub content: &'static str,
    pub stage: Stage,
    /// Whether placeholders are substituted on write.
    pub render: bool,
}

macro_rules! template {
    ($name:literal, $stage:expr, $render:expr) => {
        Template {
            name: $name,
            content: include_str!(concat!("../../templates/", $name)),
            stage: $stage,
            render: $render,
        }
    };
}

pub const TEMPLATES: &[Template] = &[
    template!(".babelrc", Stage::Configuring, false),
    template!(".editorconfig", Stage::Configuring, false),
    template!(".gitattributes", Stage::Configuring, false),
    template!(".gitignore", Stage::Configuring, false),
    template!(".travis.yml", Stage::Configuring, false),
    template!("index.js", Stage::Writing, false),
    template!("LICENSE", Stage::Writing, true),
    template!("package.json", Stage::Writing, true),
    template!("README.md", Stage::Writing, true),
    template!("test.js", Stage::Writing, false),
    template!("webpack.config.babel.js", Stage::Writing, false),
];

/// Templates of one stage, in declaration order.
pub fn for_stage(stage: Stage) -> impl Iterator<Item = &'static Template> {
    TEMPLATES.iter().filter(move |t| t.stage == stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::identifiers;
    use crate::settings::Settings;

    #[test]
    fn rendered_templates_only_use_known_keys() {
        for template in TEMPLATES.iter().filter(|t| t.render) {
            for id in identifiers(template.content) {
                assert!(
                    Settings::KEYS.contains(&id),
                    "{} references unknown key {id}",
                    template.name
                );
            }
        }
    }

    #[test]
    fn verbatim_templates_have_no_placeholders() {
        for template in TEMPLATES.iter().filter(|t| !t.render) {
            assert!(identifiers(template.content).is_empty(), "{}", template.name);
        }
    }

    #[test]
    fn configuring_stage_holds_dotfiles() {
        assert!(for_stage(Stage::Configuring).all(|t| t.name.starts_with('.')));
        assert_eq!(for_stage(Stage::Writing).count(), 6);
    }
}
