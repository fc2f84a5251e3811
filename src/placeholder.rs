use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::settings::Settings;

/// `<%=`, one space, an alphanumeric identifier, one space, `%>`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<%= ([a-zA-Z0-9]+) %>").expect("placeholder pattern is valid")
});

/// Replaces every `<%= identifier %>` token in `content` with its settings value.
///
/// Identifiers that are not settings keys are replaced with an empty string
/// and reported with a warning.
///
/// # Examples
/// ```
/// use scaffold::placeholder::substitute;
/// use scaffold::settings::Settings;
///
/// let settings = Settings { name: "Ada".into(), ..Default::default() };
/// assert_eq!(substitute("Copyright <%= name %>", &settings), "Copyright Ada");
/// ```
pub fn substitute(content: &str, settings: &Settings) -> String {
    PLACEHOLDER
        .replace_all(content, |caps: &Captures| {
            let identifier = &caps[1];
            match settings.lookup(identifier) {
                Some(value) => value.to_string(),
                None => {
                    log::warn!("Unknown placeholder '{identifier}', substituting an empty string");
                    String::new()
                }
            }
        })
        .into_owned()
}

/// Lists the identifiers referenced by `content`, in order of appearance.
pub fn identifiers(content: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
