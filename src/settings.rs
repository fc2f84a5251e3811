//! Template variables substituted into generated and finalized files.

use serde::Deserialize;

use crate::constants::STDIN_INDICATOR;
use crate::error::Result;
use crate::ioutils::read_from;

/// Resolved template variables. Every key always has a value, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub name: String,
    pub email: String,
    pub website: String,
    pub module_name: String,
    pub camel_module_name: String,
    pub human_module_name: String,
    pub module_description: String,
    pub github_username: String,
}

/// Caller-supplied values. Absent fields fall back to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverrides {
    pub name: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub module_name: Option<String>,
    pub camel_module_name: Option<String>,
    pub human_module_name: Option<String>,
    pub module_description: Option<String>,
    pub github_username: Option<String>,
}

impl Settings {
    /// Identifiers recognised inside `<%= ... %>` tokens, in template order.
    pub const KEYS: [&'static str; 8] = [
        "name",
        "email",
        "website",
        "moduleName",
        "camelModuleName",
        "humanModuleName",
        "moduleDescription",
        "githubUsername",
    ];

    pub fn from_overrides(overrides: SettingsOverrides) -> Self {
        Self {
            name: overrides.name.unwrap_or_default(),
            email: overrides.email.unwrap_or_default(),
            website: overrides.website.unwrap_or_default(),
            module_name: overrides.module_name.unwrap_or_default(),
            camel_module_name: overrides.camel_module_name.unwrap_or_default(),
            human_module_name: overrides.human_module_name.unwrap_or_default(),
            module_description: overrides.module_description.unwrap_or_default(),
            github_username: overrides.github_username.unwrap_or_default(),
        }
    }

    /// Looks up a template identifier. `None` means the identifier is not a known key.
    pub fn lookup(&self, identifier: &str) -> Option<&str> {
        let value = match identifier {
            "name" => &self.name,
            "email" => &self.email,
            "website" => &self.website,
            "moduleName" => &self.module_name,
            "camelModuleName" => &self.camel_module_name,
            "humanModuleName" => &self.human_module_name,
            "moduleDescription" => &self.module_description,
            "githubUsername" => &self.github_username,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Mutable counterpart of [`Settings::lookup`], used when merging prompt answers.
    pub fn lookup_mut(&mut self, identifier: &str) -> Option<&mut String> {
        let value = match identifier {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "website" => &mut self.website,
            "moduleName" => &mut self.module_name,
            "camelModuleName" => &mut self.camel_module_name,
            "humanModuleName" => &mut self.human_module_name,
            "moduleDescription" => &mut self.module_description,
            "githubUsername" => &mut self.github_username,
            _ => return None,
        };
        Some(value)
    }
}

impl SettingsOverrides {
    /// Parses overrides from a JSON object. Unknown keys are ignored.
    pub fn from_json(buf: &str) -> Result<Self> {
        Ok(serde_json::from_str(buf)?)
    }

    /// Reads overrides from a `--answers` argument, where `-` means stdin.
    pub fn from_arg(arg: Option<&str>) -> Result<Self> {
        match arg {
            None => Ok(Self::default()),
            Some(STDIN_INDICATOR) => Self::from_json(&read_from(std::io::stdin())?),
            Some(json) => Self::from_json(json),
        }
    }
}
