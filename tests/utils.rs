use std::path::Path;

/// Template checkout as it looks before finalization.
pub const ORIGINAL_FILES: &[(&str, &str)] = &[
    ("LICENSE", "MIT <%= name %>"),
    ("package.json", "{\n  \"name\": \"<%= moduleName %>\",\n  \"author\": \"<%= name %> <<%= email %>>\"\n}\n"),
    ("APP_README.md", "# <%= moduleName %>\n\n<%= moduleDescription %>\n"),
    ("README.md", "Run ./install to set up this template.\n"),
    ("install", "#!/bin/sh\nscaffold finalize\n"),
];

/// Writes [`ORIGINAL_FILES`] into `root`.
pub fn seed_template(root: &Path) {
    for (name, content) in ORIGINAL_FILES {
        std::fs::write(root.join(name), content).unwrap();
    }
}

pub fn read(path: impl AsRef<Path>) -> String {
    std::fs::read_to_string(path).unwrap()
}
