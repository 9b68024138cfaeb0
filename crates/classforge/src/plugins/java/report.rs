//! Generation report
//!
//! A short markdown summary of what was generated for each class, written
//! next to the sources as `Report.md`.

use std::fmt::Write;

use serde::Serialize;

/// What was generated for one class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    pub class_name: String,
    /// Fields, record components and enum constants
    pub attributes: Vec<String>,
    pub constructors: usize,
    /// Property names with a getter
    pub getters: Vec<String>,
    /// Property names with a setter
    pub setters: Vec<String>,
    pub overridden: Vec<String>,
    pub custom_methods: Vec<String>,
    /// Constructs Java will reject, kept as drawn
    pub issues: Vec<String>,
}

impl ArtifactReport {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    /// Markdown section for this class
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "## {}", self.class_name);
        let _ = writeln!(out, "- Created attributes: {{{}}}", self.attributes.join(", "));
        if self.constructors > 0 {
            let _ = writeln!(out, "- Created {} constructor(s)", self.constructors);
        }
        if !self.getters.is_empty() {
            let _ = writeln!(out, "- Created getters for: {{ {} }}", self.getters.join(", "));
        }
        if !self.setters.is_empty() {
            let _ = writeln!(out, "- Created setters for: {{ {} }}", self.setters.join(", "));
        }
        if !self.overridden.is_empty() {
            let _ = writeln!(out, "- Overridden methods: {{ {} }}", self.overridden.join(", "));
        }
        for method in &self.custom_methods {
            let _ = writeln!(out, "- Created method: {}", method);
        }
        for issue in &self.issues {
            let _ = writeln!(out, "- [!] {}", issue);
        }
        out
    }
}

/// Report for a whole generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub entries: Vec<ArtifactReport>,
    /// Files left untouched because they already existed
    pub skipped: Vec<String>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: ArtifactReport) {
        self.entries.push(entry);
    }

    pub fn skip(&mut self, file_name: impl Into<String>) {
        self.skipped.push(file_name.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.skipped.is_empty()
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# Generation Report\n\n");
        for entry in &self.entries {
            out.push_str(&entry.to_markdown());
            out.push('\n');
        }
        if !self.skipped.is_empty() {
            out.push_str("## [Skipped]\n");
            for file in &self.skipped {
                let _ = writeln!(out, "- {} already exists", file);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_markdown() {
        let mut entry = ArtifactReport::new("Circle");
        entry.attributes = vec!["radius".to_string()];
        entry.constructors = 1;
        entry.getters = vec!["radius".to_string()];
        entry.overridden = vec!["area".to_string()];
        entry.custom_methods = vec!["scale".to_string()];

        let md = entry.to_markdown();
        assert!(md.starts_with("## Circle\n"));
        assert!(md.contains("- Created attributes: {radius}"));
        assert!(md.contains("- Created 1 constructor(s)"));
        assert!(md.contains("- Created getters for: { radius }"));
        assert!(md.contains("- Overridden methods: { area }"));
        assert!(md.contains("- Created method: scale"));
        assert!(!md.contains("setters"));
    }

    #[test]
    fn test_empty_attributes_still_listed() {
        let md = ArtifactReport::new("Marker").to_markdown();
        assert!(md.contains("- Created attributes: {}"));
    }

    #[test]
    fn test_report_with_skipped_files() {
        let mut report = GenerationReport::new();
        assert!(report.is_empty());
        report.add(ArtifactReport::new("Circle"));
        report.skip("Shape.java");

        let md = report.to_markdown();
        assert!(md.starts_with("# Generation Report"));
        assert!(md.contains("## Circle"));
        assert!(md.contains("## [Skipped]\n- Shape.java already exists"));
    }
}
