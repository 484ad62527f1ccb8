use colored::Colorize;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::driver::ClassReport;
use tsz_class_fields::TokenRange;
use tsz_common::{Diagnostic, DiagnosticCategory, LineMap};

pub struct Reporter {
    color: bool,
    sources: HashMap<String, String>,
    line_maps: HashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: HashMap::new(),
            line_maps: HashMap::new(),
        }
    }

    /// Register the text of `file` so locations do not need the file on disk.
    pub fn add_source(&mut self, file: impl Into<String>, source: impl Into<String>) {
        let file = file.into();
        self.line_maps.remove(&file);
        self.sources.insert(file, source.into());
    }

    pub fn render_json(&self, classes: &[ClassReport]) -> serde_json::Result<String> {
        serde_json::to_string_pretty(classes)
    }

    pub fn render_classes(&self, classes: &[ClassReport]) -> String {
        let mut out = String::new();
        for (index, class) in classes.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_class(class));
        }
        out
    }

    pub fn format_class(&self, class: &ClassReport) -> String {
        let info = &class.info;
        let header = &info.header_info;

        let name = header.class_name.as_deref().unwrap_or("<anonymous>");
        let mut traits = vec![if header.is_expression {
            "expression"
        } else {
            "declaration"
        }];
        if header.has_superclass {
            traits.push("has superclass");
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}:{}:{} - class {} ({})",
            class.file,
            class.line,
            class.column,
            self.paint_name(name),
            traits.join(", ")
        );

        match info.constructor_insert_pos {
            Some(pos) => {
                let _ = writeln!(out, "  {} token {pos}", self.label("constructor insert position:"));
            }
            None => {
                let _ = writeln!(out, "  {} none", self.label("constructor:"));
            }
        }
        self.write_list(&mut out, "initializer statements:", &info.initializer_statements);
        self.write_list(
            &mut out,
            "static initializer suffixes:",
            &info.static_initializer_suffixes,
        );

        if !info.fields.is_empty() {
            let _ = writeln!(out, "  {}", self.label("fields:"));
            for (field, source) in info.fields.iter().zip(&class.field_sources) {
                let _ = writeln!(
                    out,
                    "    {} {} -> {}",
                    format_range(field.range()),
                    source,
                    field.initializer_name
                );
            }
        }
        if !info.ranges_to_remove.is_empty() {
            let ranges: Vec<String> = info.ranges_to_remove.iter().copied().map(format_range).collect();
            let _ = writeln!(out, "  {} {}", self.label("removed ranges:"), ranges.join(", "));
        }
        out
    }

    fn write_list(&self, out: &mut String, label: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        let _ = writeln!(out, "  {}", self.label(label));
        for item in items {
            let _ = writeln!(out, "    {item}");
        }
    }

    fn label(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_name(&self, name: &str) -> String {
        if self.color {
            name.bold().to_string()
        } else {
            name.to_string()
        }
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let location = self
            .format_location(&diagnostic.file, diagnostic.start)
            .unwrap_or_else(|| {
                if diagnostic.file.is_empty() {
                    "<unknown>".to_string()
                } else {
                    diagnostic.file.clone()
                }
            });

        let mut output = format!(
            "{} - {} {}: {}",
            location,
            self.format_category(diagnostic.category),
            self.format_code(diagnostic.code),
            diagnostic.message_text
        );
        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }
        output
    }

    /// Source line with the span underlined, as tsc prints it:
    ///   2   constructor(private { a }) {}
    ///                           ~
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if length == 0 {
            return None;
        }
        let (line, column) = self.position_for(file, start)?;
        let source = self.sources.get(file)?;
        let line_text = source.lines().nth((line - 1) as usize)?;

        let indent: String = line_text
            .chars()
            .take((column - 1) as usize)
            .map(|ch| if ch == '\t' { '\t' } else { ' ' })
            .collect();
        let span = "~".repeat(length.max(1) as usize);
        let underline = if self.color {
            span.red().to_string()
        } else {
            span
        };
        Some(format!("\n  {line:>3}   {line_text}\n        {indent}{underline}"))
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        let (line, column) = self.position_for(file, offset)?;
        Some(format!("{file}:{line}:{column}"))
    }

    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        self.ensure_source(file)?;
        if !self.line_maps.contains_key(file) {
            let map = LineMap::build(self.sources.get(file)?);
            self.line_maps.insert(file.to_string(), map);
        }
        let position = self.line_maps.get(file)?.offset_to_position(offset);
        Some((position.line + 1, position.character + 1))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if file.is_empty() {
            return None;
        }
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.label();
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("TS{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

fn format_range(range: TokenRange) -> String {
    format!("[{}, {})", range.start, range.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsz_class_fields::ClassTransformOptions;

    #[test]
    fn test_format_diagnostic_with_snippet() {
        let source = "class A {\n  constructor(private { a }) {}\n}\n";
        let (_, diagnostics) =
            crate::driver::analyse_source("a.ts", source, &ClassTransformOptions::default())
                .expect("analysis should succeed");
        let mut reporter = Reporter::new(false);
        reporter.add_source("a.ts", source);
        let rendered = reporter.render(&diagnostics);
        assert!(
            rendered.starts_with(
                "a.ts:2:23 - error TS1187: A parameter property may not be declared using a binding pattern."
            ),
            "unexpected output: {rendered}"
        );
        assert!(rendered.ends_with("\n    2     constructor(private { a }) {}\n                              ~"));
    }

    #[test]
    fn test_format_class_plain() {
        let source = "class Foo extends Bar {\n  constructor(public a) { super(); }\n  x = 1;\n}\n";
        let (classes, _) =
            crate::driver::analyse_source("a.ts", source, &ClassTransformOptions::default())
                .expect("analysis should succeed");
        let text = Reporter::new(false).render_classes(&classes);
        assert!(text.starts_with("a.ts:1:1 - class Foo (declaration, has superclass)\n"));
        assert!(text.contains("  initializer statements:\n    this.a = a\n    this.__init()\n"));
        assert!(text.contains("x = 1 -> __init"));
        assert!(text.contains("removed ranges: "));
    }
}
