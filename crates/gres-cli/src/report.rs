use colored::Colorize;
use std::fmt::Write;

use crate::driver::{TypeParamReport, TypeReport};

/// Renders resolution reports as human-readable text.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// One block per type:
    ///
    /// ```text
    /// class Demo.C`2
    ///   T (`0): reference
    ///     base: System.Collections.Generic.List`1[[System.String]]
    ///   U (`1): unknown, new()
    ///     base: System.Object
    ///     interfaces: System.IDisposable
    /// ```
    pub fn render(&self, reports: &[TypeReport]) -> String {
        let mut out = String::new();
        for (index, report) in reports.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            self.write_type(&mut out, report);
        }
        out
    }

    /// `file - error: message` lines for failed types only.
    pub fn render_errors(&self, file: &str, reports: &[TypeReport]) -> String {
        let mut out = String::new();
        for report in reports {
            if let Some(error) = &report.error {
                let _ = writeln!(
                    out,
                    "{file} - {} {}: {error}",
                    self.error_label(),
                    self.type_name(&report.name)
                );
            }
        }
        out
    }

    pub fn summary(&self, reports: &[TypeReport]) -> String {
        let failed = reports.iter().filter(|r| r.is_error()).count();
        let checked = reports.len();
        let line = if failed == 0 {
            format!("{checked} type(s) resolved")
        } else {
            format!("{failed} of {checked} type(s) failed to resolve")
        };
        if !self.color {
            return line;
        }
        if failed == 0 {
            line.green().to_string()
        } else {
            line.red().to_string()
        }
    }

    fn write_type(&self, out: &mut String, report: &TypeReport) {
        let _ = writeln!(out, "{} {}", report.kind, self.type_name(&report.name));
        if let Some(error) = &report.error {
            let _ = writeln!(out, "  {}: {error}", self.error_label());
            return;
        }
        if report.type_parameters.is_empty() {
            let _ = writeln!(out, "  (no type parameters)");
            return;
        }
        for param in &report.type_parameters {
            self.write_parameter(out, report, param);
        }
    }

    fn write_parameter(&self, out: &mut String, report: &TypeReport, param: &TypeParamReport) {
        let position = if param.owner == report.name {
            format!("`{}", param.index)
        } else {
            format!("{} ``{}", param.owner, param.index)
        };
        let new_marker = if param.has_default_constructor_constraint {
            ", new()"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  {} ({position}): {}{new_marker}",
            param.name,
            self.reference_kind(param.reference_kind)
        );
        let _ = writeln!(out, "    base: {}", param.effective_base_class);
        if !param.interfaces.is_empty() {
            let _ = writeln!(out, "    interfaces: {}", param.interfaces.join(", "));
        }
    }

    fn type_name(&self, name: &str) -> String {
        if self.color {
            name.bold().to_string()
        } else {
            name.to_string()
        }
    }

    fn error_label(&self) -> String {
        if self.color {
            "error".red().bold().to_string()
        } else {
            "error".to_string()
        }
    }

    fn reference_kind(&self, kind: &str) -> String {
        if !self.color {
            return kind.to_string();
        }
        match kind {
            "reference" => kind.cyan().to_string(),
            "value" => kind.yellow().to_string(),
            _ => kind.dimmed().to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/report_tests.rs"]
mod tests;
