//! Indented plain-text rendering for `--format text`.

use std::fmt::Write;

use elms_core::Value;
use elms_form::{Control, FieldView, FormView, InputType, SectionView};

/// Human-readable text form of a command response.
pub trait Outline {
    fn outline(&self) -> String;
}

impl Outline for Value {
    fn outline(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| String::from("<invalid-json>"))
    }
}

impl Outline for serde_json::Value {
    fn outline(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| String::from("<invalid-json>"))
    }
}

impl Outline for FormView {
    fn outline(&self) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            let _ = writeln!(out, "{title}");
            let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
        }
        if let Some(description) = &self.description {
            let _ = writeln!(out, "{description}");
        }
        for section in &self.sections {
            out.push('\n');
            write_section(&mut out, section);
        }
        out.trim_end().to_string()
    }
}

impl Outline for Vec<FieldView> {
    fn outline(&self) -> String {
        let mut out = String::new();
        for field in self {
            write_field(&mut out, field, 0);
        }
        out.trim_end().to_string()
    }
}

fn write_section(out: &mut String, section: &SectionView) {
    let _ = writeln!(out, "{} ({})", section.title, section.key);
    let _ = writeln!(out, "{}", "-".repeat(section.title.chars().count()));
    if let Some(description) = &section.description {
        let _ = writeln!(out, "{description}");
    }
    for field in &section.fields {
        write_field(out, field, 0);
    }
}

fn write_field(out: &mut String, field: &FieldView, depth: usize) {
    let indent = "  ".repeat(depth);
    let marker = if field.required { " *" } else { "" };
    let _ = write!(out, "{indent}{}{marker} ", field.label);
    write_control(out, &field.control);
    if field.read_only {
        out.push_str(" (read-only)");
    }
    out.push('\n');

    if let Some(note) = &field.note {
        let _ = writeln!(out, "{indent}  note: {note}");
    }
    if let Some(error) = &field.error {
        let _ = writeln!(out, "{indent}  ! {error}");
    }

    match &field.control {
        Control::Group { fields, .. } => {
            for child in fields {
                write_field(out, child, depth + 1);
            }
        }
        Control::List { items, .. } => {
            for item in items {
                match &item.editor {
                    Some(editor) => write_field(out, editor, depth + 1),
                    None => {
                        let _ = writeln!(out, "{indent}  #{} (not editable)", item.index);
                    }
                }
            }
        }
        _ => {}
    }
}

fn write_control(out: &mut String, control: &Control) {
    match control {
        Control::Select {
            placeholder,
            options,
            selected,
        } => {
            let shown = if selected.is_empty() {
                format!("({placeholder})")
            } else {
                format!("{selected:?}")
            };
            let _ = write!(out, "[select: {}] {shown}", options.join(" | "));
        }
        Control::Input {
            input,
            value,
            placeholder,
        } => {
            let kind = match input {
                InputType::Text => "text",
                InputType::Url => "url",
                InputType::Date => "date",
            };
            let shown = match (value.is_empty(), placeholder) {
                (true, Some(placeholder)) => format!("({placeholder})"),
                (true, None) => String::from("-"),
                (false, _) => format!("{value:?}"),
            };
            let _ = write!(out, "[{kind}] {shown}");
        }
        Control::Number { value, min, max } => {
            let range = match (min, max) {
                (None, None) => String::new(),
                (min, max) => format!(
                    " {}..{}",
                    min.map(|m| m.to_string()).unwrap_or_default(),
                    max.map(|m| m.to_string()).unwrap_or_default()
                ),
            };
            let shown = value.map_or_else(|| String::from("-"), |v| v.to_string());
            let _ = write!(out, "[number{range}] {shown}");
        }
        Control::Toggle { checked } => {
            out.push_str(if *checked { "[x]" } else { "[ ]" });
        }
        Control::List { items, .. } => {
            let _ = write!(out, "[list, {} item(s)]", items.len());
        }
        Control::Group { .. } => out.push_str("[group]"),
    }
}
