//! Markdown templates for operation documentation
//!
//! Copyright (c) 2025 tcpostman contributors
//! Licensed under the Apache-2.0 license

use crate::documentation::fields::FieldDoc;

/// Template for generating markdown documentation
pub struct Template;

impl Template {
    pub const BODY_FIELDS_HEADING: &'static str = "### Body fields";

    /// Section shown when the operation has no input at all
    pub fn no_body() -> String {
        format!("{}\n*(no body)*", Self::BODY_FIELDS_HEADING)
    }

    /// Section shown when the input declares nothing documentable
    pub fn no_fields() -> String {
        format!("{}\n*(no fields)*", Self::BODY_FIELDS_HEADING)
    }

    /// Bullet list of fields, in the order given
    pub fn body_fields(fields: &[FieldDoc]) -> String {
        if fields.is_empty() {
            return Self::no_fields();
        }

        let mut result = format!("{}\n", Self::BODY_FIELDS_HEADING);
        for field in fields {
            result.push_str(&Self::field_line(field));
        }

        result.trim().to_string()
    }

    /// One bullet, newline-terminated
    pub fn field_line(field: &FieldDoc) -> String {
        let mut line = format!("- `{}`", field.path);

        if !field.type_name.trim().is_empty() {
            line.push_str(&format!(" *({})*", field.type_name));
        }

        if !field.description.is_empty() {
            line.push_str(" — ");
            line.push_str(&field.description);
        }

        if !field.enum_values.is_empty() {
            line.push_str("  \n  *Enum:* ");
            line.push_str(&Self::enum_list(&field.enum_values));
        }

        line.push('\n');
        line
    }

    /// `[A, B, C]`
    pub fn enum_list(values: &[String]) -> String {
        format!("[{}]", values.join(", "))
    }
}
