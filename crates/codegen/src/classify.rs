//! Fixed classification tables turning an input into the column and form
//! widget a renderer should use.

use crate::naming::to_pascal_case;
use crudgen_core::{Input, InputKind};
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableColumn {
    TextColumn,
    ImageColumn,
    IconColumn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormWidget {
    TextInput,
    Select,
    KeyValue,
    DatePicker,
    Toggle,
    RichEditor,
    FileUpload,
    DateTimePicker,
    ColorPicker,
    /// Widget named after an input type the table does not know
    Custom(String),
}

impl FormWidget {
    pub fn name(&self) -> &str {
        match self {
            Self::TextInput => "TextInput",
            Self::Select => "Select",
            Self::KeyValue => "KeyValue",
            Self::DatePicker => "DatePicker",
            Self::Toggle => "Toggle",
            Self::RichEditor => "RichEditor",
            Self::FileUpload => "FileUpload",
            Self::DateTimePicker => "DateTimePicker",
            Self::ColorPicker => "ColorPicker",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for FormWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for FormWidget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Column type for the index table. Order matters: a relationship-bound
/// input is always shown as text, even when it is an image or a checkbox.
pub fn table_column(input: &Input) -> TableColumn {
    if input.is_for_relationship() {
        return TableColumn::TextColumn;
    }

    match input.kind {
        InputKind::Image => TableColumn::ImageColumn,
        InputKind::Checkbox => TableColumn::IconColumn,
        _ => TableColumn::TextColumn,
    }
}

/// Form widget for an input. Text-family types win over the relationship
/// binding, which wins over every other type.
pub fn form_widget(input: &Input) -> FormWidget {
    if input.kind.is_text_family() {
        return FormWidget::TextInput;
    }

    if input.is_for_relationship() {
        return FormWidget::Select;
    }

    match &input.kind {
        InputKind::Json => FormWidget::KeyValue,
        InputKind::Date => FormWidget::DatePicker,
        InputKind::Checkbox => FormWidget::Toggle,
        InputKind::Textarea => FormWidget::RichEditor,
        InputKind::File | InputKind::Image => FormWidget::FileUpload,
        InputKind::Datetime => FormWidget::DateTimePicker,
        InputKind::Color => FormWidget::ColorPicker,
        other => FormWidget::Custom(to_pascal_case(other.as_str())),
    }
}

/// Inputs listed in the index table
pub fn is_table_input(input: &Input) -> bool {
    input.kind != InputKind::File
        && input.kind != InputKind::Json
        && !input.hidden
        && input.on_index
}

/// Inputs the global table search can look into
pub fn is_searchable(input: &Input) -> bool {
    !input.kind.is_date_or_datetime()
        && input.kind != InputKind::Password
        && input.kind != InputKind::Json
        && input.kind != InputKind::Checkbox
        && !input.is_for_relationship()
        && !input.kind.is_file_or_image()
}

/// Inputs that get their own column search field
pub fn is_searchable_individually(input: &Input) -> bool {
    matches!(
        input.kind,
        InputKind::Text | InputKind::Email | InputKind::Url | InputKind::Number
    )
}
