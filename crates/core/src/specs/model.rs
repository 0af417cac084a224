use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Stable identifier of an entity in the project model
    EntityId
);
string_id!(
    /// Identifier of a relationship, unique across the project model
    RelationshipId
);
string_id!(
    /// Identifier of an input descriptor
    InputId
);
string_id!(
    /// Identifier of a database field backing an input or a foreign key
    FieldId
);
string_id!(
    /// Identifier of a resource definition known to the host
    ResourceId
);

/// A data model exposed for resource generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub plural: String,
    #[serde(default)]
    pub table: Option<String>,
    /// Field shown when another entity references this one
    #[serde(default)]
    pub label_field: Option<String>,
    #[serde(default)]
    pub timestamps: bool,
    #[serde(default)]
    pub inputs: Vec<Input>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub morph_relationships: Vec<Relationship>,
    /// Resource definition the host already has for this entity, if any
    #[serde(default)]
    pub resource: Option<ResourceId>,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            plural: plural.into(),
            table: None,
            label_field: None,
            timestamps: false,
            inputs: Vec::new(),
            relationships: Vec::new(),
            morph_relationships: Vec::new(),
            resource: None,
        }
    }

    pub fn with_input(mut self, input: Input) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        if relationship.kind.is_polymorphic() {
            self.morph_relationships.push(relationship);
        } else {
            self.relationships.push(relationship);
        }
        self
    }

    pub fn with_resource(mut self, resource: impl Into<ResourceId>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_label_field(mut self, label_field: impl Into<String>) -> Self {
        self.label_field = Some(label_field.into());
        self
    }

    pub fn with_timestamps(mut self) -> Self {
        self.timestamps = true;
        self
    }

    /// Direct relationships followed by polymorphic ones
    pub fn all_relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().chain(self.morph_relationships.iter())
    }

    pub fn has_text_like_inputs(&self) -> bool {
        self.inputs.iter().any(|input| input.kind.is_text_family())
    }
}

/// Kind of association between two entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipKind {
    HasOne,
    HasMany,
    BelongsTo,
    BelongsToMany,
    MorphOne,
    MorphMany,
    MorphTo,
    MorphToMany,
}

impl RelationshipKind {
    pub fn is_polymorphic(self) -> bool {
        matches!(
            self,
            Self::MorphOne | Self::MorphMany | Self::MorphTo | Self::MorphToMany
        )
    }

    /// Kinds an admin panel can manage inline through a relation manager
    pub fn supports_relation_manager(self) -> bool {
        matches!(self, Self::MorphMany | Self::HasMany | Self::BelongsToMany)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HasOne => "hasOne",
            Self::HasMany => "hasMany",
            Self::BelongsTo => "belongsTo",
            Self::BelongsToMany => "belongsToMany",
            Self::MorphOne => "morphOne",
            Self::MorphMany => "morphMany",
            Self::MorphTo => "morphTo",
            Self::MorphToMany => "morphToMany",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed edge from the owning entity to `target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,
    pub name: String,
    pub kind: RelationshipKind,
    pub target: EntityId,
    #[serde(default)]
    pub foreign_key: Option<FieldId>,
}

impl Relationship {
    pub fn new(
        id: impl Into<RelationshipId>,
        name: impl Into<String>,
        kind: RelationshipKind,
        target: impl Into<EntityId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            target: target.into(),
            foreign_key: None,
        }
    }

    pub fn with_foreign_key(mut self, field: impl Into<FieldId>) -> Self {
        self.foreign_key = Some(field.into());
        self
    }
}

/// Semantic type of an input.
///
/// Unknown type names are kept verbatim in `Other` so that renderers can
/// still derive a widget name from them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InputKind {
    Text,
    Email,
    Url,
    Password,
    Number,
    Textarea,
    Date,
    Datetime,
    Checkbox,
    Json,
    File,
    Image,
    Color,
    Other(String),
}

impl InputKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Url => "url",
            Self::Password => "password",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Checkbox => "checkbox",
            Self::Json => "json",
            Self::File => "file",
            Self::Image => "image",
            Self::Color => "color",
            Self::Other(raw) => raw,
        }
    }

    /// Types rendered through a plain text input
    pub fn is_text_family(&self) -> bool {
        matches!(
            self,
            Self::Email | Self::Url | Self::Password | Self::Text | Self::Number
        )
    }

    pub fn is_file_or_image(&self) -> bool {
        matches!(self, Self::File | Self::Image)
    }

    pub fn is_date_or_datetime(&self) -> bool {
        matches!(self, Self::Date | Self::Datetime)
    }
}

impl From<String> for InputKind {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "email" => Self::Email,
            "url" => Self::Url,
            "password" => Self::Password,
            "number" => Self::Number,
            "textarea" => Self::Textarea,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "checkbox" | "boolean" => Self::Checkbox,
            "json" => Self::Json,
            "file" => Self::File,
            "image" => Self::Image,
            "color" => Self::Color,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for InputKind {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<InputKind> for String {
    fn from(kind: InputKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level descriptor on an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub id: InputId,
    pub name: String,
    pub kind: InputKind,
    #[serde(default)]
    pub field: Option<FieldId>,
    #[serde(default = "default_true")]
    pub on_index: bool,
    #[serde(default)]
    pub hidden: bool,
    /// Relationship this input selects a value for (a belongs-to select)
    #[serde(default)]
    pub relationship: Option<RelationshipId>,
}

impl Input {
    pub fn new(id: impl Into<InputId>, name: impl Into<String>, kind: impl Into<InputKind>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            field: None,
            on_index: true,
            hidden: false,
            relationship: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<FieldId>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn off_index(mut self) -> Self {
        self.on_index = false;
        self
    }

    pub fn bound_to(mut self, relationship: impl Into<RelationshipId>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }

    pub fn is_for_relationship(&self) -> bool {
        self.relationship.is_some()
    }
}

fn default_true() -> bool {
    true
}
