use serde::{Deserialize, Serialize};

/// Collection represents a collection schema as reported by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
    pub name: String,
    /// Server-reported, informational only
    #[serde(skip_serializing_if = "is_zero")]
    pub num_documents: u64,
    pub fields: Vec<Field>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_sorting_field: String,
}

/// Field is a single field of a collection schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub name: String,
    /// Engine type tag, e.g. "string", "int32", "string[]"
    #[serde(rename = "type")]
    pub field_type: String,
    pub facet: bool,
    pub index: bool,
    pub infix: bool,
}

/// CreateField describes a field passed to `create_collection`.
///
/// Indexing is expressed as `no_index` so that the default value indexes the
/// field; it is inverted into [`Field::index`] on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateField {
    pub name: String,
    pub field_type: String,
    pub facet: bool,
    pub no_index: bool,
    pub infix: bool,
}

impl CreateField {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            ..Default::default()
        }
    }

    pub fn facet(mut self) -> Self {
        self.facet = true;
        self
    }

    pub fn no_index(mut self) -> Self {
        self.no_index = true;
        self
    }

    pub fn infix(mut self) -> Self {
        self.infix = true;
        self
    }
}

impl From<&CreateField> for Field {
    fn from(f: &CreateField) -> Self {
        Self {
            name: f.name.clone(),
            field_type: f.field_type.clone(),
            facet: f.facet,
            index: !f.no_index,
            infix: f.infix,
        }
    }
}

impl Collection {
    /// Build the body of a create-collection request.
    /// `default_sorting_field` may be empty, in which case it is omitted.
    pub fn schema(
        name: impl Into<String>,
        default_sorting_field: impl Into<String>,
        fields: &[CreateField],
    ) -> Self {
        Self {
            name: name.into(),
            num_documents: 0,
            fields: fields.iter().map(Field::from).collect(),
            default_sorting_field: default_sorting_field.into(),
        }
    }
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}
