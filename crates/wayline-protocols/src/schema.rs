//! Declared shapes of structured model values.

use std::sync::Arc;

use crate::value::{Map, Value};

/// Declared type of a model field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Str,
    Int,
    Float,
    Bool,
    DateTime,
    Bytes,
    Any,
    /// Readable/writable binary stream object.
    BinaryStream,
    /// A type (class reference) held as a value.
    TypeRef,
    /// Any instance of the base model type, resolved only at runtime.
    AnyModel,
    /// A generic type parameter bound to the base model type.
    TypeParam(String),
    /// A specific model type.
    Model(Arc<ModelSchema>),
    Optional(Box<FieldType>),
    Union(Vec<FieldType>),
    List(Box<FieldType>),
    /// List without an element annotation.
    UntypedList,
    Tuple,
    Map(Box<FieldType>),
}

impl FieldType {
    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional(Box::new(inner))
    }

    pub fn list(inner: FieldType) -> Self {
        FieldType::List(Box::new(inner))
    }

    pub fn map(values: FieldType) -> Self {
        FieldType::Map(Box::new(values))
    }

    pub fn model(schema: &Arc<ModelSchema>) -> Self {
        FieldType::Model(Arc::clone(schema))
    }
}

/// A named field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub ty: FieldType,
}

/// Schema of a named record type.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    name: String,
    fields: Vec<FieldDef>,
}

impl ModelSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field declaration.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field_type(&self, name: &str) -> Option<&FieldType> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.ty)
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// An instance of a model: a schema plus the current field values.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelValue {
    schema: Arc<ModelSchema>,
    fields: Map,
}

impl ModelValue {
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        Self {
            schema,
            fields: Map::new(),
        }
    }

    /// Set a field value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Map {
        &self.fields
    }
}
