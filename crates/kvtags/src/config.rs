//! Declarative type definitions that can be loaded from TOML or JSON.
//!
//! ```toml
//! [[types]]
//! id = "price"
//! label = "Price"
//! aliases = ["cost"]
//! kind = "number"
//! delimiters = { decimal = ",", groups = "." }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{KeyValueError, KeyValueResult};
use crate::types::{
    BooleanType, DateConfig, DateType, KeyValueType, NumberConfig, NumberModifierType, NumberType,
    RegexType, SortType, TagConfig, TagType, TypeKind,
};

/// The declaration of a key-value type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub id: String,
    pub label: String,
    /// Aliases in addition to the id and the label.
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(flatten)]
    pub kind: KindSpec,
}

/// The kind of a declared type and its settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KindSpec {
    Boolean,
    Sort,
    Number(NumberConfig),
    Date(DateConfig),
    NumberModifier(NumberConfig),
    Regex,
    Tag(TagConfig),
}

impl KindSpec {
    /// Validates the settings and builds the kind.
    pub fn build(&self) -> KeyValueResult<TypeKind> {
        let kind = match self {
            KindSpec::Boolean => BooleanType::new().into(),
            KindSpec::Sort => SortType::new().into(),
            KindSpec::Number(config) => NumberType::with_config(config.clone())?.into(),
            KindSpec::Date(config) => DateType::with_config(config.clone())?.into(),
            KindSpec::NumberModifier(config) => {
                NumberModifierType::with_config(config.clone())?.into()
            }
            KindSpec::Regex => RegexType::new().into(),
            KindSpec::Tag(config) => TagType::new(config.clone()).into(),
        };
        Ok(kind)
    }
}

impl TypeSpec {
    /// Validates the declaration and builds the type.
    ///
    /// # Errors
    ///
    /// Returns `KeyValueError::InvalidConfig` naming this type's id when the
    /// id is empty or the kind settings are invalid.
    pub fn build(&self) -> KeyValueResult<KeyValueType> {
        if self.id.trim().is_empty() {
            return Err(KeyValueError::invalid_config(
                self.label.as_str(),
                "type id must not be empty",
            ));
        }
        let kind = self
            .kind
            .build()
            .map_err(|e| e.with_type_id(self.id.as_str()))?;
        Ok(KeyValueType::new(self.id.as_str(), self.label.as_str(), kind)
            .with_aliases(&self.aliases))
    }
}

/// Builds shared types from declarations, rejecting duplicate ids.
pub fn build_types(specs: &[TypeSpec]) -> KeyValueResult<Vec<Arc<KeyValueType>>> {
    let mut types: Vec<Arc<KeyValueType>> = Vec::with_capacity(specs.len());
    for spec in specs {
        if types.iter().any(|t| t.id() == spec.id) {
            return Err(KeyValueError::invalid_config(
                spec.id.as_str(),
                "duplicate type id",
            ));
        }
        types.push(Arc::new(spec.build()?));
    }
    Ok(types)
}
