//! JSON Schema to Entity Data Model
//!
//! Converts a JSON Schema document into a tree of entity types with typed
//! structural properties, plus an entity container exposing the root type as
//! the `root` entity set.
//!
//! # Example
//!
//! ```
//! use schema_edm::{build_model, parse_schema, PrimitiveKind};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {
//!         "name": { "type": "string", "maxLength": 40 },
//!         "age": { "type": "integer" },
//!         "address": {
//!             "type": "object",
//!             "properties": { "city": { "type": "string" } }
//!         }
//!     },
//!     "required": ["name"]
//! });
//!
//! let model = build_model(&parse_schema(&schema).unwrap()).unwrap();
//! let root = model.root_entity_type().unwrap();
//!
//! let name = root.find_property("name").unwrap().type_reference.as_string().unwrap();
//! assert!(!name.nullable);
//! assert_eq!(name.max_length, Some(40));
//!
//! let age = &root.find_property("age").unwrap().type_reference;
//! assert_eq!(age.primitive_kind(), Some(PrimitiveKind::Int32));
//!
//! let address = &root.find_property("address").unwrap().type_reference;
//! let address = address.as_entity_reference().unwrap();
//! assert_eq!(model.entity_type(address.entity_type).name, "address");
//! ```
//!
//! # Mapping Rules
//!
//! | Schema type | Model type | Nullable |
//! |-------------|------------|----------|
//! | `string` | `Edm.String` (`maxLength` → MaxLength) | unless required |
//! | `number` | `Edm.Double` | no facet |
//! | `integer` | `Edm.Int32` | no facet |
//! | `boolean` | `Edm.Boolean` | no facet |
//! | `array` | `Collection(<item kind>)` | unless required |
//! | `object` | reference to a nested entity type | unless required |
//!
//! A property without `type` fails the conversion with
//! [`ConvertError::MissingType`].

mod converter;
mod csdl;
mod error;
mod loader;
mod mapper;
mod model;
mod schema;
mod validator;

pub use converter::{
    build_model, build_model_with, convert_entity_type, ConvertOptions, ENTITY_NAMESPACE,
    ROOT_TYPE_NAME,
};
pub use csdl::to_csdl_xml;
pub use error::{ConvertError, Error, LoadError, RenderError};
pub use loader::{
    is_url, load_schema, load_schema_auto, load_schema_stdin, load_schema_str, parse_schema,
};
pub use mapper::map_primitive;
pub use model::{
    CollectionTypeReference, EntityContainer, EntityReferenceTypeReference, EntitySet,
    EntityType, EntityTypeId, Model, PrimitiveKind, PrimitiveTypeReference, StringTypeReference,
    StructuralProperty, TypeReference,
};
pub use schema::{Items, SchemaNode, SchemaType};
pub use validator::check_schema;

#[cfg(feature = "remote")]
pub use loader::load_schema_url;

/// Parse and convert a JSON Schema string with default options.
///
/// # Errors
///
/// Returns `Error::Load` if the text isn't a usable schema, or
/// `Error::Convert` if conversion fails.
pub fn convert_schema_str(content: &str) -> Result<Model, Error> {
    let value = load_schema_str(content)?;
    let schema = parse_schema(&value)?;
    Ok(build_model(&schema)?)
}
