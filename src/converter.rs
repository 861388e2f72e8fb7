//! Schema to model conversion.
//!
//! Every object node becomes an entity type. Its properties map as follows:
//!
//! | Property type | Type reference |
//! |---------------|----------------|
//! | `string` | String with `maxLength` bound, nullable unless required |
//! | `object` | Reference to a nested entity type, nullable unless required |
//! | `array` | Collection of the item's primitive kind, nullable unless required |
//! | `integer`, `number`, `boolean` | Bare primitive kind |
//!
//! Nested entity types are declared on the model but only the root type is
//! exposed as an entity set.

use tracing::{debug, trace};

use crate::error::ConvertError;
use crate::mapper::map_primitive;
use crate::model::{
    CollectionTypeReference, EntityContainer, EntityReferenceTypeReference, EntityType,
    EntityTypeId, Model, PrimitiveTypeReference, StringTypeReference, TypeReference,
};
use crate::schema::{pointer_push, Items, SchemaNode, SchemaType};

/// Namespace of every entity type the converter declares.
pub const ENTITY_NAMESPACE: &str = "root";

/// Name of the root entity type.
pub const ROOT_TYPE_NAME: &str = "root";

/// Options for model construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Namespace of the entity container.
    pub namespace: String,
    /// Name of the entity container.
    pub container_name: String,
    /// Name of the entity set exposing the root type.
    pub entity_set_name: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            namespace: "namespace".to_string(),
            container_name: "containerName".to_string(),
            entity_set_name: "root".to_string(),
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn container_name(mut self, name: impl Into<String>) -> Self {
        self.container_name = name.into();
        self
    }

    pub fn entity_set_name(mut self, name: impl Into<String>) -> Self {
        self.entity_set_name = name.into();
        self
    }
}

/// Build a model from a schema using the default container names.
///
/// # Errors
///
/// Returns the first `ConvertError` raised anywhere in the schema tree.
pub fn build_model(schema: &SchemaNode) -> Result<Model, ConvertError> {
    build_model_with(schema, &ConvertOptions::default())
}

/// Build a model from a schema with custom container names.
///
/// The root entity type is declared on the model and registered as the
/// container's only entity set.
pub fn build_model_with(
    schema: &SchemaNode,
    options: &ConvertOptions,
) -> Result<Model, ConvertError> {
    let mut model = Model::new();
    let mut container = EntityContainer::new(&options.namespace, &options.container_name);

    let root = convert_entity_type(schema, &mut model, ROOT_TYPE_NAME, "")?;
    container.add_entity_set(&options.entity_set_name, root);
    model.set_entity_container(container);

    debug!(
        entity_types = model.entity_types.len(),
        container = %options.container_name,
        "model built"
    );
    Ok(model)
}

/// Convert an object node into an entity type declared on `model`.
///
/// Nested object properties are converted first so their types exist before
/// the reference to them is built. `path` is the JSON Pointer of `node`.
pub fn convert_entity_type(
    node: &SchemaNode,
    model: &mut Model,
    name: &str,
    path: &str,
) -> Result<EntityTypeId, ConvertError> {
    let mut entity_type = EntityType::new(ENTITY_NAMESPACE, name);
    let props_path = pointer_push(path, "properties");

    for (key, child) in &node.properties {
        let child_path = pointer_push(&props_path, key);
        if child.schema_type == SchemaType::Unset {
            return Err(ConvertError::MissingType { path: child_path });
        }

        let nullable = !node.is_required(key);
        let type_reference = map_property(key, child, nullable, model, &child_path)?;
        trace!(path = %child_path, ?type_reference, "mapped property");
        entity_type.add_structural_property(key.clone(), type_reference);
    }

    let display_path = if path.is_empty() { "/" } else { path };
    debug!(
        entity = name,
        path = display_path,
        properties = entity_type.properties.len(),
        "declared entity type"
    );
    Ok(model.add_entity_type(entity_type))
}

// --- Internal implementation ---

fn map_property(
    key: &str,
    child: &SchemaNode,
    nullable: bool,
    model: &mut Model,
    path: &str,
) -> Result<TypeReference, ConvertError> {
    match child.schema_type {
        SchemaType::String => Ok(TypeReference::String(StringTypeReference::new(
            nullable,
            child.max_length,
        ))),
        SchemaType::Object => {
            let entity_type = convert_entity_type(child, model, key, path)?;
            Ok(TypeReference::EntityReference(EntityReferenceTypeReference {
                entity_type,
                nullable,
            }))
        }
        SchemaType::Array => {
            let element = map_array_items(&child.items, path)?;
            Ok(TypeReference::Collection(CollectionTypeReference {
                element,
                nullable,
            }))
        }
        // Scalars carry no nullability facet.
        other => map_primitive(other, path).map(TypeReference::primitive),
    }
}

fn map_array_items(items: &Items, path: &str) -> Result<PrimitiveTypeReference, ConvertError> {
    let item = match items {
        Items::Single(item) => item,
        Items::None => {
            return Err(ConvertError::MissingItems {
                path: path.to_string(),
            })
        }
        Items::Tuple(nodes) => {
            return Err(ConvertError::TupleItems {
                path: path.to_string(),
                count: nodes.len(),
            })
        }
    };

    let item_path = pointer_push(path, "items");
    if item.schema_type == SchemaType::Unset {
        return Err(ConvertError::MissingType { path: item_path });
    }

    Ok(PrimitiveTypeReference {
        kind: map_primitive(item.schema_type, &item_path)?,
        nullable: false,
    })
}
