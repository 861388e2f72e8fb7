//! Entity data model produced by the converter.

use std::fmt;

use serde::Serialize;

/// Scalar types the model understands natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimitiveKind {
    String,
    Int32,
    Double,
    Boolean,
}

impl PrimitiveKind {
    /// Qualified name in the `Edm` namespace (e.g. `Edm.Int32`).
    pub fn qualified_name(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "Edm.String",
            PrimitiveKind::Int32 => "Edm.Int32",
            PrimitiveKind::Double => "Edm.Double",
            PrimitiveKind::Boolean => "Edm.Boolean",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name())
    }
}

/// Identity of an entity type declared on a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityTypeId(usize);

impl EntityTypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Primitive reference with explicit nullability (collection elements).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrimitiveTypeReference {
    pub kind: PrimitiveKind,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringTypeReference {
    pub nullable: bool,
    pub is_unbounded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    pub is_fixed_length: bool,
    pub is_unicode: bool,
}

impl StringTypeReference {
    /// Variable-length Unicode string, unbounded unless `max_length` is set.
    pub fn new(nullable: bool, max_length: Option<u64>) -> Self {
        Self {
            nullable,
            is_unbounded: max_length.is_none(),
            max_length,
            is_fixed_length: false,
            is_unicode: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionTypeReference {
    pub element: PrimitiveTypeReference,
    pub nullable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityReferenceTypeReference {
    pub entity_type: EntityTypeId,
    pub nullable: bool,
}

/// Type of a structural property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeReference {
    /// Bare primitive without a nullability facet.
    Primitive { primitive: PrimitiveKind },
    String(StringTypeReference),
    Collection(CollectionTypeReference),
    EntityReference(EntityReferenceTypeReference),
}

impl TypeReference {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeReference::Primitive { primitive: kind }
    }

    /// Primitive kind of a primitive or string reference.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            TypeReference::Primitive { primitive } => Some(*primitive),
            TypeReference::String(_) => Some(PrimitiveKind::String),
            TypeReference::Collection(_) | TypeReference::EntityReference(_) => None,
        }
    }

    /// Nullability facet; `None` for bare primitives, which carry none.
    pub fn is_nullable(&self) -> Option<bool> {
        match self {
            TypeReference::Primitive { .. } => None,
            TypeReference::String(s) => Some(s.nullable),
            TypeReference::Collection(c) => Some(c.nullable),
            TypeReference::EntityReference(e) => Some(e.nullable),
        }
    }

    pub fn as_string(&self) -> Option<&StringTypeReference> {
        match self {
            TypeReference::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&CollectionTypeReference> {
        match self {
            TypeReference::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_entity_reference(&self) -> Option<&EntityReferenceTypeReference> {
        match self {
            TypeReference::EntityReference(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub type_reference: TypeReference,
}

/// Named structural type with properties in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityType {
    pub namespace: String,
    pub name: String,
    pub properties: Vec<StructuralProperty>,
}

impl EntityType {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn add_structural_property(
        &mut self,
        name: impl Into<String>,
        type_reference: TypeReference,
    ) {
        self.properties.push(StructuralProperty {
            name: name.into(),
            type_reference,
        });
    }

    pub fn find_property(&self, name: &str) -> Option<&StructuralProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// `namespace.name`
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySet {
    pub name: String,
    pub entity_type: EntityTypeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityContainer {
    pub namespace: String,
    pub name: String,
    pub entity_sets: Vec<EntitySet>,
}

impl EntityContainer {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            entity_sets: Vec::new(),
        }
    }

    pub fn add_entity_set(&mut self, name: impl Into<String>, entity_type: EntityTypeId) {
        self.entity_sets.push(EntitySet {
            name: name.into(),
            entity_type,
        });
    }

    pub fn find_entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.entity_sets.iter().find(|s| s.name == name)
    }
}

/// Declared entity types plus at most one container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    pub entity_types: Vec<EntityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<EntityContainer>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an entity type and return its identity.
    pub fn add_entity_type(&mut self, entity_type: EntityType) -> EntityTypeId {
        self.entity_types.push(entity_type);
        EntityTypeId(self.entity_types.len() - 1)
    }

    /// Panics if `id` was not issued by this model.
    pub fn entity_type(&self, id: EntityTypeId) -> &EntityType {
        &self.entity_types[id.0]
    }

    pub fn get_entity_type(&self, id: EntityTypeId) -> Option<&EntityType> {
        self.entity_types.get(id.0)
    }

    /// First declared entity type with this name.
    pub fn find_entity_type(&self, name: &str) -> Option<(EntityTypeId, &EntityType)> {
        self.entity_types
            .iter()
            .enumerate()
            .find(|(_, t)| t.name == name)
            .map(|(i, t)| (EntityTypeId(i), t))
    }

    pub fn set_entity_container(&mut self, container: EntityContainer) {
        self.container = Some(container);
    }

    pub fn entity_container(&self) -> Option<&EntityContainer> {
        self.container.as_ref()
    }

    pub fn find_entity_container(&self, name: &str) -> Option<&EntityContainer> {
        self.container.as_ref().filter(|c| c.name == name)
    }

    /// Element type of the container's first entity set.
    ///
    /// The set is looked up by position, not by name: the converter registers
    /// the root type as the only set under whatever name the options give it.
    pub fn root_entity_type(&self) -> Option<&EntityType> {
        let set = self.entity_container()?.entity_sets.first()?;
        self.get_entity_type(set.entity_type)
    }

    /// Entity type an entity reference points at.
    pub fn resolve_reference(
        &self,
        reference: &EntityReferenceTypeReference,
    ) -> Option<&EntityType> {
        self.get_entity_type(reference.entity_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_reference_bounds() {
        let unbounded = StringTypeReference::new(true, None);
        assert!(unbounded.is_unbounded);
        assert_eq!(unbounded.max_length, None);
        assert!(!unbounded.is_fixed_length);
        assert!(unbounded.is_unicode);

        let bounded = StringTypeReference::new(false, Some(3));
        assert!(!bounded.is_unbounded);
        assert_eq!(bounded.max_length, Some(3));
    }

    #[test]
    fn type_reference_accessors() {
        let bare = TypeReference::primitive(PrimitiveKind::Int32);
        assert_eq!(bare.primitive_kind(), Some(PrimitiveKind::Int32));
        assert_eq!(bare.is_nullable(), None);
        assert!(bare.as_string().is_none());

        let string = TypeReference::String(StringTypeReference::new(false, Some(8)));
        assert_eq!(string.primitive_kind(), Some(PrimitiveKind::String));
        assert_eq!(string.is_nullable(), Some(false));
    }

    #[test]
    fn model_ids_follow_declaration_order() {
        let mut model = Model::new();
        let a = model.add_entity_type(EntityType::new("root", "a"));
        let b = model.add_entity_type(EntityType::new("root", "b"));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(model.entity_type(b).name, "b");
        assert_eq!(model.find_entity_type("a").map(|(id, _)| id), Some(a));
        assert!(model.find_entity_type("c").is_none());
    }

    #[test]
    fn root_entity_type_via_container() {
        let mut model = Model::new();
        let _nested = model.add_entity_type(EntityType::new("root", "inner"));
        let root = model.add_entity_type(EntityType::new("root", "root"));
        let mut container = EntityContainer::new("namespace", "containerName");
        container.add_entity_set("root", root);
        model.set_entity_container(container);

        assert_eq!(model.root_entity_type().unwrap().name, "root");
        assert!(model.find_entity_container("containerName").is_some());
        assert!(model.find_entity_container("other").is_none());
    }

    #[test]
    fn root_entity_type_ignores_set_name() {
        let mut model = Model::new();
        let root = model.add_entity_type(EntityType::new("root", "root"));
        let mut container = EntityContainer::new("Sales", "SalesContainer");
        container.add_entity_set("Orders", root);
        model.set_entity_container(container);

        assert_eq!(model.root_entity_type().unwrap().name, "root");
    }

    #[test]
    fn root_entity_type_without_sets() {
        let mut model = Model::new();
        model.add_entity_type(EntityType::new("root", "root"));
        assert!(model.root_entity_type().is_none());

        model.set_entity_container(EntityContainer::new("namespace", "containerName"));
        assert!(model.root_entity_type().is_none());
    }

    #[test]
    fn primitive_display() {
        assert_eq!(PrimitiveKind::Double.to_string(), "Edm.Double");
        assert_eq!(EntityType::new("root", "order").full_name(), "root.order");
    }

    #[test]
    fn serializes_type_reference_tagged() {
        let value = serde_json::to_value(TypeReference::primitive(PrimitiveKind::Boolean)).unwrap();
        assert_eq!(value, serde_json::json!({ "kind": "primitive", "primitive": "Boolean" }));
    }
}
