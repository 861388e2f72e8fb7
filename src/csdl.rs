//! OData CSDL (EDMX 4.0) rendering of a model.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::error::RenderError;
use crate::model::{EntityType, Model, TypeReference};

const EDMX_NS: &str = "http://docs.oasis-open.org/odata/ns/edmx";
const EDM_NS: &str = "http://docs.oasis-open.org/odata/ns/edm";

type XmlWriter = Writer<Vec<u8>>;

/// Render `model` as an EDMX document.
///
/// Entity types are grouped into one `<Schema>` per namespace, in order of
/// first declaration. The container goes into the schema of its own
/// namespace. Entity references become navigation properties.
///
/// CSDL has no facet for the nullability of a collection itself: a
/// collection property's `Nullable` attribute describes its elements, which
/// are never nullable. Optional and required arrays therefore render the
/// same; the collection's own nullability is only visible in the model.
///
/// # Errors
///
/// Returns `RenderError` if the XML writer fails.
pub fn to_csdl_xml(model: &Model) -> Result<String, RenderError> {
    let mut namespaces: Vec<&str> = Vec::new();
    for entity_type in &model.entity_types {
        if !namespaces.contains(&entity_type.namespace.as_str()) {
            namespaces.push(&entity_type.namespace);
        }
    }
    if let Some(container) = model.entity_container() {
        if !namespaces.contains(&container.namespace.as_str()) {
            namespaces.push(&container.namespace);
        }
    }

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut edmx = BytesStart::new("edmx:Edmx");
    edmx.push_attribute(("Version", "4.0"));
    edmx.push_attribute(("xmlns:edmx", EDMX_NS));
    writer.write_event(Event::Start(edmx))?;
    writer.write_event(Event::Start(BytesStart::new("edmx:DataServices")))?;

    for namespace in namespaces {
        let mut schema = BytesStart::new("Schema");
        schema.push_attribute(("Namespace", namespace));
        schema.push_attribute(("xmlns", EDM_NS));
        writer.write_event(Event::Start(schema))?;

        for entity_type in model.entity_types.iter().filter(|t| t.namespace == namespace) {
            write_entity_type(&mut writer, model, entity_type)?;
        }

        if let Some(container) = model.entity_container().filter(|c| c.namespace == namespace) {
            let mut start = BytesStart::new("EntityContainer");
            start.push_attribute(("Name", container.name.as_str()));
            writer.write_event(Event::Start(start))?;

            for set in &container.entity_sets {
                let element = model
                    .get_entity_type(set.entity_type)
                    .map(EntityType::full_name)
                    .unwrap_or_default();
                let mut entity_set = BytesStart::new("EntitySet");
                entity_set.push_attribute(("Name", set.name.as_str()));
                entity_set.push_attribute(("EntityType", element.as_str()));
                writer.write_event(Event::Empty(entity_set))?;
            }

            writer.write_event(Event::End(BytesEnd::new("EntityContainer")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("Schema")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("edmx:DataServices")))?;
    writer.write_event(Event::End(BytesEnd::new("edmx:Edmx")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_entity_type(
    writer: &mut XmlWriter,
    model: &Model,
    entity_type: &EntityType,
) -> Result<(), RenderError> {
    let mut start = BytesStart::new("EntityType");
    start.push_attribute(("Name", entity_type.name.as_str()));
    writer.write_event(Event::Start(start))?;

    for property in &entity_type.properties {
        let element = match &property.type_reference {
            TypeReference::Primitive { primitive } => {
                let mut element = BytesStart::new("Property");
                element.push_attribute(("Name", property.name.as_str()));
                element.push_attribute(("Type", primitive.qualified_name()));
                element
            }
            TypeReference::String(s) => {
                let mut element = BytesStart::new("Property");
                element.push_attribute(("Name", property.name.as_str()));
                element.push_attribute(("Type", "Edm.String"));
                element.push_attribute(("Nullable", bool_attr(s.nullable)));
                if let Some(max_length) = s.max_length {
                    element.push_attribute(("MaxLength", max_length.to_string().as_str()));
                }
                element.push_attribute(("Unicode", bool_attr(s.is_unicode)));
                element
            }
            TypeReference::Collection(c) => {
                let collection = format!("Collection({})", c.element.kind);
                let mut element = BytesStart::new("Property");
                element.push_attribute(("Name", property.name.as_str()));
                element.push_attribute(("Type", collection.as_str()));
                element.push_attribute(("Nullable", bool_attr(c.element.nullable)));
                element
            }
            TypeReference::EntityReference(r) => {
                let target = model
                    .resolve_reference(r)
                    .map(EntityType::full_name)
                    .unwrap_or_default();
                let mut element = BytesStart::new("NavigationProperty");
                element.push_attribute(("Name", property.name.as_str()));
                element.push_attribute(("Type", target.as_str()));
                element.push_attribute(("Nullable", bool_attr(r.nullable)));
                element
            }
        };
        writer.write_event(Event::Empty(element))?;
    }

    writer.write_event(Event::End(BytesEnd::new("EntityType")))?;
    Ok(())
}

fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
