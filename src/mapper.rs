//! Schema type to primitive kind mapping.

use crate::error::ConvertError;
use crate::model::PrimitiveKind;
use crate::schema::SchemaType;

/// Map a scalar schema type to its primitive kind.
///
/// | Schema type | Primitive kind |
/// |-------------|----------------|
/// | `string`    | `String`       |
/// | `number`    | `Double`       |
/// | `integer`   | `Int32`        |
/// | `boolean`   | `Boolean`      |
///
/// Object, array, null and unset nodes are structural and must be handled
/// by the converter before reaching this function.
///
/// # Errors
///
/// Returns `ConvertError::UnsupportedType` for any non-scalar type.
pub fn map_primitive(schema_type: SchemaType, path: &str) -> Result<PrimitiveKind, ConvertError> {
    match schema_type {
        SchemaType::String => Ok(PrimitiveKind::String),
        SchemaType::Number => Ok(PrimitiveKind::Double),
        SchemaType::Integer => Ok(PrimitiveKind::Int32),
        SchemaType::Boolean => Ok(PrimitiveKind::Boolean),
        SchemaType::Object | SchemaType::Array | SchemaType::Null | SchemaType::Unset => {
            Err(ConvertError::UnsupportedType {
                path: path.to_string(),
                schema_type,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_scalars() {
        assert_eq!(map_primitive(SchemaType::String, ""), Ok(PrimitiveKind::String));
        assert_eq!(map_primitive(SchemaType::Number, ""), Ok(PrimitiveKind::Double));
        assert_eq!(map_primitive(SchemaType::Integer, ""), Ok(PrimitiveKind::Int32));
        assert_eq!(map_primitive(SchemaType::Boolean, ""), Ok(PrimitiveKind::Boolean));
    }

    #[test]
    fn rejects_structural_types() {
        for schema_type in [
            SchemaType::Object,
            SchemaType::Array,
            SchemaType::Null,
            SchemaType::Unset,
        ] {
            let err = map_primitive(schema_type, "/properties/x").unwrap_err();
            assert_eq!(
                err,
                ConvertError::UnsupportedType {
                    path: "/properties/x".into(),
                    schema_type,
                }
            );
        }
    }
}
