//! Host type → column type mapping
//!
//! Exact-kind lookup, no fallback. Nullable variants map to the same column
//! type as their base kind; nullability itself is carried by the column.

use super::host::{HostKind, HostType};
use super::types::ColumnType;
use crate::error::{Error, Result};

/// Static host type mapper
pub struct TypeMapper;

impl TypeMapper {
    /// Column type for a host type
    ///
    /// Fails with [`Error::UnmappedType`] for kinds outside the table.
    pub fn map_host_type(host_type: &HostType) -> Result<ColumnType> {
        let column_type = match &host_type.kind {
            HostKind::Bool => ColumnType::Bit,
            HostKind::Byte => ColumnType::TinyInt,
            HostKind::String => ColumnType::NVarChar { length: None },
            HostKind::DateTime => ColumnType::DateTime,
            HostKind::DateTimeOffset => ColumnType::DateTimeOffset,
            HostKind::Int16 => ColumnType::SmallInt,
            HostKind::Int32 => ColumnType::Int,
            HostKind::Int64 => ColumnType::BigInt,
            HostKind::Decimal => ColumnType::decimal(),
            HostKind::Double => ColumnType::Float,
            HostKind::Float => ColumnType::Real,
            HostKind::TimeSpan => ColumnType::Time,
            HostKind::Guid => ColumnType::UniqueIdentifier,
            HostKind::Bytes => ColumnType::Binary { length: None },
            HostKind::Chars => ColumnType::Char { length: None },
            HostKind::Other(_) => {
                return Err(Error::UnmappedType {
                    type_name: host_type.to_string(),
                })
            }
        };

        Ok(column_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_mapping() {
        let cases = [
            ("bool", ColumnType::Bit),
            ("byte", ColumnType::TinyInt),
            ("string", ColumnType::nvarchar_max()),
            ("DateTime", ColumnType::DateTime),
            ("DateTimeOffset", ColumnType::DateTimeOffset),
            ("short", ColumnType::SmallInt),
            ("int", ColumnType::Int),
            ("long", ColumnType::BigInt),
            ("decimal", ColumnType::decimal()),
            ("double", ColumnType::Float),
            ("float", ColumnType::Real),
            ("TimeSpan", ColumnType::Time),
            ("Guid", ColumnType::UniqueIdentifier),
            ("byte[]", ColumnType::Binary { length: None }),
            ("char[]", ColumnType::Char { length: None }),
        ];

        for (name, expected) in cases {
            let ty: HostType = name.parse().unwrap();
            assert_eq!(TypeMapper::map_host_type(&ty).unwrap(), expected, "{name}");
        }
    }

    #[test]
    fn test_nullable_variant_maps_like_base() {
        let base: HostType = "long".parse().unwrap();
        let nullable: HostType = "long?".parse().unwrap();
        assert_eq!(
            TypeMapper::map_host_type(&base).unwrap(),
            TypeMapper::map_host_type(&nullable).unwrap()
        );
    }

    #[test]
    fn test_unmapped_type_carries_name() {
        let ty = HostType::nullable(HostKind::Other("Address".to_string()));
        match TypeMapper::map_host_type(&ty) {
            Err(Error::UnmappedType { type_name }) => assert_eq!(type_name, "Address?"),
            other => panic!("expected UnmappedType, got {:?}", other),
        }
    }
}
