//! Host schema descriptors
//!
//! A host schema is an ordered list of `(property name, host type)` pairs
//! supplied by the embedding application, either statically through the
//! [`HostSchema`] trait or at runtime as a [`SchemaDescriptor`].

use serde::{Deserialize, Serialize};

use super::host::HostType;

/// One public property of a host schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property name (becomes the column name)
    pub name: String,

    /// Property type
    #[serde(rename = "type")]
    pub host_type: HostType,
}

impl Property {
    pub fn new(name: impl Into<String>, host_type: HostType) -> Self {
        Self {
            name: name.into(),
            host_type,
        }
    }
}

/// Runtime description of a host schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    /// Schema (type) name, the default table / variable name
    pub name: String,

    /// Properties in declaration order
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl SchemaDescriptor {
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// Descriptor of a statically known schema
    pub fn of<S: HostSchema + ?Sized>() -> Self {
        S::descriptor()
    }

    /// Property lookup by exact name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Statically known host schema
///
/// Usually implemented with [`host_schema!`](crate::host_schema).
pub trait HostSchema {
    /// Type name
    fn schema_name() -> &'static str;

    /// Public properties in declaration order
    fn properties() -> Vec<Property>;

    fn descriptor() -> SchemaDescriptor {
        SchemaDescriptor::new(Self::schema_name(), Self::properties())
    }
}

/// Implements [`HostSchema`] for a type from a `Name: RustType` list.
///
/// ```
/// use sqlscript_core::host_schema;
/// use sqlscript_core::schema::HostSchema;
///
/// struct Person;
///
/// host_schema!(Person {
///     Name: String,
///     Age: i32,
///     Nickname: Option<String>,
/// });
///
/// assert_eq!(Person::schema_name(), "Person");
/// assert_eq!(Person::properties().len(), 3);
/// ```
#[macro_export]
macro_rules! host_schema {
    ($schema:ident { $($property:ident : $ty:ty),* $(,)? }) => {
        impl $crate::schema::HostSchema for $schema {
            fn schema_name() -> &'static str {
                stringify!($schema)
            }

            fn properties() -> ::std::vec::Vec<$crate::schema::Property> {
                vec![
                    $(
                        $crate::schema::Property::new(
                            stringify!($property),
                            <$ty as $crate::schema::HostTyped>::host_type(),
                        ),
                    )*
                ]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::HostKind;

    struct Order;

    crate::host_schema!(Order {
        Id: uuid::Uuid,
        Total: f64,
        ShippedAt: Option<chrono::NaiveDateTime>,
    });

    #[test]
    fn test_macro_descriptor() {
        let descriptor = SchemaDescriptor::of::<Order>();
        assert_eq!(descriptor.name, "Order");

        let names: Vec<&str> = descriptor.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Id", "Total", "ShippedAt"]);

        let shipped = descriptor.property("ShippedAt").unwrap();
        assert_eq!(shipped.host_type, HostType::nullable(HostKind::DateTime));
        assert!(descriptor.property("Missing").is_none());
    }
}
