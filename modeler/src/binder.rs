//! The boundary between the modeler and schema type resolution.
//!
//! The modeler never inspects schema internals directly; it asks a
//! [`TypeBinder`] three questions: what does this element bind to,
//! what does this type bind to, and what are the children of this
//! wrapper element. [`ElementCatalog`] answers them from the schema
//! subset the parser scans out of `wsdl:types`.

use std::collections::HashMap;

use lather_wsdl::document::{Definitions, QName, SchemaShape};

use super::names;

pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// A resolved schema construct: the name it was looked up under and
/// the Rust type the binder assigns to it.
#[derive(Debug, Clone)]
pub struct BoundType {
    pub name: QName,
    pub type_name: String,
}

/// A child element of a wrapper sequence.
#[derive(Debug, Clone)]
pub struct WrapperChild {
    pub element: String,
    pub type_name: String,
}

pub trait TypeBinder {
    /// Resolves an element declaration reference.
    fn element(&self, name: &QName) -> Option<BoundType>;

    /// Resolves a type reference (builtin or schema-defined).
    fn value_type(&self, name: &QName) -> Option<BoundType>;

    /// The ordered children of `name` when it is eligible for
    /// wrapper-style unwrapping, `None` otherwise.
    fn wrapper_children(&self, name: &QName) -> Option<Vec<WrapperChild>>;

    /// Type names the binder will generate itself, for conflict
    /// detection against modeler-generated names.
    fn generated_names(&self) -> Vec<String> {
        Vec::new()
    }
}

fn builtin(local: &str) -> Option<&'static str> {
    Some(match local {
        "string" | "normalizedString" | "token" | "anyURI" | "duration" => "String",
        "int" => "i32",
        "long" => "i64",
        "short" => "i16",
        "byte" => "i8",
        "unsignedInt" => "u32",
        "unsignedLong" => "u64",
        "unsignedShort" => "u16",
        "unsignedByte" => "u8",
        "integer" | "nonNegativeInteger" | "positiveInteger" | "nonPositiveInteger"
        | "negativeInteger" => "i64",
        "boolean" => "bool",
        "float" => "f32",
        "double" | "decimal" => "f64",
        "base64Binary" | "hexBinary" => "Vec<u8>",
        "dateTime" | "date" | "time" => "String",
        "QName" => "String",
        "anyType" => "Vec<u8>",
        _ => return None,
    })
}

/// A [`TypeBinder`] backed by the schema declarations found in the
/// parsed document.
pub struct ElementCatalog {
    elements: HashMap<QName, CatalogElement>,
    types: HashMap<QName, SchemaShape>,
}

struct CatalogElement {
    type_ref: Option<QName>,
    inline: Option<SchemaShape>,
}

impl ElementCatalog {
    pub fn from_definitions(definitions: &Definitions) -> Self {
        let elements = definitions
            .schema
            .elements
            .iter()
            .map(|element| {
                (
                    element.name.clone(),
                    CatalogElement {
                        type_ref: element.type_ref.clone(),
                        inline: element.inline.clone(),
                    },
                )
            })
            .collect();

        let types = definitions
            .schema
            .types
            .iter()
            .map(|ty| (ty.name.clone(), ty.shape.clone()))
            .collect();

        Self { elements, types }
    }

    fn shape_of(&self, name: &QName) -> Option<&SchemaShape> {
        let element = self.elements.get(name)?;
        match (&element.inline, &element.type_ref) {
            (Some(shape), _) => Some(shape),
            (None, Some(type_ref)) => self.types.get(type_ref),
            (None, None) => None,
        }
    }
}

impl TypeBinder for ElementCatalog {
    fn element(&self, name: &QName) -> Option<BoundType> {
        let element = self.elements.get(name)?;

        let type_name = match &element.type_ref {
            Some(type_ref) => match self.value_type(type_ref) {
                Some(bound) => bound.type_name,
                None => names::type_name(&type_ref.local),
            },
            None => names::type_name(&name.local),
        };

        Some(BoundType {
            name: name.clone(),
            type_name,
        })
    }

    fn value_type(&self, name: &QName) -> Option<BoundType> {
        if name.namespace == XSD_NS {
            return builtin(&name.local).map(|type_name| BoundType {
                name: name.clone(),
                type_name: type_name.to_owned(),
            });
        }

        if self.types.contains_key(name) {
            return Some(BoundType {
                name: name.clone(),
                type_name: names::type_name(&name.local),
            });
        }

        None
    }

    fn wrapper_children(&self, name: &QName) -> Option<Vec<WrapperChild>> {
        match self.shape_of(name)? {
            SchemaShape::Sequence(fields) => Some(
                fields
                    .iter()
                    .map(|field| WrapperChild {
                        element: field.name.clone(),
                        type_name: self
                            .value_type(&field.type_ref)
                            .map(|bound| bound.type_name)
                            .unwrap_or_else(|| names::type_name(&field.type_ref.local)),
                    })
                    .collect(),
            ),
            SchemaShape::Opaque => None,
        }
    }

    fn generated_names(&self) -> Vec<String> {
        self.types
            .keys()
            .map(|name| names::type_name(&name.local))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use lather_wsdl::parse_str;

    use super::{ElementCatalog, QName, TypeBinder, XSD_NS};

    const DOCUMENT: &str = r#"
        <wsdl:definitions targetNamespace="urn:cat"
                xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
                xmlns:xsd="http://www.w3.org/2001/XMLSchema"
                xmlns:tns="urn:cat">
            <wsdl:types>
                <xsd:schema targetNamespace="urn:cat">
                    <xsd:complexType name="quote">
                        <xsd:sequence>
                            <xsd:element name="symbol" type="xsd:string"/>
                            <xsd:element name="price" type="xsd:double"/>
                        </xsd:sequence>
                    </xsd:complexType>
                    <xsd:element name="getQuote" type="tns:quote"/>
                    <xsd:element name="opaque">
                        <xsd:complexType>
                            <xsd:choice>
                                <xsd:element name="a" type="xsd:int"/>
                            </xsd:choice>
                        </xsd:complexType>
                    </xsd:element>
                </xsd:schema>
            </wsdl:types>
        </wsdl:definitions>
    "#;

    fn catalog() -> ElementCatalog {
        ElementCatalog::from_definitions(&parse_str(DOCUMENT).unwrap())
    }

    #[test]
    fn resolves_builtins() {
        let catalog = catalog();
        let bound = catalog.value_type(&QName::new(XSD_NS, "int")).unwrap();
        assert_eq!(bound.type_name, "i32");
        assert!(catalog.value_type(&QName::new(XSD_NS, "gYear")).is_none());
    }

    #[test]
    fn resolves_elements_through_named_types() {
        let catalog = catalog();
        let bound = catalog.element(&QName::new("urn:cat", "getQuote")).unwrap();
        assert_eq!(bound.type_name, "Quote");
    }

    #[test]
    fn reports_wrapper_children_for_sequences_only() {
        let catalog = catalog();

        let children = catalog
            .wrapper_children(&QName::new("urn:cat", "getQuote"))
            .unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].element, "symbol");
        assert_eq!(children[0].type_name, "String");

        assert!(catalog
            .wrapper_children(&QName::new("urn:cat", "opaque"))
            .is_none());
    }
}
