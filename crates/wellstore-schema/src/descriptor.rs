//! Static property declarations and the descriptors built from them.

use ahash::AHashMap;
use wellstore_model::SchemaFamily;

use crate::concrete::AbstractType;
use crate::enums::EnumTable;

/// Identifier field used when a type does not declare one.
pub const DEFAULT_ID_FIELD: &str = "Uid";

/// Whether a type is stored on its own or only inside another object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    DataObject,
    Component,
}

#[derive(Debug, Clone, Copy)]
pub enum PropertyKind {
    Text,
    Number,
    Boolean,
    Enum(&'static EnumTable),
    /// Nested complex type, by schema type name.
    Complex(&'static str),
    /// Declared by an abstract base; a type hint selects the concrete type.
    Abstract(AbstractType),
}

/// One serializable property as declared by the schema.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDecl {
    /// Document field name.
    pub name: &'static str,
    pub element: Option<&'static str>,
    /// Wrapper element name for list properties.
    pub array: Option<&'static str>,
    pub attribute: Option<&'static str>,
    pub kind: PropertyKind,
    pub is_id: bool,
    /// Not part of the serialized form.
    pub ignored: bool,
}

impl PropertyDecl {
    const fn bare(name: &'static str) -> Self {
        Self {
            name,
            element: None,
            array: None,
            attribute: None,
            kind: PropertyKind::Text,
            is_id: false,
            ignored: false,
        }
    }

    pub const fn element(name: &'static str, element: &'static str) -> Self {
        let mut p = Self::bare(name);
        p.element = Some(element);
        p
    }

    pub const fn array(name: &'static str, wrapper: &'static str) -> Self {
        let mut p = Self::bare(name);
        p.array = Some(wrapper);
        p
    }

    pub const fn attribute(name: &'static str, attribute: &'static str) -> Self {
        let mut p = Self::bare(name);
        p.attribute = Some(attribute);
        p
    }

    pub const fn of(mut self, kind: PropertyKind) -> Self {
        self.kind = kind;
        self
    }

    pub const fn id(mut self) -> Self {
        self.is_id = true;
        self
    }

    pub const fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }
}

/// A type with a static schema declaration.
pub trait SchemaType: 'static {
    /// Schema type name (e.g. `obj_log`).
    const TYPE_NAME: &'static str;
    const FAMILY: SchemaFamily;
    const KIND: EntityKind;
    const PROPERTIES: &'static [PropertyDecl];
}

/// Per-type metadata derived once from a `SchemaType` declaration.
#[derive(Debug)]
pub struct EntityDescriptor {
    type_name: &'static str,
    family: SchemaFamily,
    kind: EntityKind,
    properties: Vec<PropertyDecl>,
    by_element: AHashMap<String, usize>,
    by_array: AHashMap<String, usize>,
    by_attribute: AHashMap<String, usize>,
    id_field: &'static str,
    ignored_update_fields: Vec<&'static str>,
}

impl EntityDescriptor {
    pub fn of<T: SchemaType>() -> Self {
        Self::build(T::TYPE_NAME, T::FAMILY, T::KIND, T::PROPERTIES)
    }

    pub fn build(
        type_name: &'static str,
        family: SchemaFamily,
        kind: EntityKind,
        decls: &[PropertyDecl],
    ) -> Self {
        let properties: Vec<PropertyDecl> = decls.iter().copied().filter(|p| !p.ignored).collect();

        let mut by_element = AHashMap::new();
        let mut by_array = AHashMap::new();
        let mut by_attribute = AHashMap::new();
        for (idx, p) in properties.iter().enumerate() {
            // First declaration wins on duplicate names.
            if let Some(name) = p.element {
                by_element.entry(name.to_ascii_lowercase()).or_insert(idx);
            }
            if let Some(name) = p.array {
                by_array.entry(name.to_ascii_lowercase()).or_insert(idx);
            }
            if let Some(name) = p.attribute {
                by_attribute.entry(name.to_ascii_lowercase()).or_insert(idx);
            }
        }

        let id_field = properties
            .iter()
            .find(|p| p.is_id)
            .map(|p| p.name)
            .unwrap_or(DEFAULT_ID_FIELD);

        let ignored_update_fields = if kind == EntityKind::DataObject && family.is_1x() {
            vec!["dTimCreation", "dTimLastChange"]
        } else {
            vec!["Creation", "LastUpdate"]
        };

        Self {
            type_name,
            family,
            kind,
            properties,
            by_element,
            by_array,
            by_attribute,
            id_field,
            ignored_update_fields,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn family(&self) -> SchemaFamily {
        self.family
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Serializable properties in declaration order.
    pub fn properties(&self) -> &[PropertyDecl] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDecl> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn id_field(&self) -> &'static str {
        self.id_field
    }

    /// Element names never diffed on update (creation / last-change stamps).
    pub fn ignored_update_fields(&self) -> &[&'static str] {
        &self.ignored_update_fields
    }

    /// Document path of the last-modified stamp, if this kind of object
    /// carries one.
    pub fn last_change_field(&self) -> Option<&'static str> {
        match (self.kind, self.family.is_1x()) {
            (EntityKind::Component, _) => None,
            (EntityKind::DataObject, true) => Some("CommonData.DateTimeLastChange"),
            (EntityKind::DataObject, false) => Some("Citation.LastUpdate"),
        }
    }
}

/// Map an XML element or attribute name to the property it populates.
///
/// Element names take priority over array wrapper names, which take
/// priority over attribute names. Matching is case-insensitive.
pub fn resolve_element_property<'d>(
    descriptor: &'d EntityDescriptor,
    name: &str,
) -> Option<&'d PropertyDecl> {
    let key = name.to_ascii_lowercase();
    descriptor
        .by_element
        .get(&key)
        .or_else(|| descriptor.by_array.get(&key))
        .or_else(|| descriptor.by_attribute.get(&key))
        .map(|&idx| &descriptor.properties[idx])
}
