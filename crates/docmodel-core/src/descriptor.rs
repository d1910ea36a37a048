// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Static model and field descriptors.
//!
//! A [`ModelDescriptor`] is the table of everything the engine knows about a
//! model type: its fields in declaration order, the directives attached to
//! each field, and the capabilities of the model as a whole. Descriptors are
//! built once (usually by `#[derive(Model)]`) and shared read-only afterwards.
//!
//! # Example
//!
//! ```rust
//! use docmodel_core::{Capability, FieldDescriptor, ModelDescriptor, Permission, TypeTag};
//!
//! let user = ModelDescriptor::new("User")
//!     .collection("users")
//!     .capability(Capability::DocumentStore)
//!     .field(
//!         FieldDescriptor::new("email", TypeTag::String)
//!             .insert(Permission::Required)
//!             .verify("email")
//!             .unique("true")
//!     );
//!
//! assert_eq!(user.fields().len(), 1);
//! assert!(user.has(Capability::DocumentStore));
//! ```

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Model-level capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Model is persisted in the document store.
    ///
    /// Enables string-to-type coercion, timestamp population and the `id`
    /// key alias.
    DocumentStore,

    /// Model carries `created_at` / `updated_at` timestamps.
    Timestamped
}

/// Insert/update permission of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    /// A value must be supplied (`"yes"`).
    Required,

    /// A value must not be supplied (`"no"`).
    Forbidden,

    /// Either way is fine (`"opt"`).
    #[default]
    Optional
}

impl Permission {
    /// Parse a permission from its directive text.
    ///
    /// Returns `None` for unrecognized values.
    #[must_use]
    pub fn from_directive(s: &str) -> Option<Self> {
        match s.trim() {
            "yes" => Some(Self::Required),
            "no" => Some(Self::Forbidden),
            "opt" | "" => Some(Self::Optional),
            _ => None
        }
    }

    /// Directive text for this permission.
    #[must_use]
    pub const fn as_directive(&self) -> &'static str {
        match self {
            Self::Required => "yes",
            Self::Forbidden => "no",
            Self::Optional => "opt"
        }
    }
}

/// Lazily resolved reference to a nested model's descriptor.
///
/// Stored as a function pointer so descriptors can point at each other
/// without forcing initialization order.
#[derive(Clone, Copy)]
pub struct NestedModel(fn() -> &'static ModelDescriptor);

impl NestedModel {
    /// Wrap a descriptor accessor, typically `<T as Model>::descriptor`.
    #[must_use]
    pub const fn new(resolve: fn() -> &'static ModelDescriptor) -> Self {
        Self(resolve)
    }

    /// Resolve the nested descriptor.
    #[must_use]
    pub fn get(&self) -> &'static ModelDescriptor {
        (self.0)()
    }
}

impl fmt::Debug for NestedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NestedModel").field(&self.get().name()).finish()
    }
}

impl PartialEq for NestedModel {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.get(), other.get())
    }
}

/// Declared type of a field, with `Option`/`Box` wrappers removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeTag {
    /// UTF-8 string.
    String,
    /// Boolean.
    Bool,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit unsigned integer.
    U64,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// Date or timestamp. Always a leaf, never traversed.
    Time,
    /// UUID.
    Uuid,
    /// Sequence of values.
    List,
    /// Free-form map.
    Map,
    /// Arbitrary JSON value.
    Any,
    /// Composite model traversed recursively.
    Nested(NestedModel)
}

impl TypeTag {
    /// Short type name used in issue messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Time => "time",
            Self::Uuid => "uuid",
            Self::List => "list",
            Self::Map => "map",
            Self::Any => "any",
            Self::Nested(model) => model.get().name()
        }
    }

    /// Nested model if this tag is composite.
    #[must_use]
    pub fn nested(&self) -> Option<&'static ModelDescriptor> {
        match self {
            Self::Nested(model) => Some(model.get()),
            _ => None
        }
    }

    /// Check if values of this type are plain strings.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }
}

/// Maps a Rust type to its [`TypeTag`].
///
/// Implemented for the common scalar types, for wrappers that dereference to
/// their inner type, and by `#[derive(Model)]` for every model (as
/// [`TypeTag::Nested`]).
pub trait FieldType {
    /// Type tag of `Self`.
    fn type_tag() -> TypeTag;
}

macro_rules! leaf_type {
    ($tag:ident: $($ty:ty),+) => {
        $(
            impl FieldType for $ty {
                fn type_tag() -> TypeTag {
                    TypeTag::$tag
                }
            }
        )+
    };
}

leaf_type!(String: String, str, char);
leaf_type!(Bool: bool);
leaf_type!(I32: i8, i16, i32);
leaf_type!(I64: i64, isize);
leaf_type!(U32: u8, u16, u32);
leaf_type!(U64: u64, usize);
leaf_type!(F32: f32);
leaf_type!(F64: f64);
leaf_type!(Time: NaiveDate, NaiveDateTime, std::time::SystemTime);
leaf_type!(Uuid: uuid::Uuid);
leaf_type!(Any: serde_json::Value);

impl<Tz: TimeZone> FieldType for DateTime<Tz> {
    fn type_tag() -> TypeTag {
        TypeTag::Time
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn type_tag() -> TypeTag {
        T::type_tag()
    }
}

impl<T: FieldType + ?Sized> FieldType for Box<T> {
    fn type_tag() -> TypeTag {
        T::type_tag()
    }
}

impl<T> FieldType for Vec<T> {
    fn type_tag() -> TypeTag {
        TypeTag::List
    }
}

impl<K, V> FieldType for BTreeMap<K, V> {
    fn type_tag() -> TypeTag {
        TypeTag::Map
    }
}

impl<K, V, S> FieldType for std::collections::HashMap<K, V, S> {
    fn type_tag() -> TypeTag {
        TypeTag::Map
    }
}

impl FieldType for serde_json::Map<String, serde_json::Value> {
    fn type_tag() -> TypeTag {
        TypeTag::Map
    }
}

/// One field of a model with its directives.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name:          String,
    type_tag:      TypeTag,
    index:         Option<String>,
    unique:        Option<String>,
    verify:        Option<String>,
    auto:          Option<String>,
    default_value: Option<String>,
    trim:          bool,
    insert:        Permission,
    update:        Permission,
    key:           Option<String>
}

impl FieldDescriptor {
    /// Create a field with no directives.
    ///
    /// Strings are trimmed by default and both permissions are optional.
    #[must_use]
    pub fn new(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            type_tag,
            index: None,
            unique: None,
            verify: None,
            auto: None,
            default_value: None,
            trim: true,
            insert: Permission::Optional,
            update: Permission::Optional,
            key: None
        }
    }

    /// Set the `index` directive.
    #[must_use]
    pub fn index(mut self, directive: impl Into<String>) -> Self {
        self.index = Some(directive.into());
        self
    }

    /// Set the `unique` directive.
    #[must_use]
    pub fn unique(mut self, directive: impl Into<String>) -> Self {
        self.unique = Some(directive.into());
        self
    }

    /// Set the `verify` directive.
    #[must_use]
    pub fn verify(mut self, directive: impl Into<String>) -> Self {
        self.verify = Some(directive.into());
        self
    }

    /// Set the `auto` directive.
    #[must_use]
    pub fn auto(mut self, directive: impl Into<String>) -> Self {
        self.auto = Some(directive.into());
        self
    }

    /// Set the `default` directive.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Enable or disable trimming (`trim = "no"` disables it).
    #[must_use]
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set the insert permission.
    #[must_use]
    pub fn insert(mut self, permission: Permission) -> Self {
        self.insert = permission;
        self
    }

    /// Set the update permission.
    #[must_use]
    pub fn update(mut self, permission: Permission) -> Self {
        self.update = permission;
        self
    }

    /// Set the store-specific key alias (e.g. `_id`).
    #[must_use]
    pub fn key(mut self, alias: impl Into<String>) -> Self {
        self.key = Some(alias.into());
        self
    }

    /// Canonical field name, used as the record key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    #[must_use]
    pub fn type_tag(&self) -> &TypeTag {
        &self.type_tag
    }

    /// Raw `index` directive.
    #[must_use]
    pub fn index_directive(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Raw `unique` directive.
    #[must_use]
    pub fn unique_directive(&self) -> Option<&str> {
        self.unique.as_deref()
    }

    /// Raw `verify` directive.
    #[must_use]
    pub fn verify_directive(&self) -> Option<&str> {
        self.verify.as_deref()
    }

    /// Raw `auto` directive.
    #[must_use]
    pub fn auto_directive(&self) -> Option<&str> {
        self.auto.as_deref()
    }

    /// Literal default value.
    ///
    /// An empty string is kept here but the pipeline treats it as no default.
    #[must_use]
    pub fn default_directive(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Whether string values are trimmed.
    #[must_use]
    pub const fn trims(&self) -> bool {
        self.trim
    }

    /// Insert permission.
    #[must_use]
    pub const fn insert_permission(&self) -> Permission {
        self.insert
    }

    /// Update permission.
    #[must_use]
    pub const fn update_permission(&self) -> Permission {
        self.update
    }

    /// Store key alias.
    #[must_use]
    pub fn key_alias(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

/// Ordered field table for one model type.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    name:         String,
    collection:   String,
    fields:       Vec<FieldDescriptor>,
    capabilities: Vec<Capability>
}

impl ModelDescriptor {
    /// Create an empty descriptor.
    ///
    /// The collection name defaults to the model name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            collection: name.clone(),
            name,
            fields: Vec::new(),
            capabilities: Vec::new()
        }
    }

    /// Set the collection name.
    #[must_use]
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a capability.
    #[must_use]
    pub fn capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collection name in the document store.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Capabilities of the model.
    #[must_use]
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Check whether the model has a capability.
    #[must_use]
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Look up a field by its own name (not a dotted path).
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up the declared type at a dotted path such as `"address.city"`.
    #[must_use]
    pub fn field_type(&self, path: &str) -> Option<TypeTag> {
        let mut model = self;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            let field = model.get_field(segment)?;
            if segments.peek().is_none() {
                return Some(field.type_tag);
            }
            model = field.type_tag.nested()?;
        }
        None
    }
}
