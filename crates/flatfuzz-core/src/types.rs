use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::mem;

use serde::Serialize;

/// Scalar kinds understood by the schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimitiveKind {
    Byte,
    UByte,
    Bool,
    Short,
    UShort,
    Int,
    UInt,
    Float,
    Long,
    ULong,
    Double,
    Str,
}

impl PrimitiveKind {
    /// Every scalar kind, in declaration order. Used for uniform sampling.
    pub const ALL: [PrimitiveKind; 12] = [
        PrimitiveKind::Byte,
        PrimitiveKind::UByte,
        PrimitiveKind::Bool,
        PrimitiveKind::Short,
        PrimitiveKind::UShort,
        PrimitiveKind::Int,
        PrimitiveKind::UInt,
        PrimitiveKind::Float,
        PrimitiveKind::Long,
        PrimitiveKind::ULong,
        PrimitiveKind::Double,
        PrimitiveKind::Str,
    ];

    /// Spelling in the schema definition language.
    pub fn fbs_name(self) -> &'static str {
        match self {
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::UByte => "ubyte",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Short => "short",
            PrimitiveKind::UShort => "ushort",
            PrimitiveKind::Int => "int",
            PrimitiveKind::UInt => "uint",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Long => "long",
            PrimitiveKind::ULong => "ulong",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Str => "string",
        }
    }

    /// Spelling in the generated native code.
    pub fn cpp_name(self) -> &'static str {
        match self {
            PrimitiveKind::Byte => "int8_t",
            PrimitiveKind::UByte => "uint8_t",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Short => "int16_t",
            PrimitiveKind::UShort => "uint16_t",
            PrimitiveKind::Int => "int32_t",
            PrimitiveKind::UInt => "uint32_t",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Long => "int64_t",
            PrimitiveKind::ULong => "uint64_t",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Str => "std::string",
        }
    }
}

/// A named aggregate whose fields must all be inline-representable.
///
/// Field types are restricted to primitives and nested structs; the
/// constructor treats anything else as a defect.
#[derive(Debug, Clone, Serialize)]
pub struct StructDef {
    pub name: String,
    pub fields: BTreeMap<String, TypeDef>,
}

impl StructDef {
    pub fn new(name: String, fields: BTreeMap<String, TypeDef>) -> Self {
        for (field, ty) in &fields {
            assert!(
                ty.is_inline(),
                "struct {name}: field '{field}' must be a primitive or struct"
            );
        }
        Self { name, fields }
    }
}

/// A named aggregate with no restriction on field kinds.
#[derive(Debug, Clone, Serialize)]
pub struct TableDef {
    pub name: String,
    pub fields: BTreeMap<String, TypeDef>,
}

impl TableDef {
    pub fn new(name: String, fields: BTreeMap<String, TypeDef>) -> Self {
        Self { name, fields }
    }
}

/// A named, non-empty list of branch-name/table pairs, kept sorted by
/// branch name.
#[derive(Debug, Clone, Serialize)]
pub struct UnionDef {
    pub name: String,
    pub branches: Vec<(String, TableDef)>,
}

impl UnionDef {
    pub fn new(name: String, branches: Vec<(String, TableDef)>) -> Self {
        assert!(!branches.is_empty(), "union {name}: must have at least one branch");
        for pair in branches.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "union {name}: branch names must be sorted and distinct"
            );
        }
        Self { name, branches }
    }
}

/// A node in a generated type tree.
///
/// Identity follows the names minted by [`crate::NamePool`]: two aggregates
/// compare equal only when they carry the same generated name, never by
/// structure. Primitives and vectors compare structurally.
#[derive(Debug, Clone, Serialize)]
pub enum TypeDef {
    Primitive(PrimitiveKind),
    Vector(Box<TypeDef>),
    Struct(StructDef),
    Table(TableDef),
    Union(UnionDef),
}

impl TypeDef {
    /// Whether this type is representable inline, without indirection.
    pub fn is_inline(&self) -> bool {
        matches!(self, TypeDef::Primitive(_) | TypeDef::Struct(_))
    }

    /// The generated name, for aggregate nodes.
    pub fn aggregate_name(&self) -> Option<&str> {
        match self {
            TypeDef::Primitive(_) | TypeDef::Vector(_) => None,
            TypeDef::Struct(def) => Some(&def.name),
            TypeDef::Table(def) => Some(&def.name),
            TypeDef::Union(def) => Some(&def.name),
        }
    }
}

impl PartialEq for TypeDef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeDef::Primitive(a), TypeDef::Primitive(b)) => a == b,
            (TypeDef::Vector(a), TypeDef::Vector(b)) => a == b,
            (TypeDef::Struct(a), TypeDef::Struct(b)) => a.name == b.name,
            (TypeDef::Table(a), TypeDef::Table(b)) => a.name == b.name,
            (TypeDef::Union(a), TypeDef::Union(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl Eq for TypeDef {}

impl Hash for TypeDef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            TypeDef::Primitive(kind) => kind.hash(state),
            TypeDef::Vector(elem) => elem.hash(state),
            TypeDef::Struct(def) => def.name.hash(state),
            TypeDef::Table(def) => def.name.hash(state),
            TypeDef::Union(def) => def.name.hash(state),
        }
    }
}
