use std::collections::BTreeMap;

use rand::Rng;

use flatfuzz_core::{PrimitiveKind, StructDef, TableDef, TypeDef};

use crate::sample::{COUNT_CONTINUE, sample_geometric, sample_word};

/// A concrete value sampled for one node of a type tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    List(Vec<DataValue>),
    Record(BTreeMap<String, DataValue>),
}

impl DataValue {
    /// Render as JSON text.
    ///
    /// Finite numbers and strings go through `serde_json`; infinities are
    /// spelled `Infinity` / `-Infinity`, which `serde_json::Number` cannot
    /// carry but which are legal sampler outputs.
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        self.write_json(&mut out);
        out
    }

    fn write_json(&self, out: &mut String) {
        match self {
            DataValue::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
            DataValue::Int(value) => out.push_str(&value.to_string()),
            DataValue::UInt(value) => out.push_str(&value.to_string()),
            DataValue::Float(value) => {
                if value.is_infinite() {
                    out.push_str(if *value > 0.0 { "Infinity" } else { "-Infinity" });
                } else {
                    out.push_str(&serde_json::Value::from(*value).to_string());
                }
            }
            DataValue::Text(value) => {
                out.push_str(&serde_json::Value::from(value.as_str()).to_string());
            }
            DataValue::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_json(out);
                }
                out.push(']');
            }
            DataValue::Record(entries) => {
                out.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&serde_json::Value::from(key.as_str()).to_string());
                    out.push_str(": ");
                    value.write_json(out);
                }
                out.push('}');
            }
        }
    }
}

/// Sample a value for `ty`, wrapped under the caller-supplied field name.
///
/// The wrapping exists so a union can deposit its `"<field>_type"`
/// discriminant next to the chosen branch's value; every other kind yields a
/// single-entry map. Callers unwrap to reach the value itself.
pub fn sample(ty: &TypeDef, field: &str, rng: &mut impl Rng) -> BTreeMap<String, DataValue> {
    let mut out = BTreeMap::new();
    match ty {
        TypeDef::Union(def) => {
            let index = rng.random_range(0..def.branches.len());
            let (_, table) = &def.branches[index];
            out.insert(format!("{field}_type"), DataValue::Text(table.name.clone()));
            out.insert(field.to_string(), sample_table(table, rng));
        }
        other => {
            out.insert(field.to_string(), value(other, rng));
        }
    }
    out
}

/// Sample a record for a table, unwrapped. This is the root entry point.
pub fn sample_table(table: &TableDef, rng: &mut impl Rng) -> DataValue {
    DataValue::Record(record(&table.fields, rng))
}

fn value(ty: &TypeDef, rng: &mut impl Rng) -> DataValue {
    match ty {
        TypeDef::Primitive(kind) => primitive_value(*kind, rng),
        TypeDef::Vector(elem) => {
            let count = sample_geometric(rng, COUNT_CONTINUE);
            DataValue::List((0..count).map(|_| value(elem, rng)).collect())
        }
        TypeDef::Struct(StructDef { fields, .. }) => DataValue::Record(record(fields, rng)),
        TypeDef::Table(def) => sample_table(def, rng),
        TypeDef::Union(_) => {
            // A union value only makes sense next to a field name carrying
            // its discriminant; the generator never places one here.
            panic!("union value sampled without a field name")
        }
    }
}

fn record(fields: &BTreeMap<String, TypeDef>, rng: &mut impl Rng) -> BTreeMap<String, DataValue> {
    let mut out = BTreeMap::new();
    for (field, ty) in fields {
        out.extend(sample(ty, field, rng));
    }
    out
}

/// Uniformly random bits reinterpreted at the kind's width and signedness.
/// Float kinds resample transparently until the candidate is not NaN;
/// infinities are kept.
fn primitive_value(kind: PrimitiveKind, rng: &mut impl Rng) -> DataValue {
    match kind {
        PrimitiveKind::Byte => DataValue::Int(rng.random::<i8>() as i64),
        PrimitiveKind::UByte => DataValue::UInt(rng.random::<u8>() as u64),
        PrimitiveKind::Bool => DataValue::Bool(rng.random_bool(0.5)),
        PrimitiveKind::Short => DataValue::Int(rng.random::<i16>() as i64),
        PrimitiveKind::UShort => DataValue::UInt(rng.random::<u16>() as u64),
        PrimitiveKind::Int => DataValue::Int(rng.random::<i32>() as i64),
        PrimitiveKind::UInt => DataValue::UInt(rng.random::<u32>() as u64),
        PrimitiveKind::Float => loop {
            let candidate = f32::from_bits(rng.random::<u32>());
            if !candidate.is_nan() {
                break DataValue::Float(candidate as f64);
            }
        },
        PrimitiveKind::Long => DataValue::Int(rng.random::<i64>()),
        PrimitiveKind::ULong => DataValue::UInt(rng.random::<u64>()),
        PrimitiveKind::Double => loop {
            let candidate = f64::from_bits(rng.random::<u64>());
            if !candidate.is_nan() {
                break DataValue::Float(candidate);
            }
        },
        PrimitiveKind::Str => DataValue::Text(sample_word(rng)),
    }
}
