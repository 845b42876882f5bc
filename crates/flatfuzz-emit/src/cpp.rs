//! Native-code renderer.
//!
//! Tables become named record types with field-by-value equality and a
//! serialization hook; structs render inline as `std::tuple`, unions inline
//! as `boost::variant` over their branch payload types.

use std::fmt::Write;

use flatfuzz_core::{TableDef, TypeDef};

use crate::Rendered;

/// Render one type node to its native-code form.
pub fn render(ty: &TypeDef) -> Rendered {
    match ty {
        TypeDef::Primitive(kind) => Rendered::inline(kind.cpp_name().to_string()),
        TypeDef::Vector(elem) => {
            let elem = render(elem);
            Rendered {
                reference: format!("std::vector<{}>", elem.reference),
                defs: elem.defs,
            }
        }
        TypeDef::Struct(def) => {
            let mut defs = Vec::new();
            let mut parts = Vec::new();
            for ty in def.fields.values() {
                let rendered = render(ty);
                defs.extend(rendered.defs);
                parts.push(rendered.reference);
            }
            Rendered {
                reference: format!("std::tuple<{}>", parts.join(", ")),
                defs,
            }
        }
        TypeDef::Table(def) => render_table(def),
        TypeDef::Union(def) => {
            let mut defs = Vec::new();
            let mut parts = Vec::new();
            for (_, table) in &def.branches {
                let rendered = render_table(table);
                defs.extend(rendered.defs);
                parts.push(rendered.reference);
            }
            Rendered {
                reference: format!("boost::variant<{}>", parts.join(", ")),
                defs,
            }
        }
    }
}

pub fn render_table(def: &TableDef) -> Rendered {
    let mut defs = Vec::new();
    let mut members = Vec::new();
    for (field, ty) in &def.fields {
        let rendered = render(ty);
        defs.extend(rendered.defs);
        members.push((field.as_str(), rendered.reference));
    }

    let mut block = format!("struct {} {{\n", def.name);
    for (field, reference) in &members {
        let _ = writeln!(block, "    {reference} {field} = {{}};");
    }

    let mut args = vec!["ar".to_string()];
    args.extend(members.iter().map(|(field, _)| field.to_string()));
    block.push_str("    template <class Archiver>\n");
    block.push_str("    void serialize(Archiver& ar) {\n");
    let _ = writeln!(block, "        serializer({});", args.join(", "));
    block.push_str("    }\n");

    let mut comparisons = vec!["true".to_string()];
    comparisons.extend(
        members
            .iter()
            .map(|(field, _)| format!("lhs.{field} == rhs.{field}")),
    );
    let _ = writeln!(
        block,
        "    friend bool operator==(const {0}& lhs, const {0}& rhs) {{",
        def.name
    );
    let _ = writeln!(block, "        return {};", comparisons.join(" && "));
    block.push_str("    }\n");
    block.push_str("};\n");

    defs.push(block);
    Rendered {
        reference: def.name.clone(),
        defs,
    }
}

/// The full generated header for a root table.
pub fn header_text(root: &TableDef) -> String {
    let rendered = render_table(root);
    let mut out = String::from(
        "#pragma once\n#include <stdint.h>\n#include <vector>\n#include <string>\n\n",
    );
    out.push_str(&rendered.defs.join("\n"));
    out
}
