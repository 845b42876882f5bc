//! Schema-definition-language renderer.

use std::collections::BTreeMap;
use std::fmt::Write;

use flatfuzz_core::{TableDef, TypeDef};

use crate::Rendered;

/// Render one type node to its schema-language form.
pub fn render(ty: &TypeDef) -> Rendered {
    match ty {
        TypeDef::Primitive(kind) => Rendered::inline(kind.fbs_name().to_string()),
        TypeDef::Vector(elem) => {
            let elem = render(elem);
            Rendered {
                reference: format!("[{}]", elem.reference),
                defs: elem.defs,
            }
        }
        TypeDef::Struct(def) => fields_block("struct", &def.name, &def.fields),
        TypeDef::Table(def) => render_table(def),
        TypeDef::Union(def) => {
            let mut defs = Vec::new();
            let mut block = format!("union {} {{\n", def.name);
            for (_, table) in &def.branches {
                let branch = render_table(table);
                defs.extend(branch.defs);
                let _ = writeln!(block, "    {},", branch.reference);
            }
            block.push_str("}\n");
            defs.push(block);
            Rendered {
                reference: def.name.clone(),
                defs,
            }
        }
    }
}

pub fn render_table(def: &TableDef) -> Rendered {
    fields_block("table", &def.name, &def.fields)
}

fn fields_block(keyword: &str, name: &str, fields: &BTreeMap<String, TypeDef>) -> Rendered {
    let mut defs = Vec::new();
    let mut block = format!("{keyword} {name} {{\n");
    for (field, ty) in fields {
        let rendered = render(ty);
        defs.extend(rendered.defs);
        let _ = writeln!(block, "    {field}:{};", rendered.reference);
    }
    block.push_str("}\n");
    defs.push(block);
    Rendered {
        reference: name.to_string(),
        defs,
    }
}

/// The full schema text for a root table: every definition block in
/// dependency order, then a trailing declaration naming the root type.
pub fn schema_text(root: &TableDef) -> String {
    let rendered = render_table(root);
    let mut out = rendered.defs.join("\n");
    let _ = write!(out, "\nroot_type {};", root.name);
    out
}
