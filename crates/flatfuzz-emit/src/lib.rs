//! Definition emitters for flatfuzz.
//!
//! Two renderers share one traversal shape: walk a type tree post-order,
//! return the reference string a parent should embed, and carry along the
//! definition blocks discovered underneath. Because each aggregate renders
//! its fields before appending its own block, the merged block list is a
//! topological order of the contains-as-field relation: every referenced
//! definition precedes the definition that references it.

pub mod cpp;
pub mod fbs;

/// Result of rendering one type node.
///
/// `reference` is what a parent embeds (a primitive spelling, an inline
/// type expression, or an aggregate name); `defs` are the definition blocks
/// registered beneath and including this node, in dependency order.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub reference: String,
    pub defs: Vec<String>,
}

impl Rendered {
    fn inline(reference: String) -> Self {
        Self {
            reference,
            defs: Vec::new(),
        }
    }
}
