use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use tracing::debug;

use flatfuzz_core::{NamePool, PrimitiveKind, StructDef, TableDef, TypeDef, UnionDef};

use crate::sample::{COUNT_CONTINUE, field_name, sample_geometric};

/// Union branch count cap while depth budget remains.
const MAX_UNION_BRANCHES: usize = 10;

/// Union branch count bound once the depth budget is exhausted.
const MAX_UNION_BRANCHES_AT_LEAF: usize = 8;

#[derive(Clone, Copy)]
enum Pick {
    Primitive,
    Struct,
    Vector,
    Table,
    Union,
}

/// Randomized type-tree generator for one run.
///
/// Owns the seeded RNG and the [`NamePool`] that keeps aggregate names
/// distinct across the whole run. Generation is total: any depth budget
/// yields a finite tree, and no call can fail.
pub struct TypeGen<R: Rng> {
    rng: R,
    names: NamePool,
}

impl<R: Rng> TypeGen<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            names: NamePool::new(),
        }
    }

    /// Generate the root of a fixture: always a table.
    pub fn root(&mut self, depth: u32) -> TableDef {
        self.table(depth)
    }

    /// Choose one random type under the given depth budget and gates.
    ///
    /// At depth 0 only primitives are eligible. Vector and Table require
    /// `allow_indirection`; Union additionally requires `allow_union`.
    pub fn choose(&mut self, depth: u32, allow_indirection: bool, allow_union: bool) -> TypeDef {
        let mut picks = vec![Pick::Primitive];
        if depth > 0 {
            picks.push(Pick::Struct);
            if allow_indirection {
                picks.push(Pick::Vector);
                picks.push(Pick::Table);
                if allow_union {
                    picks.push(Pick::Union);
                }
            }
        }

        match picks[self.rng.random_range(0..picks.len())] {
            Pick::Primitive => TypeDef::Primitive(self.primitive()),
            Pick::Struct => TypeDef::Struct(self.strukt(depth)),
            Pick::Vector => self.vector(depth),
            Pick::Table => TypeDef::Table(self.table(depth)),
            Pick::Union => TypeDef::Union(self.union(depth)),
        }
    }

    fn primitive(&mut self) -> PrimitiveKind {
        PrimitiveKind::ALL[self.rng.random_range(0..PrimitiveKind::ALL.len())]
    }

    fn vector(&mut self, depth: u32) -> TypeDef {
        // Vectors of unions are not permitted.
        let elem = self.choose(depth.saturating_sub(1), true, false);
        TypeDef::Vector(Box::new(elem))
    }

    fn table(&mut self, depth: u32) -> TableDef {
        let name = self.names.table();
        let fields = self.fields(depth, true);
        debug!(name = %name, fields = fields.len(), depth, "minted table");
        TableDef::new(name, fields)
    }

    fn strukt(&mut self, depth: u32) -> StructDef {
        let name = self.names.strukt();
        let fields = self.fields(depth, false);
        debug!(name = %name, fields = fields.len(), depth, "minted struct");
        StructDef::new(name, fields)
    }

    fn union(&mut self, depth: u32) -> UnionDef {
        let name = self.names.union();
        let count = if depth > 0 {
            (1 + sample_geometric(&mut self.rng, COUNT_CONTINUE)).min(MAX_UNION_BRANCHES)
        } else {
            self.rng.random_range(1..=MAX_UNION_BRANCHES_AT_LEAF)
        };

        let mut branch_names = BTreeSet::new();
        while branch_names.len() < count {
            branch_names.insert(field_name(&mut self.rng));
        }
        // Every branch payload is a fresh depth-0 table, so union recursion
        // bottoms out at most one level below the union itself.
        let branches = branch_names
            .into_iter()
            .map(|branch| (branch, self.table(0)))
            .collect();
        debug!(name = %name, branches = count, depth, "minted union");
        UnionDef::new(name, branches)
    }

    /// Draw a geometric field count, then name and type each field. Field
    /// names land in a name-keyed map, so a repeated draw collapses.
    fn fields(&mut self, depth: u32, allow_indirection: bool) -> BTreeMap<String, TypeDef> {
        let count = sample_geometric(&mut self.rng, COUNT_CONTINUE);
        let mut fields = BTreeMap::new();
        for _ in 0..count {
            let name = field_name(&mut self.rng);
            let ty = self.choose(depth.saturating_sub(1), allow_indirection, true);
            fields.insert(name, ty);
        }
        fields
    }
}
