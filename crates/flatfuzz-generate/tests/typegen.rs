use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use flatfuzz_core::{TableDef, TypeDef};
use flatfuzz_generate::TypeGen;

fn root_for(seed: u64, depth: u32) -> TableDef {
    let rng = ChaCha8Rng::seed_from_u64(seed);
    TypeGen::new(rng).root(depth)
}

/// Longest chain of indirection-introducing nodes (vector, table, union) on
/// any root-to-leaf path.
fn indirection_depth(ty: &TypeDef) -> u32 {
    match ty {
        TypeDef::Primitive(_) => 0,
        TypeDef::Vector(elem) => 1 + indirection_depth(elem),
        TypeDef::Struct(def) => def.fields.values().map(indirection_depth).max().unwrap_or(0),
        TypeDef::Table(def) => {
            1 + def.fields.values().map(indirection_depth).max().unwrap_or(0)
        }
        TypeDef::Union(def) => {
            1 + def
                .branches
                .iter()
                .map(|(_, table)| indirection_depth(&TypeDef::Table(table.clone())))
                .max()
                .unwrap_or(0)
        }
    }
}

#[test]
fn generation_is_deterministic_per_seed() {
    for seed in 0..32 {
        let a = root_for(seed, 2);
        let b = root_for(seed, 2);
        assert_eq!(format!("{a:?}"), format!("{b:?}"), "seed {seed}");
    }
}

#[test]
fn indirection_nesting_respects_depth_budget() {
    for depth in 0..=3u32 {
        for seed in 0..100u64 {
            let root = TypeDef::Table(root_for(seed ^ ((depth as u64) << 32), depth));
            assert!(
                indirection_depth(&root) <= depth + 1,
                "seed {seed} depth {depth}"
            );
        }
    }
}

#[test]
fn structs_are_indirection_free_recursively() {
    fn check(ty: &TypeDef) {
        match ty {
            TypeDef::Primitive(_) => {}
            TypeDef::Vector(elem) => check(elem),
            TypeDef::Struct(def) => {
                for field in def.fields.values() {
                    assert!(field.is_inline(), "struct {} leaks indirection", def.name);
                    check(field);
                }
            }
            TypeDef::Table(def) => {
                for field in def.fields.values() {
                    check(field);
                }
            }
            TypeDef::Union(def) => {
                for (_, table) in &def.branches {
                    for field in table.fields.values() {
                        check(field);
                    }
                }
            }
        }
    }

    for seed in 0..100 {
        check(&TypeDef::Table(root_for(seed, 3)));
    }
}

#[test]
fn aggregate_names_are_pairwise_distinct() {
    fn collect(ty: &TypeDef, names: &mut Vec<String>) {
        match ty {
            TypeDef::Primitive(_) => {}
            TypeDef::Vector(elem) => collect(elem, names),
            TypeDef::Struct(def) => {
                names.push(def.name.clone());
                for field in def.fields.values() {
                    collect(field, names);
                }
            }
            TypeDef::Table(def) => {
                names.push(def.name.clone());
                for field in def.fields.values() {
                    collect(field, names);
                }
            }
            TypeDef::Union(def) => {
                names.push(def.name.clone());
                for (_, table) in &def.branches {
                    collect(&TypeDef::Table(table.clone()), names);
                }
            }
        }
    }

    for seed in 0..100 {
        let mut names = Vec::new();
        collect(&TypeDef::Table(root_for(seed, 3)), &mut names);
        let distinct: HashSet<_> = names.iter().cloned().collect();
        assert_eq!(distinct.len(), names.len(), "seed {seed}: {names:?}");
    }
}

#[test]
fn root_is_named_first() {
    for seed in 0..32 {
        assert_eq!(root_for(seed, 2).name, "Table0");
    }
}

#[test]
fn depth_zero_yields_primitive_only() {
    for seed in 0..100 {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        let ty = TypeGen::new(rng).choose(0, true, true);
        assert!(matches!(ty, TypeDef::Primitive(_)), "seed {seed}");
    }
}

#[test]
fn union_branches_are_flat_tables() {
    fn check(ty: &TypeDef) {
        match ty {
            TypeDef::Primitive(_) => {}
            TypeDef::Vector(elem) => check(elem),
            TypeDef::Struct(def) => {
                for field in def.fields.values() {
                    check(field);
                }
            }
            TypeDef::Table(def) => {
                for field in def.fields.values() {
                    check(field);
                }
            }
            TypeDef::Union(def) => {
                assert!(!def.branches.is_empty());
                assert!(def.branches.len() <= 10);
                for (_, table) in &def.branches {
                    // Depth-0 payloads: nothing but primitive fields inside.
                    for field in table.fields.values() {
                        assert!(
                            matches!(field, TypeDef::Primitive(_)),
                            "union {} branch {} is not flat",
                            def.name,
                            table.name
                        );
                    }
                }
            }
        }
    }

    for seed in 0..100 {
        check(&TypeDef::Table(root_for(seed, 3)));
    }
}

#[test]
fn vectors_never_wrap_unions() {
    fn check(ty: &TypeDef) {
        match ty {
            TypeDef::Primitive(_) => {}
            TypeDef::Vector(elem) => {
                assert!(!matches!(**elem, TypeDef::Union(_)));
                check(elem);
            }
            TypeDef::Struct(def) => {
                for field in def.fields.values() {
                    check(field);
                }
            }
            TypeDef::Table(def) => {
                for field in def.fields.values() {
                    check(field);
                }
            }
            TypeDef::Union(def) => {
                for (_, table) in &def.branches {
                    for field in table.fields.values() {
                        check(field);
                    }
                }
            }
        }
    }

    for seed in 0..100 {
        check(&TypeDef::Table(root_for(seed, 3)));
    }
}
