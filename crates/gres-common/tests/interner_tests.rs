use super::*;

#[test]
fn test_intern_deduplicates() {
    let interner = ShardedInterner::new();
    let a = interner.intern("List");
    let b = interner.intern("List");
    let c = interner.intern("Dictionary");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(!a.is_none());
}

#[test]
fn test_resolve_round_trips_names() {
    let interner = ShardedInterner::new();
    let names = ["System", "Object", "T", "U", "IComparable", "x"];
    let atoms: Vec<Atom> = names.iter().map(|n| interner.intern(n)).collect();

    for (name, atom) in names.iter().zip(atoms) {
        assert_eq!(&*interner.resolve(atom), *name);
    }
}

#[test]
fn test_empty_string_is_none() {
    let interner = ShardedInterner::new();
    assert_eq!(interner.intern(""), Atom::NONE);
    assert_eq!(&*interner.resolve(Atom::NONE), "");
    assert!(interner.is_empty());
}

#[test]
fn test_no_name_maps_to_none() {
    let interner = ShardedInterner::new();
    for i in 0..200 {
        let atom = interner.intern(&format!("name{i}"));
        assert!(!atom.is_none(), "name{i} collided with Atom::NONE");
    }
    assert_eq!(interner.len(), 201);
}

#[test]
fn test_len_counts_each_string_once() {
    let interner = ShardedInterner::new();
    assert_eq!(interner.len(), 1);
    for name in ["Object", "ValueType", "T", "Object"] {
        interner.intern(name);
    }
    assert_eq!(interner.len(), 4);
    assert!(!interner.is_empty());
}

#[test]
fn test_first_string_of_each_shard_resolves() {
    let interner = ShardedInterner::new();
    let mut shards_seen = [false; 16];
    for i in 0..500 {
        let name = format!("N{i}");
        let atom = interner.intern(&name);
        let shard = (atom.index() & 0xF) as usize;
        if !shards_seen[shard] {
            shards_seen[shard] = true;
            assert!(!atom.is_none());
            assert_eq!(&*interner.resolve(atom), name);
        }
    }
}

#[test]
fn test_try_resolve_unknown_atom() {
    let interner = ShardedInterner::new();
    assert!(interner.try_resolve(Atom(0xFFFF_FF00)).is_none());
}

#[test]
fn test_concurrent_interning_agrees() {
    use std::sync::Arc;
    use std::thread;

    let interner = Arc::new(ShardedInterner::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let interner = Arc::clone(&interner);
            thread::spawn(move || {
                (0..50)
                    .map(|i| interner.intern(&format!("T{i}")))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<Atom>> = handles
        .into_iter()
        .map(|h| h.join().expect("thread completed"))
        .collect();
    for other in &results[1..] {
        assert_eq!(&results[0], other);
    }
}

#[test]
fn test_atom_serializes_as_index() {
    let json = serde_json::to_string(&Atom(42)).expect("atom serializes");
    assert_eq!(json, "42");
}
