use chainmail::table::TableError;
use chainmail::{bucket_index, HashTable, Result};
use fake::faker::internet::en::Username;
use fake::Fake;

#[test]
fn default_table_has_eight_buckets() {
    let table = HashTable::<String, i32>::new();

    assert_eq!(table.capacity(), 8);
    assert!(table.is_empty());
}

#[test]
fn negative_capacity_is_rejected() {
    let table = HashTable::<String, i32>::with_capacity(-2);

    assert_eq!(table.err(), Some(TableError::InvalidCapacity(-2)));
    assert_eq!(
        HashTable::<String, i32>::with_capacity(0).err(),
        Some(TableError::InvalidCapacity(0))
    );
}

#[test]
fn put_then_get_round_trip() -> Result<()> {
    let mut table = HashTable::with_capacity(8)?;

    assert_eq!(table.put("madmax", 833), None);
    assert_eq!(table.get("madmax"), Some(&833));
    assert_eq!(table.get("altea"), None);

    assert_eq!(table.put("madmax", 834), Some(833));
    assert_eq!(table.get("madmax"), Some(&834));

    Ok(())
}

#[test]
fn len_counts_distinct_keys() {
    let mut table = HashTable::new();

    table.put("madmax", 833);
    table.put("altea", 553);
    table.put("johnny", 439);
    assert_eq!(table.len(), 3);

    // a value rewrite is not a new entry
    table.put("altea", 554);
    assert_eq!(table.len(), 3);

    assert_eq!(table.remove("johnny"), Some(439));
    assert_eq!(table.len(), 2);

    assert_eq!(table.remove("johnny"), None);
    assert_eq!(table.len(), 2, "absent removal left the count alone");
}

#[test]
fn value_presence_spans_every_chain() {
    let mut table = HashTable::new();

    table.put("madmax", 7);
    table.put("altea", 7);
    table.put("johnny", 7);
    table.put("leon", 886);

    assert!(table.contains_value(&7));
    assert!(table.contains_value(&886));
    assert!(!table.contains_value(&0));
}

#[test]
fn colliding_keys_stay_independent() {
    let mut table = HashTable::new();

    assert_eq!(
        bucket_index("AaAa", table.capacity()),
        bucket_index("BBBB", table.capacity()),
        "the scenario needs both keys on one bucket"
    );

    table.put("AaAa", 123);
    table.put("BBBB", 456);

    assert_eq!(table.len(), 2);
    assert_eq!(table.get("AaAa"), Some(&123));
    assert_eq!(table.get("BBBB"), Some(&456));

    assert_eq!(table.remove("AaAa"), Some(123));
    assert_eq!(table.get("AaAa"), None);
    assert_eq!(table.get("BBBB"), Some(&456), "its neighbour survived");
    assert_eq!(table.remove("BBBB"), Some(456));
    assert!(table.is_empty());
}

#[test]
fn resize_preserves_every_entry() -> Result<()> {
    let mut table = HashTable::new();
    let entries = [("madmax", 833), ("altea", 553), ("johnny", 439), ("leon", 886)];

    entries.iter().for_each(|(key, value)| {
        table.put(*key, *value);
    });

    table.resize(16)?;
    assert_eq!(table.capacity(), 16);
    assert_eq!(table.len(), entries.len());

    for (key, value) in entries {
        assert_eq!(table.get(key), Some(&value));
    }

    // shrinking is just as valid a migration
    table.resize(2)?;
    assert_eq!(table.capacity(), 2);
    assert_eq!(table.len(), entries.len());

    for (key, value) in entries {
        assert_eq!(table.get(key), Some(&value));
    }

    Ok(())
}

#[test]
fn failed_resize_changes_nothing() {
    let mut table = HashTable::new();
    table.put("madmax", 833);

    assert_eq!(table.resize(0), Err(TableError::InvalidCapacity(0)));
    assert_eq!(table.resize(-16), Err(TableError::InvalidCapacity(-16)));

    assert_eq!(table.capacity(), 8);
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("madmax"), Some(&833));
}

#[test]
fn renders_the_bucket_layout() {
    let mut table = HashTable::new();

    table.put("madmax", 833);
    table.put("altea", 553);
    table.put("johnny", 439);
    table.put("leon", 886);

    // fixed hashing policy, fixed layout
    assert_eq!(
        table.to_string(),
        "0: \n1: johnny=439\n2: altea=553\n3: madmax=833\n4: \n5: \n6: \n7: leon=886\n"
    );
}

/// Cross-checks a fake-driven workload against [`std::collections::HashMap`].
#[test]
fn agrees_with_the_standard_map() -> Result<()> {
    let mut table = HashTable::with_capacity(4)?;
    let mut model = std::collections::HashMap::new();

    for round in 0..500 {
        let username: String = Username().fake();

        assert_eq!(
            table.put(username.clone(), round),
            model.insert(username, round)
        );
    }

    assert_eq!(table.len(), model.len());

    // migrate in both directions mid-workload
    table.resize(256)?;
    table.resize(16)?;

    for (username, round) in &model {
        assert_eq!(table.get(username), Some(round));
    }

    let doomed: Vec<String> = model.keys().take(model.len() / 2).cloned().collect();
    for username in &doomed {
        assert_eq!(table.remove(username.as_str()), model.remove(username));
    }

    assert_eq!(table.len(), model.len());
    for (username, round) in &model {
        assert_eq!(table.get(username), Some(round));
        assert!(table.contains_key(username.as_str()));
    }

    Ok(())
}
