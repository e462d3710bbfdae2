use super::*;

#[test]
fn test_index_groups_by_depth() {
    let dir = partitioned_db();
    let table = Table::load(&dir.path().join("t1"));
    let index = table.index();

    assert_eq!(index.depth_count(), 2);
    assert_eq!(index.nodes_at_depth(0).unwrap().len(), 2);
    assert_eq!(index.nodes_at_depth(1).unwrap().len(), 3);
    assert!(index.nodes_at_depth(2).is_none());
}

#[test]
fn test_nodes_for_key() {
    let dir = partitioned_db();
    let table = Table::load(&dir.path().join("t1"));

    let months: Vec<&str> = table
        .index()
        .nodes_for_key("month")
        .unwrap()
        .iter()
        .map(|n| n.value())
        .collect();
    assert_eq!(months, vec!["01", "02", "03"]);
}

#[test]
fn test_nodes_for_unknown_key() {
    let dir = partitioned_db();
    let table = Table::load(&dir.path().join("t1"));

    let result = table.index().nodes_for_key("day");
    assert!(matches!(result, Err(Error::PartitionKeyNotFound(key)) if key == "day"));
}

#[test]
fn test_empty_forest_index() {
    let index = PartitionIndex::new(&[]);
    assert_eq!(index.depth_count(), 0);
    assert!(index.key_names().is_empty());
    assert!(index.nodes_for_key("year").is_err());
}

#[test]
fn test_deep_tree_index() {
    let dir = tempdir().unwrap();
    uniform_tree(dir.path(), 4, 2);

    let index = PartitionIndex::new(&load_partitions(dir.path()));
    assert_eq!(index.depth_count(), 4);
    for depth in 0..4 {
        assert_eq!(index.nodes_at_depth(depth).unwrap().len(), 2usize.pow(depth as u32 + 1));
        let key = format!("k{}", depth);
        assert_eq!(index.nodes_for_key(&key).unwrap().len(), 2usize.pow(depth as u32 + 1));
    }
}
