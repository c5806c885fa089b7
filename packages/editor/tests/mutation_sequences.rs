//! Longer mutation sequences through a Document
//!
//! This tests:
//! - Insert + move + delete chains keep ids unique
//! - Undo/redo sequences
//! - Batched mutations

use std::path::PathBuf;

use mindplan_editor::{Document, EditorConfig, Mutation, SiblingDirection};
use mindplan_model::{collect_ids, validate_tree, Node};

fn document() -> Document {
    let root = Node::new("R", "Plan")
        .with_child(Node::new("A", "A").with_child(Node::new("A1", "A1")))
        .with_child(Node::new("B", "B"));
    Document::from_root(PathBuf::from("seq.json"), root, EditorConfig::default()).unwrap()
}

#[test]
fn test_ids_stay_unique_through_random_walk() {
    let mut doc = document();
    let mut created = Vec::new();

    for i in 0..30 {
        let ids = collect_ids(doc.root());
        let parent = ids[i % ids.len()].clone();
        created.push(doc.insert_child(&parent).unwrap().unwrap());

        let ids = collect_ids(doc.root());
        let source = ids[(i * 7 + 3) % ids.len()].clone();
        let target = ids[(i * 5 + 1) % ids.len()].clone();
        let _ = doc.apply(Mutation::Reparent {
            source_id: source,
            target_id: target,
        });

        if i % 4 == 3 {
            let victim = created[i / 2].clone();
            let _ = doc.apply(Mutation::DeleteSubtree { node_id: victim });
        }

        assert!(validate_tree(doc.root()).is_ok(), "invariants broken at step {}", i);
        assert_eq!(doc.root().id, "R");
    }
}

#[test]
fn test_move_then_delete_sequence() {
    let mut doc = document();

    doc.apply(Mutation::Reparent {
        source_id: "B".into(),
        target_id: "A".into(),
    })
    .unwrap();
    assert_eq!(doc.locate("A").unwrap().child_ids(), vec!["A1", "B"]);

    doc.apply(Mutation::DeleteSubtree { node_id: "A".into() }).unwrap();
    assert!(doc.locate("A").is_none());
    assert!(doc.locate("B").is_none());

    // Undo delete restores both
    assert!(doc.undo());
    assert!(doc.locate("B").is_some());

    // Undo move puts B back under the root
    assert!(doc.undo());
    assert_eq!(doc.root().child_ids(), vec!["A", "B"]);
}

#[test]
fn test_multiple_label_updates_with_undo_redo() {
    let mut doc = document();

    for i in 1..=5 {
        doc.apply(Mutation::SetLabel {
            node_id: "A1".into(),
            label: format!("v{}", i),
        })
        .unwrap();
    }
    assert_eq!(doc.history().undo_levels(), 5);

    for _ in 0..5 {
        assert!(doc.undo());
    }
    assert_eq!(doc.locate("A1").unwrap().label, "A1");

    for _ in 0..5 {
        assert!(doc.redo());
    }
    assert_eq!(doc.locate("A1").unwrap().label, "v5");

    for _ in 0..3 {
        doc.undo();
    }
    doc.apply(Mutation::SetLabel {
        node_id: "A1".into(),
        label: "new branch".into(),
    })
    .unwrap();
    assert_eq!(doc.history().redo_levels(), 0);
}

#[test]
fn test_batch_undoes_as_one_step() {
    let mut doc = document();

    doc.begin_batch("Restructure");
    doc.apply(Mutation::Reorder {
        node_id: "B".into(),
        direction: SiblingDirection::Previous,
    })
    .unwrap();
    doc.insert_child("B").unwrap();
    doc.end_batch();

    assert_eq!(doc.history().undo_description(), Some("Restructure"));
    assert!(doc.undo());
    assert_eq!(doc.root().child_ids(), vec!["A", "B"]);
    assert!(doc.locate("B").unwrap().children.is_empty());
}

#[test]
fn test_noops_do_not_enter_history() {
    let mut doc = document();

    doc.apply(Mutation::Reorder {
        node_id: "A".into(),
        direction: SiblingDirection::Previous,
    })
    .unwrap();
    doc.apply(Mutation::RemoveImage { node_id: "A".into() }).unwrap();

    assert_eq!(doc.version, 0);
    assert!(!doc.history().can_undo());
}
