use techdag::engine::{Command, NodeAttributes, Session};
use techdag::errors::TechdagError;
use techdag::graph::Node;
use techdag::persist::MemoryStore;
use techdag_test_utils::builders::NodeBuilder;

async fn session_with(nodes: Vec<Node>) -> Session<MemoryStore> {
    Session::load(MemoryStore::with_nodes(nodes))
        .await
        .expect("load should succeed")
}

fn link(source: &str, target: &str) -> Command {
    Command::AddDependency {
        source_id: source.to_string(),
        target_id: target.to_string(),
    }
}

#[tokio::test]
async fn add_node_persists_the_whole_collection() {
    let mut session = session_with(vec![]).await;

    let node = NodeBuilder::new("n1").name("First").build();
    session.dispatch(Command::AddNode(node)).await.unwrap();

    assert_eq!(session.persistence().save_count(), 1);
    assert_eq!(session.persistence().nodes().len(), 1);
    assert_eq!(session.persistence().nodes()[0].id, "n1");
}

#[tokio::test]
async fn duplicate_node_id_is_rejected() {
    let mut session = session_with(vec![NodeBuilder::new("n1").build()]).await;

    let err = session
        .dispatch(Command::AddNode(NodeBuilder::new("n1").build()))
        .await
        .unwrap_err();
    assert!(matches!(err, TechdagError::DuplicateNode(_)));
    // Nothing was saved for the rejected command.
    assert_eq!(session.persistence().save_count(), 0);
}

#[tokio::test]
async fn edge_addition_protocol() {
    let mut session = session_with(vec![
        NodeBuilder::new("a").build(),
        NodeBuilder::new("b").depends_on("a").build(),
    ])
    .await;

    // Self-dependency.
    let err = session.dispatch(link("a", "a")).await.unwrap_err();
    assert!(matches!(err, TechdagError::SelfDependency(_)));

    // Duplicate edge.
    let err = session.dispatch(link("a", "b")).await.unwrap_err();
    assert!(matches!(err, TechdagError::DuplicateEdge { .. }));

    // Cycle: a depends on b while b already depends on a.
    let err = session.dispatch(link("b", "a")).await.unwrap_err();
    assert!(matches!(err, TechdagError::CycleDetected(_)));

    // Unknown endpoint.
    let err = session.dispatch(link("ghost", "b")).await.unwrap_err();
    assert!(matches!(err, TechdagError::NodeNotFound(_)));

    // None of the rejections mutated anything.
    assert_eq!(session.persistence().save_count(), 0);
    assert_eq!(session.store().get("b").unwrap().dependencies, vec!["a"]);
}

#[tokio::test]
async fn valid_edge_is_appended_and_saved() {
    let mut session = session_with(vec![
        NodeBuilder::new("a").build(),
        NodeBuilder::new("b").build(),
    ])
    .await;

    session.dispatch(link("a", "b")).await.unwrap();

    assert_eq!(session.store().get("b").unwrap().dependencies, vec!["a"]);
    assert_eq!(session.persistence().save_count(), 1);
}

#[tokio::test]
async fn delete_cascades_into_dependency_lists() {
    let mut session = session_with(vec![
        NodeBuilder::new("a").build(),
        NodeBuilder::new("b").depends_on("a").build(),
        NodeBuilder::new("c").depends_on("a").depends_on("b").build(),
    ])
    .await;

    session
        .dispatch(Command::DeleteNode {
            id: "a".to_string(),
        })
        .await
        .unwrap();

    assert!(session.store().get("a").is_none());
    assert!(session.store().get("b").unwrap().dependencies.is_empty());
    assert_eq!(session.store().get("c").unwrap().dependencies, vec!["b"]);

    // The cascade also reached the persisted copy.
    let persisted = session.persistence().nodes();
    assert!(persisted.iter().all(|n| !n.dependencies.contains(&"a".to_string())));
}

#[tokio::test]
async fn remove_dependency_requires_an_existing_edge() {
    let mut session = session_with(vec![
        NodeBuilder::new("a").build(),
        NodeBuilder::new("b").depends_on("a").build(),
    ])
    .await;

    session
        .dispatch(Command::RemoveDependency {
            source_id: "a".to_string(),
            target_id: "b".to_string(),
        })
        .await
        .unwrap();
    assert!(session.store().get("b").unwrap().dependencies.is_empty());

    let err = session
        .dispatch(Command::RemoveDependency {
            source_id: "a".to_string(),
            target_id: "b".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TechdagError::DependencyNotFound { .. }));
}

#[tokio::test]
async fn update_attributes_replaces_the_editable_set() {
    let mut session = session_with(vec![NodeBuilder::new("a").name("Old").build()]).await;

    let mut attrs = NodeAttributes::from_node(session.store().get("a").unwrap());
    attrs.name = "New".to_string();
    attrs.done = true;
    attrs.visible_days = Some(vec![1, 2]);
    attrs.start_time = Some(540);
    attrs.end_time = Some(1020);

    session
        .dispatch(Command::UpdateAttributes {
            id: "a".to_string(),
            attrs,
        })
        .await
        .unwrap();

    let node = session.store().get("a").unwrap();
    assert_eq!(node.name, "New");
    assert!(node.done);
    assert_eq!(node.visible_days, Some(vec![1, 2]));
    assert_eq!(node.start_time, Some(540));
}

#[tokio::test]
async fn failed_save_keeps_in_memory_edits() {
    let mut session = session_with(vec![NodeBuilder::new("a").build()]).await;
    session.persistence_mut().set_fail_saves(true);

    let err = session
        .dispatch(Command::AddNode(NodeBuilder::new("b").build()))
        .await
        .unwrap_err();
    assert!(matches!(err, TechdagError::Persistence(_)));

    // The edit survived in memory; the "server" copy did not change.
    assert!(session.store().get("b").is_some());
    assert_eq!(session.persistence().nodes().len(), 1);

    // Manual retry after the outage: the next successful save carries the
    // whole current collection.
    session.persistence_mut().set_fail_saves(false);
    session
        .dispatch(Command::AddNode(NodeBuilder::new("c").build()))
        .await
        .unwrap();
    assert_eq!(session.persistence().nodes().len(), 3);
}

#[tokio::test]
async fn reload_discards_unsaved_edits() {
    let mut session = session_with(vec![NodeBuilder::new("a").build()]).await;
    session.persistence_mut().set_fail_saves(true);

    let _ = session
        .dispatch(Command::AddNode(NodeBuilder::new("b").build()))
        .await;
    assert!(session.store().get("b").is_some());

    session.reload().await.unwrap();
    assert!(session.store().get("b").is_none());
}

#[tokio::test]
async fn loading_a_cyclic_collection_fails() {
    let nodes = vec![
        NodeBuilder::new("a").depends_on("b").build(),
        NodeBuilder::new("b").depends_on("a").build(),
    ];

    let err = Session::load(MemoryStore::with_nodes(nodes)).await.unwrap_err();
    assert!(matches!(err, TechdagError::CycleDetected(_)));
}
