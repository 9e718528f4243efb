//! Behaviour every store driver must show, exercised against the memory driver.

use std::sync::Arc;

use chrono::Utc;
use pretty_assertions::assert_eq;
use quorum_core::{ApproverId, InstanceId, TemplateId};
use quorum_execution::WorkflowInstance;
use quorum_ports::{InstanceRepo, PortsError, TemplateRepo, Versioned};
use quorum_store_memory::{MemoryInstanceRepo, MemoryTemplateRepo};
use quorum_workflow::{TemplateBuilder, WorkflowTemplate};

fn template(name: &str) -> WorkflowTemplate {
    let draft = TemplateBuilder::new(name)
        .step("review", [ApproverId::new("alice").unwrap()])
        .build()
        .unwrap();
    WorkflowTemplate::from_draft(TemplateId::new(0), draft, Utc::now()).unwrap()
}

fn instance(template_id: u64) -> WorkflowInstance {
    WorkflowInstance::new(InstanceId::new(0), TemplateId::new(template_id), Utc::now())
}

#[tokio::test]
async fn create_assigns_ascending_ids() {
    let repo = MemoryTemplateRepo::new();
    let first = repo.create(template("a")).await.unwrap();
    let second = repo.create(template("b")).await.unwrap();

    assert_eq!(first.value.id, TemplateId::new(1));
    assert_eq!(second.value.id, TemplateId::new(2));
    assert_eq!(first.version, Versioned::<WorkflowTemplate>::INITIAL);
    assert_eq!(repo.get(TemplateId::new(2)).await.unwrap(), second);
}

#[tokio::test]
async fn get_unknown_is_not_found() {
    let repo = MemoryTemplateRepo::new();
    let err = repo.get(TemplateId::new(42)).await.unwrap_err();
    assert_eq!(err, PortsError::template_not_found(TemplateId::new(42)));
}

#[tokio::test]
async fn stale_swap_is_refused() {
    let repo = MemoryTemplateRepo::new();
    let stored = repo.create(template("a")).await.unwrap();
    let id = stored.value.id;

    let mut renamed = stored.value.clone();
    renamed.name = "renamed".into();
    assert!(repo.compare_and_swap(id, 1, renamed.clone()).await.unwrap());
    assert!(!repo.compare_and_swap(id, 1, stored.value).await.unwrap());

    let now = repo.get(id).await.unwrap();
    assert_eq!(now.version, 2);
    assert_eq!(now.value.name, "renamed");
}

#[tokio::test]
async fn list_pages_in_id_order() {
    let repo = MemoryTemplateRepo::new();
    for name in ["a", "b", "c", "d"] {
        repo.create(template(name)).await.unwrap();
    }
    let names: Vec<String> = repo
        .list(1, 2)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["b", "c"]);
    assert!(repo.list(10, 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_requires_current_version() {
    let repo = MemoryInstanceRepo::new();
    let stored = repo.create(instance(1)).await.unwrap();
    let id = stored.value.id;

    assert!(!repo.delete(id, 9).await.unwrap());
    assert!(repo.delete(id, 1).await.unwrap());
    assert_eq!(
        repo.delete(id, 1).await.unwrap_err(),
        PortsError::instance_not_found(id)
    );
    assert!(repo.is_empty());
}

#[tokio::test]
async fn instances_filter_by_template() {
    let repo = MemoryInstanceRepo::new();
    for template_id in [1, 2, 1, 3, 1] {
        repo.create(instance(template_id)).await.unwrap();
    }
    let ids: Vec<u64> = repo
        .list_by_template(TemplateId::new(1))
        .await
        .unwrap()
        .iter()
        .map(|i| i.id.get())
        .collect();
    assert_eq!(ids, vec![1, 3, 5]);
    assert_eq!(repo.list().await.unwrap().len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_swaps_have_one_winner() {
    let repo = Arc::new(MemoryInstanceRepo::new());
    let stored = repo.create(instance(1)).await.unwrap();
    let id = stored.value.id;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = Arc::clone(&repo);
            let value = stored.value.clone();
            tokio::spawn(async move { repo.compare_and_swap(id, 1, value).await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(repo.version_of(id), Some(2));
}
