//! End-to-end behaviour of the engine over the in-memory store.

use std::sync::Arc;

use chrono::Duration;
use pretty_assertions::assert_eq;
use quorum_core::{ApproverId, Clock, FixedClock, InstanceId, TemplateId};
use quorum_engine::{ApprovalEngine, EngineError, ErrorKind, Page};
use quorum_execution::{InstanceStatus, Outcome, Vote};
use quorum_store_memory::{MemoryInstanceRepo, MemoryTemplateRepo};
use quorum_workflow::{StepDraft, TemplateBuilder, TemplateDraft, TemplateStatus, WorkflowError};

fn who(name: &str) -> ApproverId {
    ApproverId::new(name).unwrap()
}

fn ids(names: &[&str]) -> Vec<ApproverId> {
    names.iter().map(|n| who(n)).collect()
}

fn engine() -> (ApprovalEngine, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::epoch());
    let engine = ApprovalEngine::new(
        Arc::new(MemoryTemplateRepo::new()),
        Arc::new(MemoryInstanceRepo::new()),
    )
    .with_clock(clock.clone());
    (engine, clock)
}

fn purchase_draft() -> TemplateDraft {
    TemplateBuilder::new("purchase")
        .version("1")
        .step("managers", ids(&["A", "B", "C"]))
        .step("finance", ids(&["X", "Y"]))
        .build()
        .unwrap()
}

async fn published(engine: &ApprovalEngine) -> TemplateId {
    let template = engine.create_template(purchase_draft()).await.unwrap();
    engine.publish_template(template.id).await.unwrap();
    template.id
}

#[tokio::test]
async fn two_step_scenario_ends_rejected() {
    let (engine, _) = engine();
    let template_id = published(&engine).await;
    let instance = engine.create_instance(template_id).await.unwrap();
    let id = instance.id;

    let receipt = engine.record_vote(id, Vote::approve(who("A"))).await.unwrap();
    assert_eq!(receipt.outcome, Outcome::Pending);
    let receipt = engine.record_vote(id, Vote::approve(who("B"))).await.unwrap();
    assert_eq!(receipt.outcome, Outcome::Approved);
    assert_eq!(receipt.attempts, 1);
    assert_eq!(receipt.instance.current_step_index, 1);
    assert_eq!(receipt.instance.overall_status, InstanceStatus::Pending);
    assert!(receipt.instance.step_instances[0].finished);

    engine
        .record_vote(id, Vote::reject(who("X")).with_reason("over budget"))
        .await
        .unwrap();
    let receipt = engine.record_vote(id, Vote::reject(who("Y"))).await.unwrap();
    assert_eq!(receipt.outcome, Outcome::Rejected);
    assert!(receipt.instance.done);
    assert_eq!(receipt.instance.overall_status, InstanceStatus::Rejected);

    let err = engine.record_vote(id, Vote::approve(who("X"))).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(engine.get_instance(id).await.unwrap(), receipt.instance);

    let step = engine.get_current_step(id).await.unwrap();
    assert_eq!(step.reasons.get(&who("X")).map(String::as_str), Some("over budget"));
}

#[tokio::test]
async fn full_approval_finishes_past_last_step() {
    let (engine, _) = engine();
    let template_id = published(&engine).await;
    let id = engine.create_instance(template_id).await.unwrap().id;

    for name in ["A", "C", "X", "Y"] {
        engine.record_vote(id, Vote::approve(who(name))).await.unwrap();
    }
    let instance = engine.get_instance(id).await.unwrap();
    assert!(instance.done);
    assert_eq!(instance.overall_status, InstanceStatus::Approved);
    assert_eq!(instance.current_step_index, 2);
    assert_eq!(
        engine.get_current_step(id).await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(engine.get_next_step(id).await.unwrap_err().kind(), ErrorKind::OutOfRange);
}

#[tokio::test]
async fn non_approver_is_forbidden() {
    let (engine, _) = engine();
    let template_id = published(&engine).await;
    let id = engine.create_instance(template_id).await.unwrap().id;

    // X only votes on step 1
    let err = engine.record_vote(id, Vote::approve(who("X"))).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert!(engine.get_instance(id).await.unwrap().step_instances.is_empty());
}

#[tokio::test]
async fn current_and_next_step_queries() {
    let (engine, _) = engine();
    let template_id = published(&engine).await;
    let id = engine.create_instance(template_id).await.unwrap().id;

    assert!(matches!(
        engine.get_current_step(id).await.unwrap_err(),
        EngineError::StepNotFound { step_index: 0, .. }
    ));
    assert_eq!(engine.get_next_step(id).await.unwrap().name, "finance");

    engine.record_vote(id, Vote::approve(who("A"))).await.unwrap();
    let current = engine.get_current_step(id).await.unwrap();
    assert_eq!(current.vote_of(&who("A")), Some(true));

    engine.record_vote(id, Vote::approve(who("B"))).await.unwrap();
    let err = engine.get_next_step(id).await.unwrap_err();
    assert!(matches!(err, EngineError::NoNextStep { instance_id } if instance_id == id));
}

#[tokio::test]
async fn instances_need_published_template() {
    let (engine, _) = engine();
    let draft = engine.create_template(purchase_draft()).await.unwrap();
    let err = engine.create_instance(draft.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    engine.publish_template(draft.id).await.unwrap();
    engine.disable_template(draft.id).await.unwrap();
    let err = engine.create_instance(draft.id).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::TemplateNotPublished {
            status: TemplateStatus::Disabled,
            ..
        }
    ));

    let err = engine.create_instance(TemplateId::new(99)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn disabling_keeps_running_instances_alive() {
    let (engine, _) = engine();
    let template_id = published(&engine).await;
    let id = engine.create_instance(template_id).await.unwrap().id;
    engine.disable_template(template_id).await.unwrap();

    engine.record_vote(id, Vote::approve(who("A"))).await.unwrap();
    let receipt = engine.record_vote(id, Vote::approve(who("B"))).await.unwrap();
    assert_eq!(receipt.instance.current_step_index, 1);
}

#[tokio::test]
async fn template_status_transitions() {
    let (engine, _) = engine();
    let id = engine.create_template(purchase_draft()).await.unwrap().id;

    let first = engine.publish_template(id).await.unwrap();
    let again = engine.publish_template(id).await.unwrap();
    assert_eq!(first, again);
    assert!(again.steps.iter().all(|s| s.status == TemplateStatus::Published));

    engine.disable_template(id).await.unwrap();
    let err = engine.publish_template(id).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Template(WorkflowError::InvalidTransition { .. })
    ));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(
        engine.disable_template(id).await.unwrap().status,
        TemplateStatus::Disabled
    );
}

#[tokio::test]
async fn invalid_templates_report_every_problem() {
    let (engine, _) = engine();
    let draft = TemplateDraft {
        name: "  ".into(),
        version: String::new(),
        description: String::new(),
        steps: vec![StepDraft::new("", Vec::new())],
    };
    let err = engine.create_template(draft).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    match err {
        EngineError::Validation(errors) => assert_eq!(errors.len(), 3),
        other => panic!("expected Validation, got {other:?}"),
    }
    assert!(engine.list_templates(Page::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_only_while_draft() {
    let (engine, clock) = engine();
    let created = engine.create_template(purchase_draft()).await.unwrap();

    clock.advance(Duration::seconds(30));
    let revised = TemplateBuilder::new("purchase v2")
        .step("ceo", ids(&["Z"]))
        .build()
        .unwrap();
    let updated = engine.update_template(created.id, revised.clone()).await.unwrap();
    assert_eq!(updated.name, "purchase v2");
    assert_eq!(updated.step_count(), 1);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.updated_at, clock.now());

    engine.publish_template(created.id).await.unwrap();
    let err = engine.update_template(created.id, revised).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    let err = engine
        .update_template(created.id, TemplateDraft::new("empty"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn delete_template_only_while_draft() {
    let (engine, _) = engine();
    let draft = engine.create_template(purchase_draft()).await.unwrap();
    let live = published(&engine).await;

    engine.delete_template(draft.id).await.unwrap();
    assert_eq!(
        engine.get_template(draft.id).await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
    let err = engine.delete_template(live).await.unwrap_err();
    assert!(matches!(err, EngineError::TemplateNotDeletable { .. }));
}

#[tokio::test]
async fn delete_instance_only_while_active() {
    let (engine, _) = engine();
    let template_id = published(&engine).await;
    let active = engine.create_instance(template_id).await.unwrap().id;
    let finished = engine.create_instance(template_id).await.unwrap().id;
    engine.record_vote(finished, Vote::reject(who("A"))).await.unwrap();
    engine.record_vote(finished, Vote::reject(who("B"))).await.unwrap();

    engine.delete_instance(active).await.unwrap();
    assert_eq!(
        engine.delete_instance(active).await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
    let err = engine.delete_instance(finished).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::InstanceDone {
            status: InstanceStatus::Rejected,
            ..
        }
    ));
}

#[tokio::test]
async fn listings_are_ordered_by_id() {
    let (engine, _) = engine();
    let first = published(&engine).await;
    let second = published(&engine).await;
    engine.create_template(purchase_draft()).await.unwrap();

    let page: Vec<u64> = engine
        .list_templates(Page::new(1, 5))
        .await
        .unwrap()
        .iter()
        .map(|t| t.id.get())
        .collect();
    assert_eq!(page, vec![2, 3]);

    for template_id in [first, second, first] {
        engine.create_instance(template_id).await.unwrap();
    }
    let all: Vec<InstanceId> = engine
        .list_instances()
        .await
        .unwrap()
        .iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(all, vec![InstanceId::new(1), InstanceId::new(2), InstanceId::new(3)]);

    let of_first: Vec<u64> = engine
        .list_instances_for_template(first)
        .await
        .unwrap()
        .iter()
        .map(|i| i.id.get())
        .collect();
    assert_eq!(of_first, vec![1, 3]);
    assert_eq!(
        engine
            .list_instances_for_template(TemplateId::new(42))
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::NotFound
    );
}

#[tokio::test]
async fn timestamps_come_from_clock() {
    let (engine, clock) = engine();
    let template_id = published(&engine).await;
    let instance = engine.create_instance(template_id).await.unwrap();
    assert_eq!(instance.created_at, clock.now());

    clock.advance(Duration::minutes(5));
    let receipt = engine
        .record_vote(instance.id, Vote::approve(who("A")))
        .await
        .unwrap();
    assert_eq!(receipt.instance.created_at, instance.created_at);
    assert_eq!(receipt.instance.updated_at, clock.now());
}
