//! Property tests for the quorum aggregator and vote application.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use proptest::prelude::*;
use quorum_core::{ApproverId, InstanceId, TemplateId};
use quorum_execution::{Outcome, Tally, Vote, WorkflowInstance, decide};
use quorum_workflow::{TemplateBuilder, WorkflowTemplate};

fn approver(i: usize) -> ApproverId {
    ApproverId::new(format!("approver-{i}")).unwrap()
}

/// An approver set of `size` and a list of (approver index, vote) ballots.
fn ballots() -> impl Strategy<Value = (usize, Vec<(usize, bool)>)> {
    (1usize..9).prop_flat_map(|size| {
        (
            Just(size),
            prop::collection::vec((0..size, any::<bool>()), 0..16),
        )
    })
}

fn single_step(size: usize) -> WorkflowTemplate {
    let draft = TemplateBuilder::new("prop")
        .step("only", (0..size).map(approver))
        .build()
        .unwrap();
    let mut template = WorkflowTemplate::from_draft(TemplateId::new(1), draft, Utc::now()).unwrap();
    template.publish(Utc::now()).unwrap();
    template
}

proptest! {
    #[test]
    fn outcome_ignores_vote_order((size, cast) in ballots()) {
        let approvers: BTreeSet<_> = (0..size).map(approver).collect();
        let forward: BTreeMap<_, _> = cast.iter().map(|&(i, v)| (approver(i), v)).collect();

        // last write wins, so replaying the final map in reverse yields the same map
        let mut reversed = BTreeMap::new();
        for (who, vote) in forward.iter().rev() {
            reversed.insert(who.clone(), *vote);
        }
        prop_assert_eq!(decide(&approvers, &forward), decide(&approvers, &reversed));
    }

    #[test]
    fn majorities_are_exclusive((size, cast) in ballots()) {
        let approvers: BTreeSet<_> = (0..size).map(approver).collect();
        let approvals: BTreeMap<_, _> = cast.iter().map(|&(i, v)| (approver(i), v)).collect();
        let tally = Tally::count(&approvers, &approvals);
        let half = tally.eligible / 2;
        prop_assert!(!(tally.approve > half && tally.reject > half));
        prop_assert!(tally.approve + tally.reject <= tally.eligible);
    }

    #[test]
    fn repeat_vote_is_idempotent((size, cast) in ballots(), pick in any::<prop::sample::Index>(), approve in any::<bool>()) {
        let template = single_step(size);
        let mut instance = WorkflowInstance::new(InstanceId::new(1), TemplateId::new(1), Utc::now());
        for &(i, v) in &cast {
            let vote = Vote { approver: approver(i), approve: v, reason: None };
            if instance.record_vote(&template, &vote, Utc::now()).is_err() {
                break;
            }
        }
        prop_assume!(!instance.done);

        let vote = Vote { approver: approver(pick.index(size)), approve, reason: None };
        let mut once = instance.clone();
        let first = once.record_vote(&template, &vote, Utc::now());
        prop_assume!(first.is_ok() && !once.done);

        let mut twice = once.clone();
        twice.record_vote(&template, &vote, Utc::now()).unwrap();
        prop_assert_eq!(&once.step_instances[0].approvals, &twice.step_instances[0].approvals);
    }

    #[test]
    fn decided_step_marks_record_finished((size, cast) in ballots()) {
        let template = single_step(size);
        let mut instance = WorkflowInstance::new(InstanceId::new(1), TemplateId::new(1), Utc::now());
        let mut last = Outcome::Pending;
        for &(i, v) in &cast {
            let vote = Vote { approver: approver(i), approve: v, reason: None };
            match instance.record_vote(&template, &vote, Utc::now()) {
                Ok(outcome) => last = outcome,
                Err(_) => break,
            }
        }
        prop_assert_eq!(instance.done, last.is_decided());
        if let Some(record) = instance.step_instances.first() {
            prop_assert_eq!(record.finished, last.is_decided());
        }
    }
}
