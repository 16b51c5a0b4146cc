//! Frame-scheduled draw plans.
//!
//! Every redraw becomes a [`DrawPlan`]: an ordered list of steps, each released after a delay
//! measured from the first frame that sees the plan. A window has at most one pending plan and a
//! newer plan replaces it, so a superseded animation can never run its trailing "transition off"
//! step over a newer one.

use std::{
    collections::{BTreeMap, VecDeque},
    time::Duration,
};

use leptos::logging;

use crate::{model::InstanceId, surface::SurfaceCommand};

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationStep {
    /// Earliest release time, relative to the plan's first frame.
    pub delay: Duration,
    pub commands: Vec<SurfaceCommand>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawPlan {
    steps: Vec<AnimationStep>,
}

impl DrawPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step. Steps are released in order, one per frame at most.
    pub fn then(mut self, delay: Duration, commands: Vec<SurfaceCommand>) -> Self {
        self.steps.push(AnimationStep { delay, commands });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PendingPlan {
    first_frame: Option<Duration>,
    steps: VecDeque<AnimationStep>,
}

/// Pending draw plans keyed by instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameScheduler {
    pending: BTreeMap<InstanceId, PendingPlan>,
}

impl FrameScheduler {
    /// Queues `plan` for `instance_id`, replacing any plan still pending for it.
    pub fn schedule(&mut self, instance_id: InstanceId, plan: DrawPlan) {
        if plan.is_empty() {
            self.cancel(instance_id);
            return;
        }
        let replaced = self.pending.insert(
            instance_id,
            PendingPlan {
                first_frame: None,
                steps: plan.steps.into(),
            },
        );
        if replaced.is_some() {
            logging::debug_warn!("superseded pending draw for {instance_id}");
        }
    }

    /// Drops the pending plan for `instance_id`. Returns whether one existed.
    pub fn cancel(&mut self, instance_id: InstanceId) -> bool {
        self.pending.remove(&instance_id).is_some()
    }

    pub fn is_pending(&self, instance_id: InstanceId) -> bool {
        self.pending.contains_key(&instance_id)
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Releases due steps for the frame at `now`.
    ///
    /// At most one step per instance is released per frame, so writes split across steps always
    /// land in separate frames. Finished plans are dropped.
    pub fn tick(&mut self, now: Duration) -> Vec<(InstanceId, Vec<SurfaceCommand>)> {
        let mut released = Vec::new();
        for (instance_id, plan) in self.pending.iter_mut() {
            let first_frame = *plan.first_frame.get_or_insert(now);
            let elapsed = now.saturating_sub(first_frame);
            let due = plan
                .steps
                .front()
                .map(|step| step.delay <= elapsed)
                .unwrap_or(false);
            if due {
                if let Some(step) = plan.steps.pop_front() {
                    released.push((*instance_id, step.commands));
                }
            }
        }
        self.pending.retain(|_, plan| !plan.steps.is_empty());
        released
    }
}
