//! The recipient's journey as an explicit state machine.
//!
//! `ProposalFlow::apply` is pure: it moves the state and returns the effects
//! the caller must run (celebration bursts, the delayed hop to the activity
//! picker, the selection write). `session::ProposalSession` runs them.

use std::time::Duration;

use tracing::debug;

use valentine_types::api::SelectionDraft;
use valentine_types::models::{Activity, find_activity};

use crate::evasion::Position;

/// Time spent on the "yay" screen before the activity picker appears.
pub const ADVANCE_DELAY: Duration = Duration::from_millis(4000);

/// Offsets of the three bursts fired on acceptance.
pub const ACCEPT_BURSTS: [Duration; 3] = [
    Duration::ZERO,
    Duration::from_millis(200),
    Duration::from_millis(400),
];

pub const SAVED_MESSAGE: &str = "Saved successfully.";
pub const SAVE_FAILED_MESSAGE: &str = "Saved visually, but logging failed.";

/// Label thresholds for the "No" button, by evasion attempts. The last tier
/// covers every count at or above its threshold.
const NO_LABELS: &[(u32, &str)] = &[
    (0, "No 🙅"),
    (1, "No way! 🏃‍♂️"),
    (3, "Still no! 😤"),
    (5, "Nope! 😊"),
    (7, "Are you sure? 🥺"),
    (8, "Nice try! 🤪"),
];

pub fn no_button_label(attempts: u32) -> &'static str {
    NO_LABELS
        .iter()
        .rev()
        .find(|(threshold, _)| attempts >= *threshold)
        .map(|(_, label)| *label)
        .unwrap_or(NO_LABELS[0].1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Pending,
    Saved,
    Failed(String),
}

impl SaveStatus {
    /// Inline status line under the confirmation.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Pending => None,
            Self::Saved => Some(SAVED_MESSAGE),
            Self::Failed(_) => Some(SAVE_FAILED_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProposalState {
    Proposing { attempts: u32, no_position: Position },
    Accepted,
    ChoosingActivity,
    Confirmed { activity: &'static Activity, save_status: SaveStatus },
}

impl ProposalState {
    pub fn initial() -> Self {
        Self::Proposing {
            attempts: 0,
            no_position: Position::INITIAL,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Proposing { .. } => "proposing",
            Self::Accepted => "accepted",
            Self::ChoosingActivity => "choosing_activity",
            Self::Confirmed { .. } => "confirmed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProposalEvent {
    Accept,
    /// The pointer reached the "No" button; it moves to the given spot.
    Evade(Position),
    /// Fired by the timer scheduled on acceptance.
    AdvanceToActivities,
    Pick(i64),
    PersistSucceeded,
    PersistFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    /// Full-size burst, three of them on "Yes".
    Celebration,
    /// Smaller burst when an activity is picked.
    Selection,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Burst { kind: BurstKind, delay: Duration },
    ScheduleAdvance(Duration),
    Persist(SelectionDraft),
}

/// Who the invite is for, attached to the selection write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteContext {
    pub recipient_name: Option<String>,
    pub host_email: Option<String>,
    pub client_hint: String,
}

#[derive(Debug, Clone)]
pub struct ProposalFlow {
    state: ProposalState,
    context: InviteContext,
}

impl ProposalFlow {
    pub fn new(context: InviteContext) -> Self {
        Self {
            state: ProposalState::initial(),
            context,
        }
    }

    pub fn state(&self) -> &ProposalState {
        &self.state
    }

    pub fn context(&self) -> &InviteContext {
        &self.context
    }

    pub fn display_name(&self) -> &str {
        self.context.recipient_name.as_deref().unwrap_or("sweetheart")
    }

    /// Current "No" button label; the default label once past proposing.
    pub fn no_label(&self) -> &'static str {
        match &self.state {
            ProposalState::Proposing { attempts, .. } => no_button_label(*attempts),
            _ => no_button_label(0),
        }
    }

    /// Apply one event. Events that make no sense in the current state are
    /// dropped: nothing changes and no effects are returned.
    pub fn apply(&mut self, event: ProposalEvent) -> Vec<Effect> {
        let (next, effects) = match (&self.state, event) {
            (ProposalState::Proposing { .. }, ProposalEvent::Accept) => {
                let mut effects: Vec<Effect> = ACCEPT_BURSTS
                    .iter()
                    .map(|delay| Effect::Burst {
                        kind: BurstKind::Celebration,
                        delay: *delay,
                    })
                    .collect();
                effects.push(Effect::ScheduleAdvance(ADVANCE_DELAY));
                (ProposalState::Accepted, effects)
            }
            (ProposalState::Proposing { attempts, .. }, ProposalEvent::Evade(to)) => (
                ProposalState::Proposing {
                    attempts: attempts.saturating_add(1),
                    no_position: to,
                },
                Vec::new(),
            ),
            (ProposalState::Accepted, ProposalEvent::AdvanceToActivities) => {
                (ProposalState::ChoosingActivity, Vec::new())
            }
            (ProposalState::ChoosingActivity, ProposalEvent::Pick(id)) => {
                let Some(activity) = find_activity(id) else {
                    debug!("Ignoring pick of unknown activity {}", id);
                    return Vec::new();
                };
                let draft = SelectionDraft::from_activity(
                    activity,
                    self.context.client_hint.clone(),
                    self.context.recipient_name.clone(),
                    self.context.host_email.clone(),
                );
                (
                    ProposalState::Confirmed {
                        activity,
                        save_status: SaveStatus::Pending,
                    },
                    vec![
                        Effect::Burst {
                            kind: BurstKind::Selection,
                            delay: Duration::ZERO,
                        },
                        Effect::Persist(draft),
                    ],
                )
            }
            (ProposalState::Confirmed { activity, .. }, ProposalEvent::PersistSucceeded) => (
                ProposalState::Confirmed {
                    activity: *activity,
                    save_status: SaveStatus::Saved,
                },
                Vec::new(),
            ),
            (ProposalState::Confirmed { activity, .. }, ProposalEvent::PersistFailed(reason)) => (
                ProposalState::Confirmed {
                    activity: *activity,
                    save_status: SaveStatus::Failed(reason),
                },
                Vec::new(),
            ),
            (state, event) => {
                debug!("Ignoring {:?} while {}", event, state.name());
                return Vec::new();
            }
        };

        self.state = next;
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow() -> ProposalFlow {
        ProposalFlow::new(InviteContext {
            recipient_name: Some("Robin".into()),
            host_email: Some("host@example.com".into()),
            client_hint: "fp@love.example".into(),
        })
    }

    #[test]
    fn labels_step_through_six_tiers() {
        let labels: Vec<&str> = [0, 1, 2, 3, 4, 5, 7, 8]
            .iter()
            .map(|n| no_button_label(*n))
            .collect();
        assert_eq!(
            labels,
            vec![
                "No 🙅",
                "No way! 🏃‍♂️",
                "No way! 🏃‍♂️",
                "Still no! 😤",
                "Still no! 😤",
                "Nope! 😊",
                "Are you sure? 🥺",
                "Nice try! 🤪",
            ]
        );

        let mut tiers = labels.clone();
        tiers.dedup();
        assert_eq!(tiers.len(), 6);

        assert_eq!(no_button_label(6), "Nope! 😊");
        assert_eq!(no_button_label(9), "Nice try! 🤪");
        assert_eq!(no_button_label(u32::MAX), "Nice try! 🤪");
    }

    #[test]
    fn evading_counts_attempts_and_moves() {
        let mut flow = flow();
        let to = Position { x: -250.0, y: 40.0 };
        assert!(flow.apply(ProposalEvent::Evade(to)).is_empty());
        flow.apply(ProposalEvent::Evade(to));
        flow.apply(ProposalEvent::Evade(to));

        assert_eq!(
            flow.state(),
            &ProposalState::Proposing { attempts: 3, no_position: to }
        );
        assert_eq!(flow.no_label(), "Still no! 😤");
    }

    #[test]
    fn accept_schedules_bursts_and_advance() {
        let mut flow = flow();
        let effects = flow.apply(ProposalEvent::Accept);

        assert_eq!(flow.state(), &ProposalState::Accepted);
        assert_eq!(
            effects,
            vec![
                Effect::Burst { kind: BurstKind::Celebration, delay: Duration::ZERO },
                Effect::Burst { kind: BurstKind::Celebration, delay: Duration::from_millis(200) },
                Effect::Burst { kind: BurstKind::Celebration, delay: Duration::from_millis(400) },
                Effect::ScheduleAdvance(Duration::from_millis(4000)),
            ]
        );
    }

    #[test]
    fn pick_before_acceptance_is_ignored() {
        let mut flow = flow();
        assert!(flow.apply(ProposalEvent::Pick(3)).is_empty());
        assert_eq!(flow.state(), &ProposalState::initial());

        flow.apply(ProposalEvent::Accept);
        assert!(flow.apply(ProposalEvent::Pick(3)).is_empty());
        assert_eq!(flow.state(), &ProposalState::Accepted);
    }

    #[test]
    fn pick_emits_one_persist_with_context() {
        let mut flow = flow();
        flow.apply(ProposalEvent::Accept);
        flow.apply(ProposalEvent::AdvanceToActivities);
        let effects = flow.apply(ProposalEvent::Pick(3));

        let persists: Vec<&SelectionDraft> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::Persist(draft) => Some(draft),
                _ => None,
            })
            .collect();
        assert_eq!(persists.len(), 1);
        assert_eq!(persists[0].activity_id, 3);
        assert_eq!(persists[0].recipient_name.as_deref(), Some("Robin"));
        assert_eq!(persists[0].client_hint.as_deref(), Some("fp@love.example"));
        assert_eq!(
            effects[0],
            Effect::Burst { kind: BurstKind::Selection, delay: Duration::ZERO }
        );

        match flow.state() {
            ProposalState::Confirmed { activity, save_status } => {
                assert_eq!(activity.id, 3);
                assert_eq!(save_status, &SaveStatus::Pending);
            }
            other => panic!("unexpected state {other:?}"),
        }

        // Terminal: a second pick does nothing.
        assert!(flow.apply(ProposalEvent::Pick(1)).is_empty());
    }

    #[test]
    fn unknown_activity_is_ignored() {
        let mut flow = flow();
        flow.apply(ProposalEvent::Accept);
        flow.apply(ProposalEvent::AdvanceToActivities);
        assert!(flow.apply(ProposalEvent::Pick(99)).is_empty());
        assert_eq!(flow.state(), &ProposalState::ChoosingActivity);
    }

    #[test]
    fn no_way_back() {
        let mut flow = flow();
        flow.apply(ProposalEvent::Accept);
        flow.apply(ProposalEvent::Evade(Position { x: 300.0, y: 0.0 }));
        flow.apply(ProposalEvent::Accept);
        assert_eq!(flow.state(), &ProposalState::Accepted);
    }

    #[test]
    fn persistence_outcome_only_touches_status() {
        let mut flow = flow();
        flow.apply(ProposalEvent::Accept);
        flow.apply(ProposalEvent::AdvanceToActivities);
        flow.apply(ProposalEvent::Pick(2));
        flow.apply(ProposalEvent::PersistFailed("offline".into()));

        match flow.state() {
            ProposalState::Confirmed { activity, save_status } => {
                assert_eq!(activity.id, 2);
                assert_eq!(save_status.message(), Some(SAVE_FAILED_MESSAGE));
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn display_name_falls_back() {
        assert_eq!(flow().display_name(), "Robin");
        assert_eq!(ProposalFlow::new(InviteContext::default()).display_name(), "sweetheart");
    }
}
