use std::sync::{Arc, Mutex, PoisonError};

use rand::Rng;
use tracing::{error, info};

use crate::evasion::{self, Viewport};
use crate::flow::{BurstKind, Effect, InviteContext, ProposalEvent, ProposalFlow, ProposalState};
use crate::store::SelectionStore;

/// Rendering surface for the recipient page. Receives every new state and
/// fires confetti when asked. Implementations must not block.
pub trait Renderer: Send + Sync + 'static {
    fn render(&self, state: &ProposalState);
    fn burst(&self, kind: BurstKind);
}

/// Runs a `ProposalFlow` on the tokio runtime: timers for the celebration
/// bursts and the auto-advance, and the selection write on pick.
pub struct ProposalSession<S, R> {
    flow: Arc<Mutex<ProposalFlow>>,
    store: Arc<S>,
    renderer: Arc<R>,
}

impl<S, R> Clone for ProposalSession<S, R> {
    fn clone(&self) -> Self {
        Self {
            flow: self.flow.clone(),
            store: self.store.clone(),
            renderer: self.renderer.clone(),
        }
    }
}

impl<S: SelectionStore, R: Renderer> ProposalSession<S, R> {
    pub fn new(context: InviteContext, store: Arc<S>, renderer: Arc<R>) -> Self {
        let flow = ProposalFlow::new(context);
        renderer.render(flow.state());
        Self {
            flow: Arc::new(Mutex::new(flow)),
            store,
            renderer,
        }
    }

    pub fn state(&self) -> ProposalState {
        self.lock().state().clone()
    }

    pub fn no_label(&self) -> &'static str {
        self.lock().no_label()
    }

    /// "Yes" clicked.
    pub async fn accept(&self) {
        let effects = self.dispatch(ProposalEvent::Accept);
        self.run(effects).await;
    }

    /// Pointer reached the "No" button. Returns the new attempt count.
    pub fn evade<G: Rng>(&self, viewport: Viewport, rng: &mut G) -> u32 {
        let to = evasion::next_position(viewport, rng);
        self.dispatch(ProposalEvent::Evade(to));
        match self.state() {
            ProposalState::Proposing { attempts, .. } => attempts,
            _ => 0,
        }
    }

    /// Activity tile clicked. Returns once the write attempt has finished;
    /// the state is already `Confirmed` before the write starts.
    pub async fn pick(&self, activity_id: i64) {
        let effects = self.dispatch(ProposalEvent::Pick(activity_id));
        self.run(effects).await;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProposalFlow> {
        self.flow.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self, event: ProposalEvent) -> Vec<Effect> {
        let mut flow = self.lock();
        let effects = flow.apply(event);
        self.renderer.render(flow.state());
        effects
    }

    async fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Burst { kind, delay } if delay.is_zero() => self.renderer.burst(kind),
                Effect::Burst { kind, delay } => {
                    let renderer = self.renderer.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        renderer.burst(kind);
                    });
                }
                Effect::ScheduleAdvance(delay) => {
                    let session = self.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        session.dispatch(ProposalEvent::AdvanceToActivities);
                    });
                }
                Effect::Persist(draft) => match self.store.append(&draft).await {
                    Ok(record) => {
                        info!("Selection {} saved (activity {})", record.id, record.activity_id);
                        self.dispatch(ProposalEvent::PersistSucceeded);
                    }
                    Err(e) => {
                        error!("Failed to persist selection: {}", e);
                        self.dispatch(ProposalEvent::PersistFailed(e.to_string()));
                    }
                },
            }
        }
    }
}
