//! Session lifecycle state machine.
//!
//! `SessionController` owns the active timeline and active-session
//! identity, decides when to create vs. update the persisted record,
//! sequences store and gateway calls, and reconciles local state when
//! either fails mid-flight.
//!
//! Submit flow: the user's turn is appended optimistically before any
//! network call. A session with no persisted id is created on first
//! submit; if that create fails the optimistic turn is rolled back and
//! replaced by a local-only error turn, and the gateway is never called.
//! Once a session id exists, persistence failures are non-fatal: the
//! in-memory timeline stays authoritative and a later update can still
//! capture the eventual correct state.

use tracing::{info, warn};

use synapse_types::error::{SessionError, StoreError};
use synapse_types::event::SessionEvent;
use synapse_types::session::{OwnerId, PromptSession, SessionId};
use synapse_types::turn::Turn;

use crate::completion::gateway::CompletionGateway;
use crate::context::assembler;
use crate::event::bus::EventBus;
use crate::session::cache::SessionListCache;
use crate::session::store::SessionStore;
use crate::session::title::derive_title;

/// Result of a submit that got past its preconditions.
///
/// Both variants carry a turn that has already been appended to the
/// timeline: the model's reply, or the error turn that took its place.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Reply(Turn),
    Failed(Turn),
}

/// Owns the active conversation state and sequences all store and
/// gateway interaction for it.
///
/// Generic over `SessionStore` and `CompletionGateway` so the state
/// machine is testable without a database or network.
pub struct SessionController<S: SessionStore, G: CompletionGateway> {
    store: S,
    gateway: G,
    events: EventBus,
    cache: SessionListCache,
    timeline: Vec<Turn>,
    active_session: Option<SessionId>,
    owner: Option<OwnerId>,
    /// Single-in-flight-submit guard: at most one user turn may be in
    /// flight per session; a concurrent request is rejected, not queued.
    pending: bool,
}

impl<S: SessionStore, G: CompletionGateway> SessionController<S, G> {
    /// Create a controller with no active identity or session.
    pub fn new(store: S, gateway: G, events: EventBus) -> Self {
        Self {
            store,
            gateway,
            events,
            cache: SessionListCache::new(),
            timeline: Vec::new(),
            active_session: None,
            owner: None,
            pending: false,
        }
    }

    /// The active timeline, oldest turn first.
    pub fn timeline(&self) -> &[Turn] {
        &self.timeline
    }

    /// The persisted id of the active session, if it has one yet.
    pub fn active_session_id(&self) -> Option<&SessionId> {
        self.active_session.as_ref()
    }

    /// The signed-in identity, if any.
    pub fn owner(&self) -> Option<&OwnerId> {
        self.owner.as_ref()
    }

    /// Whether a submit is currently in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The cached session list projection, newest first.
    pub fn sessions(&self) -> &[PromptSession] {
        self.cache.entries()
    }

    // --- Identity transitions ---

    /// Handle a sign-in: reset active state, adopt the identity, and
    /// refresh the session list.
    pub async fn sign_in(&mut self, owner: OwnerId) -> Result<(), SessionError> {
        self.start_new_session();
        self.owner = Some(owner.clone());
        self.refresh_cache(&owner).await?;
        info!(owner_id = %owner, sessions = self.cache.len(), "Signed in");
        self.events.publish(SessionEvent::SignedIn { owner_id: owner });
        Ok(())
    }

    /// Handle a sign-out: clear active state and the cached list.
    pub fn sign_out(&mut self) {
        self.start_new_session();
        self.owner = None;
        self.cache.clear();
        self.events.publish(SessionEvent::SignedOut);
    }

    // --- Session lifecycle ---

    /// Reset to an unpersisted empty conversation. No store interaction.
    pub fn start_new_session(&mut self) {
        self.timeline.clear();
        self.active_session = None;
    }

    /// Replace the active timeline with a cached session's turns.
    ///
    /// Looks the session up in the local list cache only; an id absent
    /// from the cache is `SessionError::NotFound` and state is unchanged.
    pub fn load_session(&mut self, session_id: &SessionId) -> Result<(), SessionError> {
        if self.pending {
            return Err(SessionError::Busy);
        }
        let session = self
            .cache
            .get(session_id)
            .cloned()
            .ok_or(SessionError::NotFound)?;
        self.timeline = session.turns;
        self.active_session = Some(session.id);
        Ok(())
    }

    /// Delete a session from the store, then from the local projection.
    ///
    /// The store delete must succeed before anything local changes; on
    /// failure the error propagates and state is untouched. If the
    /// deleted session was active, the timeline resets as in
    /// `start_new_session`.
    pub async fn delete_session(&mut self, session_id: &SessionId) -> Result<(), SessionError> {
        if self.pending {
            return Err(SessionError::Busy);
        }
        let owner = self.owner.clone().ok_or(SessionError::NoIdentity)?;

        self.store.delete_session(session_id, &owner).await?;
        self.cache.remove(session_id);
        info!(session_id = %session_id, "Session deleted");

        if self.active_session.as_ref() == Some(session_id) {
            self.start_new_session();
        }
        Ok(())
    }

    /// Explicitly refetch the session list from the store.
    pub async fn refresh_sessions(&mut self) -> Result<(), SessionError> {
        let owner = self.owner.clone().ok_or(SessionError::NoIdentity)?;
        self.refresh_cache(&owner).await?;
        Ok(())
    }

    // --- Submit ---

    /// Submit a user turn: optimistic append, persist, generate, persist.
    ///
    /// Preconditions (`Err`): non-empty text after trimming, a signed-in
    /// identity, and no submit already in flight. Past those, every
    /// failure resolves to `Ok(SubmitOutcome::Failed(..))` with an error
    /// turn in the timeline; nothing is retried automatically.
    pub async fn submit_turn(&mut self, text: &str) -> Result<SubmitOutcome, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyInput);
        }
        let owner = self.owner.clone().ok_or(SessionError::NoIdentity)?;
        if self.pending {
            return Err(SessionError::Busy);
        }

        self.pending = true;
        let outcome = self.run_submit(&owner, text).await;
        self.pending = false;
        Ok(outcome)
    }

    /// The submit sequence proper. Infallible by construction: every
    /// failure path appends an error turn and returns an outcome.
    async fn run_submit(&mut self, owner: &OwnerId, text: &str) -> SubmitOutcome {
        let user_turn = Turn::user_input(text.to_string());
        self.timeline.push(user_turn);

        let session_id = match self.active_session.clone() {
            // First turn of an unpersisted conversation: the create must
            // succeed before anything else, because without a session id
            // there is nowhere durable to record the conversation.
            None => {
                let title = derive_title(text);
                match self
                    .store
                    .create_session(owner, &self.timeline, &title)
                    .await
                {
                    Ok(id) => {
                        info!(session_id = %id, title = %title, "Session created");
                        self.active_session = Some(id.clone());
                        if let Err(e) = self.refresh_cache(owner).await {
                            warn!(error = %e, "Session list refresh after create failed");
                        }
                        id
                    }
                    Err(e) => {
                        warn!(error = %e, "Session create failed; rolling back user turn");
                        self.timeline.pop();
                        let error_turn = Turn::error(
                            "Error: Could not save your message. Please try starting a new chat."
                                .to_string(),
                        );
                        self.timeline.push(error_turn.clone());
                        return SubmitOutcome::Failed(error_turn);
                    }
                }
            }
            // Already persisted: an update hiccup must not block the
            // generation attempt.
            Some(id) => {
                if let Err(e) = self.store.update_turns(&id, owner, &self.timeline).await {
                    warn!(session_id = %id, error = %e, "Persisting user turn failed; continuing");
                }
                id
            }
        };

        // Context is everything before the just-appended user turn.
        let context = assembler::assemble(&self.timeline[..self.timeline.len() - 1]);

        match self.gateway.generate(text, &context).await {
            Ok(reply) => {
                self.timeline.push(reply.clone());
                if let Err(e) = self
                    .store
                    .update_turns(&session_id, owner, &self.timeline)
                    .await
                {
                    warn!(session_id = %session_id, error = %e, "Persisting model reply failed");
                }
                self.events.publish(SessionEvent::ReplyReceived {
                    session_id: session_id.clone(),
                });
                SubmitOutcome::Reply(reply)
            }
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Completion failed");
                let error_turn = Turn::error(format!("Oops! Something went wrong: {e}"));
                self.timeline.push(error_turn.clone());
                // Persist the error turn so the failure is still visible
                // when the session is reloaded.
                if let Err(persist_err) = self
                    .store
                    .update_turns(&session_id, owner, &self.timeline)
                    .await
                {
                    warn!(session_id = %session_id, error = %persist_err, "Persisting error turn failed");
                }
                SubmitOutcome::Failed(error_turn)
            }
        }
    }

    async fn refresh_cache(&mut self, owner: &OwnerId) -> Result<(), StoreError> {
        let sessions = self.store.list_by_owner(owner).await?;
        self.cache.replace(sessions);
        Ok(())
    }
}
