//! Application shell: session gating and planner state.
//!
//! The app is a thin consumer of the backend. Session transitions and store
//! snapshots arrive over channels drained once per frame, so the UI only
//! ever reads its own cached copy of the collections and mutates through
//! commands.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use anyhow::Result;
use eframe::egui;
use log::info;
use shared::{EntryDraft, EntryId, EntryKind, Totals};

use backend::{
    aggregate_snapshot, AppConfig, BudgetError, EntryService, LocalStore, MemoryAuthProvider,
    MemoryDocumentStore, RemoteStore, SessionManager, SessionState, Snapshot, StoreMode,
    SubscriptionHandle,
};

use crate::ui;
use crate::ui::auth_screen::{AuthAction, AuthForm};
use crate::ui::forms::EntryForm;

/// A command the planner can issue, kept cloneable so a failed one can be
/// offered for retry.
#[derive(Clone)]
pub enum Command {
    Add(EntryDraft),
    Delete(EntryKind, EntryId),
}

/// A user-visible failure notice. Store failures carry the failed command
/// for retry; everything else is dismiss-only.
pub struct Notice {
    pub message: String,
    pub retry: Option<Command>,
}

/// State of the signed-in (or local-mode) planner view. Dropping it drops
/// the store subscription with it.
pub struct PlannerState {
    service: EntryService,
    pub snapshot: Snapshot,
    pub totals: Totals,
    snapshot_rx: Receiver<Snapshot>,
    _snapshot_sub: SubscriptionHandle,
    pub income_form: EntryForm,
    pub expense_form: EntryForm,
    pub notice: Option<Notice>,
    pub email: Option<String>,
}

impl PlannerState {
    fn open(service: EntryService, email: Option<String>) -> Self {
        let (tx, rx) = mpsc::channel();
        let subscription = service.subscribe(Box::new(move |snapshot| {
            let _ = tx.send(snapshot.clone());
        }));

        let mut planner = PlannerState {
            service,
            snapshot: Snapshot::default(),
            totals: Totals::default(),
            snapshot_rx: rx,
            _snapshot_sub: subscription,
            income_form: EntryForm::new(),
            expense_form: EntryForm::new(),
            notice: None,
            email,
        };
        // The subscription delivers the current snapshot synchronously.
        planner.drain_snapshots();
        planner
    }

    /// Pull any pending snapshots off the channel; the newest wins. Totals
    /// are recomputed from scratch on every change.
    pub fn drain_snapshots(&mut self) {
        let mut latest = None;
        while let Ok(snapshot) = self.snapshot_rx.try_recv() {
            latest = Some(snapshot);
        }
        if let Some(mut snapshot) = latest {
            snapshot.sort_for_display();
            self.totals = aggregate_snapshot(&snapshot);
            self.snapshot = snapshot;
        }
    }

    /// Execute a command; on store failure, surface a retryable notice.
    pub fn apply(&mut self, command: Command) {
        let result = match &command {
            Command::Add(draft) => self.service.add_item(draft.clone()).map(|_| ()),
            Command::Delete(kind, id) => self.service.delete_item(*kind, id),
        };
        if let Err(err) = result {
            let retry = match &err {
                BudgetError::Store(_) => Some(command),
                _ => None,
            };
            self.notice = Some(Notice {
                message: err.to_string(),
                retry,
            });
        }
        self.drain_snapshots();
    }
}

/// Top-level application: either a bare planner (Local mode) or a session
/// machine gating one (Remote mode).
pub struct BudgetApp {
    session: Option<SessionManager>,
    session_rx: Option<Receiver<SessionState>>,
    _session_sub: Option<SubscriptionHandle>,
    documents: Option<Arc<MemoryDocumentStore>>,
    planner: Option<PlannerState>,
    auth_form: AuthForm,
}

impl BudgetApp {
    pub fn new(config: &AppConfig) -> Result<Self> {
        match config.mode {
            StoreMode::Local => {
                let dir = config.resolved_data_dir().join("local-store");
                info!("opening local store at {}", dir.display());
                let store = Arc::new(LocalStore::new(dir)?);
                let planner = PlannerState::open(EntryService::new(store), None);
                Ok(BudgetApp {
                    session: None,
                    session_rx: None,
                    _session_sub: None,
                    documents: None,
                    planner: Some(planner),
                    auth_form: AuthForm::default(),
                })
            }
            StoreMode::Remote => {
                let provider = Arc::new(MemoryAuthProvider::new());
                let documents = Arc::new(MemoryDocumentStore::new());
                let session = SessionManager::new(provider);

                let (tx, rx) = mpsc::channel();
                let session_sub = session.on_change(Box::new(move |state| {
                    let _ = tx.send(state.clone());
                }));
                // Listeners are in place; resolve the initial Unknown state.
                session.resume();

                Ok(BudgetApp {
                    session: Some(session),
                    session_rx: Some(rx),
                    _session_sub: Some(session_sub),
                    documents: Some(documents),
                    planner: None,
                    auth_form: AuthForm::default(),
                })
            }
        }
    }

    fn handle_session_transition(&mut self, state: SessionState) {
        match state {
            SessionState::Authenticated(session) => {
                // Only the remote mode runs a session machine, so the
                // document store is always present here.
                let documents = match self.documents.clone() {
                    Some(documents) => documents,
                    None => return,
                };
                let store = Arc::new(RemoteStore::new(documents, session.user_id.clone()));
                self.planner = Some(PlannerState::open(
                    EntryService::new(store),
                    Some(session.email),
                ));
                self.auth_form = AuthForm::default();
            }
            SessionState::Unauthenticated => {
                // Dropping the planner drops its store subscription, so no
                // live query survives the identity it was scoped to.
                self.planner = None;
            }
            SessionState::Unknown => {}
        }
    }

    fn handle_auth_action(&mut self, action: AuthAction) {
        let AuthAction::Submit {
            email,
            password,
            is_login,
        } = action;
        let session = match &self.session {
            Some(session) => session,
            None => return,
        };
        let result = if is_login {
            session.sign_in(&email, &password)
        } else {
            session.sign_up(&email, &password)
        };
        if let Err(err) = result {
            // Shown inline on the form; session state is unchanged.
            self.auth_form.error = Some(err.to_string());
        }
    }
}

impl eframe::App for BudgetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain session transitions first; they decide which view exists.
        let mut transitions = Vec::new();
        if let Some(rx) = &self.session_rx {
            while let Ok(state) = rx.try_recv() {
                transitions.push(state);
            }
        }
        for state in transitions {
            self.handle_session_transition(state);
        }

        if let Some(planner) = &mut self.planner {
            planner.drain_snapshots();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut auth_action = None;
            let mut sign_out = false;

            match (&self.session, &mut self.planner) {
                (session, Some(planner)) => {
                    sign_out = ui::planner::show(ui, planner, session.is_some());
                }
                (Some(session), None) => match session.state() {
                    SessionState::Unknown => {
                        ui.centered_and_justified(|ui| {
                            ui.spinner();
                        });
                    }
                    _ => {
                        auth_action = ui::auth_screen::show(ui, &mut self.auth_form);
                    }
                },
                (None, None) => {
                    ui.label("No store configured.");
                }
            }

            if let Some(action) = auth_action {
                self.handle_auth_action(action);
            }
            if sign_out {
                if let Some(session) = &self.session {
                    session.sign_out();
                }
            }
        });
    }
}
