//! Main application orchestrator.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent};
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Layout};
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::client_contacted_screen::{ContactedAction, ClientContactedScreen};
use super::login_screen::{LoginAction, LoginScreen};
use super::not_found_screen::NotFoundScreen;
use super::notification_popup::NotificationPopup;
use super::search_client_screen::{Continuation, PendingSearch, SearchAction, SearchClientScreen};
use crate::application::dto::{LoginRequest, LoginResponse};
use crate::application::services::{CallCenterApi, ContactedFilter, NotificationManager, SessionGuard};
use crate::application::use_cases::{
    LoginUseCase, LogoutUseCase, SearchClientsUseCase, SearchError, SearchOutcome,
};
use crate::domain::auth_state::reduce;
use crate::domain::entities::{
    ClientRecord, ContactedPage, FaqEntry, FollowSwitch, PracticeCatalog,
};
use crate::domain::errors::{ApiError, AuthError};
use crate::domain::ports::{AuthPort, CallCenterPort, SessionStoragePort, SessionStorePort};
use crate::domain::route::guard;
use crate::domain::{AuthAction, AuthState, Route, RouteDecision};
use crate::infrastructure::config::UiConfig;
use crate::presentation::events::{EventHandler, EventResult, GlobalCommand};
use crate::presentation::widgets::{HeaderBar, StatusBar, StatusLevel};

const NOTIFICATION_TICK_RATE: Duration = Duration::from_millis(250);

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid Email or Password";
const SAVE_SUCCESS_MESSAGE: &str = "Changes saved!";
const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";
const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";
const SESSION_UNAVAILABLE_MESSAGE: &str = "Could not keep your session. Please try again.";

/// Result of background work, tagged with the screen that started it.
#[derive(Debug)]
struct Action {
    screen_id: u64,
    event: ActionEvent,
}

#[derive(Debug)]
enum ActionEvent {
    LoginFinished(Result<LoginResponse, AuthError>),
    SearchFinished(Result<SearchOutcome, SearchError>),
    ClientLoaded(Result<ClientRecord, ApiError>),
    OutcomesLoaded(Result<Vec<String>, ApiError>),
    FaqLoaded {
        practice_id: String,
        result: Result<Vec<FaqEntry>, ApiError>,
    },
    Saved {
        result: Result<(), ApiError>,
        then: Option<Continuation>,
    },
    ContactedLoaded {
        seq: u64,
        result: Result<ContactedPage, ApiError>,
    },
    FollowSwitched {
        sms_id: Uuid,
        result: Result<FollowSwitch, ApiError>,
    },
    PracticesLoaded(Result<PracticeCatalog, ApiError>),
}

enum CurrentScreen {
    Login(LoginScreen),
    SearchClient(Box<SearchClientScreen>),
    ClientContacted(Box<ClientContactedScreen>),
    NotFound(NotFoundScreen),
}

/// Ports the application runs against.
pub struct AppPorts {
    /// Token endpoints.
    pub auth: Arc<dyn AuthPort>,
    /// Call-center REST surface.
    pub call_center: Arc<dyn CallCenterPort>,
    /// Session kept across runs.
    pub session_storage: Arc<dyn SessionStoragePort>,
    /// UI state kept for this run.
    pub session_store: Arc<dyn SessionStorePort>,
}

/// Routes between screens and runs backend calls off the UI loop.
pub struct App {
    auth: AuthState,
    route: Route,
    return_to: Option<Route>,
    screen: CurrentScreen,
    screen_id: u64,
    exiting: bool,
    login_use_case: LoginUseCase,
    logout_use_case: LogoutUseCase,
    search_use_case: SearchClientsUseCase,
    api: CallCenterApi,
    session_storage: Arc<dyn SessionStoragePort>,
    session_store: Arc<dyn SessionStorePort>,
    notifications: NotificationManager,
    page_size: u32,
    outcomes: Option<Vec<String>>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// Creates the app. Nothing is loaded until [`App::run`].
    #[must_use]
    pub fn new(ports: AppPorts, ui: &UiConfig) -> Self {
        let AppPorts {
            auth,
            call_center,
            session_storage,
            session_store,
        } = ports;
        let guard = SessionGuard::new(auth.clone(), session_storage.clone());
        let api = CallCenterApi::new(guard, call_center);
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            auth: AuthState::default(),
            route: Route::Login,
            return_to: None,
            screen: CurrentScreen::Login(LoginScreen::new()),
            screen_id: 0,
            exiting: false,
            login_use_case: LoginUseCase::new(auth, session_storage.clone()),
            logout_use_case: LogoutUseCase::new(session_storage.clone()),
            search_use_case: SearchClientsUseCase::new(api.clone()),
            api,
            session_storage,
            session_store,
            notifications: NotificationManager::new(Duration::from_secs(ui.notification_duration)),
            page_size: ui.page_size,
            outcomes: None,
            action_tx,
            action_rx,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(
        mut self,
        terminal: &mut DefaultTerminal,
        open: Option<String>,
    ) -> color_eyre::Result<()> {
        self.start(open).await;
        self.run_event_loop(terminal).await?;
        info!("Application exiting normally");
        Ok(())
    }

    /// Restores the auth flag from storage and opens the first route.
    async fn start(&mut self, open: Option<String>) {
        let present = self
            .session_storage
            .has_session()
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Could not read stored session");
                false
            });
        self.auth = AuthState::from_stored_session(present);
        info!(logged_in = present, "Auth state restored");

        let route = open.as_deref().map_or(Route::HOME, Route::parse);
        self.navigate(route);
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut notification_interval = interval(NOTIFICATION_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while !self.exiting {
            tokio::select! {
                biased;

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await;
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if self.handle_terminal_event(event).await == EventResult::Exit {
                        self.exiting = true;
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = notification_interval.tick() => {
                    let before = self.notifications.has_notifications();
                    self.notifications.tick();
                    if before {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }
            }
        }

        Ok(())
    }

    async fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if EventHandler::is_press(&key) => self.handle_key(key).await,
            _ => EventResult::Continue,
        }
    }

    /// Applies the route guard, then shows the resulting screen.
    fn navigate(&mut self, route: Route) {
        match guard(route, self.auth) {
            RouteDecision::Render(route) | RouteDecision::RedirectTo(route) => self.enter(route),
            RouteDecision::RedirectToLogin { return_to } => {
                debug!(return_to = %return_to, "Redirecting to login");
                self.return_to = Some(return_to);
                self.enter(Route::Login);
            }
        }
    }

    /// Replaces the screen. Results of work started by the old one are dropped.
    fn enter(&mut self, route: Route) {
        self.screen_id += 1;
        debug!(route = %route, screen_id = self.screen_id, "Entering route");

        let mut first_page = None;
        self.screen = match &route {
            Route::Login => CurrentScreen::Login(LoginScreen::new()),
            Route::SearchClient => {
                let mut screen = SearchClientScreen::new();
                match &self.outcomes {
                    Some(outcomes) => screen.set_outcomes(outcomes.clone()),
                    None => {
                        let api = self.api.clone();
                        self.spawn(async move {
                            ActionEvent::OutcomesLoaded(api.fetch_outcomes().await)
                        });
                    }
                }
                CurrentScreen::SearchClient(Box::new(screen))
            }
            Route::ClientContacted => {
                let filter = ContactedFilter::restore(self.session_store.clone());
                let mut screen = ClientContactedScreen::new(filter);
                screen.set_page_size(self.page_size);
                first_page = Some(screen.start());
                let api = self.api.clone();
                self.spawn(async move { ActionEvent::PracticesLoaded(api.fetch_practices().await) });
                CurrentScreen::ClientContacted(Box::new(screen))
            }
            Route::NotFound(path) => CurrentScreen::NotFound(NotFoundScreen::new(path.as_str())),
        };
        self.route = route;

        if let Some(action) = first_page {
            self.handle_contacted_action(action);
        }
    }

    fn spawn<F>(&self, work: F)
    where
        F: Future<Output = ActionEvent> + Send + 'static,
    {
        let tx = self.action_tx.clone();
        let screen_id = self.screen_id;
        tokio::spawn(async move {
            let event = work.await;
            let _ = tx.send(Action { screen_id, event });
        });
    }

    async fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if let Some(command) = EventHandler::global_command(&key, self.auth.logged_in) {
            let then = match command {
                GlobalCommand::DismissNotification => {
                    self.notifications.dismiss();
                    return EventResult::Continue;
                }
                GlobalCommand::Quit => Continuation::Quit,
                GlobalCommand::Navigate(route) => Continuation::Navigate(route),
                GlobalCommand::Logout => Continuation::Logout,
            };
            if let CurrentScreen::SearchClient(screen) = &mut self.screen
                && screen.guard_leave(then.clone())
            {
                return EventResult::Continue;
            }
            return self.run_continuation(then).await;
        }

        match &mut self.screen {
            CurrentScreen::Login(screen) => {
                if screen.handle_key(key) == LoginAction::Submit {
                    let request = screen.request();
                    self.submit_login(request);
                }
            }
            CurrentScreen::SearchClient(screen) => {
                let action = screen.handle_key(key);
                return self.handle_search_action(action).await;
            }
            CurrentScreen::ClientContacted(screen) => {
                let action = screen.handle_key(key);
                self.handle_contacted_action(action);
            }
            CurrentScreen::NotFound(_) => {
                if key.code == KeyCode::Esc {
                    self.navigate(Route::HOME);
                }
            }
        }
        EventResult::Continue
    }

    fn submit_login(&mut self, request: LoginRequest) {
        let CurrentScreen::Login(screen) = &mut self.screen else {
            return;
        };
        if let Err(e) = request.validate() {
            screen.set_error(e.to_string());
            return;
        }
        screen.set_validating();
        let use_case = self.login_use_case.clone();
        self.spawn(async move { ActionEvent::LoginFinished(use_case.execute(request).await) });
    }

    async fn logout(&mut self) {
        if let Err(e) = self.logout_use_case.execute().await {
            error!(error = %e, "Logout could not clear the stored session");
        }
        self.auth = reduce(self.auth, AuthAction::Logout);
        self.return_to = None;
        self.navigate(Route::Login);
    }

    /// Clears the session and sends the operator to login, coming back here afterwards.
    async fn force_relogin(&mut self) {
        warn!(route = %self.route, "Session no longer valid, redirecting to login");
        if let Err(e) = self.logout_use_case.execute().await {
            error!(error = %e, "Could not clear the stored session");
        }
        self.auth = reduce(self.auth, AuthAction::Logout);
        self.notifications.warn(SESSION_EXPIRED_MESSAGE);
        self.navigate(self.route.clone());
    }

    async fn report_api_error(&mut self, operation: &str, e: &ApiError) {
        if e.requires_login() {
            self.force_relogin().await;
        } else {
            error!(operation, error = %e, "Request failed");
            self.notifications.error(GENERIC_ERROR_MESSAGE);
        }
    }

    fn login_error_message(e: &AuthError) -> String {
        match e {
            AuthError::Validation(v) => v.to_string(),
            AuthError::NetworkError { .. } => "Could not reach the server. Please try again.".to_string(),
            AuthError::SessionStorageFailed { .. } | AuthError::Secret(_) => {
                SESSION_UNAVAILABLE_MESSAGE.to_string()
            }
            _ => INVALID_CREDENTIALS_MESSAGE.to_string(),
        }
    }

    /// Resumes whatever the operator asked for before the unsaved-changes prompt.
    async fn run_continuation(&mut self, then: Continuation) -> EventResult {
        match then {
            Continuation::Quit => {
                self.exiting = true;
                return EventResult::Exit;
            }
            Continuation::Navigate(route) => self.navigate(route),
            Continuation::Logout => self.logout().await,
            Continuation::Search(pending) => {
                if let CurrentScreen::SearchClient(screen) = &mut self.screen {
                    screen.set_loading(true);
                }
                self.spawn_search(pending);
            }
        }
        EventResult::Continue
    }

    async fn handle_search_action(&mut self, action: SearchAction) -> EventResult {
        match action {
            SearchAction::None => {}
            SearchAction::Notify(level, message) => self.notifications.notify(level, message),
            SearchAction::Search(pending) => self.spawn_search(pending),
            SearchAction::LoadClient(client_id) => self.spawn_load_client(client_id),
            SearchAction::LoadFaq(practice_id) => {
                let api = self.api.clone();
                self.spawn(async move {
                    let result = api.fetch_faq(&practice_id).await;
                    ActionEvent::FaqLoaded {
                        practice_id,
                        result,
                    }
                });
            }
            SearchAction::Save {
                client_id,
                update,
                then,
            } => {
                let api = self.api.clone();
                self.spawn(async move {
                    ActionEvent::Saved {
                        result: api.update_client(&client_id, &update).await,
                        then,
                    }
                });
            }
            SearchAction::Continue(then) => return self.run_continuation(then).await,
        }
        EventResult::Continue
    }

    fn spawn_load_client(&self, client_id: String) {
        let api = self.api.clone();
        self.spawn(async move { ActionEvent::ClientLoaded(api.fetch_client(&client_id).await) });
    }

    fn spawn_search(&self, pending: PendingSearch) {
        let use_case = self.search_use_case.clone();
        self.spawn(async move {
            ActionEvent::SearchFinished(use_case.execute(pending.mode, &pending.input).await)
        });
    }

    fn handle_contacted_action(&mut self, action: ContactedAction) {
        match action {
            ContactedAction::None => {}
            ContactedAction::Notify(level, message) => self.notifications.notify(level, message),
            ContactedAction::Fetch { seq, query } => {
                let api = self.api.clone();
                self.spawn(async move {
                    ActionEvent::ContactedLoaded {
                        seq,
                        result: api.fetch_contacted(&query).await,
                    }
                });
            }
            ContactedAction::ToggleFollow(sms_id) => {
                let api = self.api.clone();
                self.spawn(async move {
                    ActionEvent::FollowSwitched {
                        sms_id,
                        result: api.switch_follow(sms_id).await,
                    }
                });
            }
            ContactedAction::OpenClient(client_id) => {
                self.navigate(Route::SearchClient);
                if let CurrentScreen::SearchClient(screen) = &mut self.screen {
                    screen.set_loading(true);
                    self.spawn_load_client(client_id);
                }
            }
        }
    }

    async fn handle_action(&mut self, action: Action) {
        if action.screen_id != self.screen_id {
            debug!(
                screen_id = action.screen_id,
                current = self.screen_id,
                "Dropping result for a screen no longer shown"
            );
            return;
        }

        match action.event {
            ActionEvent::LoginFinished(result) => self.on_login_finished(result),
            ActionEvent::OutcomesLoaded(result) => match result {
                Ok(outcomes) => {
                    if let CurrentScreen::SearchClient(screen) = &mut self.screen {
                        screen.set_outcomes(outcomes.clone());
                    }
                    self.outcomes = Some(outcomes);
                }
                Err(e) => self.report_api_error("fetch_outcomes", &e).await,
            },
            ActionEvent::SearchFinished(result) => {
                let CurrentScreen::SearchClient(screen) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(outcome) => {
                        let next = screen.apply_search(outcome);
                        self.handle_search_action(next).await;
                    }
                    Err(SearchError::Invalid(e)) => {
                        screen.set_loading(false);
                        self.notifications.warn(e.to_string());
                    }
                    Err(SearchError::Api(e)) => {
                        screen.set_loading(false);
                        self.report_api_error("search_clients", &e).await;
                    }
                }
            }
            ActionEvent::ClientLoaded(result) => {
                let CurrentScreen::SearchClient(screen) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(record) => {
                        let next = screen.apply_client(&record);
                        self.handle_search_action(next).await;
                    }
                    Err(e) => {
                        screen.set_loading(false);
                        self.report_api_error("fetch_client", &e).await;
                    }
                }
            }
            ActionEvent::FaqLoaded {
                practice_id,
                result,
            } => {
                let CurrentScreen::SearchClient(screen) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(entries) => screen.apply_faq(&practice_id, entries),
                    Err(e) => {
                        screen.faq_failed();
                        self.report_api_error("fetch_faq", &e).await;
                    }
                }
            }
            ActionEvent::Saved { result, then } => {
                let CurrentScreen::SearchClient(screen) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(()) => {
                        screen.apply_saved();
                        self.notifications.success(SAVE_SUCCESS_MESSAGE);
                        if let Some(then) = then {
                            self.run_continuation(then).await;
                        }
                    }
                    Err(e) => {
                        screen.set_loading(false);
                        if e.requires_login() {
                            self.force_relogin().await;
                        } else {
                            error!(error = %e, "Saving client failed");
                            self.notifications.error(GENERIC_ERROR_MESSAGE);
                        }
                    }
                }
            }
            ActionEvent::ContactedLoaded { seq, result } => {
                let CurrentScreen::ClientContacted(screen) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(page) => screen.apply_page(seq, page),
                    Err(e) => {
                        screen.fetch_failed(seq);
                        self.report_api_error("fetch_contacted", &e).await;
                    }
                }
            }
            ActionEvent::FollowSwitched { sms_id, result } => {
                let CurrentScreen::ClientContacted(screen) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(switch) => screen.apply_follow(switch),
                    Err(e) => {
                        screen.follow_failed(sms_id);
                        self.report_api_error("switch_follow", &e).await;
                    }
                }
            }
            ActionEvent::PracticesLoaded(result) => match result {
                Ok(catalog) => {
                    if let CurrentScreen::ClientContacted(screen) = &mut self.screen {
                        screen.set_catalog(catalog.options());
                    }
                }
                Err(e) => self.report_api_error("fetch_practices", &e).await,
            },
        }
    }

    fn on_login_finished(&mut self, result: Result<LoginResponse, AuthError>) {
        match result {
            Ok(response) => {
                info!(persisted = response.session_persisted, "Login successful");
                self.auth = reduce(self.auth, AuthAction::Authorize);
                let target = self.return_to.take().unwrap_or(Route::HOME);
                self.navigate(target);
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                if let CurrentScreen::Login(screen) = &mut self.screen {
                    screen.set_error(Self::login_error_message(&e));
                }
            }
        }
    }

    fn loading(&self) -> bool {
        match &self.screen {
            CurrentScreen::SearchClient(screen) => screen.is_loading(),
            CurrentScreen::ClientContacted(screen) => screen.is_loading(),
            CurrentScreen::Login(_) | CurrentScreen::NotFound(_) => false,
        }
    }

    fn status_bar(&self) -> StatusBar {
        let bar = match &self.screen {
            CurrentScreen::SearchClient(screen) => screen.status_bar(),
            CurrentScreen::ClientContacted(screen) => screen.status_bar(),
            CurrentScreen::Login(_) | CurrentScreen::NotFound(_) => StatusBar::new(),
        };
        let bar = bar.hint("Ctrl+Q", "Quit");
        if self.loading() {
            bar.message("Loading...", StatusLevel::Info)
        } else {
            bar
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let [header_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            HeaderBar::new(crate::NAME, crate::VERSION)
                .active(&self.route)
                .navigation(self.auth.logged_in),
            header_area,
        );

        match &mut self.screen {
            CurrentScreen::Login(screen) => frame.render_widget(&*screen, body_area),
            CurrentScreen::SearchClient(screen) => frame.render_widget(screen.as_mut(), body_area),
            CurrentScreen::ClientContacted(screen) => {
                frame.render_widget(screen.as_mut(), body_area);
            }
            CurrentScreen::NotFound(screen) => frame.render_widget(&*screen, body_area),
        }

        frame.render_widget(&self.status_bar(), status_area);

        if let Some(notification) = self.notifications.current_notification() {
            frame.render_widget(NotificationPopup::new(notification), frame.area());
        }
    }
}
