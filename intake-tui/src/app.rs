//! Application event loop and screen routing

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use intake_lib::IntakeClient;
use intake_lib::api::FormResponse;
use intake_lib::api::NewUser;
use intake_lib::error::Error;
use intake_lib::identity::Identity;
use intake_lib::identity::IdentityStore;
use intake_lib::identity::MemoryIdentityStore;
use ratatui::DefaultTerminal;
use ratatui::Frame;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedSender;

use crate::screens::FormScreen;
use crate::screens::LoginScreen;

/// How long one input poll waits; doubles as the animation tick.
const TICK: Duration = Duration::from_millis(100);

/// Results of background network calls, delivered to the event loop.
pub enum NetEvent {
    /// `create-user` finished for the given identity.
    UserCreated {
        identity: Identity,
        result: Result<serde_json::Value, Error>,
    },
    /// `get-form` finished.
    FormLoaded(Result<FormResponse, Error>),
}

pub type NetSender = UnboundedSender<NetEvent>;

enum Screen {
    Login(LoginScreen),
    Form(FormScreen),
}

/// The whole terminal application: one screen at a time, one identity
/// store, one shared API client.
pub struct App {
    client: IntakeClient,
    identity: MemoryIdentityStore,
    screen: Screen,
    tick: u64,
    should_quit: bool,
}

impl App {
    /// Builds the app and applies the identity gate: with an identity
    /// already in the store the form screen opens directly, otherwise
    /// the login screen does.
    pub fn new(client: IntakeClient, identity: MemoryIdentityStore) -> Self {
        let screen = match identity.get() {
            Some(_) => Screen::Form(FormScreen::loading()),
            None => Screen::Login(LoginScreen::new()),
        };
        Self {
            client,
            identity,
            screen,
            tick: 0,
            should_quit: false,
        }
    }

    /// Runs the event loop until the user quits.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel();

        // The gate let us straight in: start the fetch immediately.
        if let (Screen::Form(_), Some(identity)) = (&self.screen, self.identity.get()) {
            spawn_get_form(&self.client, &tx, identity.roll_number);
        }

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.on_key(key, &tx);
                    }
                }
            }

            while let Ok(net) = rx.try_recv() {
                self.on_net(net, &tx);
            }

            self.tick = self.tick.wrapping_add(1);
            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let tick = self.tick;
        match &mut self.screen {
            Screen::Login(login) => login.render(frame, tick),
            Screen::Form(form) => form.render(frame, tick),
        }
    }

    fn on_key(&mut self, key: KeyEvent, tx: &NetSender) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        match &mut self.screen {
            Screen::Login(login) => login.on_key(key, &self.client, tx),
            Screen::Form(form) => {
                if form.on_key(key).back_to_login {
                    self.screen = Screen::Login(LoginScreen::new());
                }
            }
        }
    }

    fn on_net(&mut self, net: NetEvent, tx: &NetSender) {
        match net {
            NetEvent::UserCreated { identity, result } => {
                let Screen::Login(login) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(body) => {
                        log::info!("registered {}: {body}", identity.roll_number);
                        self.identity.set(identity.clone());
                        self.screen = Screen::Form(FormScreen::loading());
                        spawn_get_form(&self.client, tx, identity.roll_number);
                    }
                    Err(e) => {
                        log::warn!("create-user failed: {e}");
                        login.registration_failed();
                    }
                }
            }
            NetEvent::FormLoaded(result) => {
                let Screen::Form(form) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(response) => {
                        log::info!(
                            "loaded form '{}' v{} ({} sections): {}",
                            response.form.form_title,
                            response.form.version,
                            response.form.section_count(),
                            response.message
                        );
                        form.loaded(response.form);
                    }
                    Err(e) => {
                        log::warn!("get-form failed: {e}");
                        form.failed("Failed to load form. Please try again.");
                    }
                }
            }
        }
    }
}

/// Fetches the form definition in the background.
pub fn spawn_get_form(client: &IntakeClient, tx: &NetSender, roll_number: String) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.get_form(&roll_number).await;
        let _ = tx.send(NetEvent::FormLoaded(result));
    });
}

/// Registers the user in the background.
pub fn spawn_create_user(client: &IntakeClient, tx: &NetSender, identity: Identity) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.create_user(&NewUser::from(&identity)).await;
        let _ = tx.send(NetEvent::UserCreated { identity, result });
    });
}
