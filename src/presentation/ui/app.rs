//! Main application orchestrator.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, info, warn};

use crate::application::ConnectionManager;
use crate::domain::theme::ThemeMode;
use crate::infrastructure::config::UiConfig;
use crate::infrastructure::{
    AppConfig, DriverEvent, DriverReceiver, StorageManager, TokioTimer,
    WebSocketTransport, driver_channel,
};
use crate::presentation::theme::Theme;
use crate::presentation::ui::{ScheduleAction, ScheduleScreen, ScheduleView};
use crate::presentation::widgets::StatusPanel;

type Manager = ConnectionManager<WebSocketTransport, TokioTimer, StatusPanel>;

/// Terminal application driving one `ConnectionManager`.
pub struct App {
    manager: Manager,
    driver_rx: DriverReceiver,
    screen: ScheduleScreen,
    theme: Theme,
    storage: StorageManager,
    ui: UiConfig,
    running: bool,
}

impl App {
    /// Wires the transport, timer and status panel to a fresh manager.
    #[must_use]
    pub fn new(config: &AppConfig, storage: StorageManager, theme: ThemeMode) -> Self {
        let (driver_tx, driver_rx) = driver_channel();
        let manager = ConnectionManager::new(
            config.server.endpoint_url(),
            WebSocketTransport::new(driver_tx.clone()),
            TokioTimer::new(driver_tx),
            StatusPanel::new(),
        );

        Self {
            manager,
            driver_rx,
            screen: ScheduleScreen::new(),
            theme: Theme::new(theme),
            storage,
            ui: config.ui.clone(),
            running: true,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal or reading terminal events fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.manager.connect();

        let mut terminal_events = EventStream::new();
        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            let redraw = tokio::select! {
                Some(event) = self.driver_rx.recv() => {
                    self.handle_driver_event(event);
                    true
                }

                Some(event) = terminal_events.next() => match event? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                        true
                    }
                    Event::Resize(..) => true,
                    _ => false,
                },

                else => break,
            };

            if redraw {
                terminal.draw(|frame| self.render(frame))?;
            }
        }

        self.manager.shutdown();
        info!("Application exiting normally");
        Ok(())
    }

    fn handle_driver_event(&mut self, event: DriverEvent) {
        match event {
            DriverEvent::Connection { connection, event } => {
                self.manager.handle_event(connection, event);
            }
            DriverEvent::TimerFired(handle) => self.manager.handle_timer(handle),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let submit_enabled = self.manager.sink().submit_enabled();
        let action = self.screen.handle_key(key, submit_enabled);
        self.apply_action(action);
    }

    fn apply_action(&mut self, action: ScheduleAction) {
        match action {
            ScheduleAction::None => {}
            ScheduleAction::Submit(schedule) => {
                if let Err(e) = self.manager.submit(&schedule) {
                    debug!(error = %e, "Schedule not sent");
                }
            }
            ScheduleAction::ToggleTheme => self.toggle_theme(),
            ScheduleAction::Reconnect => self.manager.reconnect(),
            ScheduleAction::Quit => self.running = false,
        }
    }

    fn toggle_theme(&mut self) {
        let mode = self.theme.mode.toggled();
        self.theme = Theme::new(mode);
        info!(theme = %mode, "Theme changed");

        if let Err(e) = self.storage.save_theme(mode) {
            warn!(error = %e, "Failed to persist theme");
        }
    }

    fn render(&self, frame: &mut Frame) {
        let timestamp_format = self
            .ui
            .show_timestamps
            .then_some(self.ui.timestamp_format.as_str());

        frame.render_widget(
            ScheduleView {
                screen: &self.screen,
                panel: self.manager.sink(),
                theme: &self.theme,
                state: self.manager.state(),
                endpoint: self.manager.endpoint(),
                timestamp_format,
            },
            frame.area(),
        );
    }
}
