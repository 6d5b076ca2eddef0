use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::api::{self, ResponseClient};
use crate::config::Config;
use crate::controller::ChatController;
use crate::events::TurnEvent;
use crate::ui::{help_text, ChatComposer, ComposerResult, SlashCommand, TranscriptView};

/// Restores the terminal even when the loop unwinds.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen)
            .context("Failed to enter alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the chat TUI until the user quits.
///
/// Poll-based event loop: each frame drains turn events from the request and
/// reveal tasks, draws, then polls the keyboard. Dropping the receiver on the
/// way out detaches any task still in flight.
pub async fn run(config: Config) -> Result<()> {
    let client = ResponseClient::new(config.endpoint.clone(), config.request_timeout())?;
    let (tx, mut rx) = mpsc::unbounded_channel::<TurnEvent>();

    let guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("Failed to init terminal")?;
    terminal.clear().context("Failed to clear terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;

    let mut controller = ChatController::new();
    let mut composer = ChatComposer::new("Type your message here...".to_string());
    composer.set_focus(true);
    let mut status: Option<String> = None;
    let mut should_quit = false;

    tracing::info!(endpoint = %config.endpoint, "chat session started");

    loop {
        while let Ok(turn_event) = rx.try_recv() {
            controller.apply(turn_event);
        }
        composer.set_placeholder_visible(!controller.expanded());

        terminal
            .draw(|frame| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Min(10),
                        Constraint::Length(1),
                        Constraint::Length(3),
                    ])
                    .split(frame.size());

                frame.render_widget(
                    TranscriptView::new(
                        controller.transcript(),
                        controller.phase(),
                        controller.expanded(),
                    ),
                    chunks[0],
                );

                let status_line = match &status {
                    Some(text) => Line::from(vec![Span::styled(
                        text.as_str(),
                        Style::default().fg(Color::Yellow),
                    )]),
                    None => Line::from(""),
                };
                frame.render_widget(Paragraph::new(status_line), chunks[1]);

                frame.render_widget(&composer, chunks[2]);
            })
            .context("Failed to draw")?;

        if should_quit {
            break;
        }

        // Redraw fast while a reply is arriving, calmer cadence when idle.
        let poll_ms = if controller.is_busy() { 10 } else { 120 };
        if event::poll(Duration::from_millis(poll_ms)).context("Event poll failed")? {
            match event::read().context("Event read failed")? {
                Event::Key(key) => {
                    if key.code == KeyCode::Esc
                        || (key.code == KeyCode::Char('c')
                            && key.modifiers.contains(KeyModifiers::CONTROL))
                    {
                        should_quit = true;
                        continue;
                    }

                    match composer.handle_key(key) {
                        ComposerResult::Submitted(text) => {
                            status = None;
                            if controller.is_busy() {
                                tracing::debug!("submit supersedes an in-flight turn");
                            }
                            if let Some(request) = controller.submit(&text) {
                                api::dispatch(
                                    &client,
                                    request,
                                    config.typing_interval(),
                                    tx.clone(),
                                );
                            }
                        }
                        ComposerResult::Command(SlashCommand::Help) => {
                            status = Some(help_text());
                        }
                        ComposerResult::Command(SlashCommand::Bye) => {
                            should_quit = true;
                        }
                        ComposerResult::None => {}
                    }
                }
                Event::Resize(..) => {}
                _ => {}
            }
        }
    }

    tracing::info!("chat session ended");
    terminal.show_cursor().context("Failed to restore cursor")?;
    drop(guard);
    Ok(())
}
