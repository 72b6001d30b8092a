//! Foreground event loops.

use std::future::Future;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};

use super::{next_edge, App};
use crate::controller::Controller;
use crate::traits::{HttpClient, UiSink};
use crate::ui::{self, Dashboard};

/// Redraw tick so the transcript clock stays fresh.
const TICK: Duration = Duration::from_millis(250);

/// Run without a dashboard until `shutdown` resolves or the app drains.
///
/// Returns the controller so callers can inspect the final state.
pub async fn run_headless<C, U, F>(mut app: App<C, U>, shutdown: F) -> Controller<C, U>
where
    C: HttpClient + 'static,
    U: UiSink,
    F: Future<Output = ()>,
{
    app.start();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            edge = next_edge(&mut app.edges) => app.handle_edge(edge).await,
            Some(message) = app.message_rx.recv() => app.handle_message(message),
            _ = &mut shutdown => {
                tracing::info!("shutdown requested");
                break;
            }
        }

        if app.is_drained() {
            break;
        }
    }

    app.into_controller()
}

/// Run the dashboard until the user quits.
pub async fn run_tui<B, C>(
    terminal: &mut Terminal<B>,
    mut app: App<C, Dashboard>,
) -> Result<Controller<C, Dashboard>>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    C: HttpClient + 'static,
{
    let local_only = app.is_local_only();
    app.controller_mut().ui_mut().set_local_only(local_only);
    app.start();

    let mut event_stream = EventStream::new();
    let mut tick = tokio::time::interval(TICK);

    loop {
        if app.controller().ui().is_dirty() {
            terminal.draw(|f| ui::render(f, app.controller().ui()))?;
            app.controller_mut().ui_mut().mark_clean();
        }

        tokio::select! {
            edge = next_edge(&mut app.edges) => app.handle_edge(edge).await,
            Some(message) = app.message_rx.recv() => app.handle_message(message),
            event = event_stream.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                        || (key.code == KeyCode::Char('c')
                            && key.modifiers.contains(KeyModifiers::CONTROL));
                    if quit {
                        app.quit();
                    }
                }
                Some(Ok(Event::Resize(_, _))) => app.controller_mut().ui_mut().mark_dirty(),
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    tracing::warn!(%err, "terminal event stream error");
                }
                None => app.quit(),
            },
            _ = tick.tick() => app.controller_mut().ui_mut().mark_dirty(),
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(app.into_controller())
}
