use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use tokio::time::{self, MissedTickBehavior};

use crate::assets::AssetLoader;
use crate::command::{CommandOutcome, DispatchContext, dispatch};
use crate::error::ReaderResult;
use crate::input::map_key_to_command;
use crate::ui::split_layout;

use super::core::Reader;
use super::terminal::{ReaderSurface, TerminalSession};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Quit,
}

impl Reader {
    /// Enters the terminal, finishes bootstrap (loading frame, preload,
    /// restored zoom and position), then runs the event loop until quit.
    pub async fn run(&mut self, loader: Arc<dyn AssetLoader>) -> ReaderResult<()> {
        let mut session = TerminalSession::enter()?;
        let outcome = self.run_on(&mut session, loader).await;
        session.restore()?;
        outcome
    }

    async fn run_on(
        &mut self,
        session: &mut impl ReaderSurface,
        loader: Arc<dyn AssetLoader>,
    ) -> ReaderResult<()> {
        // Loading indicator first; the preload below may take a while.
        session.draw(|frame| self.draw_frame(frame))?;

        let report = self.preload(loader).await;
        if let Ok(viewport) = session.viewport() {
            self.column = split_layout(viewport, self.fullscreen.is_active()).column;
        }
        self.finish_preload(report);

        let mut events = EventStream::new();
        let mut scroll_tick = time::interval(Duration::from_millis(self.config.timing.scroll_tick_ms));
        scroll_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut needs_redraw = true;

        loop {
            if needs_redraw {
                session.draw(|frame| self.draw_frame(frame))?;
                needs_redraw = false;
            }

            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if matches!(
                                self.handle_terminal_event(event, &mut needs_redraw),
                                LoopControl::Quit
                            ) {
                                break;
                            }
                        }
                        Some(Err(err)) => {
                            self.status.message = format!("input error: {err}");
                            needs_redraw = true;
                        }
                        None => break,
                    }
                }
                _ = scroll_tick.tick() => {
                    if self.tick_scroll_animation() {
                        needs_redraw = true;
                    }
                }
            }
        }

        Ok(())
    }

    pub(crate) fn handle_terminal_event(&mut self, event: Event, needs_redraw: &mut bool) -> LoopControl {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.handle_key_event(key, needs_redraw)
            }
            Event::Resize(_, _) => {
                // draw_frame re-measures against the new column rect.
                *needs_redraw = true;
                LoopControl::Continue
            }
            _ => LoopControl::Continue,
        }
    }

    pub(crate) fn handle_key_event(&mut self, key: KeyEvent, needs_redraw: &mut bool) -> LoopControl {
        let Some(command) = map_key_to_command(key, &self.overlay) else {
            return LoopControl::Continue;
        };

        let result = {
            let mut ctx = DispatchContext {
                state: &mut self.state,
                overlay: &mut self.overlay,
                status: &mut self.status,
                fullscreen: self.fullscreen.as_mut(),
                page_count: self.catalog.len(),
            };
            dispatch(&mut ctx, command)
        };

        if result.outcome == CommandOutcome::QuitRequested {
            return LoopControl::Quit;
        }
        self.execute_effects(result.effects);
        *needs_redraw = true;
        LoopControl::Continue
    }
}
