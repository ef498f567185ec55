//! Runtime: unified event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single event loop that handles input and periodic ticks.
//! - Route keys to the focused component and execute returned `Effect`s.
//! - Rebuild the focus cycle just before each render so structural changes
//!   (routes, modals, a text box appearing) are reflected.
//!
//! Input comes from a dedicated thread that blocks on `crossterm` reads and
//! forwards events over a Tokio channel; keeping `poll()` and `read()` on one
//! OS thread avoids lost or delayed events in some terminals. Ticking is
//! adaptive: fast while deletion jobs are still progressing, slow when idle.

use anyhow::Result;
use crossterm::event::MouseEventKind;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};

use rat_focus::FocusBuilder;
use tenure_types::{Effect, Msg, Route};

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
async fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    let mut last_mouse_event: Option<Instant> = Some(Instant::now());

    tokio::spawn(async move {
        let sixteen_ms = Duration::from_millis(16);
        loop {
            if event::poll(sixteen_ms).is_ok() {
                match event::read() {
                    Ok(event) => {
                        // Throttle mouse move events to once per 16 ms.
                        let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                        let should_send =
                            !is_mouse_move || last_mouse_event.is_some_and(|last| last.elapsed() >= sixteen_ms);
                        if is_mouse_move && should_send {
                            last_mouse_event = Some(Instant::now());
                        }

                        if should_send && let Err(e) = sender.send(event).await {
                            tracing::warn!("Failed to send event: {}", e);
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read event: {}", e);
                        break;
                    }
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Renders a frame and runs the post-render hooks.
///
/// Returns effects produced by `after_render` (for example a save triggered
/// by a component reacting to its own committed state).
fn render(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    main_view: &mut MainView,
) -> Result<Vec<Effect>> {
    // Rebuild focus just before rendering so structure changes are reflected.
    let old_focus = std::mem::take(&mut app.focus);
    app.focus = Rc::new(FocusBuilder::rebuild_for(app, Some(Rc::unwrap_or_clone(old_focus))));
    if app.focus.focused().is_none() {
        main_view.restore_focus(app);
    }
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;

    // Post-render reactions, e.g. moving focus into a text box that the
    // frame just made visible. A focus move needs one more paint.
    let focused_before = app.focus.focused().map(|flag| flag.widget_id());
    let effects = main_view.after_render(app);
    if app.focus.focused().map(|flag| flag.widget_id()) != focused_before {
        terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    }
    Ok(effects)
}

/// Handle raw crossterm input events and update `App`/components.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, &Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Entry point for the TUI runtime: sets up the terminal, spawns the event
/// producer, runs the async event loop, and performs cleanup on exit.
pub async fn run_app(mut app: App) -> Result<()> {
    let mut input_receiver = spawn_input_thread().await;
    let mut main_view = MainView::new();
    main_view.set_current_route(&mut app, Route::Retention);

    let mut terminal = setup_terminal()?;
    let mut effects: Vec<Effect> = Vec::with_capacity(5);

    // Ticking strategy: fast while jobs are animating, slow when idle.
    let fast_interval = Duration::from_millis(500);
    let idle_interval = Duration::from_millis(5000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    effects.extend(render(&mut terminal, &mut app, &mut main_view)?);

    // Track the last known terminal size to synthesize Resize messages when
    // some terminals fail to emit them reliably.
    let mut last_size: Option<(u16, u16)> = crossterm::terminal::size().ok();

    loop {
        let jobs_running = app.jobs.jobs().iter().any(|job| !job.status.is_terminal());
        let target_interval = if jobs_running || !effects.is_empty() {
            fast_interval
        } else {
            idle_interval
        };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                if let Some(event) = maybe_event {
                    if let Event::Key(key_event) = event
                        && key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
                            break;
                        }
                    effects.extend(handle_input_event(&mut app, &mut main_view, event));
                } else {
                    // Input channel closed; shut down cleanly.
                    break;
                }
                needs_render = true;
            }

            _ = ticker.tick() => {
                effects.extend(main_view.handle_message(&mut app, &Msg::Tick));
                needs_render = jobs_running || !effects.is_empty();
            }

            _ = signal::ctrl_c() => { break; }
        }

        if !effects.is_empty() {
            // Move effects out so new effects produced while processing are
            // handled in the next iteration.
            let mut effects_to_process = Vec::with_capacity(effects.len());
            effects_to_process.append(&mut effects);

            handle_navigation_effects(&mut app, &mut main_view, &mut effects_to_process);
            process_effects(&mut app, &mut main_view, effects_to_process, &mut effects);
            needs_render = true;
        }

        if app.should_quit {
            break;
        }

        // Fallback: detect terminal size changes even when no explicit
        // Resize event arrived.
        if let Ok((w, h)) = crossterm::terminal::size()
            && last_size != Some((w, h))
        {
            last_size = Some((w, h));
            let _ = app.update(&Msg::Resize(w, h));
            needs_render = true;
        }

        if needs_render {
            effects.extend(render(&mut terminal, &mut app, &mut main_view)?);
        }
    }

    cleanup_terminal(&mut terminal)?;
    Ok(())
}

/// Routes are switched and modals opened/closed before the remaining effects
/// run, so anything downstream sees the final view structure.
fn handle_navigation_effects(app: &mut App, main_view: &mut MainView, effects: &mut Vec<Effect>) {
    let navigation_effects = effects
        .extract_if(0.., |effect| {
            matches!(effect, Effect::SwitchTo(_) | Effect::ShowModal(_) | Effect::CloseModal)
        })
        .collect::<Vec<Effect>>();

    for effect in navigation_effects {
        match effect {
            Effect::SwitchTo(route) => main_view.set_current_route(app, route),
            Effect::ShowModal(modal) => main_view.set_open_modal_kind(app, Some(modal)),
            Effect::CloseModal => main_view.set_open_modal_kind(app, None),
            _ => {}
        }
    }
}

fn process_effects(app: &mut App, main_view: &mut MainView, effects: Vec<Effect>, effects_out: &mut Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::SendMsg(msg) => {
                effects_out.extend(main_view.handle_message(app, &msg));
            }
            Effect::SaveSettingsRequested => {
                let result = app.save_settings();
                effects_out.extend(main_view.handle_message(app, &Msg::SettingsPersisted(result)));
            }
            Effect::SavePolicyRequested => {
                let result = app.save_settings();
                effects_out.push(Effect::SwitchTo(Route::Retention));
                effects_out.push(Effect::SendMsg(Msg::SettingsPersisted(result)));
            }
            Effect::CreateJobRequested(job_type) => {
                let job = app.jobs.create_job(job_type);
                tracing::info!(id = %job.id, kind = job_type.label(), "enqueued deletion job");
            }
            Effect::Quit => {
                app.should_quit = true;
            }
            Effect::SwitchTo(_) | Effect::ShowModal(_) | Effect::CloseModal => {}
        }
    }
}
