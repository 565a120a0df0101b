//! Key and mouse event handling

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::AppController;
use crate::model::Screen;
use crate::model::dashboard::DashboardTab;
use crate::model::forms::SignupStep;
use crate::model::types::WelcomeChoice;

/// Columns a keyboard nudge moves the top card on the Discover deck.
const NUDGE_COLS: f32 = 4.0;

impl AppController {
    pub async fn handle_key_event(
        &self,
        key: KeyEvent,
        viewport_cols: f32,
        now: Instant,
    ) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Handle error notices first (they block all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_notice().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if model.is_help_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle the Spotify connect modal
        if model.auth_url_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.set_auth_url(None).await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle the disconnect confirmation dialog
        if model.confirm_disconnect_open().await {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    drop(model);
                    self.disconnect_spotify().await;
                    Ok(())
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    model.set_confirm_disconnect(false).await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        match model.get_screen().await {
            Screen::Welcome => {
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => model.welcome_prev().await,
                    KeyCode::Down | KeyCode::Char('j') => model.welcome_next().await,
                    KeyCode::Enter => match model.welcome_choice().await {
                        WelcomeChoice::LogIn => model.show_login().await,
                        WelcomeChoice::SignUp => model.show_signup().await,
                        WelcomeChoice::Quit => model.set_should_quit(true).await,
                    },
                    KeyCode::Char('q') | KeyCode::Char('Q') => {
                        model.set_should_quit(true).await;
                    }
                    KeyCode::Char('?') => model.toggle_help().await,
                    _ => {}
                }
                Ok(())
            }
            Screen::Login => {
                match key.code {
                    KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
                        model.login_focus_next().await;
                    }
                    KeyCode::Enter => {
                        if let Some((identifier, password)) = model.login_validated().await {
                            drop(model);
                            self.submit_login(identifier, password).await;
                        }
                    }
                    KeyCode::Esc => model.show_welcome().await,
                    KeyCode::Backspace => model.login_backspace().await,
                    KeyCode::Char(c) => {
                        if key.modifiers.contains(KeyModifiers::CONTROL) {
                            match c {
                                // Q still quits even while typing when Ctrl is held
                                'q' | 'Q' => model.set_should_quit(true).await,
                                'r' | 'R' => model.login_toggle_password().await,
                                _ => {}
                            }
                        } else {
                            model.login_type(c).await;
                        }
                    }
                    _ => {}
                }
                Ok(())
            }
            Screen::Signup => {
                let step = model.signup_step().await;
                self.handle_signup_key(key, step, model).await
            }
            Screen::Tutorial => {
                match key.code {
                    KeyCode::Enter
                    | KeyCode::Char(' ')
                    | KeyCode::Right
                    | KeyCode::Char('n')
                    | KeyCode::Char('N') => {
                        drop(model);
                        self.tutorial_advance(now).await;
                    }
                    KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('P') => {
                        model.tutorial_prev(now).await;
                    }
                    KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('S') => {
                        drop(model);
                        self.tutorial_skip().await;
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') => {
                        model.set_should_quit(true).await;
                    }
                    _ => {}
                }
                Ok(())
            }
            Screen::Dashboard => self.handle_dashboard_key(key, viewport_cols, now, model).await,
        }
    }

    async fn handle_signup_key(
        &self,
        key: KeyEvent,
        step: SignupStep,
        model: tokio::sync::MutexGuard<'_, crate::model::AppModel>,
    ) -> Result<()> {
        match step {
            SignupStep::BasicInfo => match key.code {
                KeyCode::Tab | KeyCode::Down => model.signup_focus_next().await,
                KeyCode::BackTab | KeyCode::Up => model.signup_focus_prev().await,
                KeyCode::Enter => {
                    model.signup_advance(false).await;
                }
                KeyCode::Esc => {
                    if !model.signup_back().await {
                        model.show_welcome().await;
                    }
                }
                KeyCode::Backspace => model.signup_backspace().await,
                KeyCode::Char(c) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL) {
                        match c {
                            'q' | 'Q' => model.set_should_quit(true).await,
                            'r' | 'R' => model.signup_toggle_password().await,
                            _ => {}
                        }
                    } else {
                        model.signup_type(c).await;
                    }
                }
                _ => {}
            },
            SignupStep::Genres => match key.code {
                KeyCode::Left => model.signup_move_cursor(-1, 0).await,
                KeyCode::Right => model.signup_move_cursor(1, 0).await,
                KeyCode::Up => model.signup_move_cursor(0, -1).await,
                KeyCode::Down => model.signup_move_cursor(0, 1).await,
                KeyCode::Char(' ') => model.signup_toggle_genre().await,
                KeyCode::Enter => {
                    model.signup_advance(false).await;
                }
                KeyCode::Esc => {
                    model.signup_back().await;
                }
                KeyCode::Char('q') | KeyCode::Char('Q') => {
                    model.set_should_quit(true).await;
                }
                _ => {}
            },
            SignupStep::Avatar => match key.code {
                KeyCode::Left => model.signup_move_cursor(-1, 0).await,
                KeyCode::Right => model.signup_move_cursor(1, 0).await,
                KeyCode::Up => model.signup_move_cursor(0, -1).await,
                KeyCode::Down => model.signup_move_cursor(0, 1).await,
                KeyCode::Char(' ') => model.signup_choose_avatar().await,
                KeyCode::Enter => {
                    model.signup_choose_avatar().await;
                    if let Some(request) = model.signup_advance(false).await {
                        drop(model);
                        self.submit_signup(request).await;
                    }
                }
                // Skip picking an avatar entirely
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    if let Some(request) = model.signup_advance(true).await {
                        drop(model);
                        self.submit_signup(request).await;
                    }
                }
                KeyCode::Esc => {
                    model.signup_back().await;
                }
                KeyCode::Char('q') | KeyCode::Char('Q') => {
                    model.set_should_quit(true).await;
                }
                _ => {}
            },
        }
        Ok(())
    }

    async fn handle_dashboard_key(
        &self,
        key: KeyEvent,
        viewport_cols: f32,
        now: Instant,
        model: tokio::sync::MutexGuard<'_, crate::model::AppModel>,
    ) -> Result<()> {
        // Tab-independent bindings first
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
                return Ok(());
            }
            KeyCode::Tab => {
                model.dashboard_tab_next().await;
                return Ok(());
            }
            KeyCode::BackTab => {
                model.dashboard_tab_prev().await;
                return Ok(());
            }
            KeyCode::Char('1') => {
                model.set_dashboard_tab(DashboardTab::Overview).await;
                return Ok(());
            }
            KeyCode::Char('2') => {
                model.set_dashboard_tab(DashboardTab::Music).await;
                return Ok(());
            }
            KeyCode::Char('3') => {
                model.set_dashboard_tab(DashboardTab::Discover).await;
                return Ok(());
            }
            KeyCode::Char('4') => {
                model.set_dashboard_tab(DashboardTab::Profile).await;
                return Ok(());
            }
            KeyCode::Char('?') => {
                model.toggle_help().await;
                return Ok(());
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                drop(model);
                self.refresh_or_probe().await;
                return Ok(());
            }
            _ => {}
        }

        match model.dashboard_tab().await {
            Some(DashboardTab::Overview) => match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    drop(model);
                    self.connect_spotify().await;
                }
                KeyCode::Char('d') | KeyCode::Char('D') => {
                    let connected = model
                        .current_user()
                        .await
                        .is_some_and(|u| u.spotify_connected);
                    if connected {
                        model.set_confirm_disconnect(true).await;
                    }
                }
                _ => {}
            },
            Some(DashboardTab::Music) => match key.code {
                KeyCode::Left => model.music_panel_prev().await,
                KeyCode::Right => model.music_panel_next().await,
                KeyCode::Up => model.music_move_selection(-1).await,
                KeyCode::Down => model.music_move_selection(1).await,
                KeyCode::Char('t') | KeyCode::Char('T') => {
                    drop(model);
                    self.reload_time_ranged().await;
                }
                _ => {}
            },
            Some(DashboardTab::Discover) => match key.code {
                KeyCode::Left => {
                    if !model.discover_dragging().await {
                        model.discover_drag_start().await;
                    }
                    model.discover_nudge(-NUDGE_COLS).await;
                }
                KeyCode::Right => {
                    if !model.discover_dragging().await {
                        model.discover_drag_start().await;
                    }
                    model.discover_nudge(NUDGE_COLS).await;
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    model.discover_drag_end(viewport_cols, now).await;
                }
                _ => {}
            },
            Some(DashboardTab::Profile) => match key.code {
                KeyCode::Char('x') | KeyCode::Char('X') => {
                    drop(model);
                    self.logout().await;
                }
                _ => {}
            },
            None => {}
        }
        Ok(())
    }

    /// Mouse input drives the Discover deck: press starts a drag, motion
    /// feeds it, release hands the offset to the swipe decision.
    pub async fn handle_mouse_event(
        &self,
        mouse: MouseEvent,
        viewport_cols: f32,
        now: Instant,
    ) -> Result<()> {
        let model = self.model.lock().await;

        let on_discover = model.get_screen().await == Screen::Dashboard
            && model.dashboard_tab().await == Some(DashboardTab::Discover);
        if !on_discover {
            self.pointer_origin.lock().await.take();
            return Ok(());
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if model.discover_drag_start().await {
                    *self.pointer_origin.lock().await = Some((mouse.column, mouse.row));
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((ox, oy)) = *self.pointer_origin.lock().await {
                    let dx = mouse.column as i32 - ox as i32;
                    let dy = mouse.row as i32 - oy as i32;
                    model.discover_drag_move(dx as f32, dy as f32).await;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.pointer_origin.lock().await.take().is_some() {
                    model.discover_drag_end(viewport_cols, now).await;
                }
            }
            _ => {}
        }
        Ok(())
    }
}
