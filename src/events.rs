/*
 * This file is part of Markpad.
 *
 * Copyright (C) 2025 Markpad contributors
 *
 * Markpad is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Markpad is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Markpad. If not, see <https://www.gnu.org/licenses/>.
 */

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{App, Focus};
use crate::handlers::*;

/// Main event handler that processes keyboard input.
/// Returns Ok(true) when the application should quit.
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> anyhow::Result<bool> {
    let KeyEvent { code, modifiers, .. } = key_event;

    // Popups first (highest priority)
    if handle_popup_events(app, code) {
        return Ok(false);
    }

    if app.show_mark_modal {
        return handle_modal_events(app, code, modifiers);
    }

    handle_global_events(app, code)
}

/// Handle all popup-related events. Returns true when the event was consumed.
fn handle_popup_events(app: &mut App, code: KeyCode) -> bool {
    if app.show_warning_popup {
        if matches!(code, KeyCode::Esc | KeyCode::Enter) {
            dismiss_warning(app);
        }
        return true;
    }

    if app.show_saved_popup {
        if matches!(code, KeyCode::Esc | KeyCode::Enter) {
            dismiss_saved_report(app);
        }
        return true;
    }

    if app.show_delete_confirm {
        match code {
            KeyCode::Esc => cancel_delete_mark(app),
            KeyCode::Enter => apply_delete_mark(app),
            _ => {}
        }
        return true;
    }

    false
}

/// Handle events while the mark dialog is open.
fn handle_modal_events(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> anyhow::Result<bool> {
    // Save works from any focus, including the comment field.
    if matches!(code, KeyCode::Char('s' | 'S')) && modifiers.contains(KeyModifiers::CONTROL) {
        save_mark(app);
        return Ok(false);
    }

    match code {
        KeyCode::Esc => {
            close_mark_modal(app);
            return Ok(false);
        }
        KeyCode::Tab => {
            app.focus_next();
            return Ok(false);
        }
        KeyCode::BackTab => {
            app.focus_prev();
            return Ok(false);
        }
        _ => {}
    }

    // Single-key commands everywhere except the comment field, where
    // characters belong to the text.
    if app.focus != Focus::Comment {
        match code {
            KeyCode::Char('s') => {
                save_mark(app);
                return Ok(false);
            }
            KeyCode::Char('d') => {
                request_delete_mark(app);
                return Ok(false);
            }
            KeyCode::Char('a') => {
                request_add_mark(app);
                return Ok(false);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(idx) = app.mark_options.iter().position(|m| m == &c.to_string()) {
                    select_mark(app, idx);
                }
                return Ok(false);
            }
            _ => {}
        }
    }

    match app.focus {
        Focus::Marks => match code {
            KeyCode::Left => {
                app.marks_cursor = app.marks_cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                if app.marks_cursor + 1 < app.mark_options.len() {
                    app.marks_cursor += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => select_mark(app, app.marks_cursor),
            _ => {}
        },
        Focus::Attendance => {
            if matches!(code, KeyCode::Char(' ') | KeyCode::Enter) {
                toggle_attendance(app);
            }
        }
        Focus::MarkType => match code {
            KeyCode::Left | KeyCode::Up => cycle_mark_type(app, -1),
            KeyCode::Right | KeyCode::Down => cycle_mark_type(app, 1),
            _ => {}
        },
        Focus::Comment => match code {
            KeyCode::Char(c) => app.comment_input.push(c),
            KeyCode::Backspace => {
                app.comment_input.pop();
            }
            _ => {}
        },
    }

    Ok(false)
}

/// Handle journal-screen events (lowest priority). Esc while the dialog is
/// closed is a strict no-op; only 'q' quits.
fn handle_global_events(app: &mut App, code: KeyCode) -> anyhow::Result<bool> {
    match code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Enter | KeyCode::Char('o') => open_mark_modal(app),
        _ => {}
    }
    Ok(false)
}

/// A left-click on the backdrop (outside the dialog rectangle) closes the
/// dialog; clicks inside it, or while a popup is on top, do nothing.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    if app.show_warning_popup || app.show_saved_popup || app.show_delete_confirm {
        return;
    }
    if !app.show_mark_modal {
        return;
    }
    let area = crate::ui::mark_modal_area(app.viewport);
    if !area.contains(Position::new(mouse.column, mouse.row)) {
        close_mark_modal(app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::create_test_app;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_on_q() {
        let mut app = create_test_app();
        assert!(handle_key_event(&mut app, key(KeyCode::Char('q'))).unwrap());
    }

    #[test]
    fn test_escape_while_closed_is_noop() {
        let mut app = create_test_app();
        let quit = handle_key_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(!quit);
        assert!(!app.show_mark_modal);
        assert!(!app.show_warning_popup);
        assert_eq!(app.status, crate::app::MAIN_HELP);
    }

    #[test]
    fn test_enter_opens_modal_escape_closes() {
        let mut app = create_test_app();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.show_mark_modal);

        let quit = handle_key_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(!quit);
        assert!(!app.show_mark_modal);
    }

    #[test]
    fn test_digit_selects_mark() {
        let mut app = create_test_app();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Char('5'))).unwrap();
        assert_eq!(app.selected_mark, Some(4));
    }

    #[test]
    fn test_space_selects_mark_under_cursor() {
        let mut app = create_test_app();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Right)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Right)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert_eq!(app.selected_mark, Some(2));
    }

    #[test]
    fn test_comment_focus_consumes_command_keys() {
        let mut app = create_test_app();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        app.focus = Focus::Comment;
        for c in ['s', 'd', 'a', '5'] {
            handle_key_event(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        assert_eq!(app.comment_input, "sda5");
        assert!(app.show_mark_modal);
        assert_eq!(app.selected_mark, None);

        handle_key_event(&mut app, key(KeyCode::Backspace)).unwrap();
        assert_eq!(app.comment_input, "sda");
    }

    #[test]
    fn test_ctrl_s_saves_from_comment_focus() {
        let mut app = create_test_app();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Char('4'))).unwrap();
        app.focus = Focus::Comment;
        let ev = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        handle_key_event(&mut app, ev).unwrap();
        assert!(!app.show_mark_modal);
        assert!(app.show_saved_popup);
    }

    #[test]
    fn test_popup_priority_over_modal_keys() {
        let mut app = create_test_app();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert!(app.show_warning_popup);

        // 'd' would normally be the delete command; the popup swallows it
        handle_key_event(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert!(app.show_warning_popup);
        assert!(!app.show_delete_confirm);

        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(!app.show_warning_popup);
    }

    #[test]
    fn test_delete_confirm_flow_via_keys() {
        let mut app = create_test_app();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Char('3'))).unwrap();
        handle_key_event(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert!(app.show_delete_confirm);

        // Esc rejects: selection unchanged
        handle_key_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(!app.show_delete_confirm);
        assert_eq!(app.selected_mark, Some(2));
        assert!(app.show_mark_modal);

        // Enter confirms: selection cleared
        handle_key_event(&mut app, key(KeyCode::Char('d'))).unwrap();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.selected_mark, None);
    }

    #[test]
    fn test_attendance_toggle_via_keys() {
        let mut app = create_test_app();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, Focus::Attendance);
        handle_key_event(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(app.attendance);
    }

    #[test]
    fn test_mark_type_cycle_via_keys() {
        let mut app = create_test_app();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        app.focus = Focus::MarkType;
        handle_key_event(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.mark_type_idx, 1);
        handle_key_event(&mut app, key(KeyCode::Left)).unwrap();
        assert_eq!(app.mark_type_idx, 0);
    }

    #[test]
    fn test_outside_click_closes_modal() {
        let mut app = create_test_app();
        app.viewport = ratatui::layout::Rect::new(0, 0, 100, 40);
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();

        // top-left corner is outside the centered dialog
        handle_mouse_event(&mut app, click(0, 0));
        assert!(!app.show_mark_modal);
    }

    #[test]
    fn test_inside_click_keeps_modal_open() {
        let mut app = create_test_app();
        app.viewport = ratatui::layout::Rect::new(0, 0, 100, 40);
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();

        let area = crate::ui::mark_modal_area(app.viewport);
        handle_mouse_event(&mut app, click(area.x + 1, area.y + 1));
        assert!(app.show_mark_modal);
    }

    #[test]
    fn test_click_ignored_when_popup_open() {
        let mut app = create_test_app();
        app.viewport = ratatui::layout::Rect::new(0, 0, 100, 40);
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert!(app.show_warning_popup);

        handle_mouse_event(&mut app, click(0, 0));
        assert!(app.show_mark_modal);
        assert!(app.show_warning_popup);
    }

    #[test]
    fn test_click_ignored_when_modal_closed() {
        let mut app = create_test_app();
        app.viewport = ratatui::layout::Rect::new(0, 0, 100, 40);
        handle_mouse_event(&mut app, click(0, 0));
        assert!(!app.show_mark_modal);
    }

    // crossterm key events carry kind/state; make sure destructuring stays
    // compatible with explicitly constructed events too.
    #[test]
    fn test_full_key_event_struct() {
        let mut app = create_test_app();
        let ev = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        handle_key_event(&mut app, ev).unwrap();
        assert!(app.show_mark_modal);
    }
}
