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

use serde_json::json;

use crate::app::{App, Focus, MAIN_HELP, MODAL_HELP};
use crate::draft::{ValidationError, ABSENT, PRESENT};
use crate::logger;

// ===== Dialog visibility =====

pub fn open_mark_modal(app: &mut App) {
    app.show_mark_modal = true;
    app.focus = Focus::Marks;
    app.status = MODAL_HELP.to_string();
    logger::log_event("modal_opened", json!({ "student": app.student }));
}

/// Hide the dialog. Safe to call when already closed. Field values are kept;
/// only a successful save resets the form.
pub fn close_mark_modal(app: &mut App) {
    if app.show_mark_modal {
        logger::log_event("modal_closed", json!({}));
    }
    app.show_mark_modal = false;
    app.show_delete_confirm = false;
    app.status = MAIN_HELP.to_string();
}

// ===== Mark selection =====

pub fn select_mark(app: &mut App, idx: usize) {
    let Some(value) = app.mark_options.get(idx).cloned() else {
        return;
    };
    app.selected_mark = Some(idx);
    app.marks_cursor = idx;
    app.status = format!("Выбрана оценка: {} | {}", value, app.delete_hint());
    logger::log_event("mark_selected", json!({ "mark": value }));
}

pub fn request_delete_mark(app: &mut App) {
    if !app.delete_enabled() {
        // Disabled control: no confirmation, just surface its tooltip.
        app.status = app.delete_hint().to_string();
        return;
    }
    app.show_delete_confirm = true;
}

pub fn apply_delete_mark(app: &mut App) {
    if !app.show_delete_confirm {
        return;
    }
    app.show_delete_confirm = false;
    match app.selected_mark.take() {
        Some(idx) => {
            let value = app.mark_options.get(idx).cloned().unwrap_or_default();
            app.status = format!("Оценка удалена | {}", app.delete_hint());
            logger::log_event("mark_deleted", json!({ "mark": value }));
        }
        None => {
            app.warning_message = ValidationError::NothingToDelete.to_string();
            app.show_warning_popup = true;
        }
    }
}

pub fn cancel_delete_mark(app: &mut App) {
    app.show_delete_confirm = false;
}

// ===== Mark type and attendance =====

pub fn cycle_mark_type(app: &mut App, delta: isize) {
    let len = app.mark_types.len() as isize;
    if len == 0 {
        return;
    }
    app.mark_type_idx = (app.mark_type_idx as isize + delta).rem_euclid(len) as usize;
    let t = app.current_mark_type();
    app.status = format!("Тип оценки: {}", t.label);
    logger::log_event(
        "mark_type_changed",
        json!({ "value": t.value, "label": t.label }),
    );
    if t.value == "exam" {
        // Extension point: exam marks are expected to grow extra fields.
        logger::log_event("exam_type_selected", json!({}));
    }
}

pub fn toggle_attendance(app: &mut App) {
    app.attendance = !app.attendance;
    let status = if app.attendance { PRESENT } else { ABSENT };
    app.status = format!("Статус посещения: {}", status);
    logger::log_event("attendance_changed", json!({ "status": status }));
}

// ===== Extra mark (not implemented yet) =====

pub fn request_add_mark(app: &mut App) {
    app.warning_message =
        "Функционал \"Еще отметка\" в разработке. Здесь можно добавить форму для дополнительной отметки."
            .to_string();
    app.show_warning_popup = true;
}

// ===== Save =====

pub fn save_mark(app: &mut App) {
    if !app.show_mark_modal {
        return;
    }
    match app.draft().into_submission(&app.student) {
        Ok(submission) => {
            logger::log_event(
                "mark_saved",
                serde_json::to_value(&submission).unwrap_or_else(|_| json!({})),
            );
            let delivery = app.sink.submit(&submission);
            app.saved_message = submission.report();
            app.show_saved_popup = true;
            app.last_submission = Some(submission);
            close_mark_modal(app);
            reset_mark_form(app);
            if let Err(e) = delivery {
                app.status = format!("Не удалось передать данные: {}", e);
            }
        }
        Err(e) => {
            app.warning_message = e.to_string();
            app.show_warning_popup = true;
        }
    }
}

pub fn reset_mark_form(app: &mut App) {
    app.selected_mark = None;
    app.marks_cursor = 0;
    app.comment_input.clear();
    app.attendance = false;
    app.mark_type_idx = 0;
}

// ===== Popup dismissal =====

pub fn dismiss_warning(app: &mut App) {
    app.show_warning_popup = false;
    app.warning_message.clear();
}

pub fn dismiss_saved_report(app: &mut App) {
    app.show_saved_popup = false;
    app.saved_message.clear();
}
