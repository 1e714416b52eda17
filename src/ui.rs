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

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::app::{App, Focus};
use crate::draft::{ABSENT, PRESENT};

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Rectangle of the mark dialog. Shared between the renderer and the mouse
/// hit test so clicks on the backdrop are judged against the drawn area.
pub fn mark_modal_area(size: Rect) -> Rect {
    centered_rect(62, 72, size)
}

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(2)])
        .split(size);

    // Header
    let header_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Журнал ");
    let header = Paragraph::new(format!("Ученик: {}", app.student))
        .block(header_block)
        .alignment(Alignment::Left);
    f.render_widget(header, chunks[0]);

    // Body: last saved mark, if any
    let body_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Последняя запись ");
    let body_inner = body_block.inner(chunks[1]);
    f.render_widget(body_block, chunks[1]);
    let body_lines: Vec<Line> = match &app.last_submission {
        Some(sub) => vec![
            Line::from(format!("Оценка: {} ({})", sub.mark, sub.mark_type_text)),
            Line::from(format!("Посещение: {}", sub.attendance)),
            Line::from(format!("Комментарий: \"{}\"", sub.comment)),
        ],
        None => vec![
            Line::from("Оценок пока нет."),
            Line::from(""),
            Line::from("Нажмите Enter, чтобы выставить оценку."),
        ],
    };
    let body = Paragraph::new(body_lines).wrap(Wrap { trim: false });
    f.render_widget(body, body_inner);

    if app.show_mark_modal {
        render_mark_modal(f, app, size);
    }

    if app.show_delete_confirm {
        render_delete_confirm(f, app, size);
    }
    if app.show_saved_popup {
        render_saved_popup(f, app, size);
    }
    if app.show_warning_popup {
        render_warning_popup(f, app, size);
    }

    // Status + static key help
    let status_lines = vec![
        Line::from(app.status.as_str()),
        Line::from("Клавиши: Tab раздел | ←/→ выбор | Space отметить | 1-9 оценка | s сохранить | d удалить | a ещё отметка | Esc закрыть | q выход"),
    ];
    let status = Paragraph::new(status_lines).style(Style::default().fg(Color::Gray));
    f.render_widget(status, chunks[2]);
}

fn section_block(title: &str, focused: bool) -> Block<'_> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title);
    if focused {
        block.border_style(Style::default().fg(Color::Cyan))
    } else {
        block
    }
}

fn render_mark_modal(f: &mut Frame, app: &App, size: Rect) {
    let area = mark_modal_area(size);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Выставление оценки ");
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let student = Paragraph::new(format!("Студент: {}", app.student));
    f.render_widget(student, chunks[0]);

    // Mark options as a radio row
    let marks_block = section_block(" Оценка ", app.focus == Focus::Marks);
    let marks_inner = marks_block.inner(chunks[1]);
    f.render_widget(marks_block, chunks[1]);
    let mut spans: Vec<Span> = Vec::new();
    for (i, value) in app.mark_options.iter().enumerate() {
        let radio = if app.selected_mark == Some(i) { "(o)" } else { "( )" };
        let text = format!(" {} {} ", radio, value);
        let style = if app.focus == Focus::Marks && i == app.marks_cursor {
            Style::default().add_modifier(Modifier::REVERSED)
        } else if app.selected_mark == Some(i) {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        spans.push(Span::styled(text, style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), marks_inner);

    // Attendance toggle
    let attendance_block = section_block(" Посещение ", app.focus == Focus::Attendance);
    let attendance_inner = attendance_block.inner(chunks[2]);
    f.render_widget(attendance_block, chunks[2]);
    let attendance_text = if app.attendance {
        format!("[x] {}", PRESENT)
    } else {
        format!("[ ] {}", ABSENT)
    };
    f.render_widget(Paragraph::new(attendance_text), attendance_inner);

    // Mark type selector
    let mark_type_block = section_block(" Тип оценки ", app.focus == Focus::MarkType);
    let mark_type_inner = mark_type_block.inner(chunks[3]);
    f.render_widget(mark_type_block, chunks[3]);
    let t = app.current_mark_type();
    f.render_widget(Paragraph::new(format!("◄ {} ►", t.label)), mark_type_inner);

    // Comment field
    let comment_block = section_block(" Комментарий ", app.focus == Focus::Comment);
    let comment_inner = comment_block.inner(chunks[4]);
    f.render_widget(comment_block, chunks[4]);
    let comment_text = if app.focus == Focus::Comment {
        format!("{}_", app.comment_input)
    } else {
        app.comment_input.clone()
    };
    f.render_widget(
        Paragraph::new(comment_text).wrap(Wrap { trim: false }),
        comment_inner,
    );

    // Delete control state, rendered as its tooltip
    let delete_style = if app.delete_enabled() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let delete_line = Line::from(Span::styled(format!("d: {}", app.delete_hint()), delete_style));
    f.render_widget(Paragraph::new(delete_line), chunks[5]);
}

fn render_delete_confirm(f: &mut Frame, app: &App, size: Rect) {
    let area = centered_rect(50, 30, size);
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Подтверждение ")
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let value = app.selected_mark_value().unwrap_or("?");
    let lines = vec![
        Line::from(format!("Удалить оценку {}?", value)),
        Line::from(""),
        Line::from("Enter: удалить  |  Esc: отмена"),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}

fn render_saved_popup(f: &mut Frame, app: &App, size: Rect) {
    let area = centered_rect(55, 50, size);
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Сохранено ")
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = app.saved_message.lines().map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from("Enter или Esc: закрыть"));
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_warning_popup(f: &mut Frame, app: &App, size: Rect) {
    let area = centered_rect(50, 30, size);
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Внимание ")
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(app.warning_message.as_str()),
        Line::from(""),
        Line::from("Enter или Esc: закрыть"),
    ];
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Left).wrap(Wrap { trim: false }),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_centered() {
        let outer = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 50, outer);
        assert_eq!(rect.width, 50);
        assert_eq!(rect.height, 20);
        assert_eq!(rect.x, 25);
        assert_eq!(rect.y, 10);
    }

    #[test]
    fn test_modal_area_within_viewport() {
        let outer = Rect::new(0, 0, 100, 40);
        let area = mark_modal_area(outer);
        assert!(area.x > 0 && area.y > 0);
        assert!(area.right() < outer.right());
        assert!(area.bottom() < outer.bottom());
    }

    #[test]
    fn test_modal_area_leaves_backdrop() {
        use ratatui::layout::Position;
        let outer = Rect::new(0, 0, 80, 24);
        let area = mark_modal_area(outer);
        // the corners of the viewport stay clickable as backdrop
        assert!(!area.contains(Position::new(0, 0)));
        assert!(!area.contains(Position::new(79, 23)));
        assert!(area.contains(Position::new(40, 12)));
    }
}
