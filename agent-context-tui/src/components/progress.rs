use super::{centered_rect, spinner_frame, truncate_start};
use crate::theme::Theme;
use agent_context_core::{paths::display_with_tilde, state::AppState, workspace::display_name};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Instant;

/// Full-screen spinner while the automatic workspace is being prepared
pub fn draw_preparing(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme, start: &Instant) {
    let centered = centered_rect(60, 20, area);
    let path = display_with_tilde(&state.session.auto_target.session_path);
    let width = usize::from(centered.width).saturating_sub(4);

    let text = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", spinner_frame(start)),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Preparing workspace"),
        ]),
        Line::from(Span::styled(
            truncate_start(&path, width),
            Style::default().fg(theme.muted),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    f.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center),
        centered,
    );
}

/// Link batch in progress: finished projects, the current one, and what is left
pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme, start: &Instant) {
    let target = state
        .target
        .as_deref()
        .map(display_with_tilde)
        .unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " Creating symlinks ({}/{}) ",
            state.records.len(),
            state.projects.len()
        ))
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(area);
    let width = usize::from(inner.width);

    let mut lines = vec![
        Line::from(Span::styled(
            truncate_start(&format!("into {target}"), width),
            Style::default().fg(theme.muted),
        )),
        Line::raw(""),
    ];
    lines.extend(project_lines(state, theme, spinner_frame(start)));

    // Keep the current project on screen when the list is taller than the area
    let height = usize::from(inner.height);
    let overflow = lines.len().saturating_sub(height);
    let scroll = overflow.min(state.progress.saturating_sub(height / 2));
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0)),
        area,
    );
}

fn project_lines<'a>(state: &AppState, theme: &Theme, spinner: &'a str) -> Vec<Line<'a>> {
    state
        .projects
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let name = display_name(project);
            if let Some(record) = state.records.get(i) {
                if record.ok {
                    Line::from(vec![
                        Span::styled("✓ ", Style::default().fg(theme.success)),
                        Span::raw(name),
                    ])
                } else {
                    Line::from(vec![
                        Span::styled("✗ ", Style::default().fg(theme.error)),
                        Span::raw(name),
                        Span::styled(
                            format!("  {}", record.message),
                            Style::default().fg(theme.error),
                        ),
                    ])
                }
            } else if i == state.progress {
                Line::from(vec![
                    Span::styled(format!("{spinner} "), Style::default().fg(theme.accent)),
                    Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
                ])
            } else {
                Line::from(Span::styled(
                    format!("· {name}"),
                    Style::default().fg(theme.muted),
                ))
            }
        })
        .collect()
}
