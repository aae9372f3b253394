use super::{hint_line, truncate_start};
use crate::theme::Theme;
use agent_context_core::{paths::display_with_tilde, state::AppState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let failed = state.records.iter().filter(|r| !r.ok).count();
    let linked = state.records.len() - failed;
    let border = if failed == 0 {
        theme.success
    } else {
        theme.warning
    };

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Workspace ready: {linked} linked, {failed} failed "))
        .border_style(Style::default().fg(border));
    let width = usize::from(block.inner(chunks[0]).width);

    let mut lines: Vec<Line> = Vec::new();
    for record in &state.records {
        let name = record.source_name();
        if record.ok {
            let destination = record
                .destination
                .as_deref()
                .map(display_with_tilde)
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled("✓ ", Style::default().fg(theme.success)),
                Span::raw(name),
                Span::styled(
                    format!(" → {destination}"),
                    Style::default().fg(theme.muted),
                ),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled("✗ ", Style::default().fg(theme.error)),
                Span::raw(name),
                Span::styled(
                    format!(": {}", record.message),
                    Style::default().fg(theme.error),
                ),
            ]));
        }
    }

    if let Some(target) = &state.target {
        let target = target.display().to_string();
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Workspace: ", Style::default().fg(theme.muted)),
            Span::styled(
                truncate_start(&target, width.saturating_sub(11)),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Next: ", Style::default().fg(theme.muted)),
            Span::raw(truncate_start(
                &format!("cd {target}"),
                width.saturating_sub(6),
            )),
        ]));
    }

    f.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    let seconds = state.session.exit_delay.as_secs_f32();
    let closing = format!("exit (closing in {seconds:.0}s)");
    let hints = hint_line(&[("enter/esc", closing.as_str())], theme);
    f.render_widget(Paragraph::new(hints), chunks[1]);
}
