use super::{centered_rect, hint_line, truncate_start};
use crate::theme::Theme;
use agent_context_core::{
    paths::display_with_tilde,
    state::{AppState, ModeChoice},
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let popup = centered_rect(70, 60, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" agent-context: choose workspace mode ")
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(inner);

    let width = usize::from(inner.width).saturating_sub(6);
    let preview = truncate_start(
        &display_with_tilde(&state.session.auto_target.session_path),
        width,
    );

    f.render_widget(
        option(
            "Automatic",
            &preview,
            state.mode_choice == ModeChoice::Automatic,
            theme,
        ),
        chunks[1],
    );
    f.render_widget(
        option(
            "Manual",
            "pick a target directory yourself",
            state.mode_choice == ModeChoice::Manual,
            theme,
        ),
        chunks[2],
    );

    let hints = hint_line(
        &[("↑↓", "switch"), ("enter", "confirm"), ("esc", "quit")],
        theme,
    );
    f.render_widget(Paragraph::new(hints).alignment(Alignment::Center), chunks[4]);
}

fn option<'a>(label: &'a str, detail: &str, highlighted: bool, theme: &Theme) -> Paragraph<'a> {
    let (marker, label_style) = if highlighted {
        (
            "▸ ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Style::default())
    };
    Paragraph::new(vec![
        Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(label, label_style),
        ]),
        Line::from(Span::styled(
            format!("    {detail}"),
            Style::default().fg(theme.muted),
        )),
    ])
}
