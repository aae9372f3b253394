use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, area: Rect, notice: &str, theme: &Theme) {
    let line = Paragraph::new(Span::styled(
        format!(" {notice}"),
        Style::default()
            .fg(theme.warning)
            .add_modifier(Modifier::BOLD),
    ))
    .wrap(Wrap { trim: true });
    f.render_widget(line, area);
}

/// Rows the notice needs at `width`, capped so the browser keeps most of the screen
pub fn height(notice: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let chars = notice.chars().count() + 1;
    u16::try_from(chars.div_ceil(width)).unwrap_or(u16::MAX).clamp(1, 3)
}
