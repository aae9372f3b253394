use super::{hint_line, spinner_frame, truncate_end, truncate_start};
use crate::theme::Theme;
use agent_context_core::{
    browser::{BrowseMode, DirectoryBrowser},
    workspace::display_name,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{rc::Rc, time::Instant};

fn layout(area: Rect, mode: BrowseMode) -> Rc<[Rect]> {
    let selection_rows = match mode {
        BrowseMode::Target => 0,
        BrowseMode::Projects => 1,
    };
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(selection_rows),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area)
}

/// Rows available to directory entries when the browser is drawn into `area`
pub fn list_rows(area: Rect, mode: BrowseMode) -> usize {
    let list_area = layout(area, mode)[3];
    usize::from(list_area.height.saturating_sub(2)).max(1)
}

pub fn draw(
    f: &mut Frame,
    area: Rect,
    browser: &DirectoryBrowser,
    theme: &Theme,
    start: &Instant,
) {
    let chunks = layout(area, browser.mode);

    // Header: what we're picking and where we are
    let title = match browser.mode {
        BrowseMode::Target => " agent-context: select target directory ",
        BrowseMode::Projects => " agent-context: select projects to link ",
    };
    let header = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme.accent));
    let path_width = usize::from(header.inner(chunks[0]).width);
    let path = truncate_start(&browser.current_dir.display().to_string(), path_width);
    f.render_widget(
        Paragraph::new(Span::styled(
            path,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .block(header),
        chunks[0],
    );

    f.render_widget(Paragraph::new(filter_line(browser, theme)), chunks[1]);

    if browser.mode == BrowseMode::Projects {
        let width = usize::from(chunks[2].width);
        f.render_widget(
            Paragraph::new(selection_line(browser, theme, width)),
            chunks[2],
        );
    }

    draw_list(f, chunks[3], browser, theme, start);

    let hints: &[(&str, &str)] = match browser.mode {
        BrowseMode::Target => &[
            ("↑↓", "move"),
            ("←→", "up/into"),
            ("enter/space", "use this directory"),
            ("esc", "quit"),
        ],
        BrowseMode::Projects => &[
            ("↑↓", "move"),
            ("←→", "up/into"),
            ("space", "toggle"),
            ("enter", "link"),
            ("esc", "quit"),
        ],
    };
    f.render_widget(Paragraph::new(hint_line(hints, theme)), chunks[4]);
}

fn filter_line<'a>(browser: &'a DirectoryBrowser, theme: &Theme) -> Line<'a> {
    if browser.filter.is_empty() {
        return Line::from(Span::styled(
            " Type to filter",
            Style::default().fg(theme.muted),
        ));
    }
    Line::from(vec![
        Span::styled(" Filter: ", Style::default().fg(theme.muted)),
        Span::styled(
            browser.filter.as_str(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {} of {} shown",
                browser.filtered_len(),
                browser.entries.len()
            ),
            Style::default().fg(theme.muted),
        ),
    ])
}

fn selection_line(browser: &DirectoryBrowser, theme: &Theme, width: usize) -> Line<'static> {
    let selection = &browser.selection;
    if selection.is_empty() {
        return Line::from(Span::styled(
            " Nothing selected (enter links the highlighted entry)",
            Style::default().fg(theme.muted),
        ));
    }
    let label = format!(" Selected ({}): ", selection.len());
    let names = selection
        .paths()
        .iter()
        .map(|p| display_name(p))
        .collect::<Vec<_>>()
        .join(", ");
    let names = truncate_end(&names, width.saturating_sub(label.len()));
    Line::from(vec![
        Span::styled(label, Style::default().fg(theme.success)),
        Span::raw(names),
    ])
}

fn draw_list(
    f: &mut Frame,
    area: Rect,
    browser: &DirectoryBrowser,
    theme: &Theme,
    start: &Instant,
) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    if !browser.is_at_root() {
        block = block.title(Span::styled(" ← .. ", Style::default().fg(theme.muted)));
    }
    if browser.has_more_above() {
        block = block.title_top(Line::from(" ↑ more above ").right_aligned());
    }
    if browser.has_more_below() {
        block = block.title_bottom(Line::from(" ↓ more below ").right_aligned());
    }

    if let Some(message) = placeholder(browser, start) {
        f.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(theme.muted))).block(block),
            area,
        );
        return;
    }

    let range = browser.visible_range();
    let items: Vec<ListItem> = browser.filtered[range.clone()]
        .iter()
        .map(|&i| {
            let name = browser.entries[i].as_str();
            let mut spans = Vec::with_capacity(2);
            if browser.mode == BrowseMode::Projects {
                let selected = browser.selection.contains(&browser.current_dir.join(name));
                spans.push(if selected {
                    Span::styled("[x] ", Style::default().fg(theme.success))
                } else {
                    Span::styled("[ ] ", Style::default().fg(theme.muted))
                });
            }
            spans.push(Span::raw(format!("{name}/")));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.accent)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(Some(browser.cursor.saturating_sub(range.start)));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn placeholder(browser: &DirectoryBrowser, start: &Instant) -> Option<String> {
    if browser.loading {
        Some(format!("{} Loading…", spinner_frame(start)))
    } else if browser.entries.is_empty() {
        Some("No subdirectories here".to_string())
    } else if browser.filtered.is_empty() {
        Some(format!("No matches for '{}'", browser.filter))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_list_rows_subtracts_chrome() {
        let area = Rect::new(0, 0, 80, 24);
        // header 3 + filter 1 + footer 1 + borders 2
        assert_eq!(list_rows(area, BrowseMode::Target), 17);
        // plus the selection summary row
        assert_eq!(list_rows(area, BrowseMode::Projects), 16);
    }

    #[test]
    fn test_list_rows_never_zero() {
        let area = Rect::new(0, 0, 80, 0);
        assert_eq!(list_rows(area, BrowseMode::Projects), 1);
    }

    #[test]
    fn test_placeholder_states() {
        let start = Instant::now();
        let mut browser = DirectoryBrowser::new(BrowseMode::Projects, PathBuf::from("/w"));
        assert!(placeholder(&browser, &start).unwrap().ends_with("Loading…"));

        browser.set_entries(&PathBuf::from("/w"), Vec::new());
        assert_eq!(
            placeholder(&browser, &start).as_deref(),
            Some("No subdirectories here")
        );

        browser.set_entries(&PathBuf::from("/w"), vec!["alpha".to_string()]);
        assert!(placeholder(&browser, &start).is_none());
        browser.push_filter('z');
        assert_eq!(
            placeholder(&browser, &start).as_deref(),
            Some("No matches for 'z'")
        );
    }
}
