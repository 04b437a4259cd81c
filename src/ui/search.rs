//! Search box and results panel

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
};

use crate::models::{image_url, ImageSize, ShowSummary};
use crate::search::{SearchState, SearchView};
use crate::ui::Theme;

pub const SEARCH_PLACEHOLDER: &str = "Search TV shows...";

/// Input line; shows the cursor while editing
pub fn render_search_input(frame: &mut Frame, area: Rect, state: &SearchState, editing: bool) {
    let border_style = if editing {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let hint = if state.query.is_empty() {
        " [/] "
    } else {
        " [Ctrl+U] clear "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(" SEARCH ", Theme::title()))
        .title_bottom(Span::styled(hint, Theme::keybind()));

    let text = if editing {
        let split = state
            .query
            .char_indices()
            .nth(state.cursor)
            .map(|(i, _)| i)
            .unwrap_or(state.query.len());
        let (before, after) = state.query.split_at(split);
        format!("⌕ {}│{}", before, after)
    } else if state.query.is_empty() {
        format!("⌕ {}", SEARCH_PLACEHOLDER)
    } else {
        format!("⌕ {}", state.query)
    };

    let style = if editing {
        Theme::input().fg(Theme::ACCENT)
    } else if state.query.is_empty() {
        Theme::input().fg(Theme::DIM)
    } else {
        Theme::input()
    };

    frame.render_widget(Paragraph::new(text).style(style).block(block), area);
}

/// Dropdown panel below the search box
pub fn render_search_panel(frame: &mut Frame, area: Rect, state: &SearchState) {
    let view = state.view();
    if view == SearchView::Closed {
        return;
    }

    let title = match view {
        SearchView::Results(results) => format!(" RESULTS ({}) ", results.len()),
        _ => " RESULTS ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(title, Theme::title()));

    frame.render_widget(Clear, area);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match view {
        SearchView::Closed => {}
        SearchView::Loading => {
            let loading = Paragraph::new("⟳ Searching...")
                .style(Theme::loading())
                .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
        }
        SearchView::Prompt => {
            let prompt = Paragraph::new("Start typing to search for TV shows")
                .style(Theme::dimmed())
                .alignment(Alignment::Center);
            frame.render_widget(prompt, inner);
        }
        SearchView::NoResults(query) => {
            let empty = Paragraph::new(format!("No shows found for \"{}\"", query))
                .style(Theme::dimmed())
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
        }
        SearchView::Results(results) => {
            let highlighted = state.highlighted.unwrap_or(0);
            let items: Vec<ListItem> = results
                .iter()
                .enumerate()
                .map(|(i, show)| ListItem::new(result_lines(show, i == highlighted)))
                .collect();
            frame.render_widget(List::new(items), inner);
        }
    }
}

/// `▸ Name (2019) ★ 8.4`, plus the thumbnail URL under the highlighted row
fn result_lines(show: &ShowSummary, is_selected: bool) -> Vec<Line<'static>> {
    let marker = if is_selected { "▸ " } else { "  " };

    let mut spans = vec![
        Span::styled(
            marker,
            if is_selected {
                Theme::accent()
            } else {
                Theme::dimmed()
            },
        ),
        Span::styled(
            show.name.clone(),
            if is_selected {
                Theme::highlighted()
            } else {
                Theme::text()
            },
        ),
    ];

    if let Some(year) = show.year() {
        spans.push(Span::styled(format!(" ({})", year), Theme::year()));
    }

    if let Some(rating) = show.rating_label() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("★ {}", rating),
            Theme::rating(show.vote_average, is_selected),
        ));
    }

    let mut lines = vec![Line::from(spans)];
    if is_selected {
        if let Some(url) = image_url(show.poster_path.as_deref(), ImageSize::W92) {
            lines.push(Line::from(Span::styled(format!("  {}", url), Theme::dimmed())));
        }
    }
    lines
}
