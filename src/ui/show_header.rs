//! Show header: title, metadata line, genres and overview

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::models::{image_url, ImageSize, ShowDetail};
use crate::ui::Theme;

/// Metadata pieces in display order: rating, year, runtime, status
pub fn meta_parts(show: &ShowDetail) -> Vec<String> {
    let mut parts = Vec::new();
    if show.vote_average > 0.0 {
        parts.push(format!("★ {:.1}", show.vote_average));
    }
    if let Some(year) = show.year() {
        parts.push(year.to_string());
    }
    if let Some(runtime) = show.runtime() {
        parts.push(format!("{}m", runtime));
    }
    if !show.status.is_empty() {
        parts.push(show.status.clone());
    }
    parts
}

pub fn render_show_header(frame: &mut Frame, area: Rect, show: &ShowDetail, scroll: u16) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" SHOW ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(vec![
        Span::styled("▶ ", Theme::accent()),
        Span::styled(show.name.clone(), Theme::title()),
    ])];

    let mut meta = Vec::new();
    for (i, part) in meta_parts(show).into_iter().enumerate() {
        if i > 0 {
            meta.push(Span::styled(" │ ", Theme::dimmed()));
        }
        let style = if i == 0 && show.vote_average > 0.0 {
            Theme::rating(show.vote_average, false)
        } else {
            Theme::secondary()
        };
        meta.push(Span::styled(part, style));
    }
    if !meta.is_empty() {
        lines.push(Line::from(meta));
    }

    let genres = show.genres_str();
    if !genres.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Genre: ", Theme::dimmed()),
            Span::styled(genres, Theme::genre()),
        ]));
    }

    lines.push(Line::from(Span::styled(show.seasons_label(), Theme::accent())));

    lines.push(Line::from(Span::styled(
        "─".repeat(inner.width as usize),
        Theme::dimmed(),
    )));

    if !show.overview.is_empty() {
        lines.push(Line::from(Span::styled(show.overview.clone(), Theme::text())));
    }

    if let Some(url) = image_url(show.poster_path.as_deref(), ImageSize::W500) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Poster: ", Theme::dimmed()),
            Span::styled(url, Theme::dimmed()),
        ]));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, inner);
}
