//! Episode viewer
//!
//! Episode list for one season on the left, the focused episode on the right.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::models::{image_url, Episode, ImageSize, SeasonDetail};
use crate::ui::Theme;

#[derive(Debug, Clone, Default)]
pub struct EpisodeViewer {
    pub season_number: u32,
    pub episodes: Vec<Episode>,
    pub current: usize,
    pub focused: bool,
}

impl EpisodeViewer {
    pub fn new(season: SeasonDetail) -> Self {
        Self {
            season_number: season.season_number,
            episodes: season.episodes,
            current: 0,
            focused: true,
        }
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.episodes.get(self.current)
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn next(&mut self) {
        if self.current + 1 < self.episodes.len() {
            self.current += 1;
        }
    }

    pub fn prev(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Jump to an index in the list; out-of-range is ignored
    pub fn jump(&mut self, index: usize) {
        if index < self.episodes.len() {
            self.current = index;
        }
    }

    pub fn first(&mut self) {
        self.current = 0;
    }

    pub fn last(&mut self) {
        self.current = self.episodes.len().saturating_sub(1);
    }

    pub fn season_label(&self) -> String {
        format!("Season {}", self.season_number)
    }

    pub fn count_label(&self) -> String {
        format!("{} Episodes", self.episodes.len())
    }

    /// "3 of 10"
    pub fn position_label(&self) -> String {
        format!("{} of {}", self.current + 1, self.episodes.len())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let title = format!(" {} • {} ", self.season_label(), self.count_label());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(title, Theme::title()));

        if self.episodes.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("No Episodes Available", Theme::title())),
                Line::from(Span::styled(
                    "Episodes for this season are not available yet.",
                    Theme::dimmed(),
                )),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let block = block.title(
            Line::from(Span::styled(
                format!(" {} ", self.position_label()),
                Theme::accent(),
            ))
            .right_aligned(),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(inner);

        self.render_list(frame, chunks[0]);
        self.render_current(frame, chunks[1]);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let visible_height = area.height as usize;
        let offset = if self.current >= visible_height {
            self.current - visible_height + 1
        } else {
            0
        };

        let items: Vec<ListItem> = self
            .episodes
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible_height)
            .map(|(i, ep)| {
                let is_selected = i == self.current;
                let marker = if is_selected { "▸ " } else { "  " };
                let line = Line::from(vec![
                    Span::styled(
                        marker,
                        if is_selected {
                            Theme::accent()
                        } else {
                            Theme::dimmed()
                        },
                    ),
                    Span::styled(format!("E{:02} ", ep.episode_number), Theme::secondary()),
                    Span::styled(
                        ep.name.clone(),
                        if is_selected {
                            Theme::list_item_selected()
                        } else {
                            Theme::text()
                        },
                    ),
                ]);
                ListItem::new(line)
            })
            .collect();

        frame.render_widget(List::new(items), area);
    }

    fn render_current(&self, frame: &mut Frame, area: Rect) {
        let Some(ep) = self.current_episode() else {
            return;
        };

        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("S{:02}E{:02} ", ep.season_number, ep.episode_number),
                Theme::secondary(),
            ),
            Span::styled(ep.name.clone(), Theme::title()),
        ])];

        let mut meta = Vec::new();
        if let Some(runtime) = ep.runtime_label() {
            meta.push(Span::styled(runtime, Theme::duration()));
        }
        if let Some(date) = ep.air_date.as_deref().filter(|d| !d.is_empty()) {
            if !meta.is_empty() {
                meta.push(Span::styled(" │ ", Theme::dimmed()));
            }
            meta.push(Span::styled(date.to_string(), Theme::year()));
        }
        if let Some(rating) = ep.rating_label() {
            if !meta.is_empty() {
                meta.push(Span::styled(" │ ", Theme::dimmed()));
            }
            meta.push(Span::styled(
                format!("★ {}", rating),
                Theme::rating(ep.vote_average, false),
            ));
        }
        if !meta.is_empty() {
            lines.push(Line::from(meta));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            ep.overview_or_placeholder().to_string(),
            Theme::text(),
        )));

        if let Some(url) = image_url(ep.still_path.as_deref(), ImageSize::Original) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(url, Theme::dimmed())));
        }

        let paragraph = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::LEFT).border_style(Theme::border()));
        frame.render_widget(paragraph, area);
    }
}
