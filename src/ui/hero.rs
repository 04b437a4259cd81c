//! Hero slider
//!
//! Rotates through the featured shows every few seconds. Any manual
//! navigation pauses the rotation, which resumes after a longer quiet spell.

use std::time::{Duration, Instant};

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::models::{image_url, ImageSize, ShowSummary};
use crate::ui::Theme;

/// Time between automatic advances
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_secs(5);

/// Quiet spell after manual navigation before autoplay resumes
pub const RESUME_AFTER: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HeroSlider {
    pub shows: Vec<ShowSummary>,
    pub current: usize,
    last_advance: Instant,
    paused_until: Option<Instant>,
}

impl HeroSlider {
    pub fn new(shows: Vec<ShowSummary>, now: Instant) -> Self {
        Self {
            shows,
            current: 0,
            last_advance: now,
            paused_until: None,
        }
    }

    /// Replace the slides and restart from the first one
    pub fn set_shows(&mut self, shows: Vec<ShowSummary>, now: Instant) {
        *self = Self::new(shows, now);
    }

    pub fn current_show(&self) -> Option<&ShowSummary> {
        self.shows.get(self.current)
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    pub fn is_autoplaying(&self, now: Instant) -> bool {
        self.shows.len() > 1 && self.paused_until.map_or(true, |until| now >= until)
    }

    /// Advance on schedule; returns whether the slide changed
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.shows.len() <= 1 {
            return false;
        }

        if let Some(until) = self.paused_until {
            if now < until {
                return false;
            }
            // Interval restarts from the moment autoplay resumed
            self.paused_until = None;
            self.last_advance = until;
        }

        if now.saturating_duration_since(self.last_advance) < AUTOPLAY_INTERVAL {
            return false;
        }

        self.current = (self.current + 1) % self.shows.len();
        self.last_advance = now;
        true
    }

    pub fn next(&mut self, now: Instant) {
        if self.shows.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.shows.len();
        self.pause(now);
    }

    pub fn prev(&mut self, now: Instant) {
        if self.shows.is_empty() {
            return;
        }
        self.current = (self.current + self.shows.len() - 1) % self.shows.len();
        self.pause(now);
    }

    /// Jump to a slide via its indicator dot
    pub fn go_to(&mut self, index: usize, now: Instant) {
        if index < self.shows.len() {
            self.current = index;
            self.pause(now);
        }
    }

    fn pause(&mut self, now: Instant) {
        self.paused_until = Some(now + RESUME_AFTER);
    }

    /// `● ○ ○ ○ ○`
    pub fn indicators(&self) -> String {
        (0..self.shows.len())
            .map(|i| if i == self.current { "●" } else { "○" })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_style = if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(" FEATURED ", Theme::title()));

        let Some(show) = self.current_show() else {
            let empty = Paragraph::new("Nothing featured right now")
                .style(Theme::dimmed())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        };

        let mut lines = vec![Line::from(vec![
            Span::styled("▶ ", Theme::accent()),
            Span::styled(show.name.clone(), Theme::title()),
        ])];

        let mut meta = Vec::new();
        if let Some(rating) = show.rating_label() {
            meta.push(Span::styled(
                format!("★ {}", rating),
                Theme::rating(show.vote_average, false),
            ));
        }
        if let Some(year) = show.year() {
            if !meta.is_empty() {
                meta.push(Span::styled(" │ ", Theme::dimmed()));
            }
            meta.push(Span::styled(year.to_string(), Theme::year()));
        }
        if !meta.is_empty() {
            lines.push(Line::from(meta));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(show.overview.clone(), Theme::text())));

        if let Some(url) = image_url(show.backdrop_path.as_deref(), ImageSize::Original) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(url, Theme::dimmed())));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[Enter]", Theme::keybind()),
            Span::styled(" More Info  ", Theme::secondary()),
            Span::styled("[←/→]", Theme::keybind()),
            Span::styled(" Slide  ", Theme::secondary()),
            Span::styled(self.indicators(), Theme::accent()),
        ]));

        let paragraph = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
    }
}
