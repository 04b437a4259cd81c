//! Horizontal show carousel
//!
//! A titled row of poster cards. Selection moves one card at a time;
//! the arrows scroll a whole visible page like the on-screen buttons.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::ShowSummary;
use crate::ui::Theme;

/// Card width in cells, borders included
pub const CARD_WIDTH: u16 = 24;

#[derive(Debug, Clone, Default)]
pub struct CarouselView {
    pub title: String,
    /// Section id for header navigation
    pub anchor: String,
    pub items: Vec<ShowSummary>,
    pub selected: usize,
    /// First visible card
    pub offset: usize,
    pub focused: bool,
    /// Cards that fit on the last render
    visible: usize,
}

impl CarouselView {
    pub fn new(title: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            anchor: anchor.into(),
            visible: 1,
            ..Self::default()
        }
    }

    pub fn set_items(&mut self, items: Vec<ShowSummary>) {
        self.items = items;
        self.selected = 0;
        self.offset = 0;
    }

    pub fn current(&self) -> Option<&ShowSummary> {
        self.items.get(self.selected)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn visible(&self) -> usize {
        self.visible.max(1)
    }

    pub fn left(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    pub fn right(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
            if self.selected >= self.offset + self.visible() {
                self.offset = self.selected + 1 - self.visible();
            }
        }
    }

    /// Scroll back one page
    pub fn scroll_left(&mut self) {
        let page = self.visible();
        self.offset = self.offset.saturating_sub(page);
        self.selected = self.offset;
    }

    /// Scroll forward one page
    pub fn scroll_right(&mut self) {
        let page = self.visible();
        let max_offset = self.items.len().saturating_sub(page);
        self.offset = (self.offset + page).min(max_offset);
        self.selected = self.offset;
    }

    pub fn can_scroll_left(&self) -> bool {
        self.offset > 0
    }

    pub fn can_scroll_right(&self) -> bool {
        self.offset + self.visible() < self.items.len()
    }

    fn adjust_offset(&mut self) {
        let visible = self.visible();
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible {
            self.offset = self.selected + 1 - visible;
        }
        let max_offset = self.items.len().saturating_sub(visible);
        self.offset = self.offset.min(max_offset);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let left = if self.can_scroll_left() { "◀ " } else { "  " };
        let right = if self.can_scroll_right() { " ▶" } else { "  " };
        let position = if self.items.is_empty() {
            String::new()
        } else {
            format!(" ({}/{})", self.selected + 1, self.items.len())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(
                format!(" {}{}{}{} ", left, self.title, position, right),
                Theme::title(),
            ));

        if self.items.is_empty() {
            let empty = Paragraph::new("No shows to display")
                .style(Theme::dimmed())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.visible = ((inner.width / CARD_WIDTH) as usize).max(1);
        self.adjust_offset();

        let cards: Vec<(usize, &ShowSummary)> = self
            .items
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.visible)
            .collect();

        let constraints = vec![Constraint::Length(CARD_WIDTH); cards.len()];
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(inner);

        for ((index, show), slot) in cards.into_iter().zip(slots.iter()) {
            render_card(frame, *slot, show, index == self.selected && self.focused);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, show: &ShowSummary, is_selected: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if is_selected {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let width = area.width.saturating_sub(2) as usize;
    let name: String = show.name.chars().take(width).collect();

    let mut lines = vec![Line::from(Span::styled(
        name,
        if is_selected {
            Theme::list_item_selected()
        } else {
            Theme::text()
        },
    ))];

    let mut meta = Vec::new();
    if let Some(year) = show.year() {
        meta.push(Span::styled(year.to_string(), Theme::year()));
    }
    if let Some(rating) = show.rating_label() {
        if !meta.is_empty() {
            meta.push(Span::raw(" "));
        }
        meta.push(Span::styled(
            format!("★ {}", rating),
            Theme::rating(show.vote_average, is_selected),
        ));
    }
    lines.push(Line::from(meta));

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}
