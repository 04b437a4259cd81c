//! Full-screen composition: header, content, status bar and overlays

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::{App, AppState, InputMode, LoadingState, NavItem};
use crate::pages::HomeSection;
use crate::ui::search::{render_search_input, render_search_panel};
use crate::ui::show_header::render_show_header;
use crate::ui::Theme;

/// Draw the header, the current route and the status bar
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let search_area = render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    // Dropdown hangs below the search box over the content; one spare row
    // for the highlighted result's thumbnail
    let panel_height = (app.search.state.limit() as u16 + 3).min(chunks[1].height);
    let panel = Rect {
        x: search_area.x,
        y: chunks[1].y,
        width: search_area.width,
        height: panel_height,
    };
    render_search_panel(frame, panel, &app.search.state);

    if let Some(selected) = app.menu {
        render_menu(frame, chunks[1], selected);
    }

    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

/// Logo, nav and search box; returns the search box area
fn render_header(frame: &mut Frame, area: Rect, app: &App) -> Rect {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Logo
            Constraint::Min(20),    // Nav
            Constraint::Length(40), // Search box
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(Span::styled(
        "VERTICA",
        Style::default()
            .fg(Theme::PRIMARY)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    let mut nav = Vec::new();
    for (i, item) in NavItem::ALL.iter().enumerate() {
        if i > 0 {
            nav.push(Span::raw("  "));
        }
        let active = match item {
            NavItem::Home => app.state == AppState::Home && app.home.focus.is_hero(),
            NavItem::Section(section) => {
                app.state == AppState::Home && app.home.focus.section() == Some(*section)
            }
        };
        nav.push(Span::styled(format!("{}", i + 1), Theme::keybind()));
        nav.push(Span::styled(
            format!(" {}", item.label()),
            if active { Theme::title() } else { Theme::secondary() },
        ));
    }

    let nav = Paragraph::new(Line::from(nav)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(nav, header_chunks[1]);

    render_search_input(
        frame,
        header_chunks[2],
        &app.search.state,
        app.input_mode == InputMode::Editing,
    );

    header_chunks[2]
}

fn render_content(frame: &mut Frame, area: Rect, app: &mut App) {
    match app.state {
        AppState::Home => render_home(frame, area, app),
        AppState::Show => render_show(frame, area, app),
        AppState::NotFound => render_not_found(frame, area),
    }
}

fn render_home(frame: &mut Frame, area: Rect, app: &mut App) {
    if let Some(placeholder) = loading_placeholder(&app.home.loading, app.home.page.is_none()) {
        frame.render_widget(placeholder, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
        ])
        .split(area);

    let hero_focused = app.home.focus.is_hero();
    app.home.hero.render(frame, chunks[0], hero_focused);

    for section in HomeSection::ALL {
        app.home
            .carousel_mut(section)
            .render(frame, chunks[section.index() + 1]);
    }
}

fn render_show(frame: &mut Frame, area: Rect, app: &App) {
    let Some(page) = app.show.page.as_ref() else {
        let placeholder = loading_placeholder(&app.show.loading, true)
            .unwrap_or_else(|| Paragraph::new(""));
        frame.render_widget(placeholder, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_show_header(frame, chunks[0], &page.show, app.show.scroll);
    app.show.episodes.render(frame, chunks[1]);
}

/// Spinner or error text while a page has nothing to show
fn loading_placeholder(loading: &LoadingState, empty: bool) -> Option<Paragraph<'static>> {
    match loading {
        LoadingState::Loading(msg) => Some(
            Paragraph::new(format!(
                "⟳ {}",
                msg.clone().unwrap_or_else(|| "Loading...".to_string())
            ))
            .style(Theme::loading())
            .alignment(Alignment::Center),
        ),
        LoadingState::Error(msg) => Some(
            Paragraph::new(vec![
                Line::from(Span::styled(msg.clone(), Theme::error())),
                Line::from(vec![
                    Span::styled("[r]", Theme::keybind()),
                    Span::styled(" retry", Theme::dimmed()),
                ]),
            ])
            .alignment(Alignment::Center),
        ),
        LoadingState::Idle if empty => Some(
            Paragraph::new("Nothing to show")
                .style(Theme::dimmed())
                .alignment(Alignment::Center),
        ),
        LoadingState::Idle => None,
    }
}

pub const NOT_FOUND_MESSAGE: &str =
    "The TV show you're looking for doesn't exist or has been removed from our database.";

fn render_not_found(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("404", Theme::title())),
        Line::from(Span::styled("Show Not Found", Theme::text())),
        Line::from(""),
        Line::from(Span::styled(NOT_FOUND_MESSAGE, Theme::dimmed())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Theme::keybind()),
            Span::styled(" Back to Home", Theme::secondary()),
        ]),
    ];

    let para = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border()),
        );
    frame.render_widget(para, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::TEXT).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " SEARCH ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let route = Span::styled(format!(" {} ", app.route), Theme::dimmed());

    let activity = if app.search.is_searching() {
        Span::styled(" ⟳ searching ", Theme::loading())
    } else {
        Span::raw("")
    };

    let help = match app.state {
        AppState::Home => " q:quit  /:search  m:menu  tab:focus  ←/→:move  alt+n:slide  enter:open ",
        AppState::Show => " q:quit  /:search  ↑/↓:episode  alt+n:jump  pgup/pgdn:scroll  esc:back ",
        AppState::NotFound => " q:quit  enter:home  esc:back ",
    };

    let status_line = Line::from(vec![
        mode_indicator,
        route,
        activity,
        Span::raw(" │ "),
        Span::styled(help, Theme::dimmed()),
    ]);

    frame.render_widget(Paragraph::new(status_line).style(Theme::status_bar()), area);
}

fn render_menu(frame: &mut Frame, area: Rect, selected: usize) {
    let width = 24.min(area.width);
    let height = (NavItem::ALL.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x,
        y: area.y,
        width,
        height,
    };

    let items: Vec<ListItem> = NavItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let is_selected = i == selected;
            ListItem::new(Line::from(vec![
                Span::styled(
                    if is_selected { "▸ " } else { "  " },
                    Theme::accent(),
                ),
                Span::styled(
                    item.label(),
                    if is_selected {
                        Theme::list_item_selected()
                    } else {
                        Theme::text()
                    },
                ),
            ]))
        })
        .collect();

    frame.render_widget(Clear, popup);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_focused())
            .title(Span::styled(" MENU ", Theme::title()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );
    frame.render_widget(list, popup);
}

fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5;

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup_area);
}
