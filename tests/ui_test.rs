//! UI component tests for Vertica
//!
//! Renders full screens into a `TestBackend` and checks what lands in the
//! buffer.
//!
//! ## Test Cases
//! - Theme palette is RGB and readable on the background
//! - Home: loading, error and loaded layouts
//! - Show page: header and episode viewer, including an empty season
//! - Not found view
//! - Search dropdown states
//! - Renders at 80x24 (min) and 200x50 (large)

use async_trait::async_trait;
use ratatui::{backend::TestBackend, style::Color, Terminal};
use std::sync::Arc;
use std::time::Duration;
use vertica::app::{App, AppState, HomeFocus, PageMsg};
use vertica::models::{Episode, Genre, Route, SeasonDetail, ShowDetail, ShowSummary};
use vertica::pages::{HomePage, HomeSection, ShowOutcome, ShowPage};
use vertica::search::{SearchBox, SearchSource};
use vertica::ui;
use vertica::ui::theme::{color_to_rgb, contrast_ratio, meets_wcag_aa, Theme};

// =============================================================================
// Fixtures
// =============================================================================

struct NoSearch;

#[async_trait]
impl SearchSource for NoSearch {
    async fn search(&self, _query: &str) -> anyhow::Result<Vec<ShowSummary>> {
        Ok(Vec::new())
    }
}

fn app(start: Route) -> App {
    let search = SearchBox::new(Arc::new(NoSearch), Duration::from_millis(500));
    App::new(search, start)
}

fn summary(id: u64, name: &str) -> ShowSummary {
    ShowSummary {
        id,
        name: name.to_string(),
        poster_path: Some(format!("/poster{}.jpg", id)),
        backdrop_path: Some(format!("/backdrop{}.jpg", id)),
        overview: format!("Overview of {}", name),
        vote_average: 8.1,
        first_air_date: Some("2019-06-01".to_string()),
    }
}

fn home_page() -> HomePage {
    HomePage::new(
        vec![summary(1, "Severance"), summary(2, "Andor"), summary(3, "Slow Horses")],
        vec![summary(10, "The Wire")],
        vec![summary(20, "Jeopardy!")],
    )
}

fn show_page(episodes: Vec<Episode>) -> ShowPage {
    ShowPage {
        show: ShowDetail {
            id: 1396,
            name: "Breaking Bad".to_string(),
            poster_path: Some("/ggFHVNu6YYI5L9pCfOacjizRGt.jpg".to_string()),
            backdrop_path: None,
            overview: "A chemistry teacher turns to crime.".to_string(),
            vote_average: 8.9,
            first_air_date: Some("2008-01-20".to_string()),
            genres: vec![Genre {
                id: 18,
                name: "Drama".to_string(),
            }],
            number_of_seasons: 5,
            number_of_episodes: 62,
            episode_run_time: vec![47],
            status: "Ended".to_string(),
        },
        season: SeasonDetail {
            season_number: 1,
            episodes,
        },
    }
}

fn episode(n: u32, name: &str) -> Episode {
    Episode {
        id: 60000 + n as u64,
        name: name.to_string(),
        overview: String::new(),
        still_path: None,
        episode_number: n,
        season_number: 1,
        runtime: Some(47),
        air_date: Some("2008-01-20".to_string()),
        vote_average: 8.0,
    }
}

fn draw(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

// =============================================================================
// THEME
// =============================================================================

#[test]
fn test_theme_colors_valid_rgb() {
    let colors = [
        ("BACKGROUND", Theme::BACKGROUND),
        ("PRIMARY", Theme::PRIMARY),
        ("SECONDARY", Theme::SECONDARY),
        ("ACCENT", Theme::ACCENT),
        ("HIGHLIGHT", Theme::HIGHLIGHT),
        ("TEXT", Theme::TEXT),
        ("DIM", Theme::DIM),
        ("SUCCESS", Theme::SUCCESS),
        ("WARNING", Theme::WARNING),
        ("ERROR", Theme::ERROR),
        ("BORDER", Theme::BORDER),
        ("BORDER_FOCUSED", Theme::BORDER_FOCUSED),
    ];

    for (name, color) in colors {
        assert!(
            matches!(color, Color::Rgb(..)),
            "{} should be an RGB color",
            name
        );
        assert!(color_to_rgb(color).is_some(), "{} should convert", name);
    }
}

#[test]
fn test_text_readable_on_background() {
    for (name, fg) in [
        ("TEXT", Theme::TEXT),
        ("SECONDARY", Theme::SECONDARY),
        ("ACCENT", Theme::ACCENT),
    ] {
        assert!(
            meets_wcag_aa(fg, Theme::BACKGROUND),
            "{} on BACKGROUND: {:.2}:1",
            name,
            contrast_ratio(fg, Theme::BACKGROUND)
        );
    }
}

// =============================================================================
// HOME
// =============================================================================

#[test]
fn test_home_loading() {
    let mut app = app(Route::Home);
    let screen = draw(&mut app, 120, 40);

    assert!(screen.contains("VERTICA"));
    assert!(screen.contains("Loading..."));
}

#[test]
fn test_home_error_offers_retry() {
    let mut app = app(Route::Home);
    app.apply(PageMsg::Home(Err("TMDB 500".to_string())));

    let screen = draw(&mut app, 120, 40);
    assert!(screen.contains("Failed to load shows"));
    assert!(screen.contains("retry"));
    assert!(!screen.contains("TMDB 500"));
}

#[test]
fn test_home_renders_hero_and_carousels() {
    let mut app = app(Route::Home);
    app.apply(PageMsg::Home(Ok(home_page())));

    let screen = draw(&mut app, 120, 40);

    assert!(screen.contains("FEATURED"));
    assert!(screen.contains("Severance"));
    assert!(screen.contains("● ○ ○"));
    for section in HomeSection::ALL {
        assert!(screen.contains(section.title()), "missing {}", section.title());
    }
    assert!(screen.contains("The Wire"));
    assert!(screen.contains("Jeopardy!"));
    assert!(screen.contains("New Episodes"));
}

#[test]
fn test_home_focused_carousel_position() {
    let mut app = app(Route::Home);
    app.apply(PageMsg::Home(Ok(home_page())));
    app.home.set_focus(HomeFocus::Section(HomeSection::Trending));
    app.home.carousel_mut(HomeSection::Trending).right();

    let screen = draw(&mut app, 120, 40);
    assert!(screen.contains("Trending Now (2/3)"));
}

// =============================================================================
// SHOW PAGE
// =============================================================================

#[test]
fn test_show_page_renders_header_and_episodes() {
    let mut app = app(Route::Show(1396));
    app.apply(PageMsg::Show {
        id: 1396,
        outcome: ShowOutcome::Found(Box::new(show_page(vec![
            episode(1, "Pilot"),
            episode(2, "Cat's in the Bag..."),
        ]))),
    });
    assert_eq!(app.state, AppState::Show);

    let screen = draw(&mut app, 120, 40);

    assert!(screen.contains("Breaking Bad"));
    assert!(screen.contains("Drama"));
    assert!(screen.contains("Season 1"));
    assert!(screen.contains("2 Episodes"));
    assert!(screen.contains("Pilot"));
    assert!(screen.contains("1 of 2"));
}

#[test]
fn test_show_page_empty_season() {
    let mut app = app(Route::Show(1396));
    app.apply(PageMsg::Show {
        id: 1396,
        outcome: ShowOutcome::Found(Box::new(show_page(Vec::new()))),
    });

    let screen = draw(&mut app, 120, 40);
    assert!(screen.contains("No Episodes Available"));
}

#[test]
fn test_show_page_loading() {
    let mut app = app(Route::Show(7));
    let screen = draw(&mut app, 120, 40);
    assert!(screen.contains("Loading..."));
}

// =============================================================================
// NOT FOUND
// =============================================================================

#[test]
fn test_not_found_view() {
    let mut app = app(Route::Show(999));
    app.apply(PageMsg::Show {
        id: 999,
        outcome: ShowOutcome::NotFound,
    });
    assert_eq!(app.state, AppState::NotFound);

    let screen = draw(&mut app, 120, 40);
    assert!(screen.contains("404"));
    assert!(screen.contains("Show Not Found"));
    assert!(screen.contains("Back to Home"));
}

// =============================================================================
// SEARCH
// =============================================================================

#[test]
fn test_search_placeholder() {
    let mut app = app(Route::NotFound);
    let screen = draw(&mut app, 120, 40);
    assert!(screen.contains("Search TV shows..."));
}

#[test]
fn test_search_panel_states() {
    let mut app = app(Route::NotFound);
    app.focus_search();

    let screen = draw(&mut app, 120, 40);
    assert!(screen.contains("Start typing to search"));

    for c in "crown".chars() {
        app.search.state.insert(c);
    }
    app.search.state.loading = true;
    let screen = draw(&mut app, 120, 40);
    assert!(screen.contains("Searching..."));
    assert!(screen.contains("crown│"));

    app.search.state.loading = false;
    let screen = draw(&mut app, 120, 40);
    assert!(screen.contains("No shows found for \"crown\""));

    app.search.state.results = vec![summary(65494, "The Crown"), summary(2, "Crownies")];
    app.search.state.highlight_next();
    app.search.state.highlight_next();
    let screen = draw(&mut app, 120, 40);
    assert!(screen.contains("RESULTS (2)"));
    assert!(screen.contains("The Crown (2019)"));
    assert!(screen.contains("▸ Crownies"));
    assert!(screen.contains("https://image.tmdb.org/t/p/w92"));
}

// =============================================================================
// LAYOUT
// =============================================================================

#[test]
fn test_layout_sizes() {
    for (width, height) in [(80, 24), (200, 50)] {
        let mut home = app(Route::Home);
        home.apply(PageMsg::Home(Ok(home_page())));
        let screen = draw(&mut home, width, height);
        assert!(screen.contains("VERTICA"), "{}x{}", width, height);

        let mut show = app(Route::Show(1396));
        show.apply(PageMsg::Show {
            id: 1396,
            outcome: ShowOutcome::Found(Box::new(show_page(vec![episode(1, "Pilot")]))),
        });
        draw(&mut show, width, height);
    }
}

#[test]
fn test_error_popup() {
    let mut app = app(Route::NotFound);
    app.set_error("TMDB credentials missing");

    let screen = draw(&mut app, 120, 40);
    assert!(screen.contains("TMDB credentials missing"));
}
