//! Page composition
//!
//! Fetches everything a page needs and hands back plain data for the
//! views (TUI) or handlers (HTTP) to render.

use serde::Serialize;
use tracing::warn;

use crate::api::{TmdbClient, TmdbError};
use crate::models::{parse_show_id, slugify, SeasonDetail, ShowDetail, ShowSummary};

/// Number of trending shows featured in the hero slider
pub const HERO_COUNT: usize = 5;

/// Season shown when a show page opens
pub const DEFAULT_SEASON: u32 = 1;

// =============================================================================
// Home Page
// =============================================================================

/// Carousels on the home page, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeSection {
    Trending,
    TopRated,
    AiringToday,
}

impl HomeSection {
    pub const ALL: [HomeSection; 3] = [
        HomeSection::Trending,
        HomeSection::TopRated,
        HomeSection::AiringToday,
    ];

    /// Position in [`HomeSection::ALL`]
    pub fn index(&self) -> usize {
        match self {
            HomeSection::Trending => 0,
            HomeSection::TopRated => 1,
            HomeSection::AiringToday => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            HomeSection::Trending => "Trending Now",
            HomeSection::TopRated => "Top Rated",
            HomeSection::AiringToday => "Airing Today",
        }
    }

    /// Label used in the header navigation
    pub fn nav_label(&self) -> &'static str {
        match self {
            HomeSection::Trending => "Trending",
            HomeSection::TopRated => "Top Rated",
            HomeSection::AiringToday => "New Episodes",
        }
    }

    /// Section id derived from the title
    pub fn anchor(&self) -> String {
        slugify(self.title())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomePage {
    pub hero: Vec<ShowSummary>,
    pub trending: Vec<ShowSummary>,
    pub top_rated: Vec<ShowSummary>,
    pub airing_today: Vec<ShowSummary>,
}

impl HomePage {
    pub fn new(
        trending: Vec<ShowSummary>,
        top_rated: Vec<ShowSummary>,
        airing_today: Vec<ShowSummary>,
    ) -> Self {
        let hero = trending.iter().take(HERO_COUNT).cloned().collect();
        Self {
            hero,
            trending,
            top_rated,
            airing_today,
        }
    }

    pub fn section(&self, section: HomeSection) -> &[ShowSummary] {
        match section {
            HomeSection::Trending => &self.trending,
            HomeSection::TopRated => &self.top_rated,
            HomeSection::AiringToday => &self.airing_today,
        }
    }
}

/// Fetch the three home lists concurrently; any failure fails the page
pub async fn load_home(client: &TmdbClient) -> Result<HomePage, TmdbError> {
    let (trending, top_rated, airing_today) = tokio::try_join!(
        client.trending_shows(),
        client.top_rated_shows(),
        client.airing_today_shows(),
    )?;

    Ok(HomePage::new(trending, top_rated, airing_today))
}

// =============================================================================
// Show Page
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowPage {
    pub show: ShowDetail,
    pub season: SeasonDetail,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShowOutcome {
    Found(Box<ShowPage>),
    NotFound,
}

impl ShowOutcome {
    pub fn found(self) -> Option<ShowPage> {
        match self {
            ShowOutcome::Found(page) => Some(*page),
            ShowOutcome::NotFound => None,
        }
    }
}

/// Load a show page from a raw path segment
///
/// Anything but plain digits is not-found without touching upstream.
pub async fn load_show(client: &TmdbClient, raw_id: &str) -> ShowOutcome {
    match parse_show_id(raw_id) {
        Some(id) => load_show_by_id(client, id).await,
        None => ShowOutcome::NotFound,
    }
}

/// Fetch details and the first season together
pub async fn fetch_show(client: &TmdbClient, id: u64) -> Result<ShowPage, TmdbError> {
    let (show, season) = tokio::try_join!(
        client.show_details(id),
        client.season_details(id, DEFAULT_SEASON),
    )?;

    Ok(ShowPage { show, season })
}

/// Like [`fetch_show`], but any failure is not-found
pub async fn load_show_by_id(client: &TmdbClient, id: u64) -> ShowOutcome {
    match fetch_show(client, id).await {
        Ok(page) => ShowOutcome::Found(Box::new(page)),
        Err(e) => {
            warn!(id, error = %e, "failed to load show page");
            ShowOutcome::NotFound
        }
    }
}
