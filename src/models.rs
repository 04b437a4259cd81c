//! Data structures and types for Vertica
//!
//! Read-only projections of TMDB responses, organized by domain:
//! - **Shows**: list summaries and full show details
//! - **Episodes**: season listings
//! - **Images**: TMDB image URL construction
//! - **Routes**: addressable views (home, show page, not found)

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Show Models
// =============================================================================

/// Show as it appears in lists, carousels and search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowSummary {
    pub id: u64,
    pub name: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: String,
    pub vote_average: f32,
    pub first_air_date: Option<String>,
}

impl ShowSummary {
    /// First-air year, if the date is present
    pub fn year(&self) -> Option<u16> {
        self.first_air_date.as_deref().and_then(extract_year)
    }

    /// Rating label, hidden for unrated shows
    pub fn rating_label(&self) -> Option<String> {
        rating_label(self.vote_average)
    }
}

impl fmt::Display for ShowSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{}", self.name, year_str)?;
        if let Some(rating) = self.rating_label() {
            write!(f, " ★ {}", rating)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Full show information for the show page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowDetail {
    pub id: u64,
    pub name: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: String,
    pub vote_average: f32,
    pub first_air_date: Option<String>,
    pub genres: Vec<Genre>,
    pub number_of_seasons: u32,
    pub number_of_episodes: u32,
    pub episode_run_time: Vec<u32>,
    pub status: String,
}

impl ShowDetail {
    pub fn year(&self) -> Option<u16> {
        self.first_air_date.as_deref().and_then(extract_year)
    }

    /// Typical episode runtime in minutes (first listed value)
    pub fn runtime(&self) -> Option<u32> {
        self.episode_run_time.first().copied().filter(|m| *m > 0)
    }

    /// Genre names joined for display
    pub fn genres_str(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// "3 Seasons • 34 Episodes"
    pub fn seasons_label(&self) -> String {
        let seasons = if self.number_of_seasons == 1 {
            "Season"
        } else {
            "Seasons"
        };
        format!(
            "{} {} • {} Episodes",
            self.number_of_seasons, seasons, self.number_of_episodes
        )
    }
}

impl fmt::Display for ShowDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(
            f,
            "{}{} - {} - ⭐ {:.1}",
            self.name,
            year_str,
            self.seasons_label(),
            self.vote_average
        )
    }
}

// =============================================================================
// Episode Models
// =============================================================================

pub const NO_EPISODE_DESCRIPTION: &str = "No description available for this episode.";

/// TV episode information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub name: String,
    pub overview: String,
    pub still_path: Option<String>,
    pub episode_number: u32,
    pub season_number: u32,
    pub runtime: Option<u32>,
    pub air_date: Option<String>,
    pub vote_average: f32,
}

impl Episode {
    /// Overview text, or a placeholder when TMDB has none
    pub fn overview_or_placeholder(&self) -> &str {
        if self.overview.trim().is_empty() {
            NO_EPISODE_DESCRIPTION
        } else {
            &self.overview
        }
    }

    /// Runtime label like "47m"
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime.filter(|m| *m > 0).map(|m| format!("{}m", m))
    }

    pub fn rating_label(&self) -> Option<String> {
        rating_label(self.vote_average)
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S{:02}E{:02} - {}",
            self.season_number, self.episode_number, self.name
        )
    }
}

/// One season with its episodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonDetail {
    pub season_number: u32,
    pub episodes: Vec<Episode>,
}

// =============================================================================
// Images
// =============================================================================

pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// TMDB image sizes used by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Search result thumbnails
    W92,
    /// Poster cards and show header
    W500,
    /// Backdrops and episode stills
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W92 => "w92",
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full image URL for a TMDB path, `None` when the path is missing
pub fn image_url(path: Option<&str>, size: ImageSize) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}/{}{}", IMAGE_BASE_URL, size, p))
}

// =============================================================================
// Routes
// =============================================================================

/// Addressable views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Show(u64),
    NotFound,
}

impl Route {
    /// Parse a path like "/" or "/tv/1396"
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Route::Home;
        }

        match trimmed.strip_prefix("/tv/") {
            Some(raw) => parse_show_id(raw).map(Route::Show).unwrap_or(Route::NotFound),
            None => Route::NotFound,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Show(id) => write!(f, "/tv/{}", id),
            Route::NotFound => write!(f, "/404"),
        }
    }
}

/// Parse a show identifier; only plain ASCII digits are accepted
pub fn parse_show_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

// =============================================================================
// Helpers
// =============================================================================

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

/// Lowercased, hyphen-joined section id ("Top Rated" -> "top-rated")
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

fn rating_label(vote_average: f32) -> Option<String> {
    (vote_average > 0.0).then(|| format!("{:.1}", vote_average))
}
