//! CLI Command Handlers
//!
//! Each handler takes its CLI args, the resolved settings and the Output,
//! and returns an ExitCode.

use std::sync::Arc;

use crate::api::{TmdbClient, TmdbError};
use crate::cli::{validate_show_id, ExitCode, HomeCmd, Output, SearchCmd, ServeCmd, ShowCmd};
use crate::config::Settings;
use crate::pages::{self, HomeSection};
use crate::server;

/// Exit code for a failed upstream call
pub fn exit_code_for(err: &TmdbError) -> ExitCode {
    match err {
        TmdbError::MissingCredential => ExitCode::ConfigError,
        TmdbError::Status { status: 404 } => ExitCode::NotFound,
        TmdbError::Status { .. } | TmdbError::Request(_) | TmdbError::InvalidResponse(_) => {
            ExitCode::NetworkError
        }
        TmdbError::InvalidUrl(_) => ExitCode::ConfigError,
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, settings: &Settings, output: &Output) -> ExitCode {
    let client = TmdbClient::from_settings(settings);

    output.info(format!("Searching for: {}", cmd.query));

    match client.search_shows(&cmd.query).await {
        Ok(mut results) => {
            results.truncate(cmd.limit);

            if output.json {
                if let Err(e) = output.print(&results) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            } else if results.is_empty() {
                output.info(format!("No shows found for \"{}\"", cmd.query.trim()));
            } else {
                for show in &results {
                    output.line(format!("{:>8}  {}", show.id, show));
                }
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Search failed: {}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Home Command
// =============================================================================

pub async fn home_cmd(cmd: HomeCmd, settings: &Settings, output: &Output) -> ExitCode {
    let client = TmdbClient::from_settings(settings);

    output.info("Fetching home lists...");

    let mut page = match pages::load_home(&client).await {
        Ok(page) => page,
        Err(e) => return output.error(format!("Failed to load shows: {}", e), exit_code_for(&e)),
    };

    page.trending.truncate(cmd.limit);
    page.top_rated.truncate(cmd.limit);
    page.airing_today.truncate(cmd.limit);

    let sections: Vec<HomeSection> = match cmd.section {
        Some(section) => vec![section.into()],
        None => HomeSection::ALL.to_vec(),
    };

    if output.json {
        let result = match cmd.section {
            Some(section) => output.print(page.section(section.into())),
            None => output.print(&page),
        };
        if let Err(e) = result {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
        return ExitCode::Success;
    }

    for (i, section) in sections.into_iter().enumerate() {
        if i > 0 {
            output.line("");
        }
        output.line(format!("== {} ==", section.title()));
        for show in page.section(section) {
            output.line(format!("{:>8}  {}", show.id, show));
        }
    }
    ExitCode::Success
}

// =============================================================================
// Show Command
// =============================================================================

pub async fn show_cmd(cmd: ShowCmd, settings: &Settings, output: &Output) -> ExitCode {
    let id = match validate_show_id(&cmd.id) {
        Ok(id) => id,
        Err(msg) => return output.error(format!("{}: {}", msg, cmd.id), ExitCode::InvalidArgs),
    };

    let client = TmdbClient::from_settings(settings);
    output.info(format!("Loading show {}...", id));

    match pages::fetch_show(&client, id).await {
        Ok(page) => {
            if output.json {
                if let Err(e) = output.print(&page) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
                return ExitCode::Success;
            }

            output.line(&page.show);
            let genres = page.show.genres_str();
            if !genres.is_empty() {
                output.line(format!("Genres: {}", genres));
            }
            if !page.show.overview.is_empty() {
                output.line("");
                output.line(&page.show.overview);
            }
            output.line("");
            output.line(format!(
                "Season {} • {} Episodes",
                page.season.season_number,
                page.season.episodes.len()
            ));
            if page.season.episodes.is_empty() {
                output.line("No Episodes Available");
            }
            for episode in &page.season.episodes {
                let runtime = episode.runtime_label().unwrap_or_default();
                output.line(format!("  {}  {}", episode, runtime));
            }
            ExitCode::Success
        }
        Err(e) if e.is_not_found() => output.error("Show Not Found", ExitCode::NotFound),
        Err(e) => output.error(format!("Failed to load show: {}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Serve Command
// =============================================================================

pub async fn serve_cmd(cmd: ServeCmd, settings: &Settings, output: &Output) -> ExitCode {
    if !settings.credentials.is_configured() {
        return output.error(
            "TMDB credentials missing: set TMDB_ACCESS_TOKEN or TMDB_API_KEY",
            ExitCode::ConfigError,
        );
    }

    let bind = cmd.bind.unwrap_or_else(|| settings.bind.clone());
    let client = Arc::new(TmdbClient::from_settings(settings));

    output.info(format!("Listening on http://{}", bind));

    match server::serve(&bind, client).await {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("{:#}", e), ExitCode::Error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code_for(&TmdbError::MissingCredential), ExitCode::ConfigError);
        assert_eq!(
            exit_code_for(&TmdbError::Status { status: 404 }),
            ExitCode::NotFound
        );
        assert_eq!(
            exit_code_for(&TmdbError::Status { status: 500 }),
            ExitCode::NetworkError
        );
        assert_eq!(
            exit_code_for(&TmdbError::InvalidResponse("eof".into())),
            ExitCode::NetworkError
        );
    }
}
