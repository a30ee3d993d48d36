use chrono::NaiveDate;

use super::models;
use crate::modules::catalog::domain::{CatalogEpisode, SeasonDetails, TvShowDetails};

pub fn map_show(show: models::TvShowDetails) -> TvShowDetails {
    let name = show
        .name
        .filter(|n| !n.trim().is_empty())
        .or(show.original_name)
        .unwrap_or_else(|| format!("Show {}", show.id));

    // Prefer the summed regular seasons when present; `number_of_episodes`
    // includes specials for some shows
    let regular_season_total = show.seasons.as_ref().and_then(|seasons| {
        let counts: Vec<i32> = seasons
            .iter()
            .filter(|s| s.season_number > 0)
            .filter_map(|s| s.episode_count)
            .collect();
        (!counts.is_empty()).then(|| counts.iter().sum())
    });

    TvShowDetails {
        id: show.id,
        name,
        total_episodes: regular_season_total.or(show.number_of_episodes),
        total_seasons: show.number_of_seasons,
    }
}

pub fn map_season(show_id: i32, season: models::SeasonDetails) -> SeasonDetails {
    let mut episodes: Vec<CatalogEpisode> = season.episodes.into_iter().map(map_episode).collect();
    episodes.sort_by_key(|e| e.episode_number);

    SeasonDetails {
        show_id,
        season_number: season.season_number,
        episodes,
    }
}

fn map_episode(episode: models::Episode) -> CatalogEpisode {
    CatalogEpisode {
        episode_number: episode.episode_number,
        name: episode
            .name
            .unwrap_or_else(|| format!("Episode {}", episode.episode_number)),
        runtime: episode.runtime,
        air_date: episode
            .air_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        overview: episode.overview.filter(|o| !o.is_empty()),
        still_path: episode.still_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_regular_seasons_and_skips_specials() {
        let show: models::TvShowDetails = serde_json::from_value(serde_json::json!({
            "id": 1396,
            "name": "Breaking Bad",
            "number_of_episodes": 62,
            "number_of_seasons": 5,
            "seasons": [
                { "season_number": 0, "episode_count": 9 },
                { "season_number": 1, "episode_count": 7 },
                { "season_number": 2, "episode_count": 13 }
            ]
        }))
        .unwrap();

        let mapped = map_show(show);
        assert_eq!(mapped.total_episodes, Some(20));
        assert_eq!(mapped.total_seasons, Some(5));
        assert_eq!(mapped.name, "Breaking Bad");
    }

    #[test]
    fn season_episodes_are_sorted_and_dates_parsed() {
        let season: models::SeasonDetails = serde_json::from_value(serde_json::json!({
            "season_number": 1,
            "episodes": [
                { "episode_number": 2, "name": "Cat's in the Bag...", "air_date": "2008-01-27", "runtime": 48 },
                { "episode_number": 1, "name": "Pilot", "air_date": "", "runtime": 58 }
            ]
        }))
        .unwrap();

        let mapped = map_season(1396, season);
        assert_eq!(mapped.episodes[0].episode_number, 1);
        assert_eq!(mapped.episodes[0].air_date, None);
        assert_eq!(
            mapped.episodes[1].air_date,
            NaiveDate::from_ymd_opt(2008, 1, 27)
        );
    }
}
