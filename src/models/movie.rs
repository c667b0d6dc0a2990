use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::serialize_object_id;

/// Movie documents accumulated fields over several revisions of the catalog
/// importer, so the same piece of information can live under multiple names
/// (title/name/movieName, rating/score/voteAverage, ...). The accessors below
/// pick the first populated variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id"
    )]
    pub id: Option<ObjectId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub duration: Option<i32>,
    pub image_url: Option<String>,
    pub english_title: Option<String>,
    pub genres: Option<Vec<String>>,
    pub poster_url: Option<String>,
    pub poster: Option<String>,
    pub image: Option<String>,
    pub rating: Option<String>,
    pub score: Option<String>,
    pub vote_average: Option<String>,
    pub imdb_rating: Option<String>,
    pub format: Option<String>,
    pub release_date: Option<String>,
    pub release_year: Option<String>,
    pub year: Option<String>,
    pub age_rating: Option<String>,
    pub age_limit: Option<String>,
    pub certification: Option<String>,
    pub cast: Option<Vec<String>>,
    pub starring: Option<String>,
    pub trailer_url: Option<String>,
    pub overview: Option<String>,
    pub summary: Option<String>,
    pub synopsis: Option<String>,
    pub runtime: Option<String>,
    pub length: Option<String>,
    pub name: Option<String>,
    pub movie_name: Option<String>,
    pub category: Option<String>,
}

impl Movie {
    /// Best-effort display title across the drifted title fields.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .or(self.movie_name.as_deref())
            .or(self.english_title.as_deref())
            .unwrap_or("Unknown Movie")
    }

    /// Numeric rating, trying rating, score and voteAverage in that order.
    pub fn rating_value(&self) -> Option<f64> {
        [&self.rating, &self.score, &self.vote_average]
            .into_iter()
            .flatten()
            .find_map(|v| v.parse::<f64>().ok())
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        [
            &self.title,
            &self.genre,
            &self.director,
            &self.actors,
            &self.name,
            &self.movie_name,
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&q))
    }

    pub fn matches_genre(&self, genre: &str) -> bool {
        let g = genre.to_lowercase();
        if let Some(genres) = &self.genres {
            if genres.iter().any(|item| item.to_lowercase().contains(&g)) {
                return true;
            }
        }
        self.genre
            .as_deref()
            .is_some_and(|field| field.to_lowercase().contains(&g))
    }

    pub fn matches_year(&self, year: &str) -> bool {
        self.release_year.as_deref() == Some(year)
            || self.year.as_deref() == Some(year)
            || self
                .release_date
                .as_deref()
                .is_some_and(|d| d.contains(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_title_falls_back_across_drifted_fields() {
        let mut movie = Movie::default();
        assert_eq!(movie.display_title(), "Unknown Movie");
        movie.movie_name = Some("Old Field".into());
        assert_eq!(movie.display_title(), "Old Field");
        movie.title = Some("Canonical".into());
        assert_eq!(movie.display_title(), "Canonical");
    }

    #[test]
    fn rating_value_skips_unparseable_fields() {
        let movie = Movie {
            rating: Some("N/A".into()),
            score: Some("7.5".into()),
            ..Movie::default()
        };
        assert_eq!(movie.rating_value(), Some(7.5));
        assert_eq!(Movie::default().rating_value(), None);
    }

    #[test]
    fn search_matches_any_text_field() {
        let movie = Movie {
            director: Some("Bong Joon-ho".into()),
            ..Movie::default()
        };
        assert!(movie.matches_query("bong"));
        assert!(!movie.matches_query("nolan"));
    }

    #[test]
    fn genre_match_checks_array_and_scalar() {
        let movie = Movie {
            genres: Some(vec!["Action".into(), "Sci-Fi".into()]),
            genre: Some("Thriller".into()),
            ..Movie::default()
        };
        assert!(movie.matches_genre("sci"));
        assert!(movie.matches_genre("thriller"));
        assert!(!movie.matches_genre("romance"));
    }

    #[test]
    fn year_match_includes_release_date_substring() {
        let movie = Movie {
            release_date: Some("2019-05-30".into()),
            ..Movie::default()
        };
        assert!(movie.matches_year("2019"));
        assert!(!movie.matches_year("2020"));
    }

    #[test]
    fn deserializes_sparse_documents() {
        let movie: Movie = serde_json::from_str(r#"{"title":"Parasite"}"#).unwrap();
        assert_eq!(movie.title.as_deref(), Some("Parasite"));
        assert!(movie.genres.is_none());
    }
}
