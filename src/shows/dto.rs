use serde::{Deserialize, Serialize};

/// One entry of the upstream "popular" listing. Upstream bodies are decoded
/// into this schema at the boundary; fields absent upstream stay absent in
/// our response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub name: String,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
}

/// Detail payload for a single show. Same field set as `Show` today, kept as
/// its own type so the two endpoint schemas can diverge independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowDetails {
    pub id: i64,
    pub name: String,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
}

/// Wire shape of the upstream popular endpoint and of our own response.
#[derive(Debug, Serialize, Deserialize)]
pub struct PopularResponse {
    pub results: Vec<Show>,
}
