use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{ServiceError, SourceError};
use crate::source::{RestaurantSource, ScanQuery};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Restaurant {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub themes: Vec<String>,
}

/// Read side of the catalogue: a bounded scan, optionally filtered by theme.
pub struct RestaurantCatalog {
    source: Arc<dyn RestaurantSource>,
    default_results: usize,
}

impl RestaurantCatalog {
    pub fn new(source: Arc<dyn RestaurantSource>, default_results: usize) -> Self {
        Self {
            source,
            default_results,
        }
    }

    pub async fn list(&self) -> Result<Vec<Restaurant>, SourceError> {
        let restaurants = self
            .source
            .scan(ScanQuery {
                limit: self.default_results,
                theme: None,
            })
            .await?;

        info!(count = restaurants.len(), "listed restaurants");
        Ok(restaurants)
    }

    pub async fn search(&self, theme: &str) -> Result<Vec<Restaurant>, ServiceError> {
        let theme = theme.trim();
        if theme.is_empty() {
            return Err(ServiceError::BadRequest {
                reason: "theme cannot be empty".to_string(),
            });
        }

        let restaurants = self
            .source
            .scan(ScanQuery {
                limit: self.default_results,
                theme: Some(theme.to_string()),
            })
            .await?;

        info!(count = restaurants.len(), theme, "searched restaurants");
        Ok(restaurants)
    }
}

/// Fixture data written by the seed tool when no file is given.
pub fn default_restaurants() -> Vec<Restaurant> {
    const IMAGE_ROOT: &str = "https://d2qt42rcwzspd6.cloudfront.net/manning";

    [
        ("Fangtasia", "fangtasia.png", &["true blood"][..]),
        ("Shoney's", "shoney's.png", &["cartoon", "rick and morty"][..]),
        (
            "Freddy's BBQ Joint",
            "freddy's+bbq+joint.png",
            &["netflix", "house of cards"][..],
        ),
        ("Pizza Planet", "pizza+planet.png", &["netflix", "toy story"][..]),
        ("Leaky Cauldron", "leaky+cauldron.png", &["movie", "harry potter"][..]),
        ("Lil' Bits", "lil+bits.png", &["cartoon", "rick and morty"][..]),
        ("Fancy Eats", "fancy+eats.png", &["cartoon", "rick and morty"][..]),
        ("Don Cuco", "don%20cuco.png", &["cartoon", "rick and morty"][..]),
    ]
    .into_iter()
    .map(|(name, image, themes)| Restaurant {
        name: name.to_string(),
        image: format!("{IMAGE_ROOT}/{image}"),
        themes: themes.iter().map(|theme| theme.to_string()).collect(),
    })
    .collect()
}
