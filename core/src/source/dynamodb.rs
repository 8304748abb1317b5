use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use tracing::{debug, info, warn};

use crate::config::AwsOptions;
use crate::errors::SourceError;
use crate::restaurant::Restaurant;
use crate::source::{RestaurantSource, ScanQuery};

/// DynamoDB caps a single BatchWriteItem call at 25 put requests.
pub const MAX_BATCH_WRITE: usize = 25;

const THEME_FILTER: &str = "contains(themes, :theme)";

pub struct DynamoDbRestaurantTable {
    client: Client,
    table_name: String,
}

impl DynamoDbRestaurantTable {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub async fn from_options(aws: &AwsOptions, table_name: impl Into<String>) -> Self {
        let sdk_config = aws.load_sdk_config().await;
        Self::new(Client::new(&sdk_config), table_name)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Writes every restaurant, one BatchWriteItem call per chunk. Returns
    /// the number of items written.
    pub async fn write_all(&self, restaurants: &[Restaurant]) -> Result<usize, SourceError> {
        let mut written = 0;

        for chunk in restaurants.chunks(MAX_BATCH_WRITE) {
            let requests = chunk
                .iter()
                .map(|restaurant| {
                    PutRequest::builder()
                        .set_item(Some(restaurant_to_item(restaurant)))
                        .build()
                        .map(|put| WriteRequest::builder().put_request(put).build())
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| SourceError::Write {
                    table: self.table_name.clone(),
                    reason: e.to_string(),
                })?;

            let output = self
                .client
                .batch_write_item()
                .request_items(&self.table_name, requests)
                .send()
                .await
                .map_err(|e| SourceError::Write {
                    table: self.table_name.clone(),
                    reason: aws_sdk_dynamodb::Error::from(e).to_string(),
                })?;

            let unprocessed = output
                .unprocessed_items()
                .map(|items| items.values().map(Vec::len).sum::<usize>())
                .unwrap_or(0);
            if unprocessed > 0 {
                return Err(SourceError::Write {
                    table: self.table_name.clone(),
                    reason: format!("{unprocessed} items were left unprocessed"),
                });
            }

            written += chunk.len();
            debug!(table = %self.table_name, written, "batch written");
        }

        info!(table = %self.table_name, written, "restaurants written");
        Ok(written)
    }
}

#[async_trait]
impl RestaurantSource for DynamoDbRestaurantTable {
    async fn scan(&self, query: ScanQuery) -> Result<Vec<Restaurant>, SourceError> {
        let limit = i32::try_from(query.limit).unwrap_or(i32::MAX);

        let mut request = self.client.scan().table_name(&self.table_name).limit(limit);
        if let Some(theme) = query.theme {
            request = request
                .filter_expression(THEME_FILTER)
                .expression_attribute_values(":theme", AttributeValue::S(theme));
        }

        let output = request.send().await.map_err(|e| SourceError::Scan {
            table: self.table_name.clone(),
            source: Box::new(aws_sdk_dynamodb::Error::from(e)),
        })?;

        let restaurants = output
            .items()
            .iter()
            .filter_map(|item| {
                let restaurant = restaurant_from_item(item);
                if restaurant.is_none() {
                    warn!(table = %self.table_name, "skipping item without a name");
                }
                restaurant
            })
            .collect::<Vec<_>>();

        debug!(table = %self.table_name, count = restaurants.len(), "scan complete");
        Ok(restaurants)
    }
}

pub fn restaurant_from_item(item: &HashMap<String, AttributeValue>) -> Option<Restaurant> {
    let name = item.get("name")?.as_s().ok()?.clone();
    let image = item
        .get("image")
        .and_then(|value| value.as_s().ok())
        .cloned()
        .unwrap_or_default();
    let themes = match item.get("themes") {
        Some(AttributeValue::L(values)) => values
            .iter()
            .filter_map(|value| value.as_s().ok().cloned())
            .collect(),
        Some(AttributeValue::Ss(values)) => values.clone(),
        _ => Vec::new(),
    };

    Some(Restaurant {
        name,
        image,
        themes,
    })
}

pub fn restaurant_to_item(restaurant: &Restaurant) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("name".to_string(), AttributeValue::S(restaurant.name.clone())),
        ("image".to_string(), AttributeValue::S(restaurant.image.clone())),
        (
            "themes".to_string(),
            AttributeValue::L(
                restaurant
                    .themes
                    .iter()
                    .cloned()
                    .map(AttributeValue::S)
                    .collect(),
            ),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fangtasia() -> Restaurant {
        Restaurant {
            name: "Fangtasia".to_string(),
            image: "https://d2qt42rcwzspd6.cloudfront.net/manning/fangtasia.png".to_string(),
            themes: vec!["true blood".to_string()],
        }
    }

    #[test]
    fn test_item_conversion_keeps_all_fields() {
        let item = restaurant_to_item(&fangtasia());

        assert_eq!(item.get("name"), Some(&AttributeValue::S("Fangtasia".to_string())));
        assert_eq!(
            item.get("themes"),
            Some(&AttributeValue::L(vec![AttributeValue::S(
                "true blood".to_string()
            )]))
        );
        assert_eq!(restaurant_from_item(&item), Some(fangtasia()));
    }

    #[test]
    fn test_item_without_name_is_skipped() {
        let item = HashMap::from([(
            "image".to_string(),
            AttributeValue::S("https://example.com/a.png".to_string()),
        )]);
        assert_eq!(restaurant_from_item(&item), None);
    }

    #[test]
    fn test_item_with_string_set_themes() {
        let item = HashMap::from([
            ("name".to_string(), AttributeValue::S("Pizza Planet".to_string())),
            (
                "themes".to_string(),
                AttributeValue::Ss(vec!["netflix".to_string(), "toy story".to_string()]),
            ),
        ]);

        let restaurant = restaurant_from_item(&item).unwrap();
        assert_eq!(restaurant.image, "");
        assert_eq!(restaurant.themes, vec!["netflix", "toy story"]);
    }

    #[test]
    fn test_non_string_themes_are_dropped() {
        let item = HashMap::from([
            ("name".to_string(), AttributeValue::S("Don Cuco".to_string())),
            (
                "themes".to_string(),
                AttributeValue::L(vec![
                    AttributeValue::S("cartoon".to_string()),
                    AttributeValue::N("7".to_string()),
                ]),
            ),
        ]);

        let restaurant = restaurant_from_item(&item).unwrap();
        assert_eq!(restaurant.themes, vec!["cartoon"]);
    }
}
