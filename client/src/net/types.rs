//! DTOs for the remote food-facts REST API.
//!
//! DESIGN
//! ======
//! Field names follow the API's camelCase JSON; product payloads keep the
//! snake_case names of the upstream product database. Optional fields default
//! so partially populated records still decode.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A restaurant with its location and tag names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub stars: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Body of `POST /restaurants`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurant {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub stars: u8,
}

/// Body of `POST /restaurants/{id}/tags`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTag {
    pub tag_name: String,
}

/// A tag derived from the restaurant list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub restaurant_count: usize,
}

/// Account as listed by `/users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| session::is_admin_role(r))
    }
}

/// Personal profile attached to a user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub favorite_restaurants: Vec<Restaurant>,
}

impl Profile {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}

/// Body of `POST /profiles`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street_address: String,
}

/// Per-100g nutrition values of a product.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutriments {
    #[serde(default, rename = "energy_100g", skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    #[serde(default, rename = "proteins_100g", skip_serializing_if = "Option::is_none")]
    pub proteins: Option<f64>,
    #[serde(default, rename = "carbohydrates_100g", skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,
    #[serde(default, rename = "fat_100g", skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
}

/// A food product, looked up by barcode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub code: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_grade_fr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutriments: Option<Nutriments>,
}

impl Product {
    /// Human label for the nutrition grade letter.
    #[must_use]
    pub fn grade_label(&self) -> &'static str {
        match self.nutrition_grade_fr.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("a") => "Excellent",
            Some("b") => "Good",
            Some("c") => "Fair",
            Some("d") => "Poor",
            Some("e") => "Very poor",
            _ => "Unrated",
        }
    }

    /// Energy as `"<n> kcal/100g"`, or `"N/A"`.
    #[must_use]
    pub fn energy_label(&self) -> String {
        match self.nutriments.as_ref().and_then(|n| n.energy) {
            Some(kcal) if kcal > 0.0 => format!("{} kcal/100g", kcal.round()),
            _ => "N/A".to_owned(),
        }
    }
}

/// Aggregate counts shown on the admin dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_restaurants: usize,
    pub total_users: usize,
    pub total_tags: usize,
    pub total_profiles: usize,
}

/// Outcome of probing one endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EndpointStatus {
    Up,
    Down(String),
}

impl EndpointStatus {
    #[must_use]
    pub fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}

/// Reachability of the main API endpoint groups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiStatus {
    pub profiles: EndpointStatus,
    pub restaurants: EndpointStatus,
    pub products: EndpointStatus,
}

impl ApiStatus {
    #[must_use]
    pub fn all_up(&self) -> bool {
        self.profiles.is_up() && self.restaurants.is_up() && self.products.is_up()
    }
}
