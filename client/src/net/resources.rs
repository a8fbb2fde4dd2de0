//! Typed resource handles over [`ApiClient`].
//!
//! Each handle borrows the client and maps one endpoint group of the remote
//! API: `api.restaurants().list().await`, `api.profiles().me().await`, etc.
//! Sign-in and sign-up are the only unauthenticated calls.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use serde::de::IgnoredAny;

use session::{SessionRecord, SignInRequest, SignInResponse, SignUpRequest};

use super::api::{ApiClient, ApiError};
use super::transport::Method;
use super::types::{
    AddTag, ApiStatus, CreateProfile, CreateRestaurant, DashboardStats, EndpointStatus, Product, Profile, Restaurant,
    Tag, User,
};

fn seg(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

impl ApiClient {
    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    #[must_use]
    pub fn restaurants(&self) -> RestaurantsApi<'_> {
        RestaurantsApi { client: self }
    }

    #[must_use]
    pub fn profiles(&self) -> ProfilesApi<'_> {
        ProfilesApi { client: self }
    }

    #[must_use]
    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi { client: self }
    }

    #[must_use]
    pub fn tags(&self) -> TagsApi<'_> {
        TagsApi { client: self }
    }

    #[must_use]
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }

    /// Totals for the admin dashboard.
    ///
    /// # Errors
    ///
    /// Fails on the first failing list call.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let restaurants = self.restaurants().list().await?;
        let users = self.users().list().await?;
        let profiles = self.profiles().list().await?;
        Ok(DashboardStats {
            total_restaurants: restaurants.len(),
            total_users: users.len(),
            total_tags: tags_from_restaurants(&restaurants).len(),
            total_profiles: profiles.len(),
        })
    }

    /// Check the profiles, restaurants and products endpoints independently.
    /// Failures are recorded per endpoint, never returned.
    pub async fn check_status(&self) -> ApiStatus {
        let profiles = endpoint_status("profiles", self.profiles().list().await);
        let restaurants = endpoint_status("restaurants", self.restaurants().list().await);
        let products = endpoint_status("products", self.products().list().await);
        ApiStatus { profiles, restaurants, products }
    }
}

fn endpoint_status<T>(name: &str, result: Result<T, ApiError>) -> EndpointStatus {
    match result {
        Ok(_) => EndpointStatus::Up,
        Err(e) => {
            leptos::logging::warn!("api: {name} endpoint unavailable: {e}");
            EndpointStatus::Down(e.to_string())
        }
    }
}

/// Unique tag names in first-seen order, numbered from 1, with the number of
/// restaurants carrying each.
#[must_use]
pub fn tags_from_restaurants(restaurants: &[Restaurant]) -> Vec<Tag> {
    let mut tags: Vec<Tag> = Vec::new();
    for name in restaurants.iter().flat_map(|r| r.tags.iter()) {
        match tags.iter_mut().find(|t| &t.name == name) {
            Some(tag) => tag.restaurant_count += 1,
            None => tags.push(Tag { id: 0, name: name.clone(), restaurant_count: 1 }),
        }
    }
    for (idx, tag) in tags.iter_mut().enumerate() {
        tag.id = i64::try_from(idx).map_or(i64::MAX, |i| i + 1);
    }
    tags
}

// =============================================================================
// AUTH
// =============================================================================

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl AuthApi<'_> {
    /// Exchange credentials for a session record.
    ///
    /// # Errors
    ///
    /// Rejected credentials surface as [`ApiError::Status`]; a response
    /// without a token as [`ApiError::Decode`].
    pub async fn sign_in(&self, credentials: &SignInRequest) -> Result<SessionRecord, ApiError> {
        let resp: SignInResponse = self
            .client
            .send_public(Method::Post, "/authentication/sign-in", Some(credentials))
            .await?;
        SessionRecord::try_from(resp).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// # Errors
    ///
    /// Fails with [`ApiError::Status`] when the username is taken or invalid.
    pub async fn sign_up(&self, credentials: &SignUpRequest) -> Result<User, ApiError> {
        self.client
            .send_public(Method::Post, "/authentication/sign-up", Some(credentials))
            .await
    }
}

// =============================================================================
// RESTAURANTS
// =============================================================================

pub struct RestaurantsApi<'a> {
    client: &'a ApiClient,
}

impl RestaurantsApi<'_> {
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn list(&self) -> Result<Vec<Restaurant>, ApiError> {
        self.client.get("/restaurants").await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn get(&self, id: i64) -> Result<Restaurant, ApiError> {
        self.client.get(&format!("/restaurants/{id}")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn by_tag(&self, tag: &str) -> Result<Vec<Restaurant>, ApiError> {
        self.client.get(&format!("/restaurants/tag/{}", seg(tag))).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn create(&self, body: &CreateRestaurant) -> Result<Restaurant, ApiError> {
        self.client.send_authed(Method::Post, "/restaurants", Some(body)).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn add_tag(&self, id: i64, tag_name: &str) -> Result<(), ApiError> {
        let body = AddTag { tag_name: tag_name.to_owned() };
        let _: IgnoredAny = self
            .client
            .send_authed(Method::Post, &format!("/restaurants/{id}/tags"), Some(&body))
            .await?;
        Ok(())
    }
}

// =============================================================================
// PROFILES
// =============================================================================

pub struct ProfilesApi<'a> {
    client: &'a ApiClient,
}

impl ProfilesApi<'_> {
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn list(&self) -> Result<Vec<Profile>, ApiError> {
        self.client.get("/profiles").await
    }

    /// Profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] with 404 when no profile exists yet.
    pub async fn me(&self) -> Result<Profile, ApiError> {
        self.client.get("/profiles/me").await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn get(&self, id: i64) -> Result<Profile, ApiError> {
        self.client.get(&format!("/profiles/{id}")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn by_email(&self, email: &str) -> Result<Profile, ApiError> {
        self.client.get(&format!("/profiles/email/{}", seg(email))).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn create(&self, body: &CreateProfile) -> Result<Profile, ApiError> {
        self.client.send_authed(Method::Post, "/profiles", Some(body)).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn add_favorite(&self, restaurant_id: i64) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .send_authed::<_, ()>(Method::Post, &format!("/profiles/me/favorites/{restaurant_id}"), None)
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn remove_favorite(&self, restaurant_id: i64) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .send_authed::<_, ()>(Method::Delete, &format!("/profiles/me/favorites/{restaurant_id}"), None)
            .await?;
        Ok(())
    }
}

// =============================================================================
// PRODUCTS
// =============================================================================

pub struct ProductsApi<'a> {
    client: &'a ApiClient,
}

impl ProductsApi<'_> {
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        self.client.get("/products").await
    }

    /// Look a product up by barcode.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn by_code(&self, code: &str) -> Result<Product, ApiError> {
        self.client.get(&format!("/products/code/{}", seg(code.trim()))).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn create(&self, body: &Product) -> Result<Product, ApiError> {
        self.client.send_authed(Method::Post, "/products", Some(body)).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn update(&self, id: i64, body: &Product) -> Result<Product, ApiError> {
        self.client.send_authed(Method::Put, &format!("/products/{id}"), Some(body)).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .client
            .send_authed::<_, ()>(Method::Delete, &format!("/products/{id}"), None)
            .await?;
        Ok(())
    }
}

// =============================================================================
// TAGS
// =============================================================================

pub struct TagsApi<'a> {
    client: &'a ApiClient,
}

impl TagsApi<'_> {
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn restaurants(&self, tag: &str) -> Result<Vec<Restaurant>, ApiError> {
        self.client.restaurants().by_tag(tag).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn add_to_restaurant(&self, restaurant_id: i64, tag: &str) -> Result<(), ApiError> {
        self.client.restaurants().add_tag(restaurant_id, tag).await
    }
}

// =============================================================================
// USERS
// =============================================================================

pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl UsersApi<'_> {
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("/users").await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn get(&self, id: i64) -> Result<User, ApiError> {
        self.client.get(&format!("/users/{id}")).await
    }
}
