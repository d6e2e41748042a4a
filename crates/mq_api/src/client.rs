//! reqwest-backed implementation of [`CinemaApi`]

use async_trait::async_trait;
use tracing::debug;

use crate::models::{Billboard, Movie, NewBillboard, NewMovie, NewRoom, Room};
use crate::{ApiError, CinemaApi};

/// Client for the booking backend's REST API.
///
/// Holds a shared `reqwest::Client` and the configured base URL
/// (e.g. `http://localhost:5222/api`).
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Turn a non-success billboard response into an error, preferring the
    /// backend's structured validation payload (`{"errors": ...}`) over the
    /// bare status code.
    async fn billboard_error(
        context: &'static str,
        response: reqwest::Response,
    ) -> ApiError {
        let status = response.status();
        if let Ok(body) = response.json::<serde_json::Value>().await
            && let Some(errors) = body.get("errors")
        {
            return ApiError::Validation(errors.to_string());
        }
        ApiError::Status { context, status }
    }
}

#[async_trait]
impl CinemaApi for ApiClient {
    async fn list_billboards(&self) -> Result<Vec<Billboard>, ApiError> {
        let response = self.client.get(self.url("billboards")).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                context: "fetching billboards",
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    async fn create_billboard(&self, body: &NewBillboard) -> Result<Billboard, ApiError> {
        debug!(date = %body.date, start = %body.start_time, "Creating billboard");
        let response = self
            .client
            .post(self.url("billboards"))
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::billboard_error("creating billboard", response).await);
        }
        Ok(response.json().await?)
    }

    async fn update_billboard(&self, id: i64, body: &NewBillboard) -> Result<Billboard, ApiError> {
        debug!(id, "Updating billboard");
        let response = self
            .client
            .put(self.url(&format!("billboards/{id}")))
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::billboard_error("updating billboard", response).await);
        }
        Ok(response.json().await?)
    }

    async fn delete_billboard(&self, id: i64) -> Result<(), ApiError> {
        debug!(id, "Deleting billboard");
        let response = self
            .client
            .delete(self.url(&format!("billboards/{id}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                context: "deleting billboard",
                status: response.status(),
            });
        }
        Ok(())
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, ApiError> {
        let response = self.client.get(self.url("movies")).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                context: "fetching movies",
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    async fn create_movie(&self, body: &NewMovie) -> Result<Movie, ApiError> {
        debug!(name = %body.name, "Creating movie");
        let response = self
            .client
            .post(self.url("movies"))
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                context: "creating movie",
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    async fn update_movie(&self, id: i64, body: &NewMovie) -> Result<Movie, ApiError> {
        debug!(id, "Updating movie");
        let response = self
            .client
            .put(self.url(&format!("movies/{id}")))
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                context: "updating movie",
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    async fn delete_movie(&self, id: i64) -> Result<(), ApiError> {
        debug!(id, "Deleting movie");
        let response = self
            .client
            .delete(self.url(&format!("movies/{id}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                context: "deleting movie",
                status: response.status(),
            });
        }
        Ok(())
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, ApiError> {
        let response = self.client.get(self.url("rooms")).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                context: "fetching rooms",
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    async fn get_room(&self, id: i64) -> Result<Room, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("rooms/{id}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                context: "fetching room",
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    async fn create_room(&self, body: &NewRoom) -> Result<Room, ApiError> {
        debug!(name = %body.name, "Creating room");
        let response = self
            .client
            .post(self.url("rooms"))
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                context: "creating room",
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    async fn update_room(&self, id: i64, body: &NewRoom) -> Result<(), ApiError> {
        debug!(id, "Updating room");
        let response = self
            .client
            .put(self.url(&format!("rooms/{id}")))
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                context: "updating room",
                status: response.status(),
            });
        }
        // The backend returns an empty body for room updates.
        Ok(())
    }

    async fn delete_room(&self, id: i64) -> Result<(), ApiError> {
        debug!(id, "Deleting room");
        let response = self
            .client
            .delete(self.url(&format!("rooms/{id}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                context: "deleting room",
                status: response.status(),
            });
        }
        Ok(())
    }
}
