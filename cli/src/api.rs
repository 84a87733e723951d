//! HTTP client for the rooms and floor-map endpoints.
//!
//! Every request goes through [`ApiClient::execute`], which attaches the
//! bearer token and walks the retry-once-on-401 sequence from
//! [`rooms::session`]. The session is owned by the client value; there is no
//! shared global client.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use rooms::endpoints;
use rooms::floor_map::{self, SVG_CONTENT_TYPE};
use rooms::reference::{self, FloorMapRef};
use rooms::session::{AuthAttempt, AuthStep, RefreshedTokens};
use rooms::{FloorMapEntry, Room, RoomDraft, Session, UploadedFloorMap, WorkflowError};
use serde::de::DeserializeOwned;

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:8080/api`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self { http: Client::new(), base_url: base_url.into(), session }
    }

    /// Current tokens (updated in place after a refresh).
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// A backend-relative document URL made absolute against the API root.
    #[must_use]
    pub fn absolute_url(&self, url: &str) -> String {
        rooms::reference::absolute_url(&self.base_url, url)
    }

    // =============================================================
    // Rooms
    // =============================================================

    pub async fn list_rooms(&mut self) -> Result<Vec<Room>, WorkflowError> {
        let url = self.url(endpoints::ROOMS);
        let response = self.execute(|http| http.get(&url)).await?;
        read_json(response).await
    }

    pub async fn get_room(&mut self, room_id: i64) -> Result<Room, WorkflowError> {
        let url = self.url(&endpoints::room(room_id));
        let response = self.execute(|http| http.get(&url)).await?;
        read_json(response).await
    }

    /// Validate and create a room.
    pub async fn create_room(&mut self, draft: &RoomDraft) -> Result<Room, WorkflowError> {
        let draft = draft.validate()?;
        let url = self.url(endpoints::ROOMS);
        let response = self.execute(|http| http.post(&url).json(&draft)).await?;
        read_json(response).await
    }

    /// Validate and replace a room.
    pub async fn update_room(&mut self, room_id: i64, draft: &RoomDraft) -> Result<Room, WorkflowError> {
        let draft = draft.validate()?;
        let url = self.url(&endpoints::room(room_id));
        let response = self.execute(|http| http.put(&url).json(&draft)).await?;
        read_json(response).await
    }

    pub async fn delete_room(&mut self, room_id: i64) -> Result<(), WorkflowError> {
        let url = self.url(&endpoints::room(room_id));
        let response = self.execute(|http| http.delete(&url)).await?;
        ensure_success(response).await?;
        tracing::info!(room_id, "room deleted");
        Ok(())
    }

    // =============================================================
    // Floor maps
    // =============================================================

    pub async fn list_floor_maps(&mut self) -> Result<Vec<FloorMapEntry>, WorkflowError> {
        let url = self.url(endpoints::FLOOR_MAPS);
        let response = self.execute(|http| http.get(&url)).await?;
        read_json(response).await
    }

    /// Raw markup of a stored document, by server filename.
    pub async fn fetch_floor_map(&mut self, filename: &str) -> Result<String, WorkflowError> {
        let url = self.url(&endpoints::floor_map_document(filename));
        let response = self
            .execute(|http| http.get(&url).header(ACCEPT, SVG_CONTENT_TYPE))
            .await?;
        let response = ensure_success(response).await?;
        response.text().await.map_err(transport)
    }

    /// Resolve any accepted reference form, then fetch the document.
    pub async fn fetch_by_reference(&mut self, raw: &str) -> Result<(FloorMapRef, String), WorkflowError> {
        let resolved = reference::resolve(raw)?;
        let markup = self.fetch_floor_map(&resolved.filename).await?;
        Ok((resolved, markup))
    }

    /// Upload SVG markup as `floormap-<now_ms>.svg`. Transport failures are
    /// returned as-is; nothing is retried beyond the session refresh.
    pub async fn upload_floor_map(&mut self, svg: &str, now_ms: i64) -> Result<UploadedFloorMap, WorkflowError> {
        let url = self.url(endpoints::FLOOR_MAPS);
        let filename = floor_map::upload_filename(now_ms);
        let bytes = svg.as_bytes().to_vec();
        let mut part_headers = HeaderMap::new();
        part_headers.insert(CONTENT_TYPE, HeaderValue::from_static(SVG_CONTENT_TYPE));
        let response = self
            .execute(|http| {
                let part = Part::bytes(bytes.clone())
                    .file_name(filename.clone())
                    .headers(part_headers.clone());
                http.post(&url).multipart(Form::new().part(endpoints::UPLOAD_FIELD, part))
            })
            .await?;
        let uploaded: UploadedFloorMap = read_json(response).await?;
        tracing::info!(filename = %uploaded.filename, url = %uploaded.url, "floor map uploaded");
        Ok(uploaded)
    }

    // =============================================================
    // Transport
    // =============================================================

    fn url(&self, path: &str) -> String {
        endpoints::join(&self.base_url, path)
    }

    /// Send a request built by `make`, refreshing the session once on 401.
    ///
    /// `make` is called again for the retry, so it must build a fresh request.
    async fn execute<F>(&mut self, make: F) -> Result<Response, WorkflowError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt = AuthAttempt::Initial;
        loop {
            let mut request = make(&self.http);
            if let Some(header) = self.session.authorization() {
                request = request.header(AUTHORIZATION, header);
            }
            let response = request.send().await.map_err(transport)?;
            let status = response.status().as_u16();
            match attempt.next_step(status, self.session.can_refresh()) {
                AuthStep::Accept => return Ok(response),
                AuthStep::RefreshAndRetry => {
                    tracing::debug!(url = %response.url(), "access token rejected; refreshing");
                    self.refresh().await?;
                    attempt = AuthAttempt::Retry;
                }
                AuthStep::Unauthorized => {
                    tracing::warn!(url = %response.url(), ?attempt, "request unauthorized");
                    return Err(WorkflowError::Unauthorized);
                }
            }
        }
    }

    async fn refresh(&mut self) -> Result<(), WorkflowError> {
        let Some(body) = self.session.refresh_request() else {
            return Err(WorkflowError::Unauthorized);
        };
        let url = self.url(endpoints::AUTH_REFRESH);
        let response = self.http.post(&url).json(&body).send().await.map_err(transport)?;
        if !response.status().is_success() {
            tracing::warn!(status = response.status().as_u16(), "session refresh rejected");
            self.session.clear();
            return Err(WorkflowError::Unauthorized);
        }
        let tokens: RefreshedTokens = response.json().await.map_err(decode)?;
        self.session.apply(tokens);
        Ok(())
    }
}

/// Map a non-2xx response to [`WorkflowError::Status`] carrying the body text.
async fn ensure_success(response: Response) -> Result<Response, WorkflowError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(WorkflowError::from_status(status.as_u16(), &error_message(&body)))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, WorkflowError> {
    let response = ensure_success(response).await?;
    response.json().await.map_err(decode)
}

/// Prefer a JSON `{"message": ...}` body; fall back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(serde_json::Value::as_str).map(ToOwned::to_owned))
        .unwrap_or_else(|| body.to_owned())
}

fn transport(error: reqwest::Error) -> WorkflowError {
    WorkflowError::Transport(error.to_string())
}

fn decode(error: reqwest::Error) -> WorkflowError {
    WorkflowError::Invalid(format!("unexpected response body: {error}"))
}
