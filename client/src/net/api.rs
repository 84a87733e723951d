//! REST calls against the rooms backend.
//!
//! Browser (`csr`): real HTTP via `gloo-net`, one [`Api`] value per user
//! action carrying the caller's [`Session`]. After the call the caller takes
//! the session back with [`Api::into_session`] so a refreshed token is kept.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is a [`WorkflowError`] rendered inline by the caller. The
//! only repeated request is the single retry after a successful refresh.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use rooms::endpoints;
#[cfg(feature = "csr")]
use rooms::floor_map::{self, SVG_CONTENT_TYPE};
#[cfg(feature = "csr")]
use rooms::session::{AuthAttempt, AuthStep, RefreshedTokens};
#[cfg(feature = "csr")]
use rooms::{FloorMapEntry, Room, RoomDraft, UploadedFloorMap, WorkflowError};
#[cfg(feature = "csr")]
use rooms::Session;

/// API root for every request issued by the browser.
pub const API_BASE: &str = "/api";

/// Absolute path of an endpoint under [`API_BASE`].
#[must_use]
pub fn api_url(path: &str) -> String {
    endpoints::join(API_BASE, path)
}

/// Prefer a JSON `{"message": ...}` body; fall back to the raw text.
#[cfg(any(test, feature = "csr"))]
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(serde_json::Value::as_str).map(ToOwned::to_owned))
        .unwrap_or_else(|| body.to_owned())
}

#[cfg(feature = "csr")]
use gloo_net::http::{Request, RequestBuilder, Response};

/// One user action's worth of requests, sharing a session.
#[cfg(feature = "csr")]
pub struct Api {
    session: Session,
}

#[cfg(feature = "csr")]
impl Api {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// The session after this action's requests, refreshed or cleared.
    pub fn into_session(self) -> Session {
        self.session
    }

    pub async fn list_rooms(&mut self) -> Result<Vec<Room>, WorkflowError> {
        let url = api_url(endpoints::ROOMS);
        let response = self.execute(|auth| build(Request::get(&url), auth)).await?;
        read_json(response).await
    }

    pub async fn create_room(&mut self, draft: &RoomDraft) -> Result<Room, WorkflowError> {
        let draft = draft.validate()?;
        let url = api_url(endpoints::ROOMS);
        let response = self
            .execute(|auth| with_auth(Request::post(&url), auth).json(&draft).map_err(transport))
            .await?;
        read_json(response).await
    }

    pub async fn update_room(&mut self, room_id: i64, draft: &RoomDraft) -> Result<Room, WorkflowError> {
        let draft = draft.validate()?;
        let url = api_url(&endpoints::room(room_id));
        let response = self
            .execute(|auth| with_auth(Request::put(&url), auth).json(&draft).map_err(transport))
            .await?;
        read_json(response).await
    }

    pub async fn delete_room(&mut self, room_id: i64) -> Result<(), WorkflowError> {
        let url = api_url(&endpoints::room(room_id));
        let response = self.execute(|auth| build(Request::delete(&url), auth)).await?;
        ensure_success(response).await?;
        log::info!("room {room_id} deleted");
        Ok(())
    }

    pub async fn list_floor_maps(&mut self) -> Result<Vec<FloorMapEntry>, WorkflowError> {
        let url = api_url(endpoints::FLOOR_MAPS);
        let response = self.execute(|auth| build(Request::get(&url), auth)).await?;
        read_json(response).await
    }

    /// Raw markup at `path` (relative to the API base), e.g. from a
    /// [`rooms::preview::FetchTicket`]. Aborting `signal` cancels the request.
    pub async fn fetch_markup(
        &mut self,
        path: &str,
        signal: Option<&web_sys::AbortSignal>,
    ) -> Result<String, WorkflowError> {
        let url = api_url(path);
        let response = self
            .execute(|auth| {
                let request = Request::get(&url)
                    .header("Accept", SVG_CONTENT_TYPE)
                    .abort_signal(signal);
                build(request, auth)
            })
            .await?;
        let response = ensure_success(response).await?;
        response.text().await.map_err(transport)
    }

    /// Upload designer output as `floormap-<now_ms>.svg`.
    pub async fn upload_floor_map(&mut self, svg: &str, now_ms: i64) -> Result<UploadedFloorMap, WorkflowError> {
        let url = api_url(endpoints::FLOOR_MAPS);
        let filename = floor_map::upload_filename(now_ms);
        let response = self
            .execute(|auth| {
                let form = svg_form(svg, &filename)?;
                with_auth(Request::post(&url), auth).body(form).map_err(transport)
            })
            .await?;
        let uploaded: UploadedFloorMap = read_json(response).await?;
        log::info!("floor map uploaded as {}", uploaded.filename);
        Ok(uploaded)
    }

    /// Send the request built by `make`, refreshing the session once on 401.
    async fn execute<F>(&mut self, make: F) -> Result<Response, WorkflowError>
    where
        F: Fn(Option<&str>) -> Result<Request, WorkflowError>,
    {
        let mut attempt = AuthAttempt::Initial;
        loop {
            let auth = self.session.authorization();
            let response = make(auth.as_deref())?.send().await.map_err(transport)?;
            match attempt.next_step(response.status(), self.session.can_refresh()) {
                AuthStep::Accept => return Ok(response),
                AuthStep::RefreshAndRetry => {
                    log::debug!("access token rejected by {}; refreshing", response.url());
                    self.refresh().await?;
                    attempt = AuthAttempt::Retry;
                }
                AuthStep::Unauthorized => {
                    log::warn!("request to {} unauthorized ({attempt:?})", response.url());
                    return Err(WorkflowError::Unauthorized);
                }
            }
        }
    }

    async fn refresh(&mut self) -> Result<(), WorkflowError> {
        let Some(body) = self.session.refresh_request() else {
            return Err(WorkflowError::Unauthorized);
        };
        let url = api_url(endpoints::AUTH_REFRESH);
        let response = Request::post(&url)
            .json(&body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        if !response.ok() {
            log::warn!("session refresh rejected ({})", response.status());
            self.session.clear();
            return Err(WorkflowError::Unauthorized);
        }
        let tokens: RefreshedTokens = response.json().await.map_err(decode)?;
        self.session.apply(tokens);
        Ok(())
    }
}

#[cfg(feature = "csr")]
fn with_auth(builder: RequestBuilder, auth: Option<&str>) -> RequestBuilder {
    match auth {
        Some(value) => builder.header("Authorization", value),
        None => builder,
    }
}

#[cfg(feature = "csr")]
fn build(builder: RequestBuilder, auth: Option<&str>) -> Result<Request, WorkflowError> {
    with_auth(builder, auth).build().map_err(transport)
}

/// Multipart body with the markup as an `image/svg+xml` file part.
#[cfg(feature = "csr")]
fn svg_form(svg: &str, filename: &str) -> Result<web_sys::FormData, WorkflowError> {
    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(svg));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(SVG_CONTENT_TYPE);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_transport)?;
    let form = web_sys::FormData::new().map_err(js_transport)?;
    form.append_with_blob_and_filename(endpoints::UPLOAD_FIELD, &blob, filename)
        .map_err(js_transport)?;
    Ok(form)
}

#[cfg(feature = "csr")]
async fn ensure_success(response: Response) -> Result<Response, WorkflowError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(WorkflowError::from_status(status, &error_message(&body)))
}

#[cfg(feature = "csr")]
async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, WorkflowError> {
    let response = ensure_success(response).await?;
    response.json().await.map_err(decode)
}

#[cfg(feature = "csr")]
fn transport(error: gloo_net::Error) -> WorkflowError {
    WorkflowError::Transport(error.to_string())
}

#[cfg(feature = "csr")]
fn js_transport(error: wasm_bindgen::JsValue) -> WorkflowError {
    WorkflowError::Transport(format!("{error:?}"))
}

#[cfg(feature = "csr")]
fn decode(error: gloo_net::Error) -> WorkflowError {
    WorkflowError::Invalid(format!("unexpected response body: {error}"))
}
