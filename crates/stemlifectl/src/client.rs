//! HTTP client for the game server's REST-over-JSON surface.
//!
//! Mutating requests carry an `X-CSRFToken` header whose value is the
//! `csrftoken` cookie the server sets on earlier responses; the cookie
//! store replays the cookie itself. Every request runs under the
//! configured hard timeout so a hung server surfaces as a
//! [`GameError::Network`] instead of wedging the session.

use crate::backend::GameBackend;
use async_trait::async_trait;
use serde::Serialize;
use stemlife_common::config::ClientConfig;
use stemlife_common::protocol::{
    self, ChoiceResult, FetchOutcome, MakeChoiceRequest,
};
use stemlife_common::recommendation::Recommendation;
use stemlife_common::GameError;

const CSRF_COOKIE: &str = "csrftoken";
const CSRF_HEADER: &str = "X-CSRFToken";

pub struct HttpGameClient {
    http: reqwest::Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl HttpGameClient {
    pub fn new(config: &ClientConfig) -> Result<Self, GameError> {
        let http = reqwest::Client::builder()
            .timeout(config.effective_request_timeout())
            .cookie_store(true)
            .build()
            .map_err(|e| GameError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            csrf_token: None,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn capture_csrf(&mut self, response: &reqwest::Response) {
        for cookie in response.cookies() {
            if cookie.name() == CSRF_COOKIE {
                self.csrf_token = Some(cookie.value().to_string());
            }
        }
    }

    async fn read_body(
        &mut self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<String, GameError> {
        self.capture_csrf(&response);
        let status = response.status();
        if !status.is_success() {
            return Err(GameError::Protocol(format!("HTTP {status} from {path}")));
        }
        response.text().await.map_err(map_transport)
    }

    async fn get_text(&mut self, path: &str) -> Result<String, GameError> {
        tracing::debug!(url = %self.url(path), "GET");
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(map_transport)?;
        self.read_body(path, response).await
    }

    async fn post_json<T: Serialize>(&mut self, path: &str, body: &T) -> Result<String, GameError> {
        tracing::debug!(url = %self.url(path), "POST");
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token.clone());
        }
        let response = request.send().await.map_err(map_transport)?;
        self.read_body(path, response).await
    }
}

fn map_transport(error: reqwest::Error) -> GameError {
    if error.is_timeout() {
        GameError::Network(format!("request timed out: {error}"))
    } else {
        GameError::Network(error.to_string())
    }
}

#[async_trait]
impl GameBackend for HttpGameClient {
    async fn fetch_current_event(&mut self) -> Result<FetchOutcome, GameError> {
        let body = self.get_text("/get-current-event/").await?;
        protocol::decode_current_event(&body)
    }

    async fn submit_choice(&mut self, choice_index: usize) -> Result<ChoiceResult, GameError> {
        let body = self
            .post_json("/make-choice/", &MakeChoiceRequest { choice_index })
            .await?;
        protocol::decode_make_choice(&body)
    }

    async fn fetch_recommendation(&mut self) -> Result<Recommendation, GameError> {
        let body = self.get_text("/get-stem-recommendation/").await?;
        protocol::decode_recommendation(&body)
    }

    async fn reset(&mut self) -> Result<(), GameError> {
        let body = self.get_text("/reset-game/").await?;
        protocol::decode_reset(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_its_trailing_slash() {
        let config = ClientConfig {
            server_url: "http://game.example:8000/".to_string(),
            ..ClientConfig::default()
        };
        let client = HttpGameClient::new(&config).unwrap();
        assert_eq!(
            client.url("/get-current-event/"),
            "http://game.example:8000/get-current-event/"
        );
    }

    #[test]
    fn csrf_token_starts_absent() {
        let client = HttpGameClient::new(&ClientConfig::default()).unwrap();
        assert!(client.csrf_token.is_none());
    }
}
