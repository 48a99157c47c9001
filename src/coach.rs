//! Coach feedback collaborator
//!
//! On entering the results screen the simulation asks for one short
//! encouraging tip. The request runs outside the frame loop; whatever comes
//! back (or a fallback string) is only ever displayed.
//!
//! Requests are tagged with a results-session id. Entering results again
//! bumps the id, so a late answer for an older session is dropped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{GameMode, Motion};

/// Shown when the service answers with no text
pub const EMPTY_RESPONSE_TIP: &str =
    "Keep scrubbing! Every movement counts toward your recovery journey.";
/// Shown on any failure
pub const FALLBACK_TIP: &str =
    "Great effort! Consistency is the key to progress. Let's try another round!";

/// Why a tip request failed. Never shown to the player.
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("network error: {0}")]
    Network(String),
    #[error("coach service returned HTTP {0}")]
    Status(u16),
    #[error("malformed coach response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("coach request timed out")]
    Timeout,
    #[error("coach service not configured")]
    NotConfigured,
}

/// One feedback request, snapshotted at the results transition
#[derive(Debug, Clone, PartialEq)]
pub struct TipRequest {
    pub session: u64,
    pub motion_label: String,
    pub mode: &'static str,
    pub success: bool,
    pub score: f32,
}

impl TipRequest {
    pub fn new(session: u64, motion: &Motion, mode: GameMode, success: bool, score: f32) -> Self {
        Self {
            session,
            motion_label: motion.flat_label(),
            mode: mode.as_str(),
            success,
            score,
        }
    }

    /// Prompt text sent to the text-generation service
    pub fn prompt(&self) -> String {
        format!(
            "You are a physical therapy coach for a stroke survivor playing a rehabilitation game called \"Cleaning Rush\".\n\
             The user just finished a session.\n\
             Motion practiced: {}\n\
             Game Mode: {}\n\
             Was it successful? {}\n\
             Completion score: {}%\n\n\
             Please provide a short, encouraging, and highly motivating feedback (max 2 sentences).\n\
             If they were successful, praise their precision. If they failed (especially in speed mode), \
             encourage them to keep moving their arm as the movement itself is the therapy.\n\
             Keep the tone warm, empathetic, and professional.",
            self.motion_label,
            self.mode,
            if self.success { "Yes" } else { "No" },
            self.score.max(0.0).floor() as u32,
        )
    }

    /// JSON body for a `generateContent` call
    pub fn to_body(&self) -> Result<String, CoachError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(self.prompt()),
                }],
            }],
        };
        Ok(serde_json::to_string(&body)?)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Extract the tip text from a `generateContent` response body.
///
/// A well-formed response without text yields `EMPTY_RESPONSE_TIP`.
pub fn parse_response(body: &str) -> Result<String, CoachError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let text = response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        Ok(EMPTY_RESPONSE_TIP.to_string())
    } else {
        Ok(text.to_string())
    }
}

/// Collapse a request outcome into display text
pub fn resolve_tip(outcome: Result<String, CoachError>) -> String {
    match outcome {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Coach feedback unavailable: {}", e);
            FALLBACK_TIP.to_string()
        }
    }
}

/// Display-side state of the current results session
#[derive(Debug, Clone, Default)]
pub struct CoachSlot {
    session: u64,
    pub loading: bool,
    pub text: Option<String>,
}

impl CoachSlot {
    /// Start a new results session, returning its id
    pub fn begin(&mut self) -> u64 {
        self.session += 1;
        self.loading = true;
        self.text = None;
        self.session
    }

    /// Current session id (0 before the first results screen)
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Accept a tip for `session`. Stale sessions are ignored.
    pub fn deliver(&mut self, session: u64, text: String) -> bool {
        if session != self.session || !self.loading {
            log::warn!(
                "Dropping stale coach tip for session {} (current {})",
                session,
                self.session
            );
            return false;
        }
        self.loading = false;
        self.text = Some(text);
        true
    }

    /// Forget any pending request (results screen left)
    pub fn abandon(&mut self) {
        self.loading = false;
        self.text = None;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::fetch_tip;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{AbortController, Request, RequestInit, RequestMode, Response};

    use super::{CoachError, TipRequest, parse_response, resolve_tip};
    use crate::settings::CoachSettings;

    fn network(e: JsValue) -> CoachError {
        CoachError::Network(format!("{:?}", e))
    }

    async fn request(settings: &CoachSettings, tip: &TipRequest) -> Result<String, CoachError> {
        let url = settings.url().ok_or(CoachError::NotConfigured)?;
        let window = web_sys::window().ok_or_else(|| CoachError::Network("no window".into()))?;

        let controller = AbortController::new().map_err(network)?;
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&tip.to_body()?));
        opts.set_signal(Some(&controller.signal()));

        let request = Request::new_with_str_and_init(&url, &opts).map_err(network)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(network)?;

        // Abort the fetch once the timeout elapses
        let abort = Closure::once(move || controller.abort());
        let timeout_id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                abort.as_ref().unchecked_ref(),
                settings.timeout_ms as i32,
            )
            .map_err(network)?;

        let result = JsFuture::from(window.fetch_with_request(&request)).await;
        window.clear_timeout_with_handle(timeout_id);
        drop(abort);

        let response: Response = match result {
            Ok(value) => value.dyn_into().map_err(network)?,
            Err(e) => {
                let aborted = e
                    .dyn_ref::<js_sys::Error>()
                    .map(|err| err.name() == "AbortError")
                    .unwrap_or(false);
                return Err(if aborted { CoachError::Timeout } else { network(e) });
            }
        };

        if !response.ok() {
            return Err(CoachError::Status(response.status()));
        }
        let text = JsFuture::from(response.text().map_err(network)?)
            .await
            .map_err(network)?
            .as_string()
            .unwrap_or_default();
        parse_response(&text)
    }

    /// Ask the coach service for a tip. Never fails: errors become the fallback.
    pub async fn fetch_tip(settings: CoachSettings, tip: TipRequest) -> String {
        resolve_tip(request(&settings, &tip).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameMode, MOTIONS};

    fn sample_request() -> TipRequest {
        TipRequest::new(3, &MOTIONS[0], GameMode::Speed, false, 73.9)
    }

    #[test]
    fn test_request_flattens_label_and_floors_score() {
        let req = sample_request();
        assert_eq!(req.motion_label, "PUSH & PULL");
        let prompt = req.prompt();
        assert!(prompt.contains("Motion practiced: PUSH & PULL"));
        assert!(prompt.contains("Game Mode: speed"));
        assert!(prompt.contains("Was it successful? No"));
        assert!(prompt.contains("Completion score: 73%"));
    }

    #[test]
    fn test_body_wraps_prompt_in_contents() {
        let body: serde_json::Value =
            serde_json::from_str(&sample_request().to_body().unwrap()).unwrap();
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("Cleaning Rush"));
    }

    #[test]
    fn test_parse_response_reads_first_candidate_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":" Nice sweep! "}]}}]}"#;
        assert_eq!(parse_response(body).unwrap(), "Nice sweep!");
    }

    #[test]
    fn test_parse_response_without_text_uses_empty_tip() {
        assert_eq!(parse_response(r#"{"candidates":[]}"#).unwrap(), EMPTY_RESPONSE_TIP);
        assert_eq!(parse_response("{}").unwrap(), EMPTY_RESPONSE_TIP);
    }

    #[test]
    fn test_malformed_response_resolves_to_fallback() {
        let outcome = parse_response("<html>oops</html>");
        assert!(matches!(outcome, Err(CoachError::Malformed(_))));
        assert_eq!(resolve_tip(outcome), FALLBACK_TIP);
        assert_eq!(resolve_tip(Err(CoachError::Timeout)), FALLBACK_TIP);
    }

    #[test]
    fn test_slot_ignores_stale_sessions() {
        let mut slot = CoachSlot::default();
        let first = slot.begin();
        let second = slot.begin();
        assert_ne!(first, second);
        assert!(!slot.deliver(first, "old".into()));
        assert!(slot.loading);
        assert!(slot.deliver(second, "fresh".into()));
        assert_eq!(slot.text.as_deref(), Some("fresh"));
        assert!(!slot.loading);
        // A duplicate delivery for the same session is ignored too
        assert!(!slot.deliver(second, "again".into()));
        assert_eq!(slot.text.as_deref(), Some("fresh"));
    }
}
