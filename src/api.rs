use serde::{Deserialize, Serialize};

use crate::model::WorkoutData;

const DEV_BASE_URL: &str = "http://localhost:8000";
const PROD_BASE_URL: &str = "https://coach-ai-assistant.onrender.com";

/// Resolved once per build: debug builds talk to a local backend, release
/// builds to the hosted one.
pub fn api_base() -> &'static str {
    if cfg!(debug_assertions) {
        DEV_BASE_URL
    } else {
        PROD_BASE_URL
    }
}

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        api_base().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Deserialize)]
struct TranscribeResponse {
    text: String,
}

#[derive(Serialize)]
struct ParseRequest<'a> {
    text: &'a str,
}

/// Uploads the finished recording and returns the transcript text.
pub async fn transcribe_audio(wav_bytes: Vec<u8>) -> Result<String, String> {
    let part = reqwest::multipart::Part::bytes(wav_bytes)
        .file_name("recording.wav")
        .mime_str("audio/wav")
        .map_err(|err| err.to_string())?;
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = reqwest::Client::new()
        .post(endpoint("/transcribe"))
        .multipart(form)
        .send()
        .await
        .map_err(|err| err.to_string())?
        .error_for_status()
        .map_err(|err| err.to_string())?;

    let body: TranscribeResponse = response.json().await.map_err(|err| err.to_string())?;
    Ok(body.text)
}

/// Sends instruction text to the parser and returns the structured result.
pub async fn parse_text(text: &str) -> Result<WorkoutData, String> {
    let response = reqwest::Client::new()
        .post(endpoint("/parse"))
        .json(&ParseRequest { text })
        .send()
        .await
        .map_err(|err| err.to_string())?
        .error_for_status()
        .map_err(|err| err.to_string())?;

    response.json().await.map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(endpoint("/parse"), format!("{}/parse", api_base()));
        assert_eq!(endpoint("transcribe"), endpoint("/transcribe"));
    }

    #[test]
    fn base_url_follows_build_profile() {
        if cfg!(debug_assertions) {
            assert_eq!(api_base(), DEV_BASE_URL);
        } else {
            assert_eq!(api_base(), PROD_BASE_URL);
        }
    }

    #[test]
    fn parse_request_wire_shape() {
        let body = serde_json::to_string(&ParseRequest {
            text: "Assign a 10km run to Sarah at 7am",
        })
        .unwrap();
        assert_eq!(body, r#"{"text":"Assign a 10km run to Sarah at 7am"}"#);
    }
}
