//! Remote transcript and title lookup.
//!
//! [`TranscriptSource`] is the seam between the orchestrator and the video
//! platform. [`YouTubeClient`] implements it over blocking HTTP:
//!
//! 1. fetch the watch page and read the Innertube API key from it,
//! 2. ask the player endpoint for the video's caption track list,
//! 3. download the chosen track's timed-text XML.
//!
//! Titles come from the oEmbed endpoint and never fail the run.

use crate::captions::parse_timed_text;
use crate::error::ExtractError;
use crate::transcript::Transcript;
use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::LazyLock;
use std::time::Duration;

const WATCH_URL: &str = "https://www.youtube.com/watch";
const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";
const OEMBED_URL: &str = "https://www.youtube.com/oembed";
const TITLE_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_LANGUAGE: &str = "en";

static API_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).unwrap());
static FMT_PARAM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&fmt=[^&]*").unwrap());

/// One available caption track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageInfo {
    /// Human-readable language name, e.g. "English".
    pub name: String,
    pub code: String,
    pub is_auto_generated: bool,
}

impl LanguageInfo {
    /// `English (en) (Manual)` style listing line.
    pub fn listing_line(&self) -> String {
        let status = if self.is_auto_generated {
            "(Auto-generated)"
        } else {
            "(Manual)"
        };
        format!("{} ({}) {}", self.name, self.code, status)
    }
}

/// Outcome of a title lookup. Failures of any kind collapse into
/// `Unavailable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleLookup {
    Found(String),
    Unavailable,
}

impl TitleLookup {
    /// The title, or `video_{id}` when none could be retrieved.
    pub fn into_name(self, video_id: &str) -> String {
        match self {
            TitleLookup::Found(title) => title,
            TitleLookup::Unavailable => format!("video_{}", video_id),
        }
    }
}

/// Source of captions and titles for a video ID.
pub trait TranscriptSource {
    fn list_languages(&self, video_id: &str) -> Result<Vec<LanguageInfo>, ExtractError>;

    /// Fetch the transcript, optionally for a specific language code.
    fn fetch_transcript(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> Result<Transcript, ExtractError>;

    fn fetch_title(&self, video_id: &str) -> TitleLookup;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    #[serde(default)]
    playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    #[serde(default)]
    status: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    #[serde(default)]
    name: Option<TrackName>,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackName {
    #[serde(default)]
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<TextRun>,
}

#[derive(Debug, Clone, Deserialize)]
struct TextRun {
    text: String,
}

#[derive(Debug, Deserialize)]
struct OEmbed {
    title: Option<String>,
}

impl CaptionTrack {
    fn is_auto_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    fn display_name(&self) -> String {
        self.name
            .as_ref()
            .and_then(|name| {
                name.simple_text.clone().or_else(|| {
                    let joined: String = name.runs.iter().map(|run| run.text.as_str()).collect();
                    (!joined.is_empty()).then_some(joined)
                })
            })
            .unwrap_or_else(|| self.language_code.clone())
    }

    fn info(&self) -> LanguageInfo {
        LanguageInfo {
            name: self.display_name(),
            code: self.language_code.clone(),
            is_auto_generated: self.is_auto_generated(),
        }
    }

    /// Track URL with any explicit format removed so the default timed-text
    /// XML is served.
    fn transcript_url(&self) -> String {
        FMT_PARAM_REGEX.replace_all(&self.base_url, "").into_owned()
    }
}

/// Pick the track for `language`, preferring manually created captions over
/// auto-generated ones. Without a language, English is preferred and the first
/// listed track is the fallback.
fn select_track<'a>(tracks: &'a [CaptionTrack], language: Option<&str>) -> Result<&'a CaptionTrack> {
    let find = |code: &str| {
        tracks
            .iter()
            .filter(|track| track.language_code == code)
            .min_by_key(|track| track.is_auto_generated())
    };

    match language {
        Some(code) => find(code).ok_or_else(|| {
            let available: Vec<&str> = tracks.iter().map(|t| t.language_code.as_str()).collect();
            anyhow!(
                "No transcript found for language '{}'. Available languages: {}",
                code,
                available.join(", ")
            )
        }),
        None => find(DEFAULT_LANGUAGE)
            .or_else(|| tracks.first())
            .ok_or_else(|| anyhow!("No transcripts are available for this video")),
    }
}

/// Blocking HTTP client for YouTube captions.
pub struct YouTubeClient {
    http: Client,
}

impl YouTubeClient {
    pub fn new() -> Result<Self, ExtractError> {
        let http = Client::builder()
            .user_agent(concat!("transcript-extractor/", env!("CARGO_PKG_VERSION")))
            .timeout(None)
            .build()
            .map_err(ExtractError::transcript)?;
        Ok(Self { http })
    }

    fn innertube_api_key(&self, video_id: &str) -> Result<String> {
        tracing::debug!(video_id, "fetching watch page");
        let html = self
            .http
            .get(WATCH_URL)
            .query(&[("v", video_id)])
            .header("Accept-Language", "en-US")
            .send()
            .context("Failed to fetch video page")?
            .error_for_status()?
            .text()?;

        if html.contains("action=\"https://consent.youtube.com/s\"") {
            bail!("YouTube requires cookie consent for this request");
        }

        API_KEY_REGEX
            .captures(&html)
            .map(|captures| captures[1].to_string())
            .ok_or_else(|| anyhow!("Could not find player API key on video page"))
    }

    fn caption_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>> {
        let api_key = self.innertube_api_key(video_id)?;

        tracing::debug!(video_id, "requesting player data");
        let body = json!({
            "context": {
                "client": {
                    "clientName": "ANDROID",
                    "clientVersion": "20.10.38"
                }
            },
            "videoId": video_id
        });
        let player: PlayerResponse = self
            .http
            .post(PLAYER_URL)
            .query(&[("key", api_key.as_str())])
            .json(&body)
            .send()
            .context("Failed to fetch player data")?
            .error_for_status()?
            .json()
            .context("Malformed player response")?;

        if let Some(status) = &player.playability_status
            && status.status != "OK"
        {
            let reason = status.reason.as_deref().unwrap_or("video is unplayable");
            bail!("Video {} is unavailable ({}): {}", video_id, status.status, reason);
        }

        let tracks = player
            .captions
            .and_then(|captions| captions.player_captions_tracklist_renderer)
            .map(|renderer| renderer.caption_tracks)
            .unwrap_or_default();

        if tracks.is_empty() {
            bail!("Subtitles are disabled for this video");
        }

        tracing::debug!(video_id, count = tracks.len(), "caption tracks found");
        Ok(tracks)
    }

    fn download_track(&self, track: &CaptionTrack) -> Result<Transcript> {
        tracing::info!(
            language = %track.language_code,
            auto_generated = track.is_auto_generated(),
            "downloading caption track"
        );
        let xml = self
            .http
            .get(track.transcript_url())
            .send()
            .context("Failed to download caption track")?
            .error_for_status()?
            .text()?;

        let transcript = parse_timed_text(&xml);
        if transcript.is_empty() && !xml.contains("<transcript") {
            bail!("Caption track returned no usable content");
        }
        Ok(transcript)
    }

    fn lookup_title(&self, video_id: &str) -> Result<String> {
        let video_url = format!("{}?v={}", WATCH_URL, video_id);
        let oembed: OEmbed = self
            .http
            .get(OEMBED_URL)
            .query(&[("url", video_url.as_str()), ("format", "json")])
            .timeout(TITLE_TIMEOUT)
            .send()?
            .error_for_status()?
            .json()?;

        oembed.title.ok_or_else(|| anyhow!("oEmbed response has no title"))
    }
}

impl TranscriptSource for YouTubeClient {
    fn list_languages(&self, video_id: &str) -> Result<Vec<LanguageInfo>, ExtractError> {
        let tracks = self
            .caption_tracks(video_id)
            .map_err(|e| ExtractError::languages(format!("{:#}", e)))?;
        Ok(tracks.iter().map(CaptionTrack::info).collect())
    }

    fn fetch_transcript(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> Result<Transcript, ExtractError> {
        self.caption_tracks(video_id)
            .and_then(|tracks| {
                let track = select_track(&tracks, language)?;
                self.download_track(track)
            })
            .map_err(|e| ExtractError::transcript(format!("{:#}", e)))
    }

    fn fetch_title(&self, video_id: &str) -> TitleLookup {
        match self.lookup_title(video_id) {
            Ok(title) => TitleLookup::Found(title),
            Err(e) => {
                tracing::debug!(video_id, error = %e, "title lookup failed");
                TitleLookup::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(code: &str, kind: Option<&str>) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://example.com/api/timedtext?lang={}&fmt=srv3", code),
            name: None,
            language_code: code.to_string(),
            kind: kind.map(str::to_string),
        }
    }

    #[test]
    fn test_select_track_prefers_manual() {
        let tracks = vec![track("es", Some("asr")), track("es", None), track("en", None)];
        let selected = select_track(&tracks, Some("es")).unwrap();
        assert!(!selected.is_auto_generated());
        assert_eq!(selected.language_code, "es");
    }

    #[test]
    fn test_select_track_missing_language() {
        let tracks = vec![track("en", None), track("de", Some("asr"))];
        let err = select_track(&tracks, Some("fr")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'fr'"));
        assert!(message.contains("en, de"));
    }

    #[test]
    fn test_select_track_default_prefers_english() {
        let tracks = vec![track("de", None), track("en", Some("asr"))];
        assert_eq!(select_track(&tracks, None).unwrap().language_code, "en");

        let tracks = vec![track("de", None), track("fr", None)];
        assert_eq!(select_track(&tracks, None).unwrap().language_code, "de");

        assert!(select_track(&[], None).is_err());
    }

    #[test]
    fn test_transcript_url_strips_format() {
        assert_eq!(
            track("en", None).transcript_url(),
            "https://example.com/api/timedtext?lang=en"
        );
    }

    #[test]
    fn test_player_response_parsing() {
        let json = r#"{
            "playabilityStatus": {"status": "OK"},
            "captions": {"playerCaptionsTracklistRenderer": {"captionTracks": [
                {"baseUrl": "https://x/tt?v=1", "name": {"runs": [{"text": "English"}]}, "languageCode": "en"},
                {"baseUrl": "https://x/tt?v=2", "name": {"simpleText": "Spanish (auto-generated)"}, "languageCode": "es", "kind": "asr"}
            ]}}
        }"#;
        let player: PlayerResponse = serde_json::from_str(json).unwrap();
        let tracks = player
            .captions
            .unwrap()
            .player_captions_tracklist_renderer
            .unwrap()
            .caption_tracks;

        let infos: Vec<LanguageInfo> = tracks.iter().map(CaptionTrack::info).collect();
        assert_eq!(infos[0].listing_line(), "English (en) (Manual)");
        assert_eq!(
            infos[1].listing_line(),
            "Spanish (auto-generated) (es) (Auto-generated)"
        );
    }

    #[test]
    fn test_title_fallback_name() {
        assert_eq!(
            TitleLookup::Found("Real Title".into()).into_name("abc"),
            "Real Title"
        );
        assert_eq!(
            TitleLookup::Unavailable.into_name("dQw4w9WgXcQ"),
            "video_dQw4w9WgXcQ"
        );
    }
}
