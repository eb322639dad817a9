use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::core::config::lastfm::SERVICE_NAME;
use crate::i18n::lang_from_code;
use crate::message::Outgoing;
use crate::relative_time::relative_phrase;

/// One track entry from a recent-tracks payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEvent {
    pub artist: String,
    pub title: String,
    pub now_playing: bool,
    /// Epoch seconds of the scrobble; absent while the track is playing.
    pub played_at: Option<i64>,
}

impl TrackEvent {
    /// Reads a track entry. Missing pieces become empty strings / `None`.
    pub fn from_json(track: &Value) -> Self {
        let artist = track["artist"]["#text"]
            .as_str()
            .or_else(|| track["artist"]["name"].as_str())
            .unwrap_or_default()
            .to_string();

        let now_playing = match &track["@attr"]["nowplaying"] {
            Value::Bool(flag) => *flag,
            Value::String(flag) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        };

        let played_at = match &track["date"]["uts"] {
            Value::String(uts) => uts.trim().parse::<i64>().ok(),
            Value::Number(uts) => uts.as_i64(),
            _ => None,
        };

        Self {
            artist,
            title: track["name"].as_str().unwrap_or_default().to_string(),
            now_playing,
            played_at,
        }
    }

    /// "Artist - Title"
    pub fn artist_and_title(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

/// What a recent-tracks payload says, before it is turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecentTracksOutcome {
    /// The API reported an error
    ApiError(String),
    /// No `recenttracks` block, or its track list is unusable
    UnknownUser,
    NoTracks { sender: String },
    NowPlaying { sender: String, track: TrackEvent },
    LastPlayed { sender: String, track: TrackEvent },
}

impl RecentTracksOutcome {
    /// Classifies a payload. First matching rule wins: error, missing user,
    /// empty list, now playing, last played.
    ///
    /// `identity` is used as the sender name when the payload carries no
    /// `@attr.user` attribution.
    pub fn classify(payload: &Value, identity: &str) -> Self {
        if let Some(error) = payload.get("error") {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return RecentTracksOutcome::ApiError(message);
        }

        let Some(recent) = payload.get("recenttracks") else {
            return RecentTracksOutcome::UnknownUser;
        };

        let sender = recent["@attr"]["user"]
            .as_str()
            .unwrap_or(identity)
            .to_string();

        // Last.fm collapses a one-element list into a bare object.
        let tracks: Vec<&Value> = match recent.get("track") {
            Some(Value::Array(list)) => list.iter().collect(),
            Some(single @ Value::Object(_)) => vec![single],
            _ => return RecentTracksOutcome::UnknownUser,
        };

        let Some(latest) = tracks.first() else {
            return RecentTracksOutcome::NoTracks { sender };
        };

        let track = TrackEvent::from_json(latest);
        if track.now_playing {
            RecentTracksOutcome::NowPlaying { sender, track }
        } else {
            RecentTracksOutcome::LastPlayed { sender, track }
        }
    }

    /// Chat message for this outcome, with relative times measured from `now`.
    pub fn to_outgoing(&self, now: &DateTime<Utc>) -> Outgoing {
        match self {
            RecentTracksOutcome::ApiError(message) => Outgoing::Reply(format!("Something went wrong: {}", message)),
            RecentTracksOutcome::UnknownUser => {
                Outgoing::Reply(format!("I can't seem to find you on {} :(", SERVICE_NAME))
            }
            RecentTracksOutcome::NoTracks { sender } => {
                Outgoing::Reply(format!("I can't seem to find any tracks for {} :(", sender))
            }
            RecentTracksOutcome::NowPlaying { sender, track } => {
                Outgoing::Send(format!("{} is now playing {}", sender, track.artist_and_title()))
            }
            RecentTracksOutcome::LastPlayed { sender, track } => {
                let since = track
                    .played_at
                    .and_then(|uts| Utc.timestamp_opt(uts, 0).single())
                    .map(|played| relative_phrase(&lang_from_code("en"), &played, now));

                match since {
                    Some(since) => Outgoing::Send(format!(
                        "{} last played {} ({})",
                        sender,
                        track.artist_and_title(),
                        since
                    )),
                    None => Outgoing::Send(format!("{} last played {}", sender, track.artist_and_title())),
                }
            }
        }
    }
}

/// Formats a recent-tracks payload for `identity`, relative to the current time.
pub fn format_recent_tracks(payload: &Value, identity: &str) -> Outgoing {
    RecentTracksOutcome::classify(payload, identity).to_outgoing(&Utc::now())
}
