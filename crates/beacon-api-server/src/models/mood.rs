use serde::{Deserialize, Serialize};

/// Mood label derived from sentiment polarity plus keyword heuristics.
/// Shares no storage with the chat emotion vocabulary; the two surfaces only
/// overlap in spirit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Anxious,
    Neutral,
}

impl Mood {
    /// Spotify embed playlist for this mood.
    pub fn playlist(&self) -> &'static str {
        match self {
            Self::Happy => "https://open.spotify.com/embed/playlist/37i9dQZF1DXdPec7aLTmlC",
            Self::Sad => "https://open.spotify.com/embed/playlist/37i9dQZF1DX7qK8ma5wgG1",
            Self::Angry => "https://open.spotify.com/embed/playlist/37i9dQZF1DWYxwmBaMqxsl",
            Self::Anxious => "https://open.spotify.com/embed/playlist/37i9dQZF1DWXe9gFZP0gtP",
            Self::Neutral => "https://open.spotify.com/embed/playlist/37i9dQZF1DX3rxVfibe1L0",
        }
    }

    /// Guided meditation resources (video, audio) for this mood.
    pub fn meditation(&self) -> MeditationResources {
        match self {
            Self::Happy => MeditationResources {
                video: "https://www.youtube.com/embed/1ZYbU82GVz4",
                audio: "https://www.youtube.com/embed/cEqZthCaMpo",
            },
            Self::Sad => MeditationResources {
                video: "https://www.youtube.com/embed/inpok4MKVLM",
                audio: "https://www.youtube.com/embed/z6X5oEIg6Ak",
            },
            Self::Angry => MeditationResources {
                video: "https://www.youtube.com/embed/MIr3RsUWrdo",
                audio: "https://www.youtube.com/embed/qQyQj2Fgi_k",
            },
            Self::Anxious => MeditationResources {
                video: "https://www.youtube.com/embed/sTANio_2E0Q",
                audio: "https://www.youtube.com/embed/GgP75HAvrlY",
            },
            Self::Neutral => MeditationResources {
                video: "https://www.youtube.com/embed/ZToicYcHIOU",
                audio: "https://www.youtube.com/embed/o-6f5wQXSu8",
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MeditationResources {
    pub video: &'static str,
    pub audio: &'static str,
}

// ===== REQUEST / RESPONSE MODELS =====

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MusicMoodResponse {
    pub mood: Mood,
    pub playlist: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MeditationMoodResponse {
    pub mood: Mood,
    pub video: &'static str,
    pub audio: &'static str,
}
