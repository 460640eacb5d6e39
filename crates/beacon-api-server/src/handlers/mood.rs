use axum::Json;
use tracing::debug;

use crate::models::mood::{MeditationMoodResponse, MoodRequest, MusicMoodResponse};
use crate::services::mood;

pub async fn detect_mood_handler(Json(request): Json<MoodRequest>) -> Json<MusicMoodResponse> {
    let mood = mood::detect(&request.text);
    debug!("Mood detected for music: {:?}", mood);

    Json(MusicMoodResponse {
        mood,
        playlist: mood.playlist(),
    })
}

pub async fn detect_meditation_handler(
    Json(request): Json<MoodRequest>,
) -> Json<MeditationMoodResponse> {
    let mood = mood::detect(&request.text);
    debug!("Mood detected for meditation: {:?}", mood);

    let resources = mood.meditation();
    Json(MeditationMoodResponse {
        mood,
        video: resources.video,
        audio: resources.audio,
    })
}
