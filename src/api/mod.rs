//! Typed requests and responses for every endpoint the client consumes.

mod actions;
mod auth;
mod feed;

pub use actions::{ActionResult, SubmitAction, UploadVideo, VideoResult};
pub use auth::{AuthResponse, AuthUser, Login, Register};
pub use feed::{
    Challenge, Challenges, CommunityEvent, CommunityEvents, EnvironmentalStats, EventMarker,
    GetChallenges, GetCommunityEvents, GetEnvironmentalStats, GetLeaderboard, GetMapHotspots,
    GetRecyclingCenters, Hotspot, Leaderboard, LeaderboardEntry, MapHotspots, RecyclingCenter,
    RecyclingCenters, StatsResponse,
};

use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
