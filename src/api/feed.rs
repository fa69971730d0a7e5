//! Read-only gamification endpoints. Sent once, without retry.

use super::Location;
use crate::request::{Request, RequestData};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Challenges for a user, or the daily challenges when no user is known.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetChallenges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl GetChallenges {
    pub fn daily() -> Self {
        Self { user_id: None }
    }

    pub fn for_user<S: ToString>(user_id: S) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
        }
    }
}

impl Request for GetChallenges {
    type Data = Self;
    type Response = Challenges;

    fn endpoint(&self) -> Cow<str> {
        match self.user_id {
            Some(_) => "/api/challenges".into(),
            None => "/api/challenges/daily".into(),
        }
    }

    fn data(&self) -> RequestData<&Self> {
        match self.user_id {
            Some(_) => RequestData::Query(self),
            None => RequestData::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Challenges {
    pub challenges: Vec<Challenge>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub points: i64,
    #[serde(default)]
    pub xp: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub target: i64,
    pub waste_type: Option<String>,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub completed: bool,
}

pub struct GetCommunityEvents;

impl Request for GetCommunityEvents {
    type Data = ();
    type Response = CommunityEvents;

    fn endpoint(&self) -> Cow<str> {
        "/api/community/events".into()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommunityEvents {
    pub events: Vec<CommunityEvent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommunityEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub participants: i64,
    pub goal: i64,
    pub reward_points: i64,
    pub location: String,
    #[serde(default)]
    pub progress: f64,
}

pub struct GetLeaderboard;

impl Request for GetLeaderboard {
    type Data = ();
    type Response = Leaderboard;

    fn endpoint(&self) -> Cow<str> {
        "/api/leaderboard".into()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Leaderboard {
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: String,
    pub points: i64,
    pub tier: String,
}

/// Recycling centers near a position.
#[derive(Debug, Clone, Serialize)]
pub struct GetRecyclingCenters {
    pub lat: f64,
    pub lng: f64,
}

impl GetRecyclingCenters {
    pub fn near(location: Location) -> Self {
        Self {
            lat: location.latitude,
            lng: location.longitude,
        }
    }
}

impl Request for GetRecyclingCenters {
    type Data = Self;
    type Response = RecyclingCenters;

    fn endpoint(&self) -> Cow<str> {
        "/api/recycling-centers".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecyclingCenters {
    pub centers: Vec<RecyclingCenter>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecyclingCenter {
    pub id: String,
    pub name: String,
    pub address: String,
    pub distance: f64,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub hours: String,
    pub lat: f64,
    pub lng: f64,
}

pub struct GetEnvironmentalStats;

impl Request for GetEnvironmentalStats {
    type Data = ();
    type Response = StatsResponse;

    fn endpoint(&self) -> Cow<str> {
        "/api/stats/environmental".into()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsResponse {
    pub stats: EnvironmentalStats,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnvironmentalStats {
    pub total_users: i64,
    pub total_disposals: i64,
    pub waste_prevented_kg: f64,
    pub co2_saved_kg: f64,
    pub trees_saved: i64,
    pub active_today: i64,
}

pub struct GetMapHotspots;

impl Request for GetMapHotspots {
    type Data = ();
    type Response = MapHotspots;

    fn endpoint(&self) -> Cow<str> {
        "/api/map/hotspots".into()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapHotspots {
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
    #[serde(default)]
    pub events: Vec<EventMarker>,
}

/// Area with recent disposal activity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hotspot {
    pub lat: f64,
    pub lng: f64,
    pub radius: Option<f64>,
    pub intensity: Option<f64>,
    pub activity_count: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventMarker {
    pub lat: f64,
    pub lng: f64,
    pub radius: Option<f64>,
    pub intensity: Option<f64>,
    pub title: Option<String>,
    pub participants: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
