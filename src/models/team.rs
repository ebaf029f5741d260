// src/models/team.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user's team never exceeds this many members.
pub const TEAM_MAX: i64 = 6;

/// Represents the 'team_members' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: i64,
    pub user_id: i64,
    pub item_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for appending to the current user's team.
#[derive(Debug, Deserialize)]
pub struct AddTeamMemberRequest {
    pub item_id: String,
}

/// DTO for listing a team member without the owner's internal id.
#[derive(Debug, Serialize, FromRow)]
pub struct TeamMemberResponse {
    pub id: i64,
    pub item_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
