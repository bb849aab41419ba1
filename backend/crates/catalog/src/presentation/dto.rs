//! API DTOs (Data Transfer Objects)
//!
//! Responses serialize the domain entities directly; requests are decoded
//! here and converted into the `New*` inputs.

use auth::models::UserRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    AirdropStatus, Difficulty, NewAirdrop, NewCategory, NewTask, NewUserProfile,
};

fn default_true() -> bool {
    true
}

/// Query for GET /api/airdrops
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirdropListQuery {
    /// Absent means active airdrops only
    #[serde(default)]
    pub active: Option<bool>,
}

impl AirdropListQuery {
    #[inline]
    pub fn active_only(&self) -> bool {
        self.active.unwrap_or(true)
    }
}

/// Request for POST /api/airdrops
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAirdropRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub short_description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub status: AirdropStatus,
    #[serde(default)]
    pub reward_amount: Option<String>,
    #[serde(default)]
    pub reward_type: Option<String>,
    #[serde(default)]
    pub blockchain: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_participants: Option<i32>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub tasks: Vec<CreateTaskRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub points: i32,
    pub task_type: String,
    #[serde(default = "default_true")]
    pub is_required: bool,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(req: CreateTaskRequest) -> Self {
        NewTask {
            title: req.title,
            points: req.points,
            task_type: req.task_type,
            is_required: req.is_required,
            sort_order: req.sort_order,
        }
    }
}

impl From<CreateAirdropRequest> for NewAirdrop {
    fn from(req: CreateAirdropRequest) -> Self {
        NewAirdrop {
            title: req.title,
            description: req.description,
            short_description: req.short_description,
            category: req.category,
            status: req.status,
            reward_amount: req.reward_amount,
            reward_type: req.reward_type,
            blockchain: req.blockchain,
            difficulty: req.difficulty,
            start_date: req.start_date,
            end_date: req.end_date,
            max_participants: req.max_participants,
            is_featured: req.is_featured,
            priority: req.priority,
            created_by: req.created_by,
            tasks: req.tasks.into_iter().map(NewTask::from).collect(),
        }
    }
}

/// Request for POST /api/categories
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl From<CreateCategoryRequest> for NewCategory {
    fn from(req: CreateCategoryRequest) -> Self {
        NewCategory {
            name: req.name,
            slug: req.slug,
            icon: req.icon,
            color: req.color,
            is_active: req.is_active,
            sort_order: req.sort_order,
        }
    }
}

/// Request for POST /api/users
///
/// Carries no role: profiles created over HTTP are always plain users, and a
/// `role` key in the body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub wallet_address: Option<String>,
}

impl From<CreateUserRequest> for NewUserProfile {
    fn from(req: CreateUserRequest) -> Self {
        NewUserProfile {
            id: req.id,
            email: req.email,
            username: req.username,
            role: UserRole::User,
            wallet_address: req.wallet_address,
        }
    }
}

/// Error body of GET /api/categories
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
