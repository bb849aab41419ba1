//! Domain Entities
//!
//! Airdrop campaigns, their tasks, and listing categories. User profiles are
//! the `auth` crate's [`auth::models::UserProfile`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CatalogError, CatalogResult};

// ============================================================================
// Codes
// ============================================================================

/// Airdrop lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirdropStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl AirdropStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use AirdropStatus::*;
        match self {
            Pending => "pending",
            Active => "active",
            Completed => "completed",
            Cancelled => "cancelled",
        }
    }

    pub fn from_code(code: &str) -> CatalogResult<Self> {
        use AirdropStatus::*;
        match code {
            "pending" => Ok(Pending),
            "active" => Ok(Active),
            "completed" => Ok(Completed),
            "cancelled" => Ok(Cancelled),
            other => Err(CatalogError::Backend(format!(
                "Unknown airdrop status: {other}"
            ))),
        }
    }
}

impl fmt::Display for AirdropStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_code(code: &str) -> CatalogResult<Self> {
        match code {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(CatalogError::Backend(format!("Unknown difficulty: {other}"))),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Airdrop
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub points: i32,
    pub task_type: String,
    pub is_required: bool,
    pub is_completed: bool,
    pub is_active: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Airdrop {
    pub id: String,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    /// Category slug; not enforced as a foreign key
    pub category: String,
    pub status: AirdropStatus,
    pub reward_amount: Option<String>,
    pub reward_type: Option<String>,
    pub blockchain: Option<String>,
    pub difficulty: Difficulty,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub current_participants: i32,
    pub max_participants: Option<i32>,
    pub is_featured: bool,
    pub priority: i32,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Ordered by `sort_order`
    pub tasks: Vec<Task>,
}

impl Airdrop {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == AirdropStatus::Active
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub points: i32,
    pub task_type: String,
    pub is_required: bool,
    /// Position among the airdrop's tasks; defaults to insertion order
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAirdrop {
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub category: String,
    pub status: AirdropStatus,
    pub reward_amount: Option<String>,
    pub reward_type: Option<String>,
    pub blockchain: Option<String>,
    pub difficulty: Difficulty,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub max_participants: Option<i32>,
    pub is_featured: bool,
    pub priority: i32,
    pub created_by: Option<String>,
    pub tasks: Vec<NewTask>,
}

impl NewAirdrop {
    /// Field checks that do not need the database.
    pub fn validate(&self) -> CatalogResult<()> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        require("category", &self.category)?;

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(CatalogError::Validation(
                    "end_date must not be before start_date".to_string(),
                ));
            }
        }
        if self.max_participants.is_some_and(|max| max < 0) {
            return Err(CatalogError::Validation(
                "max_participants must not be negative".to_string(),
            ));
        }
        for task in &self.tasks {
            require("task title", &task.title)?;
            require("task type", &task.task_type)?;
            if task.points < 0 {
                return Err(CatalogError::Validation(format!(
                    "task \"{}\" must not award negative points",
                    task.title
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Category
// ============================================================================

/// Id and slug of the listing-wide pseudo category.
pub const ALL_CATEGORY_ID: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// The synthetic "All" entry. Never persisted.
    pub fn all(now: DateTime<Utc>) -> Self {
        Self {
            id: ALL_CATEGORY_ID.to_string(),
            name: "All".to_string(),
            slug: ALL_CATEGORY_ID.to_string(),
            icon: None,
            color: None,
            is_active: true,
            sort_order: 0,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

impl NewCategory {
    pub fn validate(&self) -> CatalogResult<()> {
        require("name", &self.name)?;
        require("slug", &self.slug)?;
        if self.slug == ALL_CATEGORY_ID {
            return Err(CatalogError::Validation(format!(
                "slug \"{ALL_CATEGORY_ID}\" is reserved"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// User profile
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUserProfile {
    /// Auth identity id; generated by the database when absent
    pub id: Option<String>,
    pub email: String,
    pub username: Option<String>,
    pub role: auth::models::UserRole,
    pub wallet_address: Option<String>,
}

impl NewUserProfile {
    pub fn validate(&self) -> CatalogResult<()> {
        require("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(CatalogError::Validation(format!(
                "invalid email address: {}",
                self.email
            )));
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation(format!("{field} is required")));
    }
    Ok(())
}
