//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use auth::models::{UserProfile, UserRole};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::entities::{
    Airdrop, AirdropStatus, Category, Difficulty, NewAirdrop, NewCategory, NewTask,
    NewUserProfile, Task,
};
use crate::domain::repository::{
    AirdropRepository, CategoryRepository, HealthProbe, UserRepository,
};
use crate::error::{CatalogError, CatalogResult};

const AIRDROP_COLUMNS: &str = r#"
    id, title, description, short_description, category, status,
    reward_amount, reward_type, blockchain, difficulty, start_date, end_date,
    current_participants, max_participants, is_featured, priority,
    created_by, created_at
"#;

const TASK_COLUMNS: &str = r#"
    id, airdrop_id, title, points, task_type,
    is_required, is_completed, is_active, sort_order
"#;

const CATEGORY_COLUMNS: &str = "id, name, slug, icon, color, is_active, sort_order, created_at";

const USER_COLUMNS: &str =
    "id, email, username, role, points, completed_airdrops, wallet_address, created_at";

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Tasks for the given airdrops, grouped by airdrop and in display order
    async fn tasks_for(&self, airdrop_ids: &[String]) -> CatalogResult<HashMap<String, Vec<Task>>> {
        if airdrop_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM airdrop_tasks \
             WHERE airdrop_id = ANY($1) \
             ORDER BY airdrop_id, sort_order ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(airdrop_ids)
            .fetch_all(&self.pool)
            .await?;

        let mut grouped: HashMap<String, Vec<Task>> = HashMap::new();
        for row in rows {
            let (airdrop_id, task) = row.into_task();
            grouped.entry(airdrop_id).or_default().push(task);
        }
        Ok(grouped)
    }

    async fn insert_task(
        tx: &mut Transaction<'_, Postgres>,
        airdrop_id: &str,
        position: usize,
        task: &NewTask,
    ) -> CatalogResult<Task> {
        let sql = format!(
            "INSERT INTO airdrop_tasks (airdrop_id, title, points, task_type, is_required, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {TASK_COLUMNS}"
        );
        let sort_order = task
            .sort_order
            .unwrap_or_else(|| i32::try_from(position).unwrap_or(i32::MAX));

        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(airdrop_id)
            .bind(&task.title)
            .bind(task.points)
            .bind(&task.task_type)
            .bind(task.is_required)
            .bind(sort_order)
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.into_task().1)
    }
}

/// Enforce the single-row contract of `get_by_id` on a `LIMIT 2` result.
fn exactly_one<T>(mut rows: Vec<T>, entity: &str, id: &str) -> CatalogResult<T> {
    if rows.len() > 1 {
        return Err(CatalogError::NotFound(format!(
            "Expected one {entity} with id {id}, found {}",
            rows.len()
        )));
    }
    rows.pop()
        .ok_or_else(|| CatalogError::NotFound(format!("No {entity} found with id {id}")))
}

impl AirdropRepository for PgCatalogRepository {
    async fn get_by_id(&self, id: &str) -> CatalogResult<Airdrop> {
        let lookup = async {
            let sql = format!("SELECT {AIRDROP_COLUMNS} FROM airdrops WHERE id = $1 LIMIT 2");
            let rows = sqlx::query_as::<_, AirdropRow>(&sql)
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

            let row = exactly_one(rows, "airdrop", id)?;
            let mut tasks = self.tasks_for(std::slice::from_ref(&row.id)).await?;
            let own = tasks.remove(&row.id).unwrap_or_default();
            row.into_airdrop(own)
        };

        lookup.await.map_err(CatalogError::into_lookup)
    }

    async fn get_all(&self, active_only: bool) -> CatalogResult<Vec<Airdrop>> {
        let sql = format!(
            "SELECT {AIRDROP_COLUMNS} FROM airdrops \
             WHERE ($1 = FALSE OR status = 'active') \
             ORDER BY is_featured DESC, priority DESC, created_at DESC"
        );
        let rows = sqlx::query_as::<_, AirdropRow>(&sql)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let mut tasks = self.tasks_for(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let own = tasks.remove(&row.id).unwrap_or_default();
                row.into_airdrop(own)
            })
            .collect()
    }

    async fn create(&self, input: NewAirdrop) -> CatalogResult<Airdrop> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO airdrops ( \
                title, description, short_description, category, status, \
                reward_amount, reward_type, blockchain, difficulty, start_date, end_date, \
                max_participants, is_featured, priority, created_by \
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {AIRDROP_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AirdropRow>(&sql)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.short_description)
            .bind(&input.category)
            .bind(input.status.code())
            .bind(&input.reward_amount)
            .bind(&input.reward_type)
            .bind(&input.blockchain)
            .bind(input.difficulty.code())
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.max_participants)
            .bind(input.is_featured)
            .bind(input.priority)
            .bind(&input.created_by)
            .fetch_one(&mut *tx)
            .await?;

        let mut tasks = Vec::with_capacity(input.tasks.len());
        for (position, task) in input.tasks.iter().enumerate() {
            tasks.push(Self::insert_task(&mut tx, &row.id, position, task).await?);
        }
        tasks.sort_by_key(|t| t.sort_order);

        tx.commit().await?;

        row.into_airdrop(tasks)
    }
}

impl CategoryRepository for PgCatalogRepository {
    async fn get_by_id(&self, id: &str) -> CatalogResult<Category> {
        let lookup = async {
            let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1 LIMIT 2");
            let rows = sqlx::query_as::<_, CategoryRow>(&sql)
                .bind(id)
                .fetch_all(&self.pool)
                .await?;
            exactly_one(rows, "category", id).map(CategoryRow::into_category)
        };

        lookup.await.map_err(CatalogError::into_lookup)
    }

    async fn get_all(&self, active_only: bool) -> CatalogResult<Vec<Category>> {
        let sql = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories \
             WHERE ($1 = FALSE OR is_active = TRUE) \
             ORDER BY sort_order ASC, name ASC"
        );
        let rows = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn create(&self, input: NewCategory) -> CatalogResult<Category> {
        let sql = format!(
            "INSERT INTO categories (name, slug, icon, color, is_active, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {CATEGORY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.icon)
            .bind(&input.color)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into_category())
    }
}

impl UserRepository for PgCatalogRepository {
    async fn get_by_id(&self, id: &str) -> CatalogResult<UserProfile> {
        let lookup = async {
            let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 LIMIT 2");
            let rows = sqlx::query_as::<_, UserRow>(&sql)
                .bind(id)
                .fetch_all(&self.pool)
                .await?;
            exactly_one(rows, "user", id)?.into_profile()
        };

        lookup.await.map_err(CatalogError::into_lookup)
    }

    async fn get_all(&self) -> CatalogResult<Vec<UserProfile>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY points DESC, created_at ASC");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(UserRow::into_profile).collect()
    }

    async fn create(&self, input: NewUserProfile) -> CatalogResult<UserProfile> {
        let sql = format!(
            "INSERT INTO users (id, email, username, role, wallet_address) \
             VALUES (COALESCE($1, gen_random_uuid()::text), $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&input.id)
            .bind(&input.email)
            .bind(&input.username)
            .bind(input.role.code())
            .bind(&input.wallet_address)
            .fetch_one(&self.pool)
            .await?;

        row.into_profile()
    }
}

impl HealthProbe for PgCatalogRepository {
    async fn ping(&self) -> CatalogResult<()> {
        sqlx::query("SELECT id FROM airdrops LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Rows
// ============================================================================

#[derive(sqlx::FromRow)]
struct AirdropRow {
    id: String,
    title: String,
    description: String,
    short_description: Option<String>,
    category: String,
    status: String,
    reward_amount: Option<String>,
    reward_type: Option<String>,
    blockchain: Option<String>,
    difficulty: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    current_participants: i32,
    max_participants: Option<i32>,
    is_featured: bool,
    priority: i32,
    created_by: Option<String>,
    created_at: DateTime<Utc>,
}

impl AirdropRow {
    fn into_airdrop(self, tasks: Vec<Task>) -> CatalogResult<Airdrop> {
        Ok(Airdrop {
            status: AirdropStatus::from_code(&self.status)?,
            difficulty: Difficulty::from_code(&self.difficulty)?,
            id: self.id,
            title: self.title,
            description: self.description,
            short_description: self.short_description,
            category: self.category,
            reward_amount: self.reward_amount,
            reward_type: self.reward_type,
            blockchain: self.blockchain,
            start_date: self.start_date,
            end_date: self.end_date,
            current_participants: self.current_participants,
            max_participants: self.max_participants,
            is_featured: self.is_featured,
            priority: self.priority,
            created_by: self.created_by,
            created_at: self.created_at,
            tasks,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: String,
    airdrop_id: String,
    title: String,
    points: i32,
    task_type: String,
    is_required: bool,
    is_completed: bool,
    is_active: bool,
    sort_order: i32,
}

impl TaskRow {
    fn into_task(self) -> (String, Task) {
        (
            self.airdrop_id,
            Task {
                id: self.id,
                title: self.title,
                points: self.points,
                task_type: self.task_type,
                is_required: self.is_required,
                is_completed: self.is_completed,
                is_active: self.is_active,
                sort_order: self.sort_order,
            },
        )
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    slug: String,
    icon: Option<String>,
    color: Option<String>,
    is_active: bool,
    sort_order: i32,
    created_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: self.id,
            name: self.name,
            slug: self.slug,
            icon: self.icon,
            color: self.color,
            is_active: self.is_active,
            sort_order: self.sort_order,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    username: Option<String>,
    role: String,
    points: i32,
    completed_airdrops: i32,
    wallet_address: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_profile(self) -> CatalogResult<UserProfile> {
        let role = UserRole::from_code(&self.role)
            .map_err(|e| CatalogError::Backend(e.to_string()))?;

        Ok(UserProfile {
            id: self.id,
            email: self.email,
            username: self.username,
            role,
            points: self.points,
            completed_airdrops: self.completed_airdrops,
            wallet_address: self.wallet_address,
            created_at: self.created_at,
        })
    }
}
