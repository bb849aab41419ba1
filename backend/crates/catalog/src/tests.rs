//! Unit tests for the catalog crate

#[cfg(test)]
mod support {
    use std::sync::Mutex;

    use auth::models::{UserProfile, UserRole};
    use chrono::{Duration, TimeZone, Utc};

    use crate::domain::entities::{
        Airdrop, AirdropStatus, Category, Difficulty, NewAirdrop, NewCategory, NewUserProfile,
        Task,
    };
    use crate::domain::repository::{
        AirdropRepository, CategoryRepository, HealthProbe, UserRepository,
    };
    use crate::error::{CatalogError, CatalogResult};

    /// In-memory catalog with the same ordering and filtering as Postgres.
    #[derive(Default)]
    pub struct MemoryCatalog {
        pub airdrops: Mutex<Vec<Airdrop>>,
        pub categories: Mutex<Vec<Category>>,
        pub users: Mutex<Vec<UserProfile>>,
        /// When set, every call fails with this error
        pub failure: Option<CatalogError>,
    }

    impl MemoryCatalog {
        pub fn failing(err: CatalogError) -> Self {
            Self {
                failure: Some(err),
                ..Default::default()
            }
        }

        fn check(&self) -> CatalogResult<()> {
            match &self.failure {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }

        fn next_id(len: usize) -> String {
            (len + 1).to_string()
        }
    }

    fn single<T: Clone>(matches: Vec<&T>, entity: &str, id: &str) -> CatalogResult<T> {
        match matches.as_slice() {
            [one] => Ok((*one).clone()),
            [] => Err(CatalogError::NotFound(format!("No {entity} found with id {id}"))),
            many => Err(CatalogError::NotFound(format!(
                "Expected one {entity} with id {id}, found {}",
                many.len()
            ))),
        }
    }

    impl AirdropRepository for MemoryCatalog {
        async fn get_by_id(&self, id: &str) -> CatalogResult<Airdrop> {
            self.check().map_err(CatalogError::into_lookup)?;
            let airdrops = self.airdrops.lock().unwrap();
            single(airdrops.iter().filter(|a| a.id == id).collect(), "airdrop", id)
        }

        async fn get_all(&self, active_only: bool) -> CatalogResult<Vec<Airdrop>> {
            self.check()?;
            let mut airdrops: Vec<Airdrop> = self
                .airdrops
                .lock()
                .unwrap()
                .iter()
                .filter(|a| !active_only || a.is_active())
                .cloned()
                .collect();
            airdrops.sort_by(|a, b| {
                b.is_featured
                    .cmp(&a.is_featured)
                    .then(b.priority.cmp(&a.priority))
                    .then(b.created_at.cmp(&a.created_at))
            });
            Ok(airdrops)
        }

        async fn create(&self, input: NewAirdrop) -> CatalogResult<Airdrop> {
            self.check()?;
            let mut airdrops = self.airdrops.lock().unwrap();
            let id = Self::next_id(airdrops.len());
            let mut tasks: Vec<Task> = input
                .tasks
                .into_iter()
                .enumerate()
                .map(|(i, t)| Task {
                    id: format!("{id}-{i}"),
                    title: t.title,
                    points: t.points,
                    task_type: t.task_type,
                    is_required: t.is_required,
                    is_completed: false,
                    is_active: true,
                    sort_order: t.sort_order.unwrap_or(i as i32),
                })
                .collect();
            tasks.sort_by_key(|t| t.sort_order);

            let airdrop = Airdrop {
                id,
                title: input.title,
                description: input.description,
                short_description: input.short_description,
                category: input.category,
                status: input.status,
                reward_amount: input.reward_amount,
                reward_type: input.reward_type,
                blockchain: input.blockchain,
                difficulty: input.difficulty,
                start_date: input.start_date,
                end_date: input.end_date,
                current_participants: 0,
                max_participants: input.max_participants,
                is_featured: input.is_featured,
                priority: input.priority,
                created_by: input.created_by,
                created_at: Utc::now(),
                tasks,
            };
            airdrops.push(airdrop.clone());
            Ok(airdrop)
        }
    }

    impl CategoryRepository for MemoryCatalog {
        async fn get_by_id(&self, id: &str) -> CatalogResult<Category> {
            self.check().map_err(CatalogError::into_lookup)?;
            let categories = self.categories.lock().unwrap();
            single(categories.iter().filter(|c| c.id == id).collect(), "category", id)
        }

        async fn get_all(&self, active_only: bool) -> CatalogResult<Vec<Category>> {
            self.check()?;
            let mut categories: Vec<Category> = self
                .categories
                .lock()
                .unwrap()
                .iter()
                .filter(|c| !active_only || c.is_active)
                .cloned()
                .collect();
            categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
            Ok(categories)
        }

        async fn create(&self, input: NewCategory) -> CatalogResult<Category> {
            self.check()?;
            let mut categories = self.categories.lock().unwrap();
            if categories.iter().any(|c| c.slug == input.slug) {
                return Err(CatalogError::Validation(format!(
                    "duplicate key value violates unique constraint \"categories_slug_key\" ({})",
                    input.slug
                )));
            }
            let category = Category {
                id: Self::next_id(categories.len()),
                name: input.name,
                slug: input.slug,
                icon: input.icon,
                color: input.color,
                is_active: input.is_active,
                sort_order: input.sort_order,
                created_at: Utc::now(),
            };
            categories.push(category.clone());
            Ok(category)
        }
    }

    impl UserRepository for MemoryCatalog {
        async fn get_by_id(&self, id: &str) -> CatalogResult<UserProfile> {
            self.check().map_err(CatalogError::into_lookup)?;
            let users = self.users.lock().unwrap();
            single(users.iter().filter(|u| u.id == id).collect(), "user", id)
        }

        async fn get_all(&self) -> CatalogResult<Vec<UserProfile>> {
            self.check()?;
            let mut users = self.users.lock().unwrap().clone();
            users.sort_by(|a, b| b.points.cmp(&a.points));
            Ok(users)
        }

        async fn create(&self, input: NewUserProfile) -> CatalogResult<UserProfile> {
            self.check()?;
            let mut users = self.users.lock().unwrap();
            let profile = UserProfile {
                id: input.id.unwrap_or_else(|| Self::next_id(users.len())),
                email: input.email,
                username: input.username,
                role: input.role,
                points: 0,
                completed_airdrops: 0,
                wallet_address: input.wallet_address,
                created_at: Utc::now(),
            };
            users.push(profile.clone());
            Ok(profile)
        }
    }

    impl HealthProbe for MemoryCatalog {
        async fn ping(&self) -> CatalogResult<()> {
            self.check()
        }
    }

    pub fn category(id: &str, name: &str, sort_order: i32, is_active: bool) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            icon: None,
            color: Some("#22c55e".to_string()),
            is_active,
            sort_order,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    pub fn airdrop(id: &str, status: AirdropStatus, is_featured: bool, priority: i32) -> Airdrop {
        Airdrop {
            id: id.to_string(),
            title: format!("Airdrop {id}"),
            description: "Complete the quests".to_string(),
            short_description: None,
            category: "defi".to_string(),
            status,
            reward_amount: Some("500".to_string()),
            reward_type: Some("token".to_string()),
            blockchain: Some("ethereum".to_string()),
            difficulty: Difficulty::Easy,
            start_date: None,
            end_date: None,
            current_participants: 0,
            max_participants: None,
            is_featured,
            priority,
            created_by: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + Duration::hours(priority as i64),
            tasks: Vec::new(),
        }
    }

    pub fn user(id: &str, points: i32) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            username: None,
            role: UserRole::User,
            points,
            completed_airdrops: 0,
            wallet_address: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::CatalogError;
    use axum::http::StatusCode;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            CatalogError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::Backend("x".into()).kind(),
            ErrorKind::InternalServerError
        );
        assert_eq!(
            CatalogError::Unavailable("x".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_sqlx_error_mapping() {
        assert!(matches!(
            CatalogError::from(sqlx::Error::RowNotFound),
            CatalogError::NotFound(_)
        ));
        assert!(matches!(
            CatalogError::from(sqlx::Error::PoolTimedOut),
            CatalogError::Unavailable(_)
        ));
        assert!(matches!(
            CatalogError::from(sqlx::Error::Protocol("bad frame".to_string())),
            CatalogError::Backend(ref m) if m.contains("bad frame")
        ));
    }

    #[test]
    fn test_lookup_keeps_message() {
        let err = CatalogError::Unavailable("connection refused".to_string()).into_lookup();
        assert_eq!(err, CatalogError::NotFound("connection refused".to_string()));
        assert_eq!(err.to_string(), "connection refused");
    }
}

#[cfg(test)]
mod service_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::{AirdropService, CategoryService, UserService};
    use crate::domain::entities::{AirdropStatus, NewAirdrop, NewTask, NewUserProfile};
    use crate::error::CatalogError;

    #[tokio::test]
    async fn test_list_public_prepends_all() {
        let repo = MemoryCatalog::default();
        repo.categories.lock().unwrap().extend([
            category("2", "Gaming", 2, true),
            category("1", "DeFi", 1, true),
            category("3", "Retired", 0, false),
        ]);

        let listing = CategoryService::new(Arc::new(repo)).list_public().await.unwrap();
        let ids: Vec<_> = listing.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(ids, vec!["all", "1", "2"]);
        assert_eq!(listing[0].slug, "all");
        assert_eq!(listing[0].sort_order, 0);
    }

    #[tokio::test]
    async fn test_list_public_with_no_categories() {
        let listing = CategoryService::new(Arc::new(MemoryCatalog::default()))
            .list_public()
            .await
            .unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].id, "all");
    }

    #[tokio::test]
    async fn test_list_public_keeps_single_all_entry() {
        let repo = MemoryCatalog::default();
        repo.categories.lock().unwrap().extend([
            category("all", "Legacy", 1, true),
            category("1", "DeFi", 2, true),
        ]);

        let listing = CategoryService::new(Arc::new(repo)).list_public().await.unwrap();
        let ids: Vec<_> = listing.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(ids, vec!["all", "1"]);
        assert_eq!(listing[0].name, "All");
    }

    #[tokio::test]
    async fn test_list_public_failure_is_not_partial() {
        let repo = MemoryCatalog::failing(CatalogError::Unavailable("timeout".to_string()));
        let result = CategoryService::new(Arc::new(repo)).list_public().await;
        assert_eq!(result, Err(CatalogError::Unavailable("timeout".to_string())));
    }

    #[tokio::test]
    async fn test_airdrop_listing_order_and_filter() {
        let repo = MemoryCatalog::default();
        repo.airdrops.lock().unwrap().extend([
            airdrop("a", AirdropStatus::Active, false, 5),
            airdrop("b", AirdropStatus::Active, true, 1),
            airdrop("c", AirdropStatus::Pending, true, 9),
            airdrop("d", AirdropStatus::Active, false, 7),
        ]);
        let service = AirdropService::new(Arc::new(repo));

        let active: Vec<_> = service.list(true).await.unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(active, vec!["b", "d", "a"]);

        let all: Vec<_> = service.list(false).await.unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(all, vec!["c", "b", "d", "a"]);
    }

    #[tokio::test]
    async fn test_create_airdrop_orders_tasks() {
        let service = AirdropService::new(Arc::new(MemoryCatalog::default()));
        let created = service
            .create(NewAirdrop {
                title: "Testnet sprint".to_string(),
                description: "Bridge, swap, mint".to_string(),
                category: "layer2".to_string(),
                tasks: vec![
                    NewTask {
                        title: "Mint".to_string(),
                        task_type: "onchain".to_string(),
                        sort_order: Some(2),
                        ..Default::default()
                    },
                    NewTask {
                        title: "Bridge".to_string(),
                        task_type: "onchain".to_string(),
                        sort_order: Some(1),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.status, AirdropStatus::Pending);
        let titles: Vec<_> = created.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Bridge", "Mint"]);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_backend() {
        let repo = Arc::new(MemoryCatalog::default());
        let service = AirdropService::new(repo.clone());

        let result = service.create(NewAirdrop::default()).await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
        assert!(repo.airdrops.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_users_by_points() {
        let repo = MemoryCatalog::default();
        repo.users
            .lock()
            .unwrap()
            .extend([user("low", 5), user("high", 90), user("mid", 40)]);
        let service = UserService::new(Arc::new(repo));

        let ids: Vec<_> = service.list().await.unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);

        let created = service
            .create(NewUserProfile {
                id: Some("auth-uid".to_string()),
                email: "new@example.com".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.id, "auth-uid");
        assert_eq!(created.points, 0);

        let bad = service
            .create(NewUserProfile {
                email: "not-an-email".to_string(),
                ..Default::default()
            })
            .await;
        assert!(matches!(bad, Err(CatalogError::Validation(_))));
    }
}

#[cfg(test)]
mod router_tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::domain::entities::AirdropStatus;
    use crate::error::CatalogError;
    use crate::presentation::router::catalog_router_generic;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_categories_endpoint() {
        let repo = MemoryCatalog::default();
        repo.categories
            .lock()
            .unwrap()
            .extend([category("1", "DeFi", 1, true), category("2", "NFT", 2, true)]);

        let response = catalog_router_generic(repo)
            .oneshot(get("/categories"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let slugs: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["slug"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(slugs, vec!["all", "defi", "nft"]);
        assert_eq!(json[0]["id"], "all");
    }

    #[tokio::test]
    async fn test_categories_endpoint_failure_body() {
        let repo = MemoryCatalog::failing(CatalogError::Unavailable(
            "connection refused".to_string(),
        ));

        let response = catalog_router_generic(repo)
            .oneshot(get("/categories"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "connection refused" })
        );
    }

    #[tokio::test]
    async fn test_missing_airdrop_is_not_found() {
        let repo = MemoryCatalog::default();
        repo.airdrops
            .lock()
            .unwrap()
            .push(airdrop("1", AirdropStatus::Active, false, 0));

        let response = catalog_router_generic(repo)
            .oneshot(get("/airdrops/999"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["status"], 404);
        assert_eq!(json["detail"], "No airdrop found with id 999");
    }

    #[tokio::test]
    async fn test_duplicate_id_is_not_found() {
        let repo = MemoryCatalog::default();
        repo.users
            .lock()
            .unwrap()
            .extend([user("dup", 1), user("dup", 2)]);

        let response = catalog_router_generic(repo)
            .oneshot(get("/users/dup"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_airdrop_listing_defaults_to_active() {
        let repo = MemoryCatalog::default();
        repo.airdrops.lock().unwrap().extend([
            airdrop("1", AirdropStatus::Active, false, 0),
            airdrop("2", AirdropStatus::Completed, false, 0),
        ]);
        let router = catalog_router_generic(repo);

        let json = body_json(router.clone().oneshot(get("/airdrops")).await.unwrap()).await;
        assert_eq!(json.as_array().unwrap().len(), 1);

        let json = body_json(router.oneshot(get("/airdrops?active=false")).await.unwrap()).await;
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_airdrop_endpoint() {
        let router = catalog_router_generic(MemoryCatalog::default());

        let response = router
            .clone()
            .oneshot(post(
                "/airdrops",
                json!({
                    "title": "Zk quest",
                    "description": "Prove things",
                    "category": "zk",
                    "status": "active",
                    "difficulty": "hard",
                    "tasks": [{ "title": "Join Discord", "task_type": "social", "points": 10 }]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["status"], "active");
        assert_eq!(json["difficulty"], "hard");
        assert_eq!(json["tasks"][0]["is_required"], true);

        let id = json["id"].as_str().unwrap().to_string();
        let response = router.oneshot(get(&format!("/airdrops/{id}"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_validation_is_bad_request() {
        let router = catalog_router_generic(MemoryCatalog::default());

        let response = router
            .clone()
            .oneshot(post(
                "/categories",
                json!({ "name": "Everything", "slug": "all" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        router
            .clone()
            .oneshot(post("/categories", json!({ "name": "DeFi", "slug": "defi" })))
            .await
            .unwrap();
        let response = router
            .oneshot(post("/categories", json!({ "name": "DeFi 2", "slug": "defi" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["detail"].as_str().unwrap().contains("categories_slug_key"));
    }

    #[tokio::test]
    async fn test_create_user_ignores_requested_role() {
        let router = catalog_router_generic(MemoryCatalog::default());

        let response = router
            .oneshot(post(
                "/users",
                json!({ "email": "newcomer@example.com", "role": "admin" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["email"], "newcomer@example.com");
        assert_eq!(json["role"], "user");
    }

    #[tokio::test]
    async fn test_backend_outage_on_listing_is_unavailable() {
        let repo = MemoryCatalog::failing(CatalogError::Unavailable("pool timed out".to_string()));

        let response = catalog_router_generic(repo)
            .oneshot(get("/users"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
