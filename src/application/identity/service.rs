//! User management service
//!
//! All user-related business logic lives here.
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::listing::{list_page, pager_path, required_keyword};
use crate::application::{messages, parse_ids};
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, ImageUpload, ObjectStorage, User, UserFilter,
    UserRepositoryInterface, UserStatus, UserType,
};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::storage::assets::unique_name;
use crate::infrastructure::storage::AssetStore;
use crate::shared::{Listing, Page, StatusResult};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordOutcome {
    Changed,
    Mismatch,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderOutcome {
    /// Stored; carries the new public URL.
    Updated(String),
    Missing,
    BadFormat,
}

/// User service, generic over the persistence layer.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
    avatars: Arc<dyn ObjectStorage>,
    uploads: AssetStore,
    /// Public prefix of `GET /user/header/{name}`, without trailing slash.
    header_base_url: String,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(
        repo: Arc<R>,
        jwt_config: JwtConfig,
        avatars: Arc<dyn ObjectStorage>,
        uploads: AssetStore,
        header_base_url: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            jwt_config,
            avatars,
            uploads,
            header_base_url: header_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Directory behind the deprecated local avatar upload.
    pub fn uploads(&self) -> &AssetStore {
        &self.uploads
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate an admin by username/email + password and return a JWT.
    pub async fn login(&self, username_or_email: &str, password: &str) -> DomainResult<AuthResult> {
        let user = match self.repo.get_user_by_username(username_or_email).await? {
            Some(user) => Some(user),
            None => self.repo.get_user_by_email(username_or_email).await?,
        };

        let Some(user) = user else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        check_admin(&user)?;

        let token = create_token(user.id, &user.username, user.user_type.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        info!(user_id = user.id, username = %user.username, "Admin signed in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    /// Resolves a bearer token to the admin it was issued for.
    ///
    /// The account is re-read on every call so bans and deletions take
    /// effect before the token expires.
    pub async fn authorize_token(&self, token: &str) -> DomainResult<User> {
        let claims = verify_token(token, &self.jwt_config)
            .map_err(|e| DomainError::Unauthorized(format!("Invalid token: {}", e)))?;
        let user_id = claims
            .user_id()
            .ok_or_else(|| DomainError::Unauthorized("Invalid token subject".into()))?;

        let user = self
            .repo
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("User no longer exists".into()))?;

        check_admin(&user)?;
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        self.repo.get_user_by_id(id).await
    }

    pub async fn list_users(&self, current: u64) -> DomainResult<Listing<User>> {
        let page = Page::new(current, "/user-control");
        list_page(self.repo.as_ref(), &UserFilter::default(), page).await
    }

    pub async fn list_banned(&self, current: u64) -> DomainResult<Listing<User>> {
        let filter = UserFilter {
            status: Some(UserStatus::Banned),
            ..Default::default()
        };
        list_page(self.repo.as_ref(), &filter, Page::new(current, "/user/ban")).await
    }

    pub async fn list_by_type(&self, raw_type: Option<&str>, current: u64) -> DomainResult<Listing<User>> {
        let user_type = raw_type
            .and_then(UserType::parse)
            .ok_or_else(|| DomainError::Validation(messages::USER_TYPE_INVALID.into()))?;

        let filter = UserFilter {
            user_type: Some(user_type),
            ..Default::default()
        };
        let page = Page::new(
            current,
            pager_path("/user/userType", &[("type", user_type.as_str())]),
        );
        list_page(self.repo.as_ref(), &filter, page).await
    }

    /// Users whose username or email contains `keyword`, optionally limited
    /// to one account type. A blank keyword is rejected before any query.
    pub async fn search_users(
        &self,
        keyword: Option<&str>,
        raw_type: Option<&str>,
        current: u64,
    ) -> DomainResult<Listing<User>> {
        let Some(keyword) = required_keyword(keyword) else {
            return Err(DomainError::Validation(messages::KEYWORD_REQUIRED.into()));
        };

        let user_type = match raw_type.map(str::trim).filter(|t| !t.is_empty()) {
            Some(raw) => Some(
                UserType::parse(raw)
                    .ok_or_else(|| DomainError::Validation(messages::USER_TYPE_INVALID.into()))?,
            ),
            None => None,
        };

        let mut params = vec![("keyword", keyword.as_str())];
        if let Some(user_type) = user_type {
            params.push(("type", user_type.as_str()));
        }
        let path = pager_path("/user/search", &params);

        let filter = UserFilter {
            keyword: Some(keyword),
            user_type,
            status: None,
        };
        list_page(self.repo.as_ref(), &filter, Page::new(current, path)).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Adds a member account.
    pub async fn add_user(&self, username: &str, email: &str, password: &str) -> DomainResult<StatusResult> {
        let (username, email) = (username.trim(), email.trim());
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Ok(StatusResult::fail(3, messages::USER_FIELDS_REQUIRED));
        }

        if self.repo.get_user_by_username(username).await?.is_some() {
            return Ok(StatusResult::fail(1, messages::USERNAME_TAKEN));
        }
        if self.repo.get_user_by_email(email).await?.is_some() {
            return Ok(StatusResult::fail(2, messages::EMAIL_TAKEN));
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let created = self
            .repo
            .create_user(CreateUserDto {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                user_type: UserType::Member,
            })
            .await;

        match created {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "User added");
                Ok(StatusResult::ok_with(messages::USER_ADDED))
            }
            // lost a race with a concurrent insert of the same name
            Err(DomainError::Conflict(_)) => Ok(StatusResult::fail(1, messages::USERNAME_TAKEN)),
            Err(e) => Err(e),
        }
    }

    pub async fn remove_users(&self, raw_ids: &[String]) -> DomainResult<StatusResult> {
        if raw_ids.is_empty() {
            warn!("User removal without selection, nothing deleted");
            return Ok(StatusResult::fail(1, messages::NO_USER_SELECTED));
        }

        let Some(ids) = parse_ids(raw_ids) else {
            return Ok(StatusResult::fail(3, messages::PARAMS_INVALID));
        };

        let removed = self.repo.delete_users(&ids).await?;
        info!(requested = ids.len(), removed, "Users removed");
        Ok(StatusResult::ok_with(messages::USER_REMOVED))
    }

    /// Toggles the ban state of each `"<id>?<status>"` entry, where `status`
    /// is the state the page showed (`0` normal, `1` banned).
    pub async fn ban_users(&self, entries: &[String]) -> DomainResult<StatusResult> {
        if entries.is_empty() {
            warn!("Ban toggle without selection, nothing changed");
            return Ok(StatusResult::fail(1, messages::NO_USER_SELECTED));
        }

        let Some(changes) = entries
            .iter()
            .map(|entry| parse_ban_entry(entry))
            .collect::<Option<Vec<_>>>()
        else {
            return Ok(StatusResult::fail(3, messages::PARAMS_INVALID));
        };

        let updated = self.repo.set_user_statuses(&changes).await?;
        info!(requested = changes.len(), updated, "User ban states toggled");
        Ok(StatusResult::ok_with(messages::OPERATION_DONE))
    }

    pub async fn change_password(
        &self,
        user_id: i32,
        password: &str,
        password_re: &str,
    ) -> DomainResult<PasswordOutcome> {
        if password != password_re {
            return Ok(PasswordOutcome::Mismatch);
        }
        if password.is_empty() {
            return Ok(PasswordOutcome::Empty);
        }

        let new_hash = hash_password(password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;
        self.repo.update_user_password(user_id, &new_hash).await?;

        info!(user_id, "Password changed");
        Ok(PasswordOutcome::Changed)
    }

    /// Hands the avatar to the object store and records its public URL.
    pub async fn upload_header(
        &self,
        user_id: i32,
        image: Option<ImageUpload>,
    ) -> DomainResult<HeaderOutcome> {
        let (upload, suffix) = match check_image(image) {
            Ok(checked) => checked,
            Err(outcome) => return Ok(outcome),
        };

        let key = unique_name(&suffix);
        let url = self.avatars.put(&key, upload.bytes).await?;
        self.repo.update_user_header(user_id, &url).await?;

        info!(user_id, %url, "Avatar uploaded");
        Ok(HeaderOutcome::Updated(url))
    }

    /// Deprecated local variant: the file lands in the upload directory and
    /// is served back through `GET /user/header/{name}`.
    pub async fn upload_header_local(
        &self,
        user_id: i32,
        image: Option<ImageUpload>,
    ) -> DomainResult<HeaderOutcome> {
        let (upload, suffix) = match check_image(image) {
            Ok(checked) => checked,
            Err(outcome) => return Ok(outcome),
        };

        let name = self.uploads.save(&suffix, &upload.bytes).await?;
        let url = format!("{}/{}", self.header_base_url, name);
        self.repo.update_user_header(user_id, &url).await?;

        info!(user_id, %url, "Avatar stored locally");
        Ok(HeaderOutcome::Updated(url))
    }

    /// Creates the bootstrap admin unless an account with that name exists.
    pub async fn ensure_default_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        if self.repo.get_user_by_username(username).await?.is_some() {
            return Ok(None);
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;
        let user = self
            .repo
            .create_user(CreateUserDto {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                user_type: UserType::Admin,
            })
            .await?;

        warn!(username = %user.username, "Created default admin account, change its password");
        Ok(Some(user))
    }
}

// ── Helpers ─────────────────────────────────────────────────────

fn check_admin(user: &User) -> DomainResult<()> {
    if user.is_banned() {
        return Err(DomainError::Unauthorized("Account is banned".into()));
    }
    if user.user_type != UserType::Admin {
        return Err(DomainError::Forbidden("Admin access required".into()));
    }
    Ok(())
}

/// `"12?0"` → user 12, currently normal, so it becomes banned.
fn parse_ban_entry(entry: &str) -> Option<(i32, UserStatus)> {
    let (id, status) = entry.split_once('?')?;
    let id = id.trim().parse::<i32>().ok()?;
    let status = UserStatus::from_code(status.trim().parse::<i32>().ok()?)?;
    Some((id, status.toggled()))
}

fn check_image(image: Option<ImageUpload>) -> Result<(ImageUpload, String), HeaderOutcome> {
    let upload = image
        .filter(|i| !i.bytes.is_empty())
        .ok_or(HeaderOutcome::Missing)?;
    let suffix = upload.suffix().ok_or(HeaderOutcome::BadFormat)?;
    Ok((upload, suffix))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::ListingSource;
    use crate::infrastructure::database::repositories::UserRepository;
    use crate::infrastructure::database::{init_database, run_migrations, DatabaseConfig};
    use crate::infrastructure::storage::LocalObjectStorage;

    struct Fixture {
        service: UserService<UserRepository>,
        repo: Arc<UserRepository>,
        _avatars: tempfile::TempDir,
        _uploads: tempfile::TempDir,
    }

    async fn fixture() -> Fixture {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&db).await.unwrap();
        let repo = Arc::new(UserRepository::new(db));
        let avatars = tempfile::tempdir().unwrap();
        let uploads = tempfile::tempdir().unwrap();
        let service = UserService::new(
            repo.clone(),
            JwtConfig::default(),
            Arc::new(LocalObjectStorage::new(
                AssetStore::new(avatars.path()),
                "http://cdn.test/avatars",
            )),
            AssetStore::new(uploads.path()),
            "http://localhost:8080/admin/user/header/",
        );
        Fixture {
            service,
            repo,
            _avatars: avatars,
            _uploads: uploads,
        }
    }

    /// Real repository that counts every listing read.
    struct CountedUsers {
        inner: UserRepository,
        reads: AtomicUsize,
    }

    #[async_trait]
    impl ListingSource for CountedUsers {
        type Item = User;
        type Filter = UserFilter;

        async fn count(&self, filter: &UserFilter) -> DomainResult<u64> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.count(filter).await
        }

        async fn fetch(&self, filter: &UserFilter, offset: u64, limit: u64) -> DomainResult<Vec<User>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(filter, offset, limit).await
        }
    }

    #[async_trait]
    impl UserRepositoryInterface for CountedUsers {
        async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
            self.inner.create_user(dto).await
        }

        async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
            self.inner.get_user_by_id(id).await
        }

        async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
            self.inner.get_user_by_username(username).await
        }

        async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
            self.inner.get_user_by_email(email).await
        }

        async fn update_user_password(&self, id: i32, hash: &str) -> DomainResult<()> {
            self.inner.update_user_password(id, hash).await
        }

        async fn update_user_header(&self, id: i32, header_url: &str) -> DomainResult<()> {
            self.inner.update_user_header(id, header_url).await
        }

        async fn set_user_statuses(&self, changes: &[(i32, UserStatus)]) -> DomainResult<u64> {
            self.inner.set_user_statuses(changes).await
        }

        async fn delete_users(&self, ids: &[i32]) -> DomainResult<u64> {
            self.inner.delete_users(ids).await
        }
    }

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    async fn user_count(f: &Fixture) -> u64 {
        f.repo.count(&UserFilter::default()).await.unwrap()
    }

    #[tokio::test]
    async fn add_user_rejects_taken_username() {
        let f = fixture().await;
        let first = f.service.add_user("alice", "a@x.com", "pw").await.unwrap();
        assert_eq!(first, StatusResult::ok_with(messages::USER_ADDED));

        let again = f.service.add_user("alice", "other@x.com", "pw").await.unwrap();
        assert_eq!(again, StatusResult::fail(1, messages::USERNAME_TAKEN));
        assert_eq!(user_count(&f).await, 1);
    }

    #[tokio::test]
    async fn add_user_rejects_taken_email_and_blank_fields() {
        let f = fixture().await;
        f.service.add_user("alice", "a@x.com", "pw").await.unwrap();

        let status = f.service.add_user("bob", "a@x.com", "pw").await.unwrap();
        assert_eq!(status.code, 2);
        let status = f.service.add_user("bob", " ", "pw").await.unwrap();
        assert_eq!(status, StatusResult::fail(3, messages::USER_FIELDS_REQUIRED));
        assert_eq!(user_count(&f).await, 1);

        let bob = f.service.add_user("bob", "b@x.com", "pw").await.unwrap();
        assert!(bob.is_ok());
        let stored = f.repo.get_user_by_username("bob").await.unwrap().unwrap();
        assert_eq!(stored.user_type, UserType::Member);
        assert_ne!(stored.password_hash, "pw");
    }

    #[tokio::test]
    async fn only_active_admins_sign_in() {
        let f = fixture().await;
        f.service
            .ensure_default_admin("root", "root@x.com", "secret")
            .await
            .unwrap();
        f.service.add_user("alice", "a@x.com", "pw").await.unwrap();

        let auth = f.service.login("root", "secret").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        let user = f.service.authorize_token(&auth.token).await.unwrap();
        assert_eq!(user.username, "root");

        assert!(matches!(
            f.service.login("root", "wrong").await,
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            f.service.login("alice", "pw").await,
            Err(DomainError::Forbidden(_))
        ));

        f.repo
            .set_user_statuses(&[(user.id, UserStatus::Banned)])
            .await
            .unwrap();
        assert!(matches!(
            f.service.authorize_token(&auth.token).await,
            Err(DomainError::Unauthorized(_))
        ));
        assert!(f.service.authorize_token("not-a-token").await.is_err());
    }

    #[tokio::test]
    async fn default_admin_is_created_once() {
        let f = fixture().await;
        let created = f.service.ensure_default_admin("root", "r@x.com", "pw").await.unwrap();
        assert!(created.is_some());
        let again = f.service.ensure_default_admin("root", "r@x.com", "pw").await.unwrap();
        assert!(again.is_none());
        assert_eq!(user_count(&f).await, 1);
    }

    #[tokio::test]
    async fn listings_filter_by_status_type_and_keyword() {
        let f = fixture().await;
        for name in ["alice", "alina", "bob"] {
            f.service
                .add_user(name, &format!("{}@x.com", name), "pw")
                .await
                .unwrap();
        }
        f.service.ensure_default_admin("root", "root@x.com", "pw").await.unwrap();

        assert_eq!(f.service.list_users(1).await.unwrap().page.rows(), 4);

        let admins = f.service.list_by_type(Some("admin"), 1).await.unwrap();
        assert_eq!(admins.items.len(), 1);
        assert_eq!(admins.page.path(), "/user/userType?type=admin");
        assert!(matches!(
            f.service.list_by_type(Some("guest"), 1).await,
            Err(DomainError::Validation(_))
        ));

        let found = f.service.search_users(Some("ali"), None, 1).await.unwrap();
        assert_eq!(found.items.len(), 2);
        let members = f
            .service
            .search_users(Some("ali"), Some("admin"), 1)
            .await
            .unwrap();
        assert!(members.items.is_empty());
        assert!(matches!(
            f.service.search_users(Some(""), None, 1).await,
            Err(DomainError::Validation(msg)) if msg == messages::KEYWORD_REQUIRED
        ));

        assert_eq!(f.service.list_banned(1).await.unwrap().page.rows(), 0);
    }

    #[tokio::test]
    async fn blank_user_search_never_reads_the_store() {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&db).await.unwrap();
        let repo = Arc::new(CountedUsers {
            inner: UserRepository::new(db),
            reads: AtomicUsize::new(0),
        });
        let dir = tempfile::tempdir().unwrap();
        let service = UserService::new(
            repo.clone(),
            JwtConfig::default(),
            Arc::new(LocalObjectStorage::new(
                AssetStore::new(dir.path()),
                "http://cdn.test/avatars",
            )),
            AssetStore::new(dir.path()),
            "http://localhost/user/header",
        );
        service.add_user("a&b", "ab@x.com", "pw").await.unwrap();

        for blank in [None, Some(""), Some(" \t ")] {
            assert!(matches!(
                service.search_users(blank, Some("admin"), 1).await,
                Err(DomainError::Validation(msg)) if msg == messages::KEYWORD_REQUIRED
            ));
        }
        assert_eq!(repo.reads.load(Ordering::SeqCst), 0);

        let found = service.search_users(Some("a&b"), Some("member"), 1).await.unwrap();
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.page.path(), "/user/search?keyword=a%26b&type=member");
        assert_eq!(repo.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn ban_toggles_and_rejects_malformed_entries() {
        let f = fixture().await;
        f.service.add_user("alice", "a@x.com", "pw").await.unwrap();
        f.service.add_user("bob", "b@x.com", "pw").await.unwrap();
        let alice = f.repo.get_user_by_username("alice").await.unwrap().unwrap();
        let bob = f.repo.get_user_by_username("bob").await.unwrap().unwrap();

        let empty = f.service.ban_users(&[]).await.unwrap();
        assert_eq!(empty, StatusResult::fail(1, messages::NO_USER_SELECTED));

        let malformed = strings(&[&format!("{}?0", alice.id), "bob"]);
        assert_eq!(f.service.ban_users(&malformed).await.unwrap().code, 3);
        assert_eq!(f.service.list_banned(1).await.unwrap().page.rows(), 0);

        let toggle = strings(&[&format!("{}?0", alice.id), &format!("{}?1", bob.id)]);
        let status = f.service.ban_users(&toggle).await.unwrap();
        assert_eq!(status, StatusResult::ok_with(messages::OPERATION_DONE));

        let banned = f.service.list_banned(1).await.unwrap();
        assert_eq!(banned.items.len(), 1);
        assert_eq!(banned.items[0].username, "alice");
    }

    #[tokio::test]
    async fn empty_removal_deletes_nothing() {
        let f = fixture().await;
        f.service.add_user("alice", "a@x.com", "pw").await.unwrap();

        let status = f.service.remove_users(&[]).await.unwrap();
        assert_eq!(status, StatusResult::fail(1, messages::NO_USER_SELECTED));
        assert_eq!(f.service.remove_users(&strings(&["x"])).await.unwrap().code, 3);
        assert_eq!(user_count(&f).await, 1);

        let alice = f.repo.get_user_by_username("alice").await.unwrap().unwrap();
        let status = f
            .service
            .remove_users(&strings(&[&alice.id.to_string()]))
            .await
            .unwrap();
        assert_eq!(status, StatusResult::ok_with(messages::USER_REMOVED));
        assert_eq!(user_count(&f).await, 0);
    }

    #[tokio::test]
    async fn password_change_checks_confirmation() {
        let f = fixture().await;
        let root = f
            .service
            .ensure_default_admin("root", "root@x.com", "old")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            f.service.change_password(root.id, "a", "b").await.unwrap(),
            PasswordOutcome::Mismatch
        );
        assert_eq!(
            f.service.change_password(root.id, "", "").await.unwrap(),
            PasswordOutcome::Empty
        );
        assert_eq!(
            f.service.change_password(root.id, "new", "new").await.unwrap(),
            PasswordOutcome::Changed
        );
        assert!(f.service.login("root", "new").await.is_ok());
        assert!(f.service.login("root", "old").await.is_err());
    }

    #[tokio::test]
    async fn avatar_uploads_record_public_url() {
        let f = fixture().await;
        let root = f
            .service
            .ensure_default_admin("root", "root@x.com", "pw")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            f.service.upload_header(root.id, None).await.unwrap(),
            HeaderOutcome::Missing
        );
        assert_eq!(
            f.service
                .upload_header(root.id, Some(ImageUpload::new("face", vec![1])))
                .await
                .unwrap(),
            HeaderOutcome::BadFormat
        );

        let HeaderOutcome::Updated(url) = f
            .service
            .upload_header(root.id, Some(ImageUpload::new("face.png", vec![1])))
            .await
            .unwrap()
        else {
            panic!("avatar should be stored");
        };
        assert!(url.starts_with("http://cdn.test/avatars/"));

        let HeaderOutcome::Updated(local) = f
            .service
            .upload_header_local(root.id, Some(ImageUpload::new("face.jpg", vec![2])))
            .await
            .unwrap()
        else {
            panic!("avatar should be stored");
        };
        let name = local
            .strip_prefix("http://localhost:8080/admin/user/header/")
            .unwrap();
        assert!(name.ends_with(".jpg"));
        assert!(f.service.uploads().resolve(name).unwrap().exists());

        let stored = f.repo.get_user_by_id(root.id).await.unwrap().unwrap();
        assert_eq!(stored.header_url.as_deref(), Some(local.as_str()));
    }
}
