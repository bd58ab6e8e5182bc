use chrono::Duration;
use sphere_core::model::{AuthUser, UserId, UserRole};
use sphere_core::time::fixed_now;
use storage::repository::{CredentialStore, StoredCredentials};
use storage::sqlite::SqliteRepository;

fn user(role: UserRole) -> AuthUser {
    AuthUser {
        id: UserId::new("65f0c0ffee"),
        name: "Grace".into(),
        email: "grace@example.com".into(),
        role,
    }
}

#[tokio::test]
async fn sqlite_round_trips_credentials() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_creds_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_credentials().await.unwrap().is_none());

    let creds = StoredCredentials::new("jwt-1", &user(UserRole::Instructor), fixed_now());
    repo.save_credentials(&creds).await.unwrap();

    let loaded = repo.load_credentials().await.unwrap().expect("saved");
    assert_eq!(loaded, creds);
    assert_eq!(loaded.user().role, UserRole::Instructor);
}

#[tokio::test]
async fn sqlite_save_replaces_previous_session() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_creds_replace?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let first = StoredCredentials::new("jwt-1", &user(UserRole::Student), fixed_now());
    let second = StoredCredentials::new(
        "jwt-2",
        &user(UserRole::Admin),
        fixed_now() + Duration::hours(1),
    );
    repo.save_credentials(&first).await.unwrap();
    repo.save_credentials(&second).await.unwrap();

    let loaded = repo.load_credentials().await.unwrap().expect("saved");
    assert_eq!(loaded.token, "jwt-2");
    assert_eq!(loaded.role, UserRole::Admin);
}

#[tokio::test]
async fn sqlite_clear_removes_session_and_migrate_is_repeatable() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_creds_clear?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    repo.migrate().await.expect("second migrate is a no-op");

    let creds = StoredCredentials::new("jwt", &user(UserRole::Recruiter), fixed_now());
    repo.save_credentials(&creds).await.unwrap();
    repo.clear_credentials().await.unwrap();
    repo.clear_credentials().await.unwrap();

    assert!(repo.load_credentials().await.unwrap().is_none());
}
