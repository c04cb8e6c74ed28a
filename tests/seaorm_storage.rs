use std::sync::Arc;

use sea_orm::{Database, DatabaseConnection};
use squarefeet_console::auth::{MockAuthClient, SessionManager};
use squarefeet_console::credentials::CredentialStore;
use squarefeet_console::migration::{Migrator, MigratorTrait};
use squarefeet_console::storage::{KeyValueStorage, SeaOrmStorage};
use squarefeet_console::{Credentials, Role};

async fn connect() -> DatabaseConnection {
    let conn = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&conn, None).await.unwrap();
    conn
}

#[tokio::test]
async fn set_overwrites_and_remove_deletes() {
    let storage = SeaOrmStorage::new(connect().await);

    assert!(storage.get("k").await.unwrap().is_none());
    storage.set("k", "one").await.unwrap();
    storage.set("k", "two").await.unwrap();
    assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("two"));

    storage.remove("k").await.unwrap();
    storage.remove("k").await.unwrap();
    assert!(storage.get("k").await.unwrap().is_none());
}

#[tokio::test]
async fn session_survives_a_new_manager() {
    let conn = connect().await;

    let first = SessionManager::new(
        CredentialStore::new(Arc::new(SeaOrmStorage::new(conn.clone()))),
        Arc::new(MockAuthClient::new()),
    );
    first.init().await.unwrap();
    let user = first
        .login(Credentials::new("boss@squarefeet.com", "secret", Role::Admin))
        .await
        .unwrap();

    let second = SessionManager::new(
        CredentialStore::new(Arc::new(SeaOrmStorage::new(conn.clone()))),
        Arc::new(MockAuthClient::new()),
    );
    second.init().await.unwrap();
    assert_eq!(second.current_user(), Some(user));

    second.logout().await.unwrap();
    let storage = SeaOrmStorage::new(conn);
    assert!(storage.get("squarefeet_auth_token").await.unwrap().is_none());
    assert!(storage.get("squarefeet_auth_user").await.unwrap().is_none());
}

#[tokio::test]
async fn migration_down_drops_table() {
    let conn = connect().await;
    Migrator::down(&conn, None).await.unwrap();

    let storage = SeaOrmStorage::new(conn);
    assert!(storage.get("k").await.is_err());
}
