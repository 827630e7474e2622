//! End-to-end client flows against an in-memory server on an ephemeral port.

use std::path::Path;

use tempfile::tempdir;
use tokio::net::TcpListener;
use yoga_client::{
    ClientError, FormMode, Route, SessionDetail, SessionDirectory, SessionForm, SessionStore,
    YogaApp, STORAGE_KEY,
};
use yoga_model::{SessionRequest, SignupRequest};
use yoga_server::{build_app, serve, AppState, Config};

const ADMIN_EMAIL: &str = "yoga@studio.com";
const ADMIN_PASSWORD: &str = "test!1234";

async fn spawn_server() -> anyhow::Result<String> {
    let config = Config {
        sqlite_path: ":memory:".to_string(),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        rate_limit: false,
        ..Config::default()
    };
    let app = build_app(AppState::new(config)?)?;
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn signup(email: &str) -> SignupRequest {
    SignupRequest {
        email: email.to_string(),
        first_name: "Jane".to_string(),
        last_name: "Smith".to_string(),
        password: "password".to_string(),
    }
}

fn new_session(name: &str) -> SessionRequest {
    SessionRequest {
        name: name.to_string(),
        date: "2025-04-20".to_string(),
        teacher_id: 1,
        description: "A yoga session for beginners".to_string(),
        users: None,
    }
}

async fn admin(base: &str, storage: &Path) -> anyhow::Result<YogaApp> {
    let mut app = YogaApp::open(base, storage.join("admin.json"))?;
    app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    Ok(app)
}

async fn member(base: &str, storage: &Path, email: &str) -> anyhow::Result<YogaApp> {
    let mut app = YogaApp::open(base, storage.join(format!("{email}.json")))?;
    assert_eq!(app.register(&signup(email)).await?, Route::Login);
    assert!(!app.is_logged());
    app.login(email, "password").await?;
    Ok(app)
}

#[tokio::test]
async fn login_persists_and_logout_clears() -> anyhow::Result<()> {
    let base = spawn_server().await?;
    let dir = tempdir()?;
    let path = dir.path().join("storage.json");

    let mut app = YogaApp::open(&base, &path)?;
    assert!(!app.is_logged());
    let logged = app.store().subscribe();

    assert_eq!(app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await?, Route::Sessions);
    assert!(app.is_logged());
    assert!(*logged.borrow());
    assert!(app.is_admin());

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(raw[STORAGE_KEY]["username"], ADMIN_EMAIL);
    assert_eq!(raw[STORAGE_KEY]["type"], "Bearer");

    // A fresh process picks the login back up and can call the API
    let resumed = YogaApp::open(&base, &path)?;
    assert!(resumed.is_logged());
    assert!(resumed.client().has_token());
    assert_eq!(resumed.me().await?.email, ADMIN_EMAIL);

    assert_eq!(app.logout()?, Route::Root);
    assert!(!app.is_logged());
    assert!(!*logged.borrow());
    assert!(!SessionStore::open(&path)?.is_logged());
    Ok(())
}

#[tokio::test]
async fn failed_login_leaves_store_untouched() -> anyhow::Result<()> {
    let base = spawn_server().await?;
    let dir = tempdir()?;
    let mut app = YogaApp::open(&base, dir.path().join("storage.json"))?;

    let err = app.login(ADMIN_EMAIL, "wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!app.is_logged());

    let err = app.login("", "password").await.unwrap_err();
    assert!(matches!(err, ClientError::Invalid(_)));
    Ok(())
}

#[tokio::test]
async fn participation_is_reflected_after_refetch() -> anyhow::Result<()> {
    let base = spawn_server().await?;
    let dir = tempdir()?;
    let admin = admin(&base, dir.path()).await?;
    let created = admin.client().create_session(&new_session("Yoga Session")).await?;

    let user = member(&base, dir.path(), "user@test.com").await?;
    let user_id = user.store().information().map(|i| i.id).unwrap_or_default();

    let mut detail = SessionDetail::load(&user, created.id).await?;
    assert!(!detail.is_participate);
    assert!(!detail.can_manage());
    assert_eq!(detail.teacher.last_name, "DELAHAYE");

    detail.participate(&user).await?;
    assert!(detail.is_participate);
    assert!(detail.session.users.contains(&user_id));
    assert_eq!(detail.attendees(), 1);

    // Joining twice is rejected server-side and leaves the view as it was
    let err = detail.participate(&user).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(detail.is_participate);
    assert_eq!(detail.attendees(), 1);

    detail.un_participate(&user).await?;
    assert!(!detail.is_participate);
    assert!(detail.session.users.is_empty());

    let err = detail.un_participate(&user).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    Ok(())
}

#[tokio::test]
async fn only_admins_manage_sessions() -> anyhow::Result<()> {
    let base = spawn_server().await?;
    let dir = tempdir()?;
    let admin = admin(&base, dir.path()).await?;

    let mut form = SessionForm::load(&admin, None).await?;
    assert_eq!(form.mode, FormMode::Create);
    assert_eq!(form.teachers.len(), 2);
    form.name = "Evening yin".to_string();
    form.date = "2025-05-01".to_string();
    form.teacher_id = Some(form.teachers[1].id);
    form.description = "Slow and quiet".to_string();
    assert_eq!(form.submit(&admin).await?, Route::Sessions);

    let mut directory = SessionDirectory::new();
    let id = directory.list_all(admin.client()).await?[0].id;

    let mut edit = SessionForm::load(&admin, Some(id)).await?;
    assert_eq!(edit.mode, FormMode::Update(id));
    assert_eq!(edit.date, "2025-05-01");
    edit.name = "Evening yin, extended".to_string();
    edit.submit(&admin).await?;
    assert_eq!(
        directory.get_by_id(admin.client(), id).await?.name,
        "Evening yin, extended"
    );

    let detail = SessionDetail::load(&admin, id).await?;
    assert!(detail.can_manage());

    let user = member(&base, dir.path(), "user@test.com").await?;
    assert!(matches!(
        SessionForm::load(&user, None).await,
        Err(ClientError::Forbidden)
    ));
    let err = user
        .client()
        .create_session(&new_session("Sneaky"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
    let err = user.client().delete_session(id).await.unwrap_err();
    assert_eq!(err.status(), Some(403));

    assert_eq!(detail.delete(&admin).await?, Route::Sessions);
    assert!(directory.list_all(admin.client()).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn directory_round_trip() -> anyhow::Result<()> {
    let base = spawn_server().await?;
    let dir = tempdir()?;
    let admin = admin(&base, dir.path()).await?;
    let client = admin.client();
    let mut directory = SessionDirectory::new();

    assert!(directory.list_all(client).await?.is_empty());

    let first = directory.create(client, &new_session("Session 1")).await?;
    directory.create(client, &new_session("Session 2")).await?;
    let names: Vec<_> = directory.sessions().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Session 1", "Session 2"]);

    let mut body = new_session("Updated Session");
    body.description = "Updated Description".to_string();
    let updated = directory.update(client, first.id, &body).await?;
    assert_eq!(updated.description, "Updated Description");
    assert_eq!(directory.sessions()[0].name, "Updated Session");

    directory.delete(client, first.id).await?;
    assert_eq!(directory.sessions().len(), 1);

    let err = directory.get_by_id(client, first.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    Ok(())
}

#[tokio::test]
async fn deleting_account_clears_store_and_goes_home() -> anyhow::Result<()> {
    let base = spawn_server().await?;
    let dir = tempdir()?;
    let path = dir.path().join("storage.json");
    let mut app = YogaApp::open(&base, &path)?;
    app.register(&signup("leaving@test.com")).await?;
    app.login("leaving@test.com", "password").await?;
    assert_eq!(app.me().await?.first_name, "Jane");

    assert_eq!(app.delete_account().await?, Route::Root);
    assert!(!app.is_logged());
    assert!(!SessionStore::open(&path)?.is_logged());

    let err = app.login("leaving@test.com", "password").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(matches!(app.delete_account().await, Err(ClientError::NotLoggedIn)));
    Ok(())
}

#[tokio::test]
async fn login_that_cannot_be_persisted_stays_logged_out() -> anyhow::Result<()> {
    let base = spawn_server().await?;
    let dir = tempdir()?;
    let path = dir.path().join("storage.json");
    let mut app = YogaApp::open(&base, &path)?;

    // Writes stage through a sibling file; a directory in its place makes them fail
    std::fs::create_dir(dir.path().join("storage.json.tmp"))?;

    let err = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap_err();
    assert!(matches!(err, ClientError::Storage(_)));
    assert!(!app.is_logged());
    assert!(!app.client().has_token());
    assert!(!path.exists());
    Ok(())
}
