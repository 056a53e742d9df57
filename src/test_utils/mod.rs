#![allow(missing_docs)]

use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{
    AppState, PasswordHash, UserID,
    account::AccountId,
    auth::register_user,
    build_router, cors_layer,
    db::{create_memory_pool, initialize},
};

pub(crate) const TEST_PASSWORD: &str = "secret1";

const TEST_TOKEN_SECRET: &str = "foobar";

/// A user who has signed up and logged in through the API.
pub(crate) struct TestUser {
    pub token: String,
    pub user_id: UserID,
}

/// App state backed by a fresh in-memory database with cheap password hashing.
pub(crate) fn get_test_state() -> AppState {
    let mut state = AppState::new(create_memory_pool(), TEST_TOKEN_SECRET, "Etc/UTC")
        .expect("Could not create app state.");
    state.password_cost = 4;

    state
}

pub(crate) fn get_test_server() -> TestServer {
    let cors = cors_layer(&[]).expect("Could not create CORS layer.");
    let app = build_router(get_test_state(), None, cors);

    TestServer::try_new(app).expect("Could not create test server.")
}

pub(crate) async fn sign_up(server: &TestServer, name: &str, email: &str) -> UserID {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({ "name": name, "email": email, "password": TEST_PASSWORD }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let user_id = response.json::<Value>()["userId"]
        .as_i64()
        .expect("sign up response should contain the user ID");

    UserID::new(user_id)
}

pub(crate) async fn sign_up_and_log_in(server: &TestServer, name: &str, email: &str) -> TestUser {
    let user_id = sign_up(server, name, email).await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .await;
    response.assert_status_ok();

    let token = response.json::<Value>()["token"]
        .as_str()
        .expect("log-in response should contain a token")
        .to_owned();

    TestUser { token, user_id }
}

/// Get the ID of the default account created at sign up.
pub(crate) async fn get_default_account_id(server: &TestServer, user: &TestUser) -> i64 {
    server
        .get("/api/accounts")
        .authorization_bearer(&user.token)
        .await
        .json::<Value>()[0]["id"]
        .as_i64()
        .expect("user should have a default account")
}

/// A database with one registered user, returned with their default account.
pub(crate) fn get_test_connection() -> (Connection, UserID, AccountId) {
    let mut connection = Connection::open_in_memory().unwrap();
    connection.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    initialize(&mut connection).unwrap();
    let user = register_user(
        "Alice",
        "alice@example.com",
        &PasswordHash::new_unchecked("hunter2"),
        &mut connection,
    )
    .unwrap();
    let account_id = connection
        .query_row(
            "SELECT id FROM account WHERE user_id = ?1",
            [user.id.as_i64()],
            |row| row.get(0),
        )
        .unwrap();

    (connection, user.id, account_id)
}
