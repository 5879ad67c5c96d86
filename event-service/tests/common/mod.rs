use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use chrono::Duration;
use event_service::domain::event::service::EventService;
use event_service::domain::session::ports::SessionStore;
use event_service::domain::session::service::SessionService;
use event_service::domain::user::service::UserService;
use event_service::inbound::http::router::create_router;
use event_service::outbound::memory::InMemoryEventRepository;
use event_service::outbound::memory::InMemorySessionStore;
use event_service::outbound::memory::InMemoryUserRepository;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TOKEN_HEADER: &str = "Access-Token";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub sessions: Arc<InMemorySessionStore>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let event_repository = Arc::new(InMemoryEventRepository::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, Duration::days(60)));

        let router = create_router(
            Arc::new(UserService::new(
                Arc::clone(&user_repository),
                Arc::clone(&authenticator),
            )),
            Arc::new(EventService::new(event_repository)),
            Arc::new(SessionService::new(
                user_repository,
                Arc::clone(&sessions),
                authenticator,
            )),
            TOKEN_HEADER,
        )
        .expect("Failed to build router");

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
            sessions,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make PUT request without a token
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path))
    }

    /// Helper to make POST request with access token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).header(TOKEN_HEADER, token)
    }

    /// Helper to make PUT request with access token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.put(path).header(TOKEN_HEADER, token)
    }

    /// Helper to make DELETE request with access token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(self.url(path))
            .header(TOKEN_HEADER, token)
    }

    /// Register a user and return its id
    pub async fn register(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/users")
            .json(&json!({
                "email": email,
                "first_name": "foo",
                "last_name": "foo",
                "password": password,
                "phone": "15162961189"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Log in and return the issued token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    /// Register and log in, returning (user id, token)
    pub async fn signed_in_user(&self, email: &str) -> (String, String) {
        let user_id = self.register(email, "foo").await;
        let token = self.login(email, "foo").await;
        (user_id, token)
    }

    /// Create an event as the token's user and return its id
    pub async fn create_event(&self, token: &str) -> String {
        let response = self
            .post_authenticated("/events", token)
            .json(&event_body())
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Raw session store value for a subject
    pub async fn session_value(&self, subject: &str) -> Option<String> {
        self.sessions.get(subject).await.expect("Session store failed")
    }
}

pub fn event_body() -> Value {
    json!({
        "name": "Supper club",
        "start_datetime": "2030-05-01T19:00:00Z",
        "end_datetime": "2030-05-01T22:00:00Z",
        "max_guests_allowed": 6,
        "cuisine": ["Brazilian"],
        "price_per_person": 35.0,
        "description": "Family style dinner"
    })
}
