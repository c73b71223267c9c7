use std::sync::Arc;

use auth::TokenIssuer;
use chrono::Duration;
use identity_service::domain::identity::service::IdentityService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryIdentityRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-token-signing-32b!";

/// Test application that spawns a real server on a random port, backed by the
/// in-memory identity directory.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_issuer: Arc<TokenIssuer>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // 0 = OS assigns a free port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_issuer = Arc::new(TokenIssuer::new(TEST_SECRET, Duration::hours(100)));
        let repository = Arc::new(InMemoryIdentityRepository::new());
        let identity_service = Arc::new(IdentityService::new(
            repository,
            Arc::clone(&token_issuer),
        ));

        let router = create_router(identity_service, Arc::clone(&token_issuer));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_issuer,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Register an identity and return the issued token.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .post("/identity")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert!(
            response.status().is_success(),
            "registration failed: {}",
            response.status()
        );

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("token missing from response")
            .to_string()
    }
}
