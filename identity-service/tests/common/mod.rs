use std::sync::Arc;

use auth::Authenticator;
use auth::HashingCost;
use auth::KeyPair;
use auth::PasswordHasher;
use identity_service::domain::user::service::IdentityService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserStore;
use serde_json::json;
use serde_json::Value;

pub const PRIVATE_KEY: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../auth/testdata/private-key.pem");
pub const PUBLIC_KEY: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../auth/testdata/public-key.pem");
pub const OTHER_PRIVATE_KEY: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../auth/testdata/other-private-key.pem");
pub const OTHER_PUBLIC_KEY: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../auth/testdata/other-public-key.pem");

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryUserStore>,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
}

/// Build an authenticator over the given keys with a cheap hashing cost.
pub fn test_authenticator(private_key: &str, public_key: &str) -> Authenticator {
    let key_pair = KeyPair::load(private_key, public_key).expect("Failed to load test keys");
    let password_hasher = PasswordHasher::with_cost(HashingCost {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("Failed to build password hasher");

    Authenticator::new(password_hasher, &key_pair, chrono::Duration::days(7))
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

        let store = Arc::new(InMemoryUserStore::new());
        let authenticator = Arc::new(test_authenticator(PRIVATE_KEY, PUBLIC_KEY));
        let identity_service = Arc::new(IdentityService::new(
            Arc::clone(&store),
            Arc::clone(&authenticator),
        ));

        let router = create_router(identity_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            authenticator,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the response
    pub async fn register(
        &self,
        name: &str,
        phone_number: &str,
        password: &str,
    ) -> reqwest::Response {
        self.post("/users/register")
            .json(&json!({
                "name": name,
                "phone_number": phone_number,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the response
    pub async fn login(&self, phone_number: &str, password: &str) -> reqwest::Response {
        self.post("/users/login")
            .json(&json!({
                "phone_number": phone_number,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register then log in, returning the access token
    pub async fn register_and_login(
        &self,
        name: &str,
        phone_number: &str,
        password: &str,
    ) -> String {
        self.register(name, phone_number, password).await;
        let body: Value = self
            .login(phone_number, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }
}
