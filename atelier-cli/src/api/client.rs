//! API client: executes operations through a transport and owns the
//! session lifecycle.

use std::sync::{Arc, Mutex};

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::operation::{Operation, Resource};
use super::session::Session;
use super::transport::{ApiRequest, HttpTransport, Transport};

pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Mutex<Session>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Session) -> Self {
        Self {
            transport,
            session: Mutex::new(session),
        }
    }

    /// Production client against the configured base URL.
    pub fn http(base_url: impl Into<String>, session: Session) -> Self {
        Self::new(Arc::new(HttpTransport::new(base_url)), session)
    }

    pub fn session(&self) -> Session {
        self.session
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn replace_session(&self, session: Session) {
        *self.session.lock().unwrap_or_else(|e| e.into_inner()) = session;
    }

    /// Execute one operation. The bearer token is attached whenever the
    /// session holds one; a 401 clears the session so stale credentials
    /// are not retried.
    pub async fn execute(&self, operation: Operation) -> Result<Value, ApiError> {
        let token = self
            .session
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .token
            .clone();

        let request = ApiRequest {
            method: operation.method(),
            path: operation.path(),
            token,
            body: operation.into_body(),
        };

        let result = self.transport.send(request).await;
        if let Err(err) = &result {
            if err.is_unauthorized() {
                warn!("server rejected credentials; clearing session");
                self.session
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .logout();
            }
        }
        result
    }

    /// Fetch and decode a full collection.
    pub async fn fetch_list<R: DeserializeOwned>(
        &self,
        resource: Resource,
    ) -> Result<Vec<R>, ApiError> {
        let value = self.execute(Operation::list(resource)).await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::FakeTransport;
    use serde_json::json;

    fn authed_client(transport: Arc<FakeTransport>) -> ApiClient {
        let mut session = Session::anonymous();
        session.login("tok-abc", "Priya");
        ApiClient::new(transport, session)
    }

    #[tokio::test]
    async fn bearer_token_attached_when_present() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_response(Ok(json!([])));
        let client = authed_client(transport.clone());

        client.fetch_list::<Value>(Resource::Projects).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].token.as_deref(), Some("tok-abc"));
        assert_eq!(requests[0].path, "/projects");
    }

    #[tokio::test]
    async fn unauthorized_response_clears_session() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_response(Err(ApiError::Server {
            status: 401,
            message: "Not authorized".into(),
        }));
        let client = authed_client(transport);

        let err = client
            .execute(Operation::delete(Resource::Videos, "v1"))
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn list_decode_failure_is_a_decode_error() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_response(Ok(json!({"unexpected": "shape"})));
        let client = authed_client(transport);

        let err = client
            .fetch_list::<Vec<String>>(Resource::Events)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
