//! LlmClient trait definition

use async_trait::async_trait;

use super::{ChatRequest, LlmError};

/// Stateless LLM client - each call is independent
///
/// This is the seam between the engine and the remote model. One call is one
/// request/response pair; no conversation state is kept between calls, and
/// the client never retries on its own. Retry-or-fallback policy belongs to
/// the orchestration layer, which always has a deterministic substitute
/// ready.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one completion request and return the raw model text
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError>;
}

/// Test support: scripted in-memory client, also used by integration tests
pub mod mock {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use tracing::debug;

    /// Scripted outcome for one mock call
    pub enum MockReply {
        Text(String),
        Timeout,
        Server,
        Unauthorized,
    }

    impl MockReply {
        pub fn text(s: impl Into<String>) -> Self {
            MockReply::Text(s.into())
        }
    }

    /// Mock LLM client that replays a scripted queue of outcomes
    ///
    /// Once the queue is exhausted every further call fails with a server
    /// error, which exercises the fallback paths.
    pub struct MockLlmClient {
        replies: Mutex<std::collections::VecDeque<MockReply>>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl MockLlmClient {
        pub fn new(replies: Vec<MockReply>) -> Self {
            debug!(reply_count = %replies.len(), "MockLlmClient::new: called");
            Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Context labels of the calls made so far, in order
        pub fn call_contexts(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: ChatRequest) -> Result<String, LlmError> {
            debug!(context = request.context, "MockLlmClient::complete: called");
            self.calls.lock().unwrap().push(request.context);

            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(MockReply::Text(text)) => Ok(text),
                Some(MockReply::Timeout) => Err(LlmError::Timeout(Duration::from_secs(30))),
                Some(MockReply::Server) => Err(LlmError::Server {
                    status: 503,
                    message: "service unavailable".to_string(),
                }),
                Some(MockReply::Unauthorized) => Err(LlmError::Unauthorized),
                None => Err(LlmError::Server {
                    status: 500,
                    message: "mock reply queue exhausted".to_string(),
                }),
            }
        }
    }

}
