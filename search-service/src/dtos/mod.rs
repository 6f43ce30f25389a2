use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AskResponse {
    /// The query exactly as submitted, whitespace included.
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RootResponse {
    pub message: String,
}
