use serde::{Deserialize, Serialize};

/// Practice specific question and answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}
