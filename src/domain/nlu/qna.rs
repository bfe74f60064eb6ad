//! Q&A resolver values, including multi-turn follow-up threads.

use serde::{Deserialize, Serialize};

/// Context of the previous exchange in a multi-turn Q&A.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QnaContext {
    pub previous_qna_id: String,
    pub previous_user_query: String,
}

/// A question sent to the Q&A resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QnaQuery {
    pub question: String,
    pub context: Option<QnaContext>,
    /// Id of the follow-up the user picked.
    pub qna_id: Option<String>,
}

impl QnaQuery {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            context: None,
            qna_id: None,
        }
    }
}

/// A suggested follow-up question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUp {
    pub id: String,
    pub text: String,
}

/// The resolver's top answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QnaAnswer {
    pub answer: String,
    pub answer_id: String,
    #[serde(default)]
    pub follow_ups: Vec<FollowUp>,
}

impl QnaAnswer {
    pub fn new(answer: impl Into<String>, answer_id: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            answer_id: answer_id.into(),
            follow_ups: Vec::new(),
        }
    }

    pub fn with_follow_up(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.follow_ups.push(FollowUp {
            id: id.into(),
            text: text.into(),
        });
        self
    }

    pub fn is_multi_turn(&self) -> bool {
        !self.follow_ups.is_empty()
    }
}

/// An open multi-turn Q&A exchange waiting for the user to pick a follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QnaThread {
    pub answer: String,
    pub previous_qna_id: String,
    pub previous_user_query: String,
    pub follow_ups: Vec<FollowUp>,
}

impl QnaThread {
    /// Opens a thread from an answer to `user_query`.
    pub fn from_answer(answer: &QnaAnswer, user_query: impl Into<String>) -> Self {
        Self {
            answer: answer.answer.clone(),
            previous_qna_id: answer.answer_id.clone(),
            previous_user_query: user_query.into(),
            follow_ups: answer.follow_ups.clone(),
        }
    }

    pub fn choice_texts(&self) -> Vec<String> {
        self.follow_ups.iter().map(|f| f.text.clone()).collect()
    }

    /// Builds the follow-up query for the chosen follow-up.
    pub fn follow_up_query(&self, chosen: &FollowUp) -> QnaQuery {
        QnaQuery {
            question: chosen.text.clone(),
            context: Some(QnaContext {
                previous_qna_id: self.previous_qna_id.clone(),
                previous_user_query: self.previous_user_query.clone(),
            }),
            qna_id: Some(chosen.id.clone()),
        }
    }
}
