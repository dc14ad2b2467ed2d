use tracing::info;

use crate::answer::AnswerRequester;
use crate::normalize::Normalizer;
use crate::page::PageView;

/// What arrived with a request to the question page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// GET, or first load.
    NoSubmission,
    /// POST; an absent form field arrives as an empty string.
    Submitted(String),
}

/// Run one request through the normalizer and the answer requester.
/// The two results are independent of each other.
pub async fn handle_submission(
    submission: Submission,
    normalizer: &Normalizer,
    requester: &AnswerRequester,
) -> PageView {
    let question = match submission {
        Submission::NoSubmission => return PageView::default(),
        Submission::Submitted(q) => q,
    };

    if question.is_empty() {
        return PageView {
            question: Some(question),
            ..Default::default()
        };
    }

    info!(chars = question.chars().count(), "Question submitted");
    let normalized = normalizer.normalize(&question);
    let answer = requester.get_answer(&question).await;

    PageView {
        question: Some(question),
        normalized_question: Some(normalized),
        answer: Some(answer),
    }
}
