//! Shared test utilities for qa-db unit tests.

pub(crate) mod helpers {
    use qa_core::entities::{Question, Reply, User};

    use crate::service::QaService;

    /// Create an in-memory `QaService`.
    pub async fn test_service() -> QaService {
        QaService::new_local(":memory:").await.unwrap()
    }

    /// Insert a user and return it with its id filled in.
    pub async fn seed_user(svc: &QaService, fname: &str, lname: &str) -> User {
        let mut user = User::new(fname, lname);
        svc.create_user(&mut user).await.unwrap();
        user
    }

    /// Insert a question by `author` and return it.
    pub async fn seed_question(svc: &QaService, author: &User, title: &str) -> Question {
        let mut question = Question::new(title, format!("{title} body"), author.id.unwrap());
        svc.create_question(&mut question).await.unwrap();
        question
    }

    /// Insert a reply to `question` by `author`, optionally under `parent`.
    pub async fn seed_reply(
        svc: &QaService,
        question: &Question,
        author: &User,
        parent: Option<&Reply>,
        body: &str,
    ) -> Reply {
        let mut reply = Reply::new(question.id.unwrap(), author.id.unwrap(), body);
        reply.parent_reply_id = parent.and_then(|p| p.id);
        svc.create_reply(&mut reply).await.unwrap();
        reply
    }
}
