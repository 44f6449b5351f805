use std::sync::Arc;

use chrono::Utc;

use wiki_quiz_server::{
    models::domain::{Difficulty, KeyEntities, QuizQuestion, QuizResult},
    repositories::{DisabledQuizRepository, InMemoryQuizRepository, QuizRepository},
};

fn make_quiz(id: i64, url: &str, title: &str) -> QuizResult {
    QuizResult {
        id,
        url: url.to_string(),
        title: title.to_string(),
        summary: format!("{} summary", title),
        key_entities: KeyEntities::new(vec![title.to_string()], vec![], vec![]),
        sections: vec!["History".to_string()],
        quiz: vec![QuizQuestion {
            question: format!("What is {}?", title),
            options: vec![
                "A city".to_string(),
                "A person".to_string(),
                "A river".to_string(),
                "A ship".to_string(),
            ],
            answer: "A person".to_string(),
            difficulty: Difficulty::Easy,
            explanation: "Stated in the History section.".to_string(),
        }],
        related_topics: vec![],
        created_at: Some(Utc::now()),
    }
}

fn wiki(page: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", page)
}

#[actix_rt::test]
async fn memory_repository_save_find_and_list() {
    let repo = InMemoryQuizRepository::new();

    let first = repo
        .save(make_quiz(1_000, &wiki("Grace_Hopper"), "Grace Hopper"))
        .await
        .expect("save first");
    let second = repo
        .save(make_quiz(2_000, &wiki("Ada_Lovelace"), "Ada Lovelace"))
        .await
        .expect("save second");

    let found = repo.find_by_id(first.id).await.expect("find by id");
    assert_eq!(found.as_ref().map(|q| q.title.as_str()), Some("Grace Hopper"));
    assert!(repo.find_by_id(3_000).await.expect("find missing").is_none());

    let by_url = repo
        .find_by_url(&wiki("Ada_Lovelace"))
        .await
        .expect("find by url")
        .expect("stored");
    assert_eq!(by_url, second);

    let titles: Vec<String> = repo
        .list(0, 10)
        .await
        .expect("list")
        .into_iter()
        .map(|q| q.title)
        .collect();
    assert_eq!(titles, vec!["Ada Lovelace", "Grace Hopper"]);

    assert_eq!(repo.list(0, 1).await.expect("first page").len(), 1);
    assert!(repo.list(5, 10).await.expect("past the end").is_empty());
    assert!(repo.list(0, 0).await.expect("zero limit").is_empty());
}

#[actix_rt::test]
async fn memory_repository_keeps_concurrent_saves_apart() {
    let repo = Arc::new(InMemoryQuizRepository::new());

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.save(make_quiz(42, &wiki(&format!("Page_{}", n)), "Same millis"))
                    .await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.expect("task joined").expect("saved").id);
    }
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), 8);
    assert_eq!(repo.list(0, 100).await.expect("list").len(), 8);
}

#[actix_rt::test]
async fn disabled_repository_returns_what_it_was_given() {
    let repo: Arc<dyn QuizRepository> = Arc::new(DisabledQuizRepository);
    let quiz = make_quiz(7, &wiki("Alan_Turing"), "Alan Turing");

    let saved = repo.save(quiz.clone()).await.expect("save is a no-op");
    assert_eq!(saved, quiz);

    assert!(repo.find_by_id(7).await.expect("lookup").is_none());
    assert!(repo
        .find_by_url(&wiki("Alan_Turing"))
        .await
        .expect("lookup")
        .is_none());
    assert!(repo.list(0, 50).await.expect("list").is_empty());
}
