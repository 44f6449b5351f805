use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::request::{GenerateQuizRequest, PaginationParams},
};

#[post("/generate-quiz")]
async fn generate_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    log::info!(
        "Quiz requested for {} [{}]",
        request.url,
        get_request_id(&req).unwrap_or_else(|| "-".to_string())
    );
    let quiz = state.quiz_service.generate_quiz(&request.url).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/quizzes")]
async fn list_quizzes(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let quizzes = state
        .quiz_service
        .list_quizzes(query.offset(), query.limit())
        .await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/quiz/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::Config,
        repositories::InMemoryQuizRepository,
        services::{
            article_fetcher::MockArticleSource, model_service::PlaceholderQuizModel,
            quiz_assembler::QuizAssembler, quiz_service::QuizService,
        },
        test_utils::{
            fixtures::{self, TURING_URL},
            test_helpers::{assert_error_status, assert_success_status},
        },
    };
    use actix_web::{http::StatusCode, test, App};

    fn state_with(fetcher: MockArticleSource) -> AppState {
        let config = Config::test_config();
        let assembler = QuizAssembler::from_config(Arc::new(PlaceholderQuizModel), &config);
        let service = QuizService::new(
            Arc::new(InMemoryQuizRepository::new()),
            Arc::new(fetcher),
            assembler,
        );
        AppState::from_parts(config, service, None)
    }

    #[actix_web::test]
    async fn test_generate_quiz_rejects_foreign_url() {
        let mut fetcher = MockArticleSource::new();
        fetcher.expect_fetch().never();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(fetcher)))
                .service(generate_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/generate-quiz")
            .set_json(serde_json::json!({ "url": "https://example.com/page" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_error_status(resp.status());
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_generated_quiz_is_listed_and_retrievable() {
        let mut fetcher = MockArticleSource::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(fixtures::sample_document()));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(fetcher)))
                .service(generate_quiz)
                .service(list_quizzes)
                .service(get_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/generate-quiz")
            .set_json(serde_json::json!({ "url": TURING_URL }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());
        let quiz: serde_json::Value = test::read_body_json(resp).await;
        let id = quiz["id"].as_i64().expect("numeric id");

        let req = test::TestRequest::get().uri("/quizzes?limit=5").to_request();
        let listed: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 1);

        let req = test::TestRequest::get()
            .uri(&format!("/quiz/{}", id))
            .to_request();
        let fetched: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["title"], "Alan Turing");
    }

    #[actix_web::test]
    async fn test_unknown_quiz_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(MockArticleSource::new())))
                .service(get_quiz),
        )
        .await;

        let req = test::TestRequest::get().uri("/quiz/42").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_out_of_range_pagination_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(MockArticleSource::new())))
                .service(list_quizzes),
        )
        .await;

        for uri in ["/quizzes?limit=500", "/quizzes?limit=0", "/quizzes?offset=-1"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }

        let req = test::TestRequest::get().uri("/quizzes?offset=0&limit=100").to_request();
        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());
    }

    #[actix_web::test]
    async fn test_malformed_bodies_get_json_errors() {
        let mut fetcher = MockArticleSource::new();
        fetcher.expect_fetch().never();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(fetcher)))
                .configure(crate::handlers::configure),
        )
        .await;

        let requests = [
            test::TestRequest::post()
                .uri("/generate-quiz")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
                .to_request(),
            test::TestRequest::post()
                .uri("/generate-quiz")
                .set_json(serde_json::json!({ "link": "https://en.wikipedia.org/wiki/X" }))
                .to_request(),
            test::TestRequest::get().uri("/quizzes?limit=many").to_request(),
            test::TestRequest::get().uri("/quiz/not-a-number").to_request(),
        ];

        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["code"], 400);
            assert_eq!(body["kind"], "VALIDATION_ERROR");
        }
    }
}
