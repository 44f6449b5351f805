pub mod article_fetcher;
pub mod model_service;
pub mod quiz_assembler;
pub mod quiz_service;
pub mod quiz_validation;
