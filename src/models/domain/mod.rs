pub mod article;
pub mod quiz;
pub mod quiz_question;
pub use article::ArticleDocument;
pub use quiz::{KeyEntities, QuizResult};
pub use quiz_question::{Difficulty, QuizQuestion};
