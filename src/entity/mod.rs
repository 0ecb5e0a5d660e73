mod article;
mod comment;
mod input;
pub mod timestamp;

pub use article::{
    dislikes_quantity, likes_quantity, rating, Article, ArticleView, Theme, MIN_TITLE_LENGTH,
    VALID_THEMES,
};
pub use comment::{Comment, Evaluation, VALID_EVALUATIONS};
pub use input::{ArticleInput, CommentInput};
