pub mod engagement;
pub mod posts;
pub mod recommendations;

pub use recommendations::RecommendationService;
