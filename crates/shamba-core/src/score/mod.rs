pub mod engine;
pub mod outcome;
pub mod rules;

pub use engine::recommend;
pub use outcome::{CropRecommendation, RecommendationCategory};

pub(crate) use crate::normalize::round_dp;
