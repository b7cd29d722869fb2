pub mod crops;
pub mod normalize;
pub mod recommend;
