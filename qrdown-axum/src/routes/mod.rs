pub mod markdown;
pub mod upload;
