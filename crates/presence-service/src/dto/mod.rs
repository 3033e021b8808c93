//! Read-model projection

mod mappers;

pub use mappers::to_presence_info;
