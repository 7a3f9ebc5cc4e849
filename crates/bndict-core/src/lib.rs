pub mod dict;
pub mod export;
pub mod settings;
