//! Infrastructure layer - provider clients, services and logging

pub mod llm;
pub mod logging;
pub mod services;
