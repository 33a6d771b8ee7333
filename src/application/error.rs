use std::error::Error as StdError;

use thiserror::Error;

use crate::application::gateway::GatewayError;
use crate::config::LoadError;
use crate::infra::error::InfraError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("failed to write output: {0}")]
    Output(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::Output(message.into())
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) | AppError::Validation(_) => 2,
            AppError::Infra(_) | AppError::Output(_) => 1,
            AppError::Gateway(_) => 3,
        }
    }

    /// This error followed by each of its sources.
    pub fn messages(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut current = self.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        messages
    }
}
