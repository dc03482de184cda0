use async_trait::async_trait;
use std::fmt::Debug;

/// Hook that records raw generator responses.
#[async_trait]
pub trait Interceptor: Send + Sync + Debug {
    async fn save(&self, topic: &str, response: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

pub mod file;
pub use file::FileInterceptor;
