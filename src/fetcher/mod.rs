pub mod http_fetcher;
pub mod source;

use std::path::Path;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;
pub use source::SourceFetcher;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET a page and return its body as text. Non-2xx responses are errors.
    async fn fetch(&self, url: &str) -> Result<String>;

    /// Stream a resource into `dest`, returning the number of bytes written
    async fn download(&self, url: &str, dest: &Path) -> Result<u64>;
}
