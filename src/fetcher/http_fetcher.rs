use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::io::AsyncWriteExt;

use crate::app::Result;
use crate::config::HttpConfig;
use crate::fetcher::Fetcher;

pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Connecting and each read are bounded by `timeout_secs`. Page
    /// fetches are also bounded as a whole; downloads are not, so large
    /// files on slow links finish as long as data keeps arriving.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;
        response.error_for_status_ref()?;
        Ok(response.text().await?)
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        let mut response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    const CHUNK: &[u8] = b"0123456789abcdef";

    /// Serves one response whose body trickles in over `chunks * gap`
    async fn trickle_server(chunks: usize, gap: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                CHUNK.len() * chunks
            );
            if socket.write_all(head.as_bytes()).await.is_err() {
                return;
            }
            for _ in 0..chunks {
                tokio::time::sleep(gap).await;
                // The client may have given up already
                if socket.write_all(CHUNK).await.is_err() {
                    return;
                }
            }
        });

        format!("http://{}/paper.pdf", addr)
    }

    fn fetcher(timeout_secs: u64) -> HttpFetcher {
        HttpFetcher::new(&HttpConfig {
            timeout_secs,
            ..HttpConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_slow_download_outlasting_timeout_completes() {
        let url = trickle_server(4, Duration::from_millis(400)).await;
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("paper.pdf");

        let written = fetcher(1).download(&url, &dest).await.unwrap();

        assert_eq!(written, (CHUNK.len() * 4) as u64);
        assert_eq!(std::fs::read(&dest).unwrap(), CHUNK.repeat(4));
    }

    #[tokio::test]
    async fn test_page_fetch_bounded_as_a_whole() {
        let url = trickle_server(4, Duration::from_millis(400)).await;

        assert!(fetcher(1).fetch(&url).await.is_err());
    }
}
