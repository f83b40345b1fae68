//! GitHub REST client used to enrich cards with profile statistics.

use crate::constants::GITHUB_API_BASE;
use crate::error::{BoardError, Result};
use crate::profile::{summarize, Profile, ProfileFetcher, ProfileResult, UserResponse};
use std::sync::mpsc::Sender;

/// Fetches `/users/{handle}` and `/users/{handle}/repos` concurrently and
/// summarizes them.
pub async fn fetch_profile(client: &reqwest::Client, handle: &str) -> Result<Profile> {
    let user_url = format!("{GITHUB_API_BASE}/users/{handle}");
    let repos_url = format!("{GITHUB_API_BASE}/users/{handle}/repos?sort=stars&per_page=100");

    let (user, repos) = futures::future::join(
        get_json::<UserResponse>(client, &user_url),
        get_json::<serde_json::Value>(client, &repos_url),
    )
    .await;

    Ok(summarize(handle, user?, &repos?))
}

async fn get_json<T: serde::de::DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    let request = client.get(url).header("Accept", "application/vnd.github+json");
    // Browsers set their own user agent.
    #[cfg(not(target_arch = "wasm32"))]
    let request = request.header("User-Agent", "quote-board");

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(BoardError::Status(status.as_u16()));
    }
    Ok(response.json::<T>().await?)
}

/// [`ProfileFetcher`] backed by the GitHub API.
///
/// Natively the requests run on a dedicated tokio runtime; in the browser they
/// are spawned onto the page's event loop.
pub struct GithubFetcher {
    client: reqwest::Client,
    #[cfg(not(target_arch = "wasm32"))]
    runtime: tokio::runtime::Runtime,
    repaint: Option<egui::Context>,
}

impl GithubFetcher {
    /// Creates a fetcher. `repaint` is poked whenever a result arrives.
    pub fn new(repaint: Option<egui::Context>) -> Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(|e| BoardError::Runtime(e.to_string()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            #[cfg(not(target_arch = "wasm32"))]
            runtime,
            repaint,
        })
    }
}

impl ProfileFetcher for GithubFetcher {
    fn fetch(&self, handle: String, reply: Sender<ProfileResult>) {
        let client = self.client.clone();
        let repaint = self.repaint.clone();
        let task = async move {
            let outcome = fetch_profile(&client, &handle)
                .await
                .map_err(|e| e.to_string());
            let _ = reply.send(ProfileResult { handle, outcome });
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        self.runtime.spawn(task);

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(task);
    }
}
