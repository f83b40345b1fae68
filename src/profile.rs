//! GitHub profile enrichment and its per-handle cache.
//!
//! The [`ProfileDirectory`] remembers every handle it was asked about for the
//! lifetime of the process. Lookups for a known handle answer synchronously
//! from the cache and never issue a second request. Fetches run elsewhere and
//! report back through a channel that the UI drains once per frame.

use crate::constants::MAX_TOP_LANGUAGES;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Statistics shown under a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Display name, or the handle when the account has none
    pub display_name: String,
    /// Stars summed over the fetched repositories
    pub total_stars: u64,
    /// Number of public repositories
    pub public_repos: u64,
    /// Up to three distinct repository languages, in response order
    pub top_languages: Vec<String>,
}

impl Profile {
    /// Formats the statistics line, e.g. `★ 42 · 7 repos · Rust, Go`.
    pub fn stats_line(&self) -> String {
        let mut parts = vec![
            format!("★ {}", self.total_stars),
            format!("{} repos", self.public_repos),
        ];
        if !self.top_languages.is_empty() {
            parts.push(self.top_languages.join(", "));
        }
        parts.join(" · ")
    }
}

/// `GET /users/{handle}` fields we use.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserResponse {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Public repository count
    #[serde(default)]
    pub public_repos: Option<u64>,
}

/// `GET /users/{handle}/repos` entry fields we use.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoResponse {
    /// Star count
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    /// Primary language
    #[serde(default)]
    pub language: Option<String>,
}

/// Builds a [`Profile`] from the user document and the raw repos body.
///
/// A repos body that is not an array (GitHub answers rate-limit errors with an
/// object) contributes no stars and no languages.
pub fn summarize(handle: &str, user: UserResponse, repos: &serde_json::Value) -> Profile {
    let repos: Vec<RepoResponse> = match repos {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        _ => Vec::new(),
    };

    let total_stars = repos.iter().filter_map(|r| r.stargazers_count).sum();
    let mut top_languages: Vec<String> = Vec::new();
    for language in repos.iter().filter_map(|r| r.language.as_ref()) {
        if top_languages.len() == MAX_TOP_LANGUAGES {
            break;
        }
        if !top_languages.contains(language) {
            top_languages.push(language.clone());
        }
    }

    Profile {
        display_name: user
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| handle.to_string()),
        total_stars,
        public_repos: user.public_repos.unwrap_or(0),
        top_languages,
    }
}

/// What is known about a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEntry {
    /// A request is in flight
    Loading,
    /// The profile was fetched
    Ready(Profile),
    /// The request failed; show the bare handle
    Failed,
}

/// Completed lookup sent back from a fetch.
#[derive(Debug)]
pub struct ProfileResult {
    /// Handle the lookup was for
    pub handle: String,
    /// The profile, or the reason it could not be fetched
    pub outcome: Result<Profile, String>,
}

/// Something that can look up a GitHub profile in the background.
pub trait ProfileFetcher {
    /// Starts fetching `handle`; the result must eventually be sent on `reply`.
    fn fetch(&self, handle: String, reply: Sender<ProfileResult>);
}

/// Fetcher used when no network client could be created; every lookup fails
/// straight away so cards fall back to the bare handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableFetcher;

impl ProfileFetcher for UnavailableFetcher {
    fn fetch(&self, handle: String, reply: Sender<ProfileResult>) {
        let _ = reply.send(ProfileResult {
            handle,
            outcome: Err("profile lookups unavailable".to_string()),
        });
    }
}

/// Per-handle cache of profile lookups.
pub struct ProfileDirectory {
    entries: HashMap<String, ProfileEntry>,
    fetcher: Box<dyn ProfileFetcher>,
    sender: Sender<ProfileResult>,
    receiver: Receiver<ProfileResult>,
}

impl std::fmt::Debug for ProfileDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileDirectory")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl ProfileDirectory {
    /// Creates an empty directory that fetches with `fetcher`.
    pub fn new(fetcher: Box<dyn ProfileFetcher>) -> Self {
        let (sender, receiver) = channel();
        Self {
            entries: HashMap::new(),
            fetcher,
            sender,
            receiver,
        }
    }

    /// Returns the entry for `handle`, starting a fetch the first time a handle
    /// is seen.
    pub fn request(&mut self, handle: &str) -> &ProfileEntry {
        if !self.entries.contains_key(handle) {
            log::debug!("fetching profile for {handle}");
            self.entries.insert(handle.to_string(), ProfileEntry::Loading);
            self.fetcher.fetch(handle.to_string(), self.sender.clone());
        }
        &self.entries[handle]
    }

    /// Cached entry for `handle` without starting a fetch.
    pub fn get(&self, handle: &str) -> Option<&ProfileEntry> {
        self.entries.get(handle)
    }

    /// Applies all finished lookups. Returns how many arrived.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(result) = self.receiver.try_recv() {
            let entry = match result.outcome {
                Ok(profile) => ProfileEntry::Ready(profile),
                Err(err) => {
                    log::warn!("profile lookup for {} failed: {err}", result.handle);
                    ProfileEntry::Failed
                }
            };
            self.entries.insert(result.handle, entry);
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records requested handles and answers immediately.
    struct ImmediateFetcher {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl ProfileFetcher for ImmediateFetcher {
        fn fetch(&self, handle: String, reply: Sender<ProfileResult>) {
            self.calls.borrow_mut().push(handle.clone());
            let outcome = if handle == "ghost" {
                Err("404".to_string())
            } else {
                Ok(Profile {
                    display_name: handle.to_uppercase(),
                    total_stars: 1,
                    public_repos: 2,
                    top_languages: vec![],
                })
            };
            let _ = reply.send(ProfileResult { handle, outcome });
        }
    }

    #[test]
    fn summarize_counts_stars_and_distinct_languages() {
        let user = UserResponse {
            name: Some("The Octocat".into()),
            public_repos: Some(8),
        };
        let repos = json!([
            {"stargazers_count": 10, "language": "Rust"},
            {"stargazers_count": 5, "language": null},
            {"stargazers_count": 2, "language": "Rust"},
            {"stargazers_count": 1, "language": "Go"},
            {"language": "C"},
            {"stargazers_count": 4, "language": "Ruby"}
        ]);
        let profile = summarize("octocat", user, &repos);
        assert_eq!(profile.display_name, "The Octocat");
        assert_eq!(profile.total_stars, 22);
        assert_eq!(profile.public_repos, 8);
        assert_eq!(profile.top_languages, ["Rust", "Go", "C"]);
        assert_eq!(profile.stats_line(), "★ 22 · 8 repos · Rust, Go, C");
    }

    #[test]
    fn summarize_tolerates_error_bodies_and_missing_name() {
        let repos = json!({"message": "API rate limit exceeded"});
        let profile = summarize("ferris", UserResponse::default(), &repos);
        assert_eq!(profile.display_name, "ferris");
        assert_eq!(profile.total_stars, 0);
        assert!(profile.top_languages.is_empty());
        assert_eq!(profile.stats_line(), "★ 0 · 0 repos");
    }

    #[test]
    fn handles_are_fetched_once() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut directory = ProfileDirectory::new(Box::new(ImmediateFetcher {
            calls: Rc::clone(&calls),
        }));

        assert_eq!(directory.request("octocat"), &ProfileEntry::Loading);
        assert_eq!(directory.request("octocat"), &ProfileEntry::Loading);
        assert_eq!(directory.poll(), 1);

        match directory.request("octocat") {
            ProfileEntry::Ready(profile) => assert_eq!(profile.display_name, "OCTOCAT"),
            other => panic!("expected cached profile, got {other:?}"),
        }
        assert_eq!(calls.borrow().as_slice(), ["octocat"]);
    }

    #[test]
    fn failures_are_cached_as_fallback() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut directory = ProfileDirectory::new(Box::new(ImmediateFetcher {
            calls: Rc::clone(&calls),
        }));
        directory.request("ghost");
        directory.poll();
        assert_eq!(directory.get("ghost"), Some(&ProfileEntry::Failed));
        directory.request("ghost");
        assert_eq!(calls.borrow().len(), 1);
    }
}
