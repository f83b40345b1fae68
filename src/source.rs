//! Loading the quotes file.
//!
//! Natively the file is read from disk; in the browser it is fetched relative
//! to the page. Either way the result is delivered once and never retried.

use crate::error::Result;
use crate::types::Record;
use std::sync::mpsc::Sender;

/// Reads and parses a quotes file from disk.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_quotes_file(path: &std::path::Path) -> Result<Vec<Record>> {
    let json = std::fs::read_to_string(path)?;
    Ok(Record::list_from_json(&json)?)
}

/// Downloads and parses the quotes file from `url`.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_quotes(url: &str) -> Result<Vec<Record>> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(crate::error::BoardError::Status(status.as_u16()));
    }
    let body = response.text().await?;
    Ok(Record::list_from_json(&body)?)
}

/// Resolves `source` against the current page address.
#[cfg(target_arch = "wasm32")]
fn page_url(source: &str) -> Result<String> {
    use crate::error::BoardError;

    let href = web_sys::window()
        .ok_or_else(|| BoardError::Runtime("no window".into()))?
        .location()
        .href()
        .map_err(|_| BoardError::Runtime("no page location".into()))?;
    let base = reqwest::Url::parse(&href).map_err(|e| BoardError::Runtime(e.to_string()))?;
    let url = base
        .join(source)
        .map_err(|e| BoardError::Runtime(e.to_string()))?;
    Ok(url.to_string())
}

/// Starts loading `source` and sends the outcome on `reply`.
///
/// Native loads complete before this returns.
pub fn load_quotes(source: &str, reply: Sender<Result<Vec<Record>>>, repaint: Option<egui::Context>) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let result = load_quotes_file(std::path::Path::new(source));
        let _ = reply.send(result);
        if let Some(ctx) = repaint {
            ctx.request_repaint();
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        let source = source.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            let result = match page_url(&source) {
                Ok(url) => fetch_quotes(&url).await,
                Err(e) => Err(e),
            };
            let _ = reply.send(result);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use std::sync::mpsc::channel;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("quote_board_{}_{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_quotes_from_disk() {
        let path = temp_file(
            "ok.json",
            r#"[{"quote": "Hello", "githubUsername": "octocat", "date": "Jan 2024"}]"#,
        );
        let (tx, rx) = channel();
        load_quotes(path.to_str().unwrap(), tx, None);
        let records = rx.try_recv().unwrap().unwrap();
        assert_eq!(records, vec![Record::new("Hello", "octocat").with_date("Jan 2024")]);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_quotes_file(std::path::Path::new("/definitely/not/here/quotes.json"));
        assert!(matches!(result, Err(BoardError::Io(_))));
    }

    #[test]
    fn malformed_file_is_a_json_error() {
        let path = temp_file("bad.json", "{\"quote\": ");
        let result = load_quotes_file(&path);
        assert!(matches!(result, Err(BoardError::Json(_))));
        let _ = std::fs::remove_file(path);
    }
}
