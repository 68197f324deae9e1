use crate::error::FlowError;
use crate::utils::decode_url;
use reqwest::Url;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Absolute links are used as-is. `/x` resolves against the API host,
/// `x` against the API base path.
pub fn resolve_link(base: &str, link: &str) -> Result<Url, FlowError> {
    if let Ok(url) = Url::parse(link) {
        return Ok(url);
    }
    Url::parse(&format!("{}/", base.trim_end_matches('/')))
        .and_then(|b| b.join(link))
        .map_err(|e| FlowError::Save(format!("bad link {link}: {e}")))
}

fn file_name_for(url: &Url) -> String {
    let name = url
        .path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .map(decode_url)
        .map(|s| s.replace(['/', '\\'], "_"))
        .unwrap_or_default();

    match name.trim() {
        "" | "." | ".." => "download".to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string());
    let ext = path.extension().map(|e| e.to_string_lossy().to_string());
    (1..)
        .map(|n| match &ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        })
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

fn io_error(e: std::io::Error) -> FlowError {
    FlowError::Save(e.to_string())
}

pub fn save_link(client: &Client, base: &str, link: &str, dir: &Path) -> Result<PathBuf, FlowError> {
    let url = resolve_link(base, link)?;
    let mut resp = client
        .get(url.clone())
        .send()
        .map_err(|e| FlowError::Save(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(FlowError::Save(format!("HTTP {}", resp.status().as_u16())));
    }

    fs::create_dir_all(dir).map_err(io_error)?;
    let target = unique_path(dir, &file_name_for(&url));
    let partial = target.with_file_name(format!(
        "{}.part",
        target
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    ));

    let mut file = File::create(&partial).map_err(io_error)?;
    if let Err(e) = resp.copy_to(&mut file) {
        drop(file);
        let _ = fs::remove_file(&partial);
        return Err(FlowError::Save(e.to_string()));
    }
    drop(file);
    fs::rename(&partial, &target).map_err(io_error)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Route, serve};
    use tempfile::tempdir;

    #[test]
    fn relative_links_join_the_api_base() {
        let url = resolve_link("http://api.local/youtube", "/files/a.mp3").unwrap();
        assert_eq!(url.as_str(), "http://api.local/files/a.mp3");
        let url = resolve_link("http://api.local/youtube", "https://cdn/x.mp4").unwrap();
        assert_eq!(url.as_str(), "https://cdn/x.mp4");
    }

    #[test]
    fn path_relative_links_stay_under_the_api_base() {
        let url = resolve_link("http://api.local/youtube", "files/a.mp3").unwrap();
        assert_eq!(url.as_str(), "http://api.local/youtube/files/a.mp3");
        let url = resolve_link("http://api.local/youtube/", "files/a.mp3").unwrap();
        assert_eq!(url.as_str(), "http://api.local/youtube/files/a.mp3");
    }

    #[test]
    fn creates_missing_output_dir() {
        let server = serve(vec![Route {
            path: "/files/a.mp3",
            status: 200,
            body: b"ID3".to_vec(),
        }]);
        let root = tempdir().unwrap();
        let dir = root.path().join("a/b");

        let saved = save_link(&Client::new(), &server.base, "/files/a.mp3", &dir).unwrap();
        assert_eq!(saved, dir.join("a.mp3"));
        assert_eq!(fs::read(&saved).unwrap(), b"ID3");
    }

    #[test]
    fn file_name_is_decoded_last_segment() {
        let url = Url::parse("https://cdn/videos/My%20Clip.mp4?sig=1").unwrap();
        assert_eq!(file_name_for(&url), "My Clip.mp4");
        let url = Url::parse("https://cdn/").unwrap();
        assert_eq!(file_name_for(&url), "download");
    }

    #[test]
    fn saves_body_without_overwriting() {
        let body: Vec<u8> = (0u8..=255).cycle().take(10_000).collect();
        let server = serve(vec![Route {
            path: "/files/clip.mp4",
            status: 200,
            body: body.clone(),
        }]);
        let dir = tempdir().unwrap();
        let client = Client::new();

        let first = save_link(&client, &server.base, "/files/clip.mp4", dir.path()).unwrap();
        assert_eq!(first, dir.path().join("clip.mp4"));
        assert_eq!(fs::read(&first).unwrap(), body);

        let second = save_link(&client, &server.base, "/files/clip.mp4", dir.path()).unwrap();
        assert_eq!(second, dir.path().join("clip (1).mp4"));
        assert!(!dir.path().join("clip.mp4.part").exists());
    }

    #[test]
    fn missing_resource_is_save_error() {
        let server = serve(vec![]);
        let dir = tempdir().unwrap();
        let err = save_link(&Client::new(), &server.base, "/nope.mp4", dir.path()).unwrap_err();
        assert_eq!(err, FlowError::Save("HTTP 404".into()));
    }
}
