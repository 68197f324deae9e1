use crate::api::HttpBackend;
use crate::flow::{Effect, FlowEvent};
use crate::save::save_link;
use crate::utils::log_msg;
use std::path::PathBuf;
use std::sync::mpsc::SyncSender;
use std::thread;

pub struct ApiWorker {
    backend: HttpBackend,
    output_dir: PathBuf,
    tx: SyncSender<FlowEvent>,
}

impl ApiWorker {
    pub fn new(backend: HttpBackend, output_dir: PathBuf, tx: SyncSender<FlowEvent>) -> Self {
        Self {
            backend,
            output_dir,
            tx,
        }
    }

    pub fn run(&self, effect: Effect) {
        let backend = self.backend.clone();
        let tx = self.tx.clone();

        match effect {
            Effect::FetchFormats { kind, url } => {
                log_msg("info", &format!("Fetching {} formats for {url}", kind.name()));
                thread::spawn(move || {
                    let outcome = backend.formats(&url);
                    if let Err(e) = &outcome {
                        log_msg("error", &format!("formats failed ({}): {e}", e.kind()));
                    }
                    let _ = tx.send(FlowEvent::FormatsLoaded { kind, outcome });
                });
            }
            Effect::RequestDownload {
                kind,
                url,
                selection,
            } => {
                log_msg(
                    "info",
                    &format!(
                        "Requesting {} download {}/{} for {url}",
                        kind.name(),
                        selection.format,
                        selection.quality
                    ),
                );
                thread::spawn(move || {
                    let outcome = backend.download(kind, &url, &selection);
                    if let Err(e) = &outcome {
                        log_msg("error", &format!("download failed ({}): {e}", e.kind()));
                    }
                    let _ = tx.send(FlowEvent::DownloadFinished(outcome));
                });
            }
            Effect::Save { link } => {
                log_msg("info", &format!("Saving {link}"));
                let dir = self.output_dir.clone();
                thread::spawn(move || {
                    let outcome = save_link(backend.client(), backend.base(), &link, &dir);
                    match &outcome {
                        Ok(path) => log_msg("info", &format!("Saved {}", path.display())),
                        Err(e) => log_msg("error", &format!("save failed: {e}")),
                    }
                    let _ = tx.send(FlowEvent::Saved(outcome));
                });
            }
            Effect::Ignored(reason) => log_msg("warn", &format!("Ignored: {reason}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Route, serve};
    use crate::types::MediaKind;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn formats_completion_comes_back_as_event() {
        let server = serve(vec![Route::json(
            "/formats",
            200,
            r#"{"video_formats":["mp4"],"audio_formats":[],"available_qualities":{}}"#,
        )]);
        let (tx, rx) = mpsc::sync_channel(1);
        let backend = HttpBackend::new(&server.base, Some(Duration::from_secs(5))).unwrap();
        let worker = ApiWorker::new(backend, PathBuf::from("."), tx);

        worker.run(Effect::FetchFormats {
            kind: MediaKind::Video,
            url: "https://youtu.be/abc".into(),
        });

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            FlowEvent::FormatsLoaded { kind, outcome } => {
                assert_eq!(kind, MediaKind::Video);
                assert_eq!(outcome.unwrap()["video_formats"][0], "mp4");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
