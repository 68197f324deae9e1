use crate::error::FlowError;
use crate::presenter::Presenter;
use crate::render::{self, Action, OptionsView, PickerRole};
use crate::types::{DownloadResult, DownloadStatus, FormatCatalog, MediaKind, Selection, Session};
use serde_json::Value;
use std::path::PathBuf;

const HOST_MARKERS: [&str; 2] = ["youtube.com", "youtu.be"];

#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub enum Step {
    #[default]
    Idle,
    ChoosingKind {
        session: Session,
    },
    FetchingOptions {
        session: Session,
        kind: MediaKind,
    },
    ShowingOptions {
        session: Session,
        catalog: FormatCatalog,
    },
    Submitting {
        session: Session,
        catalog: FormatCatalog,
        selection: Selection,
    },
    ShowingResult {
        session: Session,
        result: DownloadResult,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Idle => "idle",
            Step::ChoosingKind { .. } => "choosing_kind",
            Step::FetchingOptions { .. } => "fetching_options",
            Step::ShowingOptions { .. } => "showing_options",
            Step::Submitting { .. } => "submitting",
            Step::ShowingResult { .. } => "showing_result",
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Step::Idle => None,
            Step::ChoosingKind { session }
            | Step::FetchingOptions { session, .. }
            | Step::ShowingOptions { session, .. }
            | Step::Submitting { session, .. }
            | Step::ShowingResult { session, .. } => Some(session),
        }
    }
}

#[derive(Clone, Debug)]
pub enum FlowEvent {
    Submit(String),
    ChooseKind(MediaKind),
    FormatsLoaded {
        kind: MediaKind,
        outcome: Result<Value, FlowError>,
    },
    Download,
    DownloadFinished(Result<Value, FlowError>),
    Back,
    SaveLink,
    Saved(Result<PathBuf, FlowError>),
    FocusNext,
    FocusPrev,
    Cycle(isize),
    Activate,
}

impl FlowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FlowEvent::Submit(_) => "submit",
            FlowEvent::ChooseKind(_) => "choose_kind",
            FlowEvent::FormatsLoaded { .. } => "formats_loaded",
            FlowEvent::Download => "download",
            FlowEvent::DownloadFinished(_) => "download_finished",
            FlowEvent::Back => "back",
            FlowEvent::SaveLink => "save_link",
            FlowEvent::Saved(_) => "saved",
            FlowEvent::FocusNext => "focus_next",
            FlowEvent::FocusPrev => "focus_prev",
            FlowEvent::Cycle(_) => "cycle",
            FlowEvent::Activate => "activate",
        }
    }

    fn is_trigger(&self) -> bool {
        matches!(
            self,
            FlowEvent::Submit(_)
                | FlowEvent::ChooseKind(_)
                | FlowEvent::Download
                | FlowEvent::Back
                | FlowEvent::SaveLink
                | FlowEvent::Activate
        )
    }
}

impl From<Action> for FlowEvent {
    fn from(action: Action) -> Self {
        match action {
            Action::Choose(kind) => FlowEvent::ChooseKind(kind),
            Action::Download => FlowEvent::Download,
            Action::Back => FlowEvent::Back,
            Action::SaveLink => FlowEvent::SaveLink,
        }
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Effect {
    FetchFormats {
        kind: MediaKind,
        url: String,
    },
    RequestDownload {
        kind: MediaKind,
        url: String,
        selection: Selection,
    },
    Save {
        link: String,
    },
    Ignored(String),
}

#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Flow {
    pub step: Step,
    pub view: Presenter,
    pub container: Option<OptionsView>,
}

impl Flow {
    pub fn new(view: Presenter) -> Self {
        Self {
            step: Step::Idle,
            view,
            container: None,
        }
    }
}

pub fn validate_url(raw: &str) -> Result<String, FlowError> {
    let url = raw.trim();
    if url.is_empty() || !HOST_MARKERS.iter().any(|m| url.contains(m)) {
        return Err(FlowError::Validation);
    }
    Ok(url.to_string())
}

fn formats_failure(kind: MediaKind, e: &FlowError) -> String {
    match e {
        FlowError::Network {
            status: Some(_), ..
        } => match kind {
            MediaKind::Video => "Failed to process video".to_string(),
            MediaKind::Audio => "Failed to process audio".to_string(),
        },
        other => other.to_string(),
    }
}

fn pickers_mounted(container: Option<&OptionsView>) -> bool {
    container.is_some_and(|c| {
        c.picker(PickerRole::Format).is_some() && c.picker(PickerRole::Quality).is_some()
    })
}

fn download_failure(e: &FlowError) -> String {
    format!("Download failed: {e}")
}

/// Pure step function: the next flow plus the effects the caller must run.
/// Network completions come back in as events.
pub fn transition(flow: Flow, event: FlowEvent) -> (Flow, Vec<Effect>) {
    let Flow {
        step,
        mut view,
        mut container,
    } = flow;
    let mut effects = Vec::new();

    if view.is_loading() && event.is_trigger() {
        effects.push(Effect::Ignored(format!(
            "{} while {} is busy",
            event.name(),
            step.name()
        )));
        return (
            Flow {
                step,
                view,
                container,
            },
            effects,
        );
    }

    let event = match event {
        FlowEvent::Activate => match container.as_ref().and_then(OptionsView::focused_action) {
            Some(action) => action.into(),
            None => {
                effects.push(Effect::Ignored("activate without a focused button".into()));
                return (
                    Flow {
                        step,
                        view,
                        container,
                    },
                    effects,
                );
            }
        },
        other => other,
    };

    let step = match (step, event) {
        (_, FlowEvent::Submit(raw)) => {
            view.set_error(None);
            view.set_results_visible(false);
            match validate_url(&raw) {
                Ok(url) => {
                    container = Some(render::kind_choice());
                    view.set_results_visible(true);
                    Step::ChoosingKind {
                        session: Session::new(url),
                    }
                }
                Err(e) => {
                    container = None;
                    view.set_error(Some(e.to_string()));
                    Step::Idle
                }
            }
        }

        (Step::ChoosingKind { session }, FlowEvent::ChooseKind(kind)) => {
            view.set_error(None);
            view.set_loading(true);
            effects.push(Effect::FetchFormats {
                kind,
                url: session.submitted_url.clone(),
            });
            Step::FetchingOptions { session, kind }
        }

        (
            Step::FetchingOptions { session, kind },
            FlowEvent::FormatsLoaded {
                kind: loaded,
                outcome,
            },
        ) if kind == loaded => {
            view.set_loading(false);
            match outcome.and_then(|body| FormatCatalog::from_response(kind, &body)) {
                Ok(catalog) => {
                    container = Some(render::options(kind, &catalog));
                    Step::ShowingOptions {
                        session: session.with_kind(kind),
                        catalog,
                    }
                }
                Err(e) => {
                    view.set_error(Some(formats_failure(kind, &e)));
                    Step::ChoosingKind { session }
                }
            }
        }

        (Step::ShowingOptions { session, catalog }, FlowEvent::Download) => {
            let selection = container.as_ref().and_then(OptionsView::selection);
            match (selection, session.media_kind) {
                (Some(selection), Some(kind)) if catalog.contains(&selection) => {
                    view.set_error(None);
                    view.set_loading(true);
                    effects.push(Effect::RequestDownload {
                        kind,
                        url: session.submitted_url.clone(),
                        selection: selection.clone(),
                    });
                    Step::Submitting {
                        session,
                        catalog,
                        selection,
                    }
                }
                // pickers are mounted but one of them has nothing to offer
                (None, _) if pickers_mounted(container.as_ref()) => {
                    let e = FlowError::DownloadFailure("no format/quality available".into());
                    view.set_error(Some(download_failure(&e)));
                    Step::ShowingOptions { session, catalog }
                }
                _ => {
                    effects.push(Effect::Ignored("download without a complete selection".into()));
                    Step::ShowingOptions { session, catalog }
                }
            }
        }

        (
            Step::Submitting {
                session, catalog, ..
            },
            FlowEvent::DownloadFinished(outcome),
        ) => {
            view.set_loading(false);
            let result = outcome.map(|body| DownloadResult::from_response(&body));
            match result {
                Ok(DownloadResult {
                    status: DownloadStatus::Success,
                    link: Some(link),
                }) => {
                    container = Some(render::result(&link));
                    Step::ShowingResult {
                        session,
                        result: DownloadResult {
                            status: DownloadStatus::Success,
                            link: Some(link),
                        },
                    }
                }
                Ok(_) => {
                    let e = FlowError::DownloadFailure("Invalid response from server".into());
                    view.set_error(Some(download_failure(&e)));
                    Step::ShowingOptions { session, catalog }
                }
                Err(e) => {
                    view.set_error(Some(download_failure(&e)));
                    Step::ShowingOptions { session, catalog }
                }
            }
        }

        (
            Step::ShowingOptions { session, .. } | Step::ShowingResult { session, .. },
            FlowEvent::Back,
        ) => {
            view.set_error(None);
            container = Some(render::kind_choice());
            Step::ChoosingKind {
                session: session.unselected(),
            }
        }

        (Step::ShowingResult { session, result }, FlowEvent::SaveLink) => {
            if let Some(link) = result.link.clone() {
                view.set_error(None);
                view.set_loading(true);
                effects.push(Effect::Save { link });
            }
            Step::ShowingResult { session, result }
        }

        (Step::ShowingResult { session, result }, FlowEvent::Saved(outcome)) => {
            view.set_loading(false);
            match outcome {
                Ok(path) => {
                    if let Some(c) = container.as_mut() {
                        c.notice = Some(format!("Saved to {}", path.display()));
                    }
                }
                Err(e) => view.set_error(Some(format!("Save failed: {e}"))),
            }
            Step::ShowingResult { session, result }
        }

        (step, FlowEvent::FocusNext) => {
            if let Some(c) = container.as_mut() {
                c.focus_next();
            }
            step
        }
        (step, FlowEvent::FocusPrev) => {
            if let Some(c) = container.as_mut() {
                c.focus_prev();
            }
            step
        }
        (step, FlowEvent::Cycle(delta)) => {
            if let Some(c) = container.as_mut() {
                c.cycle(delta);
            }
            step
        }

        (step, event) => {
            effects.push(Effect::Ignored(format!(
                "{} does not apply to {}",
                event.name(),
                step.name()
            )));
            step
        }
    };

    (
        Flow {
            step,
            view,
            container,
        },
        effects,
    )
}
