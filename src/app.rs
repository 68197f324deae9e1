use crate::api::HttpBackend;
use crate::binder::{self, Edit, Intent, SCREEN_REGIONS, ViewContext};
use crate::config::Config;
use crate::flow::{Flow, FlowEvent, transition};
use crate::presenter::Presenter;
use crate::text::InputLine;
use crate::types::AppMode;
use crate::utils::log_msg;
use crate::web::ApiWorker;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::mpsc::{self, Receiver};

pub struct App {
    pub mode: AppMode,
    pub flow: Flow,
    pub input: InputLine,
    pub context: Option<ViewContext>,

    worker: ApiWorker,
    rx: Receiver<FlowEvent>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_regions(config, &SCREEN_REGIONS)
    }

    pub fn with_regions(config: &Config, regions: &[binder::Region]) -> Result<Self> {
        let (tx, rx) = mpsc::sync_channel(5);
        let backend = HttpBackend::new(&config.api_base, config.timeout)?;
        let worker = ApiWorker::new(backend, config.output_dir.clone(), tx);

        let context = binder::bind(regions);
        let presenter = context
            .as_ref()
            .map(ViewContext::presenter)
            .unwrap_or_default();

        let api_base = &config.api_base;
        log_msg("info", &format!("App initialized, backend {api_base}"));

        Ok(Self {
            mode: if config.initial_url.is_empty() {
                AppMode::Insert
            } else {
                AppMode::Normal
            },
            flow: Flow::new(presenter),
            input: InputLine::new(config.initial_url.clone()),
            context,
            worker,
            rx,
        })
    }

    pub fn dispatch(&mut self, event: FlowEvent) {
        let name = event.name();
        let previous_error = self.flow.view.error().map(str::to_string);

        let (flow, effects) = transition(std::mem::take(&mut self.flow), event);
        self.flow = flow;

        let step = self.flow.step.name();
        log_msg("info", &format!("{name} -> {step}"));
        if let Some(error) = self.flow.view.error() {
            if previous_error.as_deref() != Some(error) {
                log_msg("error", error);
            }
        }

        for effect in effects {
            self.worker.run(effect);
        }
    }

    pub fn handle_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.dispatch(event);
        }
    }

    /// Returns true when the app should quit.
    pub fn on_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        let intent = match &self.context {
            Some(ctx) => ctx.intent(self.mode, key, modifiers),
            None => {
                return key == KeyCode::Char('q')
                    || (key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL));
            }
        };

        match intent {
            Intent::Quit => return true,
            Intent::Submit => {
                if self.flow.view.submit_enabled() {
                    self.mode = AppMode::Normal;
                }
                let raw = self.input.as_str().to_string();
                self.dispatch(FlowEvent::Submit(raw));
            }
            Intent::Flow(event) => self.dispatch(event),
            Intent::Edit(edit) => self.apply_edit(edit),
            Intent::EnterInsert => self.mode = AppMode::Insert,
            Intent::LeaveInsert => self.mode = AppMode::Normal,
            Intent::Nothing => {}
        }
        false
    }

    fn apply_edit(&mut self, edit: Edit) {
        match edit {
            Edit::Insert(c) => self.input.insert(c),
            Edit::Backspace => self.input.backspace(),
            Edit::Delete => self.input.delete(),
            Edit::Left => self.input.left(),
            Edit::Right => self.input.right(),
            Edit::Home => self.input.home(),
            Edit::End => self.input.end(),
            Edit::ClearBefore => self.input.clear_before(),
            Edit::ClearAfter => self.input.clear_after(),
            Edit::DeleteWord => self.input.delete_word(),
        }
    }

    pub fn presenter(&self) -> &Presenter {
        &self.flow.view
    }
}
