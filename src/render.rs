use crate::i18n::t;
use crate::types::{FormatCatalog, MediaKind, Quality, Selection};
use crate::utils::decode_url;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Action {
    Choose(MediaKind),
    Download,
    Back,
    SaveLink,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PickerRole {
    Format,
    Quality,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct PickerOption {
    pub label: String,
    pub value: String,
    pub detail: Option<String>,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Picker {
    pub id: &'static str,
    pub role: PickerRole,
    pub label: String,
    pub options: Vec<PickerOption>,
    pub selected: usize,
}

impl Picker {
    pub fn value(&self) -> Option<&str> {
        self.options.get(self.selected).map(|o| o.value.as_str())
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Widget {
    Picker(Picker),
    Button(Button),
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Screen {
    KindChoice,
    Options(MediaKind),
    Result,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct OptionsView {
    pub screen: Screen,
    pub widgets: Vec<Widget>,
    pub focus: usize,
    pub notice: Option<String>,
}

impl OptionsView {
    fn new(screen: Screen, widgets: Vec<Widget>) -> Self {
        Self {
            screen,
            widgets,
            focus: 0,
            notice: None,
        }
    }

    pub fn focus_next(&mut self) {
        if !self.widgets.is_empty() {
            self.focus = (self.focus + 1) % self.widgets.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.widgets.is_empty() {
            self.focus = (self.focus + self.widgets.len() - 1) % self.widgets.len();
        }
    }

    pub fn cycle(&mut self, delta: isize) {
        if let Some(Widget::Picker(picker)) = self.widgets.get_mut(self.focus) {
            let len = picker.options.len() as isize;
            if len > 0 {
                picker.selected = (picker.selected as isize + delta).rem_euclid(len) as usize;
            }
        }
    }

    pub fn focused_action(&self) -> Option<Action> {
        match self.widgets.get(self.focus) {
            Some(Widget::Button(b)) => Some(b.action),
            _ => None,
        }
    }

    pub fn picker(&self, role: PickerRole) -> Option<&Picker> {
        self.widgets.iter().find_map(|w| match w {
            Widget::Picker(p) if p.role == role => Some(p),
            _ => None,
        })
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.widgets.iter().filter_map(|w| match w {
            Widget::Button(b) => Some(b),
            _ => None,
        })
    }

    pub fn has_action(&self, action: Action) -> bool {
        self.buttons().any(|b| b.action == action)
    }

    pub fn selection(&self) -> Option<Selection> {
        let format = self.picker(PickerRole::Format)?.value()?;
        let quality = self.picker(PickerRole::Quality)?.value()?;
        Some(Selection {
            format: format.to_string(),
            quality: quality.to_string(),
        })
    }
}

fn button(label: String, action: Action) -> Widget {
    Widget::Button(Button { label, action })
}

pub fn kind_choice() -> OptionsView {
    OptionsView::new(
        Screen::KindChoice,
        vec![
            button(t!("render.download_video"), Action::Choose(MediaKind::Video)),
            button(t!("render.download_audio"), Action::Choose(MediaKind::Audio)),
        ],
    )
}

pub fn format_picker(kind: MediaKind, formats: &[String]) -> Picker {
    Picker {
        id: match kind {
            MediaKind::Video => "format-select",
            MediaKind::Audio => "audio-format-select",
        },
        role: PickerRole::Format,
        label: t!("render.select_format", kind = kind.name()),
        options: formats
            .iter()
            .map(|f| PickerOption {
                label: f.to_uppercase(),
                value: f.clone(),
                detail: None,
            })
            .collect(),
        selected: 0,
    }
}

/// Keeps the backend's order; never sorted.
pub fn quality_picker(kind: MediaKind, qualities: &[Quality]) -> Picker {
    Picker {
        id: match kind {
            MediaKind::Video => "quality-select",
            MediaKind::Audio => "audio-quality-select",
        },
        role: PickerRole::Quality,
        label: t!("render.select_quality", kind = kind.name()),
        options: qualities
            .iter()
            .map(|q| PickerOption {
                label: q.label.clone(),
                value: q.label.clone(),
                detail: (!q.detail.is_empty()).then(|| q.detail.clone()),
            })
            .collect(),
        selected: 0,
    }
}

pub fn options(kind: MediaKind, catalog: &FormatCatalog) -> OptionsView {
    OptionsView::new(
        Screen::Options(kind),
        vec![
            Widget::Picker(format_picker(kind, &catalog.formats)),
            Widget::Picker(quality_picker(kind, &catalog.qualities)),
            button(t!("render.download"), Action::Download),
            button(t!("render.back"), Action::Back),
        ],
    )
}

pub fn result(link: &str) -> OptionsView {
    let mut view = OptionsView::new(
        Screen::Result,
        vec![
            button(t!("render.download_link"), Action::SaveLink),
            button(t!("render.back"), Action::Back),
        ],
    );
    view.notice = Some(decode_url(link));
    view
}
