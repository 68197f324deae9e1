use crate::flow::FlowEvent;
use crate::presenter::Presenter;
use crate::types::{AppMode, MediaKind};
use crate::utils::log_msg;
use crossterm::event::{KeyCode, KeyModifiers};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Region {
    UrlInput,
    FindButton,
    Spinner,
    ErrorBanner,
    Results,
    Options,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Edit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    ClearBefore,
    ClearAfter,
    DeleteWord,
}

#[derive(Clone, Debug)]
pub enum Intent {
    Flow(FlowEvent),
    Submit,
    Edit(Edit),
    EnterInsert,
    LeaveInsert,
    Quit,
    Nothing,
}

#[derive(Clone, Debug)]
pub struct ViewContext {
    regions: Vec<Region>,
}

/// Returns `None`, after logging, when the URL input or the Find control is
/// missing. Nothing is wired in that case.
pub fn bind(regions: &[Region]) -> Option<ViewContext> {
    let missing: Vec<Region> = [Region::UrlInput, Region::FindButton]
        .into_iter()
        .filter(|r| !regions.contains(r))
        .collect();
    if !missing.is_empty() {
        log_msg(
            "error",
            &format!("Required regions are missing: {missing:?}; input not wired"),
        );
        return None;
    }

    for optional in [Region::Spinner, Region::ErrorBanner, Region::Results, Region::Options] {
        if !regions.contains(&optional) {
            log_msg("warn", &format!("Region {optional:?} not mounted"));
        }
    }

    Some(ViewContext {
        regions: regions.to_vec(),
    })
}

impl ViewContext {
    pub fn has(&self, region: Region) -> bool {
        self.regions.contains(&region)
    }

    pub fn presenter(&self) -> Presenter {
        Presenter::new(
            self.has(Region::Spinner),
            self.has(Region::ErrorBanner),
            self.has(Region::Results),
        )
    }

    pub fn intent(&self, mode: AppMode, key: KeyCode, modifiers: KeyModifiers) -> Intent {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Intent::Quit;
        }
        match mode {
            AppMode::Insert => insert_intent(key, modifiers),
            AppMode::Normal => self.normal_intent(key),
        }
    }

    fn normal_intent(&self, key: KeyCode) -> Intent {
        let event = match key {
            KeyCode::Char('q') => return Intent::Quit,
            KeyCode::Char('i') | KeyCode::Char('/') => return Intent::EnterInsert,
            KeyCode::Char('f') => return Intent::Submit,
            _ if !self.has(Region::Options) => return Intent::Nothing,
            KeyCode::Enter => FlowEvent::Activate,
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => FlowEvent::FocusNext,
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => FlowEvent::FocusPrev,
            KeyCode::Left | KeyCode::Char('h') => FlowEvent::Cycle(-1),
            KeyCode::Right | KeyCode::Char('l') => FlowEvent::Cycle(1),
            KeyCode::Char('v') => FlowEvent::ChooseKind(MediaKind::Video),
            KeyCode::Char('a') => FlowEvent::ChooseKind(MediaKind::Audio),
            KeyCode::Char('d') => FlowEvent::Download,
            KeyCode::Char('b') | KeyCode::Esc | KeyCode::Backspace => FlowEvent::Back,
            KeyCode::Char('s') => FlowEvent::SaveLink,
            _ => return Intent::Nothing,
        };
        Intent::Flow(event)
    }
}

fn insert_intent(key: KeyCode, modifiers: KeyModifiers) -> Intent {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let edit = match key {
        KeyCode::Enter => return Intent::Submit,
        KeyCode::Esc => return Intent::LeaveInsert,
        KeyCode::Backspace if modifiers.contains(KeyModifiers::ALT) => Edit::DeleteWord,
        KeyCode::Backspace => Edit::Backspace,
        // Ctrl+H is backspace on many terminals
        KeyCode::Char('h') if ctrl => Edit::Backspace,
        KeyCode::Char('w') if ctrl => Edit::DeleteWord,
        KeyCode::Char('u') if ctrl => Edit::ClearBefore,
        KeyCode::Char('k') if ctrl => Edit::ClearAfter,
        KeyCode::Char('a') if ctrl => Edit::Home,
        KeyCode::Char('e') if ctrl => Edit::End,
        KeyCode::Delete => Edit::Delete,
        KeyCode::Home => Edit::Home,
        KeyCode::End => Edit::End,
        KeyCode::Left => Edit::Left,
        KeyCode::Right => Edit::Right,
        KeyCode::Char(c) if !ctrl && !modifiers.contains(KeyModifiers::ALT) => Edit::Insert(c),
        _ => return Intent::Nothing,
    };
    Intent::Edit(edit)
}

pub const SCREEN_REGIONS: [Region; 6] = [
    Region::UrlInput,
    Region::FindButton,
    Region::Spinner,
    Region::ErrorBanner,
    Region::Results,
    Region::Options,
];

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ViewContext {
        bind(&SCREEN_REGIONS).unwrap()
    }

    #[test]
    fn missing_required_region_fails_soft() {
        assert!(bind(&[Region::FindButton, Region::Results]).is_none());
        assert!(bind(&[Region::UrlInput]).is_none());
    }

    #[test]
    fn optional_regions_shape_the_presenter() {
        let ctx = bind(&[Region::UrlInput, Region::FindButton, Region::Results]).unwrap();
        let mut presenter = ctx.presenter();
        presenter.set_error(Some("x".into()));
        presenter.set_results_visible(true);
        assert_eq!(presenter.error(), None);
        assert!(presenter.results_visible());
    }

    #[test]
    fn enter_submits_in_insert_mode() {
        assert!(matches!(
            ctx().intent(AppMode::Insert, KeyCode::Enter, KeyModifiers::NONE),
            Intent::Submit
        ));
        assert!(matches!(
            ctx().intent(AppMode::Insert, KeyCode::Char('q'), KeyModifiers::NONE),
            Intent::Edit(Edit::Insert('q'))
        ));
    }

    #[test]
    fn normal_mode_keys_map_to_flow_events() {
        let ctx = ctx();
        assert!(matches!(
            ctx.intent(AppMode::Normal, KeyCode::Char('a'), KeyModifiers::NONE),
            Intent::Flow(FlowEvent::ChooseKind(MediaKind::Audio))
        ));
        assert!(matches!(
            ctx.intent(AppMode::Normal, KeyCode::Esc, KeyModifiers::NONE),
            Intent::Flow(FlowEvent::Back)
        ));
        assert!(matches!(
            ctx.intent(AppMode::Normal, KeyCode::Char('q'), KeyModifiers::NONE),
            Intent::Quit
        ));
    }

    #[test]
    fn without_options_region_flow_keys_do_nothing() {
        let ctx = bind(&[Region::UrlInput, Region::FindButton]).unwrap();
        assert!(matches!(
            ctx.intent(AppMode::Normal, KeyCode::Char('d'), KeyModifiers::NONE),
            Intent::Nothing
        ));
        assert!(matches!(
            ctx.intent(AppMode::Normal, KeyCode::Char('f'), KeyModifiers::NONE),
            Intent::Submit
        ));
    }
}
