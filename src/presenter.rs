#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Spinner {
    pub busy: bool,
}

#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Banner {
    pub message: Option<String>,
}

#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct ResultsPanel {
    pub visible: bool,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Presenter {
    spinner: Option<Spinner>,
    banner: Option<Banner>,
    results: Option<ResultsPanel>,
    submit_enabled: bool,
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(false, false, false)
    }
}

impl Presenter {
    pub fn new(spinner: bool, banner: bool, results: bool) -> Self {
        Self {
            spinner: spinner.then(Spinner::default),
            banner: banner.then(Banner::default),
            results: results.then(ResultsPanel::default),
            submit_enabled: true,
        }
    }

    #[cfg(test)]
    pub fn mounted() -> Self {
        Self::new(true, true, true)
    }

    pub fn set_loading(&mut self, on: bool) {
        if let Some(spinner) = self.spinner.as_mut() {
            spinner.busy = on;
        }
        self.submit_enabled = !on;
    }

    pub fn set_error(&mut self, message: Option<String>) {
        if let Some(banner) = self.banner.as_mut() {
            banner.message = message;
        }
    }

    pub fn set_results_visible(&mut self, visible: bool) {
        if let Some(results) = self.results.as_mut() {
            results.visible = visible;
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.submit_enabled
    }

    pub fn spinner_visible(&self) -> bool {
        self.spinner.as_ref().is_some_and(|s| s.busy)
    }

    pub fn error(&self) -> Option<&str> {
        self.banner.as_ref().and_then(|b| b.message.as_deref())
    }

    pub fn results_visible(&self) -> bool {
        self.results.as_ref().is_some_and(|r| r.visible)
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }
}
