use crate::document::{validate, ResultsDocument, ValidationReport};
use crate::errors::DashboardError;
use crate::hotkeys::HotkeyAction;
use crate::sections::{build_section, Section};
use crate::tui::render_dashboard;
use crate::types::Tab;

/// The only mutable state of a dashboard: which tab is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    active_tab: Tab,
}

impl ViewState {
    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn select(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Selects a tab by identifier. Unknown identifiers leave the state as is.
    pub fn select_id(&mut self, id: &str) -> Result<Tab, DashboardError> {
        let tab = Tab::parse(id)?;
        self.select(tab);
        Ok(tab)
    }

    pub fn next(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn previous(&mut self) {
        self.active_tab = self.active_tab.previous();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Switched { from: Tab, to: Tab },
    Unchanged,
    Quit,
}

/// A mounted dashboard. Holds a validated document and its own view state.
#[derive(Debug, Clone)]
pub struct Dashboard {
    document: ResultsDocument,
    report: ValidationReport,
    state: ViewState,
}

impl Dashboard {
    pub fn mount(document: ResultsDocument) -> Result<Self, DashboardError> {
        let report = validate(&document)?;
        Ok(Self {
            document,
            report,
            state: ViewState::default(),
        })
    }

    pub fn document(&self) -> &ResultsDocument {
        &self.document
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn active_tab(&self) -> Tab {
        self.state.active_tab()
    }

    pub fn select(&mut self, tab: Tab) {
        self.state.select(tab);
    }

    pub fn select_id(&mut self, id: &str) -> Result<Tab, DashboardError> {
        self.state.select_id(id)
    }

    pub fn apply(&mut self, action: HotkeyAction) -> ActionOutcome {
        let from = self.state.active_tab();
        match action {
            HotkeyAction::Quit => return ActionOutcome::Quit,
            HotkeyAction::SelectTab(tab) => self.state.select(tab),
            HotkeyAction::NextTab => self.state.next(),
            HotkeyAction::PreviousTab => self.state.previous(),
        }
        let to = self.state.active_tab();
        if from == to {
            ActionOutcome::Unchanged
        } else {
            ActionOutcome::Switched { from, to }
        }
    }

    pub fn active_section(&self) -> Result<Section, DashboardError> {
        build_section(&self.document, self.state.active_tab())
    }

    pub fn render(&self, width: u16, height: u16) -> Result<String, DashboardError> {
        render_dashboard(&self.document, self.state, width, height)
    }
}
