use crate::types::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub key: char,
    pub action: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    Quit,
    SelectTab(Tab),
    NextTab,
    PreviousTab,
}

pub const TAB_BINDINGS: [HotkeyBinding; 4] = [
    HotkeyBinding {
        key: '1',
        action: "overview",
    },
    HotkeyBinding {
        key: '2',
        action: "models",
    },
    HotkeyBinding {
        key: '3',
        action: "evaluation",
    },
    HotkeyBinding {
        key: '4',
        action: "agents",
    },
];

pub const NAVIGATION_BINDINGS: [HotkeyBinding; 3] = [
    HotkeyBinding {
        key: 'h',
        action: "prev",
    },
    HotkeyBinding {
        key: 'l',
        action: "next",
    },
    HotkeyBinding {
        key: 'q',
        action: "quit",
    },
];

pub fn dashboard_controls_legend() -> String {
    let mut bindings = TAB_BINDINGS.to_vec();
    bindings.extend(NAVIGATION_BINDINGS);
    format_bindings("Keys: ", &bindings)
}

pub fn action_for_key(key: char) -> Option<HotkeyAction> {
    match key {
        '1' => Some(HotkeyAction::SelectTab(Tab::Overview)),
        '2' => Some(HotkeyAction::SelectTab(Tab::Models)),
        '3' => Some(HotkeyAction::SelectTab(Tab::Evaluation)),
        '4' => Some(HotkeyAction::SelectTab(Tab::Agents)),
        'h' => Some(HotkeyAction::PreviousTab),
        'l' => Some(HotkeyAction::NextTab),
        'q' => Some(HotkeyAction::Quit),
        _ => None,
    }
}

fn format_bindings(prefix: &str, bindings: &[HotkeyBinding]) -> String {
    let parts = bindings
        .iter()
        .map(|binding| format!("{} {}", binding.key, binding.action))
        .collect::<Vec<_>>();
    format!("{prefix}{}", parts.join("  "))
}
