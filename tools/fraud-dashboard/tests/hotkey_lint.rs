use fraud_dashboard::hotkeys::{
    action_for_key, dashboard_controls_legend, HotkeyAction, NAVIGATION_BINDINGS, TAB_BINDINGS,
};
use fraud_dashboard::types::Tab;

fn legend_keys(legend: &str) -> Vec<char> {
    legend
        .split_whitespace()
        .filter_map(|token| {
            if token.len() == 1 {
                token.chars().next()
            } else {
                None
            }
        })
        .collect()
}

#[test]
fn linter_hotkeys_advertised_in_ui_must_have_behavior() {
    let advertised = legend_keys(&dashboard_controls_legend());

    for binding in TAB_BINDINGS.iter().chain(NAVIGATION_BINDINGS.iter()) {
        assert!(
            advertised.contains(&binding.key),
            "bound hotkey `{}` is missing from the legend",
            binding.key
        );
    }

    let mut unique_advertised = advertised;
    unique_advertised.sort_unstable();
    unique_advertised.dedup();
    for key in unique_advertised {
        assert!(
            action_for_key(key).is_some(),
            "advertised hotkey `{key}` has no application behavior"
        );
    }
}

#[test]
fn linter_tab_bindings_cover_every_tab_in_order() {
    let selected = TAB_BINDINGS
        .iter()
        .map(|binding| action_for_key(binding.key))
        .collect::<Vec<_>>();
    let expected = Tab::ALL
        .iter()
        .map(|tab| Some(HotkeyAction::SelectTab(*tab)))
        .collect::<Vec<_>>();
    assert_eq!(selected, expected);

    for (binding, tab) in TAB_BINDINGS.iter().zip(Tab::ALL) {
        assert_eq!(binding.action, tab.as_str());
    }
}
