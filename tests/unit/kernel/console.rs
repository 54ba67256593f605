use super::*;

#[test]
fn new_state_greets_in_terminal_only() {
    let state = ConsoleState::new();
    assert!(state.console().is_empty());
    assert_eq!(state.terminal().len(), 1);
    assert_eq!(state.terminal()[0].text, WELCOME_LINE);
}

#[test]
fn lines_are_stamped() {
    let mut state = ConsoleState::new();
    state.push_console("Explorer refreshed");

    let line = &state.console()[0];
    assert_eq!(line.stamp.len(), "[12:34:56]".len());
    assert!(line.stamp.starts_with('['));
    assert!(line.to_string().ends_with(" Explorer refreshed"));
}

#[test]
fn visible_lines_follow_active_tab() {
    let mut state = ConsoleState::new();
    state.push_console("a");
    state.push_console("b");

    assert_eq!(state.visible_lines().len(), 2);
    state.active_tab = BottomPanelTab::Terminal;
    assert_eq!(state.visible_lines().len(), 1);
    state.active_tab = BottomPanelTab::Problems;
    assert!(state.visible_lines().is_empty());
}

#[test]
fn local_offset_is_read_once() {
    let first = capture_local_offset();
    assert_eq!(capture_local_offset(), first);
    assert_eq!(LOCAL_OFFSET.get().copied(), Some(first));

    let mut state = ConsoleState::new();
    state.push_terminal("after capture");
    assert_eq!(state.terminal()[1].stamp.len(), "[12:34:56]".len());
}
