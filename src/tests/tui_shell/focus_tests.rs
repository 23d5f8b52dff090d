use super::*;

#[test]
fn cycle_wraps_in_both_directions() {
    let mut focus = FocusManager::new();
    assert_eq!(focus.current(), PanelId::Configs);

    for _ in 0..NAVIGABLE.len() {
        focus.cycle_next();
    }
    assert_eq!(focus.current(), PanelId::Configs);

    focus.cycle_prev();
    assert_eq!(focus.current(), PanelId::Output);
    focus.cycle_next();
    assert_eq!(focus.current(), PanelId::Configs);
}

#[test]
fn cycle_from_non_navigable_enters_at_the_ends() {
    let mut focus = FocusManager::new();
    focus.set(PanelId::Summary);
    assert_eq!(focus.cycle_next(), NAVIGABLE[0]);

    focus.set(PanelId::Details);
    assert_eq!(focus.cycle_prev(), NAVIGABLE[NAVIGABLE.len() - 1]);
}

#[test]
fn spatial_moves_follow_the_grid() {
    let mut focus = FocusManager::new();
    focus.set(PanelId::Summary);
    assert_eq!(focus.spatial(FocusMove::Right), PanelId::Health);
    assert_eq!(focus.spatial(FocusMove::Down), PanelId::External);
    assert_eq!(focus.spatial(FocusMove::Left), PanelId::Configs);
    assert_eq!(focus.spatial(FocusMove::Down), PanelId::Output);
}

#[test]
fn spatial_clamps_at_edges() {
    let mut focus = FocusManager::new();
    focus.set(PanelId::Summary);
    assert_eq!(focus.spatial(FocusMove::Up), PanelId::Summary);
    assert_eq!(focus.spatial(FocusMove::Left), PanelId::Summary);

    focus.set(PanelId::Output);
    assert_eq!(focus.spatial(FocusMove::Down), PanelId::Output);
}

#[test]
fn digit_jumps_follow_the_table() {
    let mut focus = FocusManager::new();
    assert_eq!(focus.jump(0), Some(PanelId::Output));
    assert_eq!(focus.jump(5), Some(PanelId::Configs));
    assert_eq!(focus.jump(9), None);
    // A failed jump leaves focus where it was.
    assert_eq!(focus.current(), PanelId::Configs);
}

#[test]
fn navigable_list_matches_panel_flags() {
    for id in NAVIGABLE {
        assert!(id.is_navigable());
    }
    assert!(!PanelId::Summary.is_navigable());
    assert!(!PanelId::Details.is_navigable());
    assert!(PanelId::Details.is_scrollable());
}
