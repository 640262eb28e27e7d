//! Fault isolation through the full dashboard draw path.

use crossterm::event::KeyCode;
use folio_core::{ControlKind, FailureOrigin, NamedFaultBoundary, RenderError, install_panic_hook};
use folio_engine::{BoundaryTarget, BuildMode, Panel};
use folio_tui::{INJECTED_FAULT, PAGE_BOUNDARY};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;

use crate::common::{
    app_with, click, control_area, demo_app, focus, press, render, settings,
    snapshot_with_unknown_tag,
};

#[test]
fn injected_fault_replaces_only_that_panel() {
    let mut app = demo_app();
    focus(&mut app, Panel::TagAnalytics);
    press(&mut app, KeyCode::Char('!'));

    let screen = render(&mut app);

    assert!(app.boundary(Panel::TagAnalytics).is_failed());
    assert!(screen.contains("Tag Analytics Error"));
    assert!(screen.contains("couldn't load properly"));
    for panel in [Panel::Overview, Panel::Holdings, Panel::Activity] {
        assert!(!app.boundary(panel).is_failed(), "{panel:?} should be healthy");
    }
    assert!(screen.contains("Total Value"));
    assert!(!app.page_boundary().is_failed());
}

#[test]
fn failure_records_component_stack_through_page() {
    let mut app = demo_app();
    focus(&mut app, Panel::Holdings);
    press(&mut app, KeyCode::Char('!'));
    render(&mut app);

    let state = app.boundary(Panel::Holdings);
    let failure = state.failure().unwrap();
    assert_eq!(failure.message(), INJECTED_FAULT);
    assert_eq!(failure.origin(), FailureOrigin::Error);
    let context = state.context().unwrap();
    assert_eq!(context.boundary(), "Holdings");
    assert_eq!(
        context.component_stack(),
        format!("{PAGE_BOUNDARY} > Holdings > HoldingsTable")
    );
}

#[test]
fn unknown_tag_fails_tag_table_at_render() {
    let mut app = app_with(settings(BuildMode::Development), snapshot_with_unknown_tag());
    // Loading succeeds; the lookup happens when the table draws.
    assert!(app.status().is_none());

    let screen = render(&mut app);

    let state = app.boundary(Panel::TagAnalytics);
    assert!(state.is_failed());
    assert!(state.failure().unwrap().message().contains("tag_missing"));
    assert!(state.context().unwrap().component_stack().ends_with("Tag Analytics > TagTable"));
    assert!(screen.contains("Tag Analytics Error"));
    assert!(screen.contains("Portfolio Overview"));
    assert!(!app.boundary(Panel::Holdings).is_failed());
}

#[test]
fn failed_panel_is_not_rerendered_until_reset() {
    let mut app = app_with(settings(BuildMode::Development), snapshot_with_unknown_tag());
    render(&mut app);
    let failed_on = app.boundary(Panel::TagAnalytics).context().unwrap().render_pass();

    for _ in 0..3 {
        let screen = render(&mut app);
        assert!(screen.contains("Tag Analytics Error"));
    }
    let state = app.boundary(Panel::TagAnalytics);
    assert_eq!(state.context().unwrap().render_pass(), failed_on);
    assert_eq!(state.cycles(), 0);
}

#[test]
fn clicking_try_again_recovers_transient_fault() {
    let mut app = demo_app();
    focus(&mut app, Panel::Activity);
    press(&mut app, KeyCode::Char('!'));
    render(&mut app);

    let target = BoundaryTarget::Panel(Panel::Activity);
    let button = control_area(&app, target, ControlKind::TryAgain).unwrap();
    focus(&mut app, Panel::Overview);
    click(&mut app, button.x + 1, button.y);

    assert!(!app.boundary(Panel::Activity).is_failed());
    assert_eq!(app.focus(), Panel::Activity);
    let screen = render(&mut app);
    assert!(!screen.contains("Recent Activity Error"));
    assert!(screen.contains("Family Investments"));
}

#[test]
fn retry_on_persistent_fault_fails_again() {
    let mut app = app_with(settings(BuildMode::Development), snapshot_with_unknown_tag());
    focus(&mut app, Panel::TagAnalytics);

    for cycle in 1..=25 {
        render(&mut app);
        assert!(app.boundary(Panel::TagAnalytics).is_failed());
        press(&mut app, KeyCode::Char('r'));
        assert!(!app.boundary(Panel::TagAnalytics).is_failed());
        assert_eq!(app.boundary(Panel::TagAnalytics).cycles(), cycle);
    }
}

#[test]
fn reload_key_resets_every_boundary() {
    let mut app = demo_app();
    for panel in [Panel::Overview, Panel::Holdings] {
        focus(&mut app, panel);
        press(&mut app, KeyCode::Char('!'));
    }
    render(&mut app);
    assert!(app.boundary(Panel::Overview).is_failed());
    assert!(app.boundary(Panel::Holdings).is_failed());

    press(&mut app, KeyCode::Char('R'));

    assert!(!app.boundary(Panel::Overview).is_failed());
    assert!(!app.boundary(Panel::Holdings).is_failed());
    let screen = render(&mut app);
    assert!(screen.contains("Reloaded"));
}

#[test]
fn debug_details_toggle_outside_production() {
    let mut app = demo_app();
    focus(&mut app, Panel::Performers);
    press(&mut app, KeyCode::Char('!'));
    let collapsed = render(&mut app);
    assert!(collapsed.contains("Error Details"));
    assert!(!collapsed.contains(INJECTED_FAULT));

    press(&mut app, KeyCode::Char('d'));
    let expanded = render(&mut app);
    assert!(expanded.contains(INJECTED_FAULT));
}

#[test]
fn production_hides_debug_and_refuses_injection() {
    let mut app = app_with(settings(BuildMode::Production), snapshot_with_unknown_tag());
    let screen = render(&mut app);

    assert!(app.boundary(Panel::TagAnalytics).is_failed());
    assert!(screen.contains("Tag Analytics Error"));
    assert!(!screen.contains("Error Details"));
    assert!(!screen.contains("tag_missing"));
    assert!(
        control_area(
            &app,
            BoundaryTarget::Panel(Panel::TagAnalytics),
            ControlKind::ToggleDebug
        )
        .is_none()
    );

    focus(&mut app, Panel::Holdings);
    press(&mut app, KeyCode::Char('!'));
    render(&mut app);
    assert!(!app.boundary(Panel::Holdings).is_failed());
}

#[test]
fn panic_inside_panel_is_contained() {
    install_panic_hook();
    let mut app = demo_app();

    let mut buf = Buffer::empty(Rect::new(0, 0, 60, 10));
    let child = |_: Rect, _: &mut Buffer| -> Result<(), RenderError> {
        panic!("holdings exploded")
    };
    NamedFaultBoundary::new(child)
        .name(Panel::Holdings.display_name())
        .render(buf.area, &mut buf, app.boundary_mut(Panel::Holdings));

    let failure = app.boundary(Panel::Holdings).failure().unwrap();
    assert_eq!(failure.origin(), FailureOrigin::Panic);
    assert_eq!(failure.message(), "holdings exploded");

    // The rest of the dashboard keeps drawing around the failed panel.
    let screen = render(&mut app);
    assert!(screen.contains("Holdings Error"));
    assert!(screen.contains("Portfolio Overview"));
    assert!(!app.page_boundary().is_failed());
}
