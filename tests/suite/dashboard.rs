//! Healthy dashboard rendering and the surfaces around it.

use crossterm::event::KeyCode;
use folio_engine::{App, BuildMode, FileSource, Panel, PortfolioSnapshot, Settings, demo_snapshot};
use folio_types::{FeatureFlags, Tag, TagCatalog, TagCategory, TagSort, UiOptions};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::Color;

use crate::common::{HEIGHT, WIDTH, app_with, demo_app, focus, press, render, settings};

#[test]
fn demo_dashboard_shows_every_section() {
    let mut app = demo_app();
    let screen = render(&mut app);

    for panel in Panel::ALL {
        assert!(screen.contains(panel.display_name()), "missing {panel:?}");
    }
    assert!(screen.contains("Total Value"));
    assert!(screen.contains("Family Investments"));
    assert!(screen.contains("fixture"));
    assert!(screen.contains("DEVELOPMENT"));
    assert!(!screen.contains("Error"));
}

#[test]
fn empty_portfolio_renders_empty_states() {
    let mut app = app_with(Settings::default(), PortfolioSnapshot::empty());
    let screen = render(&mut app);

    assert!(screen.contains("No investments to display"));
    assert!(screen.contains("No recent activity"));
    assert!(screen.contains("No tagged assets"));
    for panel in Panel::ALL {
        assert!(!app.boundary(panel).is_failed(), "{panel:?} failed");
    }
}

#[test]
fn unreadable_data_file_reports_in_status_bar() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let mut app = App::new(Settings::default(), Box::new(FileSource::new(missing)));

    let screen = render(&mut app);

    assert!(screen.contains("Error: Not Found"));
    assert!(screen.contains("No investments to display"));
    assert!(!app.page_boundary().is_failed());
}

#[test]
fn disabled_features_hide_their_panels() {
    let settings = Settings {
        features: FeatureFlags {
            analytics: false,
            benchmarking: false,
            export: false,
        },
        ..Settings::default()
    };
    let mut app = app_with(settings, demo_snapshot());
    let screen = render(&mut app);

    assert!(!screen.contains("Tag Analytics"));
    assert!(!screen.contains("Top Performers"));
    assert!(screen.contains("Holdings"));
    assert!(!screen.contains("sort tags"));
    assert!(!screen.contains("export"));
}

#[test]
fn ascii_mode_avoids_unicode_markers() {
    let settings = Settings {
        ui: UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        },
        ..Settings::default()
    };
    let mut app = app_with(settings, demo_snapshot());
    let screen = render(&mut app);

    assert!(screen.contains("> Portfolio Overview"));
    for glyph in ['▸', '▲', '▼', '█', '•'] {
        assert!(!screen.contains(glyph), "found {glyph}");
    }
}

#[test]
fn tag_sort_shows_in_panel_title() {
    let mut app = demo_app();
    assert!(render(&mut app).contains("Tag Analytics (by value)"));

    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.tag_sort(), TagSort::Return);
    let screen = render(&mut app);
    assert!(screen.contains("Tag Analytics (by return)"));
    assert!(screen.contains("Sorting tags by return"));
}

#[test]
fn focus_marker_follows_tab() {
    let mut app = app_with(settings(BuildMode::Test), demo_snapshot());
    focus(&mut app, Panel::Holdings);
    let screen = render(&mut app);

    assert!(screen.contains("▸ Holdings"));
    assert!(!screen.contains("▸ Portfolio Overview"));
    assert!(screen.contains("TEST"));
}

#[test]
fn holdings_table_shows_yearly_figures() {
    let mut app = demo_app();
    let screen = render(&mut app);

    assert!(screen.contains("Yearly"));
    assert!(screen.contains("% net"));
    assert!(screen.contains(" fees"));
}

#[test]
fn text_filter_narrows_holdings() {
    let mut app = demo_app();
    press(&mut app, KeyCode::Char('/'));
    for c in "zzz".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    let editing = render(&mut app);
    assert!(editing.contains("Holdings /zzz_"));
    assert!(editing.contains("No holdings match the filter"));

    press(&mut app, KeyCode::Enter);
    for _ in 0..3 {
        press(&mut app, KeyCode::Backspace);
    }
    let kept = render(&mut app);
    assert!(kept.contains("Holdings /zzz"));
    assert!(kept.contains("Showing 0 of 7 holdings"));

    press(&mut app, KeyCode::Esc);
    let cleared = render(&mut app);
    assert!(!cleared.contains("/zzz"));
    assert!(!cleared.contains("No holdings match the filter"));
    assert!(!app.should_quit());
}

#[test]
fn tag_filter_shows_in_holdings_title() {
    let mut app = demo_app();
    press(&mut app, KeyCode::Char('t'));
    let screen = render(&mut app);

    assert!(screen.contains("Holdings #Growth"));
    assert!(screen.contains("Holdings tagged Growth"));
    assert_eq!(app.filtered_holdings().count(), 2);
}

#[test]
fn short_hex_tag_colors_expand() {
    let mut snapshot = demo_snapshot();
    snapshot.tags = TagCatalog::new(vec![Tag {
        id: "tag_w".to_string(),
        name: "Whiteout".to_string(),
        category: TagCategory::Strategy,
        color: "#FFF".to_string(),
    }]);
    let portfolio = &mut snapshot.portfolio;
    for tags in portfolio
        .stocks
        .iter_mut()
        .map(|s| &mut s.tags)
        .chain(portfolio.etfs.iter_mut().map(|e| &mut e.tags))
        .chain(portfolio.properties.iter_mut().map(|p| &mut p.tags))
    {
        *tags = vec!["tag_w".to_string()];
    }
    let mut app = app_with(Settings::default(), snapshot);

    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|frame| folio_tui::draw(frame, &mut app)).unwrap();
    let buffer = terminal.backend().buffer();

    // The swatch sits two cells before the tag name.
    let (x, y) = (0..HEIGHT)
        .find_map(|y| {
            let row: String = (0..WIDTH).map(|x| buffer[(x, y)].symbol()).collect();
            let byte = row.find(" Whiteout")?;
            Some((row[..byte].chars().count() as u16, y))
        })
        .unwrap();
    assert_eq!(buffer[(x - 1, y)].fg, Color::Rgb(255, 255, 255));
}
