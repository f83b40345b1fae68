use super::rendering::rotate_around;
use super::*;
use crate::auto_scroll::AutoScrollState;
use crate::config::{BoardConfig, RecenterMode};
use crate::profile::{Profile, ProfileEntry, UnavailableFetcher};
use crate::random::ScriptedRandom;
use crate::types::{Offset, Record, ViewportClass};
use eframe::egui;

fn sample_records() -> Vec<Record> {
    vec![
        Record::new("Make it work, make it right, make it fast", "octocat").with_date("2024-03-01"),
        Record::new("Fearless concurrency", "ferris"),
        Record::new("Read the docs", "doctor"),
        Record::new("Ship small, ship often", "hubot"),
        Record::new("Naming things is hard", "mona"),
    ]
}

fn test_app() -> BoardApp {
    let config = BoardConfig {
        recenter: RecenterMode::AllCards,
        ..BoardConfig::default()
    };
    let mut app = BoardApp::from_parts(
        config,
        Box::new(UnavailableFetcher),
        Box::new(ScriptedRandom::new(vec![1])),
    );
    app.load_records(sample_records(), 0.0);
    app
}

/// Input for a single headless frame at `time` seconds.
fn raw_input(size: egui::Vec2, time: f64, events: Vec<egui::Event>) -> egui::RawInput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(egui::Pos2::ZERO, size));
    raw.time = Some(time);
    raw.events = events;
    raw
}

fn run_frame(
    ctx: &egui::Context,
    app: &mut BoardApp,
    time: f64,
    events: Vec<egui::Event>,
) -> egui::FullOutput {
    run_frame_sized(ctx, app, egui::vec2(1200.0, 800.0), time, events)
}

fn run_frame_sized(
    ctx: &egui::Context,
    app: &mut BoardApp,
    size: egui::Vec2,
    time: f64,
    events: Vec<egui::Event>,
) -> egui::FullOutput {
    ctx.run(raw_input(size, time, events), |ctx| {
        app.show(ctx);
    })
}

fn app_focusing(pick: usize) -> BoardApp {
    let mut app = BoardApp::from_parts(
        BoardConfig::default(),
        Box::new(UnavailableFetcher),
        Box::new(ScriptedRandom::new(vec![pick])),
    );
    app.load_records(sample_records(), 0.0);
    app
}

fn touch(id: u64, phase: egui::TouchPhase, pos: egui::Pos2) -> egui::Event {
    egui::Event::Touch {
        device_id: egui::TouchDeviceId(0),
        id: egui::TouchId(id),
        phase,
        pos,
        force: None,
    }
}

fn primary_button(pos: egui::Pos2, pressed: bool) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::NONE,
    }
}

fn opened_urls(output: &egui::FullOutput) -> Vec<String> {
    output
        .platform_output
        .commands
        .iter()
        .filter_map(|command| match command {
            egui::output::OutputCommand::OpenUrl(open) => Some(open.url.clone()),
            _ => None,
        })
        .collect()
}

fn key_event(key: egui::Key) -> egui::Event {
    egui::Event::Key {
        key,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers: egui::Modifiers::NONE,
    }
}

#[test]
fn dragging_the_board_pans_the_view() {
    let mut app = test_app();
    let ctx = egui::Context::default();

    let start = egui::pos2(600.0, 400.0);
    run_frame(&ctx, &mut app, 0.0, vec![egui::Event::PointerMoved(start)]);
    run_frame(
        &ctx,
        &mut app,
        0.1,
        vec![
            egui::Event::PointerMoved(start),
            egui::Event::PointerButton {
                pos: start,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::NONE,
            },
        ],
    );
    assert!(app.view.is_dragging());
    let before = app.view.offset();

    run_frame(&ctx, &mut app, 0.2, vec![egui::Event::PointerMoved(egui::pos2(620.0, 390.0))]);
    run_frame(&ctx, &mut app, 0.3, vec![egui::Event::PointerMoved(egui::pos2(650.0, 370.0))]);
    let moved = app.view.offset() - before;
    assert!((moved.x - 50.0).abs() < 1e-3 && (moved.y + 30.0).abs() < 1e-3, "moved {moved:?}");
    assert_eq!(app.view.auto_scroll_state(), AutoScrollState::Suspended);

    run_frame(
        &ctx,
        &mut app,
        0.4,
        vec![egui::Event::PointerButton {
            pos: egui::pos2(650.0, 370.0),
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: egui::Modifiers::NONE,
        }],
    );
    assert!(!app.view.is_dragging());
}

#[test]
fn arrow_key_moves_view_by_one_step() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, 0.0, vec![]);
    let before = app.view.offset();

    run_frame(&ctx, &mut app, 0.1, vec![key_event(egui::Key::ArrowDown)]);
    assert_eq!(app.view.offset(), before + Offset::new(0.0, -100.0));
}

#[test]
fn slash_moves_focus_into_search_field() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, 0.0, vec![]);

    run_frame(&ctx, &mut app, 0.1, vec![key_event(egui::Key::Slash)]);
    assert!(app.search.focus_requested);

    run_frame(&ctx, &mut app, 0.2, vec![]);
    assert!(!app.search.focus_requested);
    assert!(ctx.memory(|m| m.has_focus(search_field_id())));
}

#[test]
fn escape_clears_the_search() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, 0.0, vec![]);

    app.search.query = "OCT".to_string();
    app.view.set_query("OCT", 100.0);
    assert_eq!(app.view.cards().len(), 2);

    run_frame(&ctx, &mut app, 0.2, vec![key_event(egui::Key::Escape)]);
    assert!(app.search.query.is_empty());
    assert_eq!(app.view.query(), "");
    assert_eq!(app.view.cards().len(), 5);
}

#[test]
fn window_resize_switches_card_sizing() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_frame_sized(&ctx, &mut app, egui::vec2(1400.0, 900.0), 0.0, vec![]);
    assert_eq!(app.view.viewport_class(), ViewportClass::Wide);

    run_frame_sized(&ctx, &mut app, egui::vec2(480.0, 900.0), 0.1, vec![]);
    assert_eq!(app.view.viewport_class(), ViewportClass::Narrow);
    assert_eq!(app.view.cards()[0].width, 280.0);
}

#[test]
fn profiles_are_requested_for_cards_and_fall_back_to_handle() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, 0.0, vec![]);
    run_frame(&ctx, &mut app, 0.1, vec![]);

    let entry = app.profiles.get("ferris");
    assert_eq!(entry, Some(&ProfileEntry::Failed));
    assert_eq!(profile_lines(entry, "ferris"), ("ferris".to_string(), None));
}

#[test]
fn profile_lines_show_loading_and_stats() {
    assert_eq!(profile_lines(None, "mona"), ("Loading...".to_string(), None));
    let ready = ProfileEntry::Ready(Profile {
        display_name: "Mona Lisa".into(),
        total_stars: 7,
        public_repos: 3,
        top_languages: vec!["Rust".into()],
    });
    assert_eq!(
        profile_lines(Some(&ready), "mona"),
        ("Mona Lisa".to_string(), Some("★ 7 · 3 repos · Rust".to_string()))
    );
}

#[test]
fn status_messages_follow_load_state() {
    let mut app = BoardApp::from_parts(
        BoardConfig::default(),
        Box::new(UnavailableFetcher),
        Box::new(ScriptedRandom::new(vec![0])),
    );
    assert_eq!(app.status_message(), Some("Loading quotes..."));

    app.load = LoadState::Failed("missing".into());
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, 0.0, vec![key_event(egui::Key::Space)]);
    assert_eq!(app.status_message(), Some("Error loading quotes"));
    assert!(app.view.cards().is_empty());

    app.load_records(sample_records(), 0.0);
    assert_eq!(app.status_message(), None);
    app.view.set_query("nothing matches this", 10.0);
    assert_eq!(app.status_message(), Some("No quotes match"));
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn failed_quote_load_is_terminal() {
    let mut app = BoardApp::from_parts(
        BoardConfig::default(),
        Box::new(UnavailableFetcher),
        Box::new(ScriptedRandom::new(vec![0])),
    );
    app.start_loading("/no/such/dir/quotes.json", None);
    app.handle_load_results(0.0);
    assert!(matches!(app.load, LoadState::Failed(_)));
    assert!(app.load_receiver.is_none());
}

#[test]
fn theme_toggle_round_trips_through_storage_format() {
    let mut app = test_app();
    assert!(app.preferences.dark_mode);
    app.toggle_theme();
    let json = app.preferences.to_json().unwrap();
    let restored = Preferences::from_json(&json).unwrap();
    assert!(!restored.dark_mode);
    assert_eq!(Preferences::from_json("{}").unwrap(), Preferences::default());
}

#[test]
fn first_frame_centers_focused_card_in_real_viewport() {
    let mut app = app_focusing(1);
    let ctx = egui::Context::default();
    run_frame_sized(&ctx, &mut app, egui::vec2(1920.0, 1080.0), 0.0, vec![]);

    let viewport = app.view.camera().viewport();
    assert!(viewport.width > 1280.0 && viewport.height > 720.0, "viewport {viewport:?}");
    let card = &app.view.cards()[1];
    let (x, y) = app.view.camera().project(card.grid_x, card.grid_y);
    let center = viewport.center();
    assert!((x + card.width / 2.0 - center.x).abs() < 1e-6);
    assert!((y + card.height / 2.0 - center.y).abs() < 1e-6);
}

#[test]
fn second_finger_does_not_take_over_drag() {
    let mut app = test_app();
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, 0.0, vec![]);

    run_frame(&ctx, &mut app, 0.1, vec![touch(1, egui::TouchPhase::Start, egui::pos2(300.0, 300.0))]);
    assert!(app.view.is_dragging());
    let before = app.view.offset();

    run_frame(&ctx, &mut app, 0.2, vec![touch(2, egui::TouchPhase::Start, egui::pos2(900.0, 600.0))]);
    run_frame(&ctx, &mut app, 0.3, vec![touch(2, egui::TouchPhase::Move, egui::pos2(901.0, 600.0))]);
    assert_eq!(app.view.offset(), before);

    run_frame(&ctx, &mut app, 0.4, vec![touch(2, egui::TouchPhase::End, egui::pos2(901.0, 600.0))]);
    assert!(app.view.is_dragging());

    run_frame(&ctx, &mut app, 0.5, vec![touch(1, egui::TouchPhase::Move, egui::pos2(320.0, 290.0))]);
    let moved = app.view.offset() - before;
    assert!((moved.x - 20.0).abs() < 1e-3 && (moved.y + 10.0).abs() < 1e-3, "moved {moved:?}");

    run_frame(&ctx, &mut app, 0.6, vec![touch(1, egui::TouchPhase::End, egui::pos2(320.0, 290.0))]);
    assert!(!app.view.is_dragging());
    assert!(app.active_touches.is_empty());
}

#[test]
fn profile_link_follows_card_tilt() {
    let mut app = app_focusing(1);
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, 0.0, vec![]);

    let frame = app.card_frame(&app.view.cards()[1]);
    assert!(frame.angle.abs() > 0.04);
    let on_link = rotate_around(frame.profile_link_area().center(), frame.body.center(), frame.angle);
    assert_eq!(app.profile_link_at(on_link), Some("https://github.com/ferris".to_string()));
    assert_eq!(app.profile_link_at(frame.body.center()), None);
}

#[test]
fn clicking_avatar_or_name_opens_profile() {
    let mut app = app_focusing(0);
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, 0.0, vec![]);

    let frame = app.card_frame(&app.view.cards()[0]);
    let pos = rotate_around(frame.profile_link_area().center(), frame.body.center(), frame.angle);
    run_frame(&ctx, &mut app, 0.1, vec![egui::Event::PointerMoved(pos)]);
    let pressed = run_frame(&ctx, &mut app, 0.2, vec![primary_button(pos, true)]);
    assert!(opened_urls(&pressed).is_empty());
    let released = run_frame(&ctx, &mut app, 0.3, vec![primary_button(pos, false)]);
    assert_eq!(opened_urls(&released), ["https://github.com/octocat"]);
    assert_eq!(profile_url("octocat"), "https://github.com/octocat");
}
