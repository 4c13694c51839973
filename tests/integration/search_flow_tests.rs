use crate::*;
use catalog_select::{Error, OptionsAction};
use futures::future::{self, FutureExt};
use mockall::predicate::eq;
use std::time::Duration;

const KEYSTROKE: Duration = Duration::from_millis(100);

#[test]
fn given_rapid_keystrokes_when_window_elapses_should_search_only_the_last_text() {
    let mut api = MockApi::new();
    api.expect_search()
        .with(eq("milk".to_string()))
        .times(1)
        .returning(|_| page_of(vec![item(7, "milk", false, &["dairy"])]));
    let widget = given_a_mounted_widget(api);

    for text in ["m", "mi", "mil", "milk"] {
        widget.input.type_text(text).unwrap();
        widget.window.clock().advance(KEYSTROKE);
    }
    widget.window.clock().advance(WINDOW - KEYSTROKE - Duration::from_millis(1));
    assert_eq!(widget.spawner.queued(), 0);

    widget.window.clock().advance(Duration::from_millis(1));
    widget.spawner.run_queued();

    assert_eq!(
        widget.emitted(),
        vec![OptionsAction::Add {
            options: vec![option("7", "milk, dairy", false)],
            input: "milk".to_string(),
        }]
    );
    let view = widget.renderer.last().unwrap();
    assert_eq!(view.input, "milk");
    assert_eq!(view.create.as_deref(), Some("milk"));
}

#[test]
fn given_text_cleared_within_window_should_not_search_and_clear_once() {
    let mut api = MockApi::new();
    api.expect_search().never();
    let widget = given_a_mounted_widget(api);

    widget.input.type_text("a").unwrap();
    widget.window.clock().advance(Duration::from_millis(200));
    widget.input.type_text("").unwrap();
    widget.window.clock().advance(WINDOW * 2);

    assert_eq!(widget.emitted(), vec![OptionsAction::cleared()]);
    assert_eq!(widget.renderer.count(), 1);
    assert!(widget.renderer.last().unwrap().is_hidden());
    assert_eq!(widget.spawner.queued(), 0);
}

#[test]
fn given_results_arriving_after_clear_should_drop_them() {
    let mut api = MockApi::new();
    api.expect_search()
        .with(eq("milk".to_string()))
        .times(1)
        .returning(|_| {
            page_of(vec![
                item(7, "milk", false, &[]),
                item(12, "milk chocolate", true, &["sweets"]),
            ])
        });
    let widget = given_a_mounted_widget(api);

    widget.search_for("milk");
    assert_eq!(widget.spawner.queued(), 1);

    widget.input.type_text("").unwrap();
    widget.spawner.run_queued();

    assert_eq!(widget.emitted(), vec![OptionsAction::cleared()]);
    assert!(widget.autocomplete.dropdown().view().is_hidden());
}

#[test]
fn given_field_cleared_repeatedly_should_clear_dropdown_once() {
    let mut api = MockApi::new();
    api.expect_search().never();
    let widget = given_a_mounted_widget(api);

    widget.input.type_text("x").unwrap();
    widget.input.type_text("").unwrap();
    widget.input.type_text("").unwrap();
    widget.autocomplete.clear().unwrap();
    widget.window.clock().advance(WINDOW);

    assert_eq!(widget.emitted(), vec![OptionsAction::cleared()]);
}

#[test]
fn given_text_typed_again_after_clear_should_resume_showing_results() {
    let mut api = MockApi::new();
    api.expect_search()
        .with(eq("tea".to_string()))
        .times(1)
        .returning(|_| page_of(vec![item(3, "tea", false, &[])]));
    let widget = given_a_mounted_widget(api);

    widget.input.type_text("t").unwrap();
    widget.input.type_text("").unwrap();
    widget.search_for("tea");
    widget.spawner.run_queued();

    assert!(!widget.autocomplete.is_cancelled());
    let view = widget.autocomplete.dropdown().view();
    assert_eq!(view.options, vec![option("3", "tea", false)]);
    // The exact match hides the creation row.
    assert_eq!(view.create, None);
}

#[test]
fn given_search_failure_should_keep_previous_rows() {
    let mut api = MockApi::new();
    api.expect_search()
        .with(eq("rice".to_string()))
        .returning(|_| page_of(vec![item(21, "rice", true, &["grains"])]));
    api.expect_search()
        .with(eq("rice noodles".to_string()))
        .returning(|_| future::err(Error::Request("503 Service Unavailable".to_string())).boxed());
    let widget = given_a_mounted_widget(api);

    widget.search_for("rice");
    widget.spawner.run_queued();
    widget.search_for("rice noodles");
    widget.spawner.run_queued();

    assert_eq!(widget.emitted().len(), 1);
    let view = widget.autocomplete.dropdown().view();
    assert_eq!(view.input, "rice");
    assert_eq!(view.options, vec![option("21", "rice, grains", true)]);
}

#[test]
fn given_debounced_text_should_reach_input_listeners_and_track_last_input() {
    let mut api = MockApi::new();
    api.expect_search().returning(|_| page_of(vec![]));
    let widget = given_a_mounted_widget(api);
    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = seen.clone();
    widget
        .autocomplete
        .input()
        .apply(catalog_select::listen(move |text: &String| {
            sink.lock().unwrap().push(text.clone());
            Ok(())
        }));

    widget.input.type_text("ban").unwrap();
    widget.search_for("bana");

    assert_eq!(*seen.lock().unwrap(), vec!["bana".to_string()]);
    assert_eq!(widget.autocomplete.last_input(), "bana");
    assert!(widget.input.clear_visible());
}

#[test]
fn given_field_cleared_should_not_emit_empty_text_to_input_listeners() {
    let mut api = MockApi::new();
    api.expect_search().never();
    let widget = given_a_mounted_widget(api);
    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::<String>::new()));
    let sink = seen.clone();
    widget
        .autocomplete
        .input()
        .apply(catalog_select::listen(move |text: &String| {
            sink.lock().unwrap().push(text.clone());
            Ok(())
        }));

    widget.input.type_text("a").unwrap();
    widget.search_for("");

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(widget.autocomplete.last_input(), "");
}
