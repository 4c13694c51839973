use crate::*;
use catalog_select::{Autocomplete, Config, Error, TestInput, TestRenderer, TestSpawner, TestWindow};
use std::collections::BTreeMap;
use std::sync::Arc;

fn mount(window: &TestWindow, config: Config) -> catalog_select::Result<Autocomplete> {
    Autocomplete::mount(
        Arc::new(window.clone()),
        Arc::new(MockApi::new()),
        TestSpawner::new(),
        config,
    )
}

#[test]
fn given_no_input_element_should_fail_with_missing_element() {
    let renderer = TestRenderer::new();
    let window = TestWindow::new().with_container(CONTAINER, &renderer);

    let result = mount(&window, Config::default());

    assert!(matches!(result, Err(Error::MissingElement { selector }) if selector == INPUT));
}

#[test]
fn given_no_container_should_fail_with_missing_element() {
    let window = TestWindow::new().with_input(INPUT, &TestInput::new());

    let result = mount(&window, Config::default());

    assert!(matches!(result, Err(Error::MissingElement { selector }) if selector == CONTAINER));
}

#[test]
fn given_input_selector_matching_a_div_should_fail_with_wrong_kind() {
    let renderer = TestRenderer::new();
    let window = TestWindow::new()
        .with_other(INPUT, "div")
        .with_container(CONTAINER, &renderer);

    let result = mount(&window, Config::default());

    assert!(matches!(
        result,
        Err(Error::WrongElementKind { selector, expected: "an input" }) if selector == INPUT
    ));
}

#[test]
fn given_container_selector_matching_an_input_should_fail_with_wrong_kind() {
    let window = TestWindow::new()
        .with_input(INPUT, &TestInput::new())
        .with_input(CONTAINER, &TestInput::new());

    let result = mount(&window, Config::default());

    assert!(matches!(
        result,
        Err(Error::WrongElementKind { selector, expected: "a container" }) if selector == CONTAINER
    ));
}

#[test]
fn given_configured_selectors_should_bind_to_those_elements() {
    let input = TestInput::new();
    let renderer = TestRenderer::new();
    let window = TestWindow::new()
        .with_input("#q", &input)
        .with_container("#results", &renderer);
    let settings: BTreeMap<String, String> = [("input", "#q"), ("container", "#results")]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    let widget = mount(&window, Config::from_map(&settings)).unwrap_or_else(|err| panic!("{err}"));
    input.type_text("x").unwrap();
    input.type_text("").unwrap();

    assert!(widget.is_cancelled());
    assert_eq!(renderer.count(), 1);
    assert!(renderer.last().unwrap().is_hidden());
}
