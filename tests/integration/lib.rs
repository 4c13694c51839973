mod support;

use catalog_select::{
    Autocomplete, Config, DropdownView, OptionsAction, TestInput, TestRenderer, TestSpawner,
    TestWindow,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
pub(crate) use support::*;

mod mount_tests;
mod search_flow_tests;

pub(crate) const INPUT: &str = ".search-select";
pub(crate) const CONTAINER: &str = ".search-options";
pub(crate) const WINDOW: Duration = Duration::from_millis(500);

pub(crate) struct TestWidget {
    pub(crate) autocomplete: Autocomplete,
    pub(crate) window: TestWindow,
    pub(crate) input: TestInput,
    pub(crate) renderer: TestRenderer<DropdownView>,
    pub(crate) spawner: TestSpawner,
    pub(crate) data: Arc<Mutex<Vec<OptionsAction>>>,
}

impl TestWidget {
    pub(crate) fn emitted(&self) -> Vec<OptionsAction> {
        self.data.lock().unwrap().clone()
    }

    /// Type `text` and let the debounce window elapse.
    pub(crate) fn search_for(&self, text: &str) {
        self.input.type_text(text).unwrap();
        self.window.clock().advance(WINDOW);
    }
}

pub(crate) fn given_a_mounted_widget(api: MockApi) -> TestWidget {
    let input = TestInput::new();
    let renderer = TestRenderer::new();
    let window = TestWindow::new()
        .with_input(INPUT, &input)
        .with_container(CONTAINER, &renderer);
    let spawner = TestSpawner::new();

    let autocomplete = Autocomplete::mount(
        Arc::new(window.clone()),
        Arc::new(api),
        spawner.clone(),
        Config::default(),
    )
    .unwrap_or_else(|err| panic!("mount failed: {err}"));
    let data = record_data(autocomplete.data());

    TestWidget {
        autocomplete,
        window,
        input,
        renderer,
        spawner,
        data,
    }
}
