//! The host page: a window-like context and the elements the widget binds to.

use std::sync::Arc;

use crate::dropdown::DropdownView;
use crate::signal::Listener;
use crate::timer::Scheduler;
use crate::Renderer;

/// Text input the widget reads keystrokes from.
pub trait InputElement: Send + Sync {
    /// Call `listener` with the full field value after every edit.
    fn on_input(&self, listener: Listener<String>);

    /// Overwrite the field value. Does not trigger input listeners.
    fn set_value(&self, value: &str);

    /// Show or hide the clear button next to the field.
    fn set_clear_visible(&self, visible: bool);
}

/// Result of an element lookup.
pub enum Element {
    Input(Arc<dyn InputElement>),
    /// Container the dropdown is drawn into.
    Container(Box<dyn Renderer<DropdownView> + Send>),
    /// Any element the widget cannot bind to.
    Other { tag: String },
}

impl Element {
    pub fn kind(&self) -> &str {
        match self {
            Self::Input(_) => "input",
            Self::Container(_) => "container",
            Self::Other { tag } => tag,
        }
    }
}

/// Window-like context threaded through the widget.
pub trait Window: Send + Sync {
    /// Find the first element matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<Element>;

    /// Timer facility (`setTimeout`/`clearTimeout`).
    fn timers(&self) -> Arc<dyn Scheduler>;

    /// Navigate the page to `url`.
    fn set_location(&self, url: &str);
}

#[cfg(any(test, feature = "testing"))]
pub use testing::{TestInput, TestWindow};

#[cfg(any(test, feature = "testing"))]
mod testing {
    use std::collections::HashMap;
    use std::sync::Arc;

    use spin::Mutex;

    use super::{Element, InputElement, Window};
    use crate::dropdown::DropdownView;
    use crate::signal::{emit, Listener, Signal};
    use crate::timer::{ManualScheduler, Scheduler};
    use crate::{Result, TestRenderer};

    /// Scripted text field.
    ///
    /// Only available with the `testing` feature or during tests.
    #[derive(Clone)]
    pub struct TestInput {
        edits: Signal<String>,
        value: Arc<Mutex<String>>,
        clear_visible: Arc<Mutex<bool>>,
    }

    impl Default for TestInput {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TestInput {
        pub fn new() -> Self {
            Self {
                edits: Signal::new(),
                value: Arc::new(Mutex::new(String::new())),
                clear_visible: Arc::new(Mutex::new(false)),
            }
        }

        /// Replace the field value as a user edit would, notifying listeners.
        pub fn type_text(&self, text: &str) -> Result<()> {
            *self.value.lock() = text.to_string();
            self.edits.apply(emit(text.to_string()))
        }

        pub fn value(&self) -> String {
            self.value.lock().clone()
        }

        pub fn clear_visible(&self) -> bool {
            *self.clear_visible.lock()
        }
    }

    impl InputElement for TestInput {
        fn on_input(&self, listener: Listener<String>) {
            self.edits.apply(|listeners| listeners.push(listener));
        }

        fn set_value(&self, value: &str) {
            *self.value.lock() = value.to_string();
        }

        fn set_clear_visible(&self, visible: bool) {
            *self.clear_visible.lock() = visible;
        }
    }

    enum Registered {
        Input(TestInput),
        Container(TestRenderer<DropdownView>),
        Other(String),
    }

    /// Window with a manual clock, registered elements and recorded navigation.
    ///
    /// Only available with the `testing` feature or during tests.
    #[derive(Clone)]
    pub struct TestWindow {
        timers: ManualScheduler,
        elements: Arc<Mutex<HashMap<String, Registered>>>,
        locations: Arc<Mutex<Vec<String>>>,
    }

    impl Default for TestWindow {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TestWindow {
        pub fn new() -> Self {
            Self {
                timers: ManualScheduler::new(),
                elements: Arc::new(Mutex::new(HashMap::new())),
                locations: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn with_input(self, selector: &str, input: &TestInput) -> Self {
            self.register(selector, Registered::Input(input.clone()))
        }

        pub fn with_container(self, selector: &str, renderer: &TestRenderer<DropdownView>) -> Self {
            self.register(selector, Registered::Container(renderer.clone()))
        }

        pub fn with_other(self, selector: &str, tag: &str) -> Self {
            self.register(selector, Registered::Other(tag.to_string()))
        }

        fn register(self, selector: &str, element: Registered) -> Self {
            self.elements.lock().insert(selector.to_string(), element);
            self
        }

        /// The manual clock behind [`Window::timers`].
        pub fn clock(&self) -> &ManualScheduler {
            &self.timers
        }

        /// Every URL navigated to, oldest first.
        pub fn locations(&self) -> Vec<String> {
            self.locations.lock().clone()
        }
    }

    impl Window for TestWindow {
        fn query_selector(&self, selector: &str) -> Option<Element> {
            let elements = self.elements.lock();
            elements.get(selector).map(|element| match element {
                Registered::Input(input) => Element::Input(Arc::new(input.clone())),
                Registered::Container(renderer) => Element::Container(renderer.boxed()),
                Registered::Other(tag) => Element::Other { tag: tag.clone() },
            })
        }

        fn timers(&self) -> Arc<dyn Scheduler> {
            self.timers.shared()
        }

        fn set_location(&self, url: &str) {
            self.locations.lock().push(url.to_string());
        }
    }
}
