//! The autocomplete controller.
//!
//! Wires the input field, the cancellation gate, the debounced search and the
//! dropdown together:
//!
//! ```text
//! keystroke ──► gate (empty?) ──► cancelled flag ──► Add([]) on clear
//!     │
//!     └──► raw input ──► debounce ──► search ──► Add(options) unless cancelled
//!
//! click ──► ItemAction ──► set_to_buy ──► Update([option])
//!                     └──► navigate to the creation page
//! ```
//!
//! The gate does not abort requests in flight; it only stops their results from
//! reaching the dropdown once the field has been cleared.

use std::sync::{Arc, Weak};

use spin::Mutex;

use crate::dropdown::{DropdownView, OptionsDropdown};
use crate::model::{parse_identifier, ItemAction, OptionsAction, SearchPage, SelectOption};
use crate::operators::{debounce, distinct, Push};
use crate::signal::{emit, listen, Signal};
use crate::window::{Element, InputElement, Window};
use crate::{CatalogApi, Config, Error, Renderer, Result, Spawner};

struct Inner {
    window: Arc<dyn Window>,
    element: Arc<dyn InputElement>,
    api: Arc<dyn CatalogApi>,
    spawner: Arc<dyn Spawner + Send + Sync>,
    config: Config,
    raw: Signal<String>,
    gate: Push<bool>,
    /// Held across the flag check and the emit that depends on it.
    cancelled: Mutex<bool>,
    last_input: Mutex<String>,
    data: Signal<OptionsAction>,
}

/// Autocomplete widget bound to one input field and one dropdown container.
///
/// Exposes three signals: [`input`](Self::input) (post-debounce text),
/// [`data`](Self::data) (accepts [`OptionsAction`]s) and
/// [`actions`](Self::actions) (emits [`ItemAction`]s).
pub struct Autocomplete {
    inner: Arc<Inner>,
    input: Signal<String>,
    dropdown: OptionsDropdown,
}

impl Autocomplete {
    /// Bind the widget to elements already resolved by the host.
    pub fn new(
        window: Arc<dyn Window>,
        element: Arc<dyn InputElement>,
        container: Box<dyn Renderer<DropdownView> + Send>,
        api: Arc<dyn CatalogApi>,
        spawner: impl Spawner + Send + Sync + 'static,
        config: Config,
    ) -> Self {
        let dropdown = OptionsDropdown::new(container);
        let raw = Signal::new();
        let (gate, gate_changes) = distinct::<bool>(None);
        let timers = window.timers();
        let debounced = raw.apply(|listeners| debounce(config.debounce, &timers, listeners));

        // Clearing still feeds `raw` to supersede a pending timer; hosts only see text.
        let input = Signal::new();
        let forward = input.clone();
        debounced.apply(listen(move |text: &String| {
            if text.is_empty() {
                Ok(())
            } else {
                forward.apply(emit(text.clone()))
            }
        }));

        let inner = Arc::new(Inner {
            window,
            element,
            api,
            spawner: Arc::new(spawner),
            config,
            raw,
            gate,
            cancelled: Mutex::new(true),
            last_input: Mutex::new(String::new()),
            data: dropdown.options().clone(),
        });

        let weak = Arc::downgrade(&inner);
        gate_changes.on_change(move |cancelled: &bool| {
            with_inner(&weak, |inner| inner.cancellation_changed(*cancelled))
        });

        let weak = Arc::downgrade(&inner);
        input.apply(listen(move |text: &String| {
            with_inner(&weak, |inner| inner.search(text))
        }));

        let weak = Arc::downgrade(&inner);
        dropdown.actions().apply(listen(move |action: &ItemAction| {
            with_inner(&weak, |inner| inner.dispatch(action))
        }));

        let weak = Arc::downgrade(&inner);
        inner.element.on_input(Arc::new(move |text: &String| {
            with_inner(&weak, |inner| inner.input_changed(text))
        }));

        tracing::debug!(debounce_ms = inner.config.debounce.as_millis() as u64, "autocomplete bound");

        Self {
            inner,
            input,
            dropdown,
        }
    }

    /// Resolve the configured elements through `window` and bind to them.
    ///
    /// Fails with [`Error::MissingElement`] when a selector matches nothing and
    /// with [`Error::WrongElementKind`] when it matches the wrong kind of element.
    pub fn mount(
        window: Arc<dyn Window>,
        api: Arc<dyn CatalogApi>,
        spawner: impl Spawner + Send + Sync + 'static,
        config: Config,
    ) -> Result<Self> {
        let element = match window.query_selector(&config.input_selector) {
            Some(Element::Input(element)) => element,
            Some(other) => {
                return Err(wrong_kind(&config.input_selector, &other, "an input"));
            }
            None => return Err(missing(&config.input_selector)),
        };
        let container = match window.query_selector(&config.container_selector) {
            Some(Element::Container(container)) => container,
            Some(other) => {
                return Err(wrong_kind(&config.container_selector, &other, "a container"));
            }
            None => return Err(missing(&config.container_selector)),
        };

        Ok(Self::new(window, element, container, api, spawner, config))
    }

    /// Debounced input text. Never carries the empty string.
    pub fn input(&self) -> &Signal<String> {
        &self.input
    }

    /// Signal feeding the dropdown.
    pub fn data(&self) -> &Signal<OptionsAction> {
        &self.inner.data
    }

    /// Signal of user actions coming from the dropdown.
    pub fn actions(&self) -> &Signal<ItemAction> {
        self.dropdown.actions()
    }

    /// The dropdown the results are rendered into.
    pub fn dropdown(&self) -> &OptionsDropdown {
        &self.dropdown
    }

    /// Clear button: empty the field and hide the dropdown.
    pub fn clear(&self) -> Result<()> {
        self.inner.element.set_value("");
        self.inner.input_changed("")
    }

    /// Text of the most recent edit.
    pub fn last_input(&self) -> String {
        self.inner.last_input.lock().clone()
    }

    /// Whether search results are currently being suppressed.
    ///
    /// Must not be called from a [`data`](Self::data) listener, which runs with
    /// the flag locked.
    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }
}

fn with_inner(weak: &Weak<Inner>, f: impl FnOnce(&Arc<Inner>) -> Result<()>) -> Result<()> {
    match weak.upgrade() {
        Some(inner) => f(&inner),
        None => Ok(()),
    }
}

fn missing(selector: &str) -> Error {
    Error::MissingElement {
        selector: selector.to_string(),
    }
}

fn wrong_kind(selector: &str, found: &Element, expected: &'static str) -> Error {
    tracing::debug!(selector, found = found.kind(), expected, "unexpected element kind");
    Error::WrongElementKind {
        selector: selector.to_string(),
        expected,
    }
}

impl Inner {
    fn is_cancelled(&self) -> bool {
        *self.cancelled.lock()
    }

    fn input_changed(&self, text: &str) -> Result<()> {
        *self.last_input.lock() = text.to_string();
        self.element.set_clear_visible(!text.is_empty());
        self.gate.push(text.is_empty())?;
        // Empty text still goes through so it supersedes a pending search.
        self.raw.apply(emit(text.to_string()))
    }

    fn cancellation_changed(&self, cancelled: bool) -> Result<()> {
        let mut flag = self.cancelled.lock();
        *flag = cancelled;
        tracing::debug!(cancelled, "search cancellation changed");
        if cancelled {
            self.data.apply(emit(OptionsAction::cleared()))
        } else {
            Ok(())
        }
    }

    fn search(self: &Arc<Self>, query: &str) -> Result<()> {
        if query.is_empty() || self.is_cancelled() {
            return Ok(());
        }

        tracing::debug!(query, "searching catalog");
        let request = self.api.search(query.to_string());
        let inner = self.clone();
        let query = query.to_string();
        self.spawner.spawn(Box::pin(async move {
            match request.await {
                Ok(page) => inner.show_results(query, page),
                Err(err) => tracing::error!(query = %query, error = %err, "catalog search failed"),
            }
        }));
        Ok(())
    }

    fn show_results(&self, query: String, page: SearchPage) {
        let cancelled = self.cancelled.lock();
        if *cancelled {
            tracing::debug!(
                query = %query,
                results = page.results.len(),
                "input cleared, dropping stale results"
            );
            return;
        }

        let options = page.results.iter().map(SelectOption::from).collect();
        let action = OptionsAction::Add {
            options,
            input: query,
        };
        if let Err(err) = self.data.apply(emit(action)) {
            tracing::error!(error = %err, "applying search results failed");
        }
    }

    fn dispatch(self: &Arc<Self>, action: &ItemAction) -> Result<()> {
        let _span = tracing::debug_span!("dispatch", action = ?action).entered();
        match action {
            ItemAction::MarkToBuy(value) => self.set_to_buy(value, true),
            ItemAction::MarkNotToBuy(value) => self.set_to_buy(value, false),
            ItemAction::CreateItem(text) => {
                let url = self.config.create_item_location(text);
                tracing::debug!(url = %url, "navigating to item creation");
                self.window.set_location(&url);
                Ok(())
            }
        }
    }

    fn set_to_buy(&self, value: &str, to_buy: bool) -> Result<()> {
        let id = parse_identifier(value)?;
        let request = self.api.set_to_buy(id, to_buy);
        let data = self.data.clone();
        self.spawner.spawn(Box::pin(async move {
            match request.await {
                Ok(item) => {
                    let action = OptionsAction::Update {
                        options: vec![SelectOption::from(item)],
                    };
                    if let Err(err) = data.apply(emit(action)) {
                        tracing::error!(id, error = %err, "applying item update failed");
                    }
                }
                Err(err) => tracing::error!(id, to_buy, error = %err, "updating item failed"),
            }
        }));
        Ok(())
    }
}
