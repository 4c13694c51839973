//! The options dropdown view-model.
//!
//! Applies [`OptionsAction`]s to the visible rows, hands the result to a
//! [`Renderer`], and turns clicks on rows into [`ItemAction`]s.

use std::sync::Arc;

use spin::Mutex;

use crate::model::{ItemAction, OptionsAction, SelectOption};
use crate::signal::{emit, listen, Signal};
use crate::{Renderer, Result};

/// Props delivered to the dropdown renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropdownView {
    /// Text the rows were searched for. Empty means the dropdown is hidden.
    pub input: String,
    /// Label of the "create new item" row. Hidden only when every option's
    /// label equals `input`.
    pub create: Option<String>,
    pub options: Vec<SelectOption>,
}

impl DropdownView {
    pub fn is_hidden(&self) -> bool {
        self.input.is_empty()
    }

    fn apply(&mut self, action: &OptionsAction) {
        match action {
            OptionsAction::Add { options, input } => {
                if input.is_empty() {
                    *self = Self::default();
                    return;
                }
                let all_exact =
                    !options.is_empty() && options.iter().all(|option| option.label == *input);
                *self = Self {
                    input: input.clone(),
                    create: (!all_exact).then(|| input.clone()),
                    options: options.clone(),
                };
            }
            OptionsAction::Update { options } => {
                for patch in options {
                    if let Some(row) = self.options.iter_mut().find(|row| row.value == patch.value) {
                        *row = patch.clone();
                    }
                }
            }
        }
    }
}

/// Dropdown bound to a container renderer.
///
/// Owns the data signal the controller emits [`OptionsAction`]s on and the action
/// signal it emits [`ItemAction`]s on.
pub struct OptionsDropdown {
    options: Signal<OptionsAction>,
    actions: Signal<ItemAction>,
    view: Arc<Mutex<DropdownView>>,
}

impl OptionsDropdown {
    pub fn new(renderer: Box<dyn Renderer<DropdownView> + Send>) -> Self {
        let options = Signal::new();
        let actions = Signal::new();
        let view = Arc::new(Mutex::new(DropdownView::default()));

        let renderer = Mutex::new(renderer);
        let state = view.clone();
        options.apply(listen(move |action: &OptionsAction| {
            // Held through render so concurrent actions render in the order applied.
            let mut view = state.lock();
            view.apply(action);
            tracing::trace!(rows = view.options.len(), hidden = view.is_hidden(), "rendering dropdown");
            renderer.lock().render(view.clone());
            Ok(())
        }));

        Self {
            options,
            actions,
            view,
        }
    }

    /// Signal accepting [`OptionsAction`]s.
    pub fn options(&self) -> &Signal<OptionsAction> {
        &self.options
    }

    /// Signal emitting the user's [`ItemAction`]s.
    pub fn actions(&self) -> &Signal<ItemAction> {
        &self.actions
    }

    /// Current rows.
    pub fn view(&self) -> DropdownView {
        self.view.lock().clone()
    }

    /// Click on the buy toggle of the option with `value`.
    ///
    /// Does nothing when no such row is shown.
    pub fn click_option(&self, value: &str) -> Result<()> {
        let action = self
            .view
            .lock()
            .options
            .iter()
            .find(|option| option.value == value)
            .map(SelectOption::toggle_action);
        match action {
            Some(action) => self.actions.apply(emit(action)),
            None => Ok(()),
        }
    }

    /// Click on the "create new item" row, if shown.
    pub fn click_create(&self) -> Result<()> {
        let create = self.view.lock().create.clone();
        match create {
            Some(text) => self.actions.apply(emit(ItemAction::CreateItem(text))),
            None => Ok(()),
        }
    }
}
