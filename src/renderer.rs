//! Renderer abstraction for the dropdown container.

#[cfg(any(test, feature = "testing"))]
use portable_atomic_util::Arc;
#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

/// Renderer abstraction for rendering Props.
///
/// Implement this trait to draw the dropdown with your rendering system (DOM
/// bindings, terminal, native toolkit, etc.). The widget calls
/// [`render`](Self::render) with a fresh [`DropdownView`](crate::DropdownView)
/// every time the visible rows change.
///
/// # Example
///
/// ```rust
/// use catalog_select::{DropdownView, Renderer};
///
/// struct ConsoleRenderer;
///
/// impl Renderer<DropdownView> for ConsoleRenderer {
///     fn render(&mut self, view: DropdownView) {
///         for option in &view.options {
///             println!("{}", option.label);
///         }
///     }
/// }
/// ```
pub trait Renderer<Props> {
    /// Render the given props.
    fn render(&mut self, props: Props);
}

#[cfg(any(test, feature = "testing"))]
/// Records every [`DropdownView`](crate::DropdownView) (or other props) drawn,
/// so tests can assert on what the user would have seen.
///
/// Only available with the `testing` feature or during tests.
///
/// # Example
///
/// ```rust
/// use catalog_select::{DropdownView, OptionsDropdown, OptionsAction, TestRenderer};
/// use catalog_select::emit;
///
/// let renderer = TestRenderer::<DropdownView>::new();
/// let dropdown = OptionsDropdown::new(renderer.boxed());
///
/// dropdown.options().apply(emit(OptionsAction::Add {
///     options: vec![],
///     input: "tea".to_string(),
/// })).unwrap();
///
/// renderer.with_renders(|renders| {
///     assert_eq!(renders[0].create.as_deref(), Some("tea"));
/// });
/// ```
pub struct TestRenderer<Props> {
    log: Arc<Mutex<Vec<Props>>>,
}

/// The half handed to the widget; appends to the owning [`TestRenderer`]'s log.
#[cfg(any(test, feature = "testing"))]
struct RenderSink<Props>(Arc<Mutex<Vec<Props>>>);

#[cfg(any(test, feature = "testing"))]
impl<Props> Renderer<Props> for RenderSink<Props> {
    fn render(&mut self, props: Props) {
        self.0.lock().push(props);
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Clone for TestRenderer<Props> {
    fn clone(&self) -> Self {
        Self {
            log: self.log.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props: Send + 'static> Default for TestRenderer<Props> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props: Send + 'static> TestRenderer<Props> {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A renderer writing into this log. Every sink from the same log (or a
    /// clone of it) appends to the same list.
    pub fn boxed(&self) -> Box<dyn Renderer<Props> + Send> {
        Box::new(RenderSink(self.log.clone()))
    }

    pub fn count(&self) -> usize {
        self.log.lock().len()
    }

    /// Inspect every captured render, oldest first.
    pub fn with_renders<R>(&self, inspect: impl FnOnce(&[Props]) -> R) -> R {
        inspect(&self.log.lock())
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props: Clone> TestRenderer<Props> {
    /// The most recent render, if any.
    pub fn last(&self) -> Option<Props> {
        self.log.lock().last().cloned()
    }
}
