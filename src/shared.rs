//! Interrupt-safe sharing of an engine between a sensor callback and the UI

use core::cell::RefCell;

use critical_section::Mutex;

/// Engine shared between execution contexts
///
/// The sensor callback and the render loop may run in different contexts
/// (threads, interrupt handlers). Each [`lock`](Shared::lock) holds a
/// critical section for the duration of the closure only, so keep it to one
/// state transition and copy the result out.
///
/// # Example
/// ```
/// use ruler_level::{OrientationEngine, OrientationSample, Shared};
///
/// static ENGINE: Shared<Option<OrientationEngine>> = Shared::new(None);
///
/// ENGINE.lock(|engine| *engine = Some(OrientationEngine::new()));
///
/// // sensor callback
/// let sample = OrientationSample::new(0, 0.0, 0.0, 9.81);
/// ENGINE.lock(|engine| engine.as_mut().map(|e| e.update(sample)));
///
/// // render frame
/// let state = ENGINE.lock(|engine| engine.as_ref().map(|e| e.state()));
/// assert_eq!(state.map(|s| s.pitch), Some(0.0));
/// ```
pub struct Shared<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> Shared<T> {
    /// Wrap a value
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` with exclusive access to the value
    ///
    /// # Panics
    /// If called re-entrantly from inside another `lock` on the same value.
    pub fn lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Exclusive access without a critical section
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut().get_mut()
    }

    /// Unwrap the value
    pub fn into_inner(self) -> T {
        self.inner.into_inner().into_inner()
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> core::fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Shared").finish_non_exhaustive()
    }
}
