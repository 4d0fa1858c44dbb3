/// Looks up the process that owns the focused window.
///
/// Implemented by:
/// - `ForegroundProcess` (Windows)
/// - deterministic stubs in tests
pub trait ActiveProcessLookup {
    /// Name of the focused process (executable name without extension), or
    /// `None` when no foreground window or owning process can be resolved.
    ///
    /// Lookup failures are not errors: the tick is simply skipped.
    fn current(&mut self) -> Option<String>;
}
