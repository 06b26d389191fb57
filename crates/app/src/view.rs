//! The contract every presentation surface satisfies toward the core.

/// A participating presentation surface.
///
/// Views are followers, never sources of truth: they render the latest
/// snapshot handed to them and cache nothing else. Snapshots are **partial**
/// (a view's own display fields, each optional) and applying the same
/// snapshot twice yields the same rendered result.
///
/// Display state lives behind interior mutability so that an update arriving
/// mid-dispatch (a nested emission) never conflicts with the gesture that
/// caused it.
pub trait View {
    /// Partial snapshot of this view's own display fields.
    type Snapshot;

    /// Apply `snapshot` idempotently.
    fn update(&self, snapshot: &Self::Snapshot);
}
