/// An element of a reconciled collection
///
/// Two predicates drive the whole diff:
/// - `same_identity` decides whether two values are the *same logical item*
///   across snapshots, even when their contents differ (usually an id
///   comparison). It must be reflexive, symmetric and stable across clones.
/// - `same_content` decides whether a matched item must be reloaded.
///
/// The engine stores its own copies of everything it is given, so that a
/// caller mutating its values afterwards cannot change the retained snapshot
/// behind the engine's back.
pub trait Item: Clone {
    /// True if `self` and `other` denote the same logical item
    fn same_identity(&self, other: &Self) -> bool;

    /// True if the displayed content of `self` equals that of `other`
    fn same_content(&self, other: &Self) -> bool;

    /// Copy that shares nothing mutable with `self`
    ///
    /// The default is `Clone::clone`, which is already a deep copy for
    /// owned data. Override it for items holding shared handles (`Rc`,
    /// `Arc<Mutex<_>>`, ...) whose contents must be snapshotted.
    fn clone_with_content(&self) -> Self {
        self.clone()
    }
}
