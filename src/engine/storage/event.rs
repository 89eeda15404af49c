/// A change to one key of local storage, published after the write committed.
///
/// Mirrors the browser `storage` event: `old_value` is `None` when the key
/// did not exist before.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: String,
}

impl StorageEvent {
    /// True when the write did not change the stored value.
    pub fn is_noop(&self) -> bool {
        self.old_value.as_deref() == Some(self.new_value.as_str())
    }
}
