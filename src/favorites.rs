//! Favorite countries, persisted as a JSON array of names under one storage key.
//!
//! Every view of the app shares the same key. Names are intended to be unique but
//! nothing enforces it: `add` always appends, `remove` drops every exact match.

use crate::error::StoreError;
use crate::notify::Notification;
use crate::storage::Storage;

/// Storage key holding the favorites array.
pub const FAVORITES_KEY: &str = "favorites";

/// What a `toggle` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

impl Toggle {
    /// Toast shown to the user after toggling `name`.
    pub fn notification(self, name: &str) -> Notification {
        match self {
            Toggle::Added => Notification::new(
                "Added to favorites",
                format!("{name} has been added to your favorites"),
            ),
            Toggle::Removed => Notification::new(
                "Removed from favorites",
                format!("{name} has been removed from your favorites"),
            ),
        }
    }
}

/// Repository over an injected `Storage`.
#[derive(Debug)]
pub struct Favorites<S> {
    storage: S,
}

impl<S: Storage> Favorites<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current list in stored order.
    ///
    /// A missing key is an empty list. A value that is not a JSON array of strings
    /// is logged and read as an empty list; the next write replaces it.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let raw = self.storage.get_item(FAVORITES_KEY)?;
        Ok(raw.map(|s| decode(&s)).unwrap_or_default())
    }

    pub fn contains(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.list()?.iter().any(|f| f == name))
    }

    /// Append `name`, even if it is already present.
    pub fn add(&self, name: &str) -> Result<(), StoreError> {
        let mut list = self.list()?;
        list.push(name.to_string());
        self.write(&list)
    }

    /// Remove every entry equal to `name`. Returns how many were removed.
    pub fn remove(&self, name: &str) -> Result<usize, StoreError> {
        let mut list = self.list()?;
        let before = list.len();
        list.retain(|f| f != name);
        let removed = before - list.len();
        self.write(&list)?;
        Ok(removed)
    }

    /// Remove `name` if present, append it otherwise.
    pub fn toggle(&self, name: &str) -> Result<Toggle, StoreError> {
        let mut list = self.list()?;
        let outcome = if list.iter().any(|f| f == name) {
            list.retain(|f| f != name);
            Toggle::Removed
        } else {
            list.push(name.to_string());
            Toggle::Added
        };
        self.write(&list)?;
        log::info!("favorite {name:?}: {outcome:?} ({} stored)", list.len());
        Ok(outcome)
    }

    fn write(&self, list: &[String]) -> Result<(), StoreError> {
        let s = serde_json::to_string(list)?;
        self.storage.set_item(FAVORITES_KEY, &s)
    }
}

/// `contains` for the name on screen, remembered between frames.
///
/// Storage is read only when the name changes; `set` records the result of a
/// toggle and `invalidate` forces the next `get` to read again.
#[derive(Debug, Default)]
pub struct FavoriteFlag {
    cached: Option<(String, bool)>,
}

impl FavoriteFlag {
    /// Whether `name` is a favorite. A storage error reads as `false` and is not cached.
    pub fn get<S: Storage>(&mut self, favorites: &Favorites<S>, name: &str) -> bool {
        if let Some((cached, value)) = &self.cached {
            if cached == name {
                return *value;
            }
        }
        match favorites.contains(name) {
            Ok(value) => {
                self.set(name, value);
                value
            }
            Err(err) => {
                log::warn!("read favorites: {err}");
                self.cached = None;
                false
            }
        }
    }

    pub fn set(&mut self, name: &str, value: bool) {
        self.cached = Some((name.to_string(), value));
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

/// Decode a stored value; anything but an array of strings becomes `[]`.
fn decode(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(list) => list,
        Err(e) => {
            log::warn!("ignoring malformed {FAVORITES_KEY:?} value ({e}): {raw:?}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts reads so tests can see when storage is touched.
    #[derive(Default)]
    struct Counting {
        inner: MemoryStorage,
        reads: AtomicUsize,
    }

    impl Storage for Counting {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.get_item(key)
        }
        fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.inner.set_item(key, value)
        }
        fn remove_item(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove_item(key)
        }
    }

    fn favs(initial: &str) -> Favorites<MemoryStorage> {
        Favorites::new(MemoryStorage::with_item(FAVORITES_KEY, initial))
    }

    fn stored(f: &Favorites<MemoryStorage>) -> String {
        f.storage().get_item(FAVORITES_KEY).unwrap().unwrap()
    }

    #[test]
    fn missing_key_is_empty() {
        let f = Favorites::new(MemoryStorage::default());
        assert!(f.list().unwrap().is_empty());
        assert!(!f.contains("France").unwrap());
    }

    #[test]
    fn malformed_value_fails_closed() {
        for bad in ["not json", "{\"a\":1}", "[1,2]", "\"France\""] {
            let f = favs(bad);
            assert!(f.list().unwrap().is_empty(), "{bad}");
        }
    }

    #[test]
    fn toggle_on_malformed_value_overwrites_it() {
        let f = favs("{oops");
        assert_eq!(f.toggle("Peru").unwrap(), Toggle::Added);
        assert_eq!(stored(&f), r#"["Peru"]"#);
    }

    #[test]
    fn toggle_is_an_involution_and_keeps_order() {
        let f = favs(r#"["Chile","Japan","Kenya"]"#);
        assert_eq!(f.toggle("France").unwrap(), Toggle::Added);
        assert_eq!(f.list().unwrap(), vec!["Chile", "Japan", "Kenya", "France"]);
        assert_eq!(f.toggle("France").unwrap(), Toggle::Removed);
        assert_eq!(f.list().unwrap(), vec!["Chile", "Japan", "Kenya"]);
    }

    #[test]
    fn toggle_existing_removes_all_occurrences() {
        let f = favs(r#"["France","Chile","France","Japan","France"]"#);
        assert_eq!(f.toggle("France").unwrap(), Toggle::Removed);
        assert_eq!(f.list().unwrap(), vec!["Chile", "Japan"]);
    }

    #[test]
    fn matching_is_exact() {
        let f = favs(r#"["france","France "]"#);
        assert!(!f.contains("France").unwrap());
        assert_eq!(f.toggle("France").unwrap(), Toggle::Added);
        assert_eq!(f.list().unwrap(), vec!["france", "France ", "France"]);
    }

    #[test]
    fn add_does_not_deduplicate() {
        let f = Favorites::new(MemoryStorage::default());
        f.add("Peru").unwrap();
        f.add("Peru").unwrap();
        assert_eq!(f.list().unwrap(), vec!["Peru", "Peru"]);
        assert_eq!(f.remove("Peru").unwrap(), 2);
        assert!(f.list().unwrap().is_empty());
    }

    #[test]
    fn france_scenario_notifications() {
        let f = favs("[]");

        let t = f.toggle("France").unwrap();
        assert_eq!(stored(&f), r#"["France"]"#);
        let n = t.notification("France");
        assert_eq!(n.title, "Added to favorites");
        assert_eq!(n.description, "France has been added to your favorites");

        let t = f.toggle("France").unwrap();
        assert_eq!(stored(&f), "[]");
        let n = t.notification("France");
        assert_eq!(n.title, "Removed from favorites");
        assert_eq!(n.description, "France has been removed from your favorites");
    }

    #[test]
    fn flag_reads_storage_once_per_name() {
        let f = Favorites::new(Counting::default());
        f.add("France").unwrap();
        let reads = || f.storage().reads.load(Ordering::SeqCst);
        let start = reads();

        let mut flag = FavoriteFlag::default();
        for _ in 0..10 {
            assert!(flag.get(&f, "France"));
        }
        assert_eq!(reads() - start, 1);

        assert!(!flag.get(&f, "Peru"));
        assert_eq!(reads() - start, 2);

        let t = f.toggle("Peru").unwrap();
        flag.set("Peru", t == Toggle::Added);
        let after_toggle = reads();
        assert!(flag.get(&f, "Peru"));
        assert_eq!(reads(), after_toggle);

        flag.invalidate();
        assert!(flag.get(&f, "Peru"));
        assert_eq!(reads(), after_toggle + 1);
    }
}
