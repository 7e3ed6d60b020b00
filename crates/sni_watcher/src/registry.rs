/// An item that registered an object path on its own connection instead of a bus name.
///
/// `owner` is the unique name (e.g. `:1.234`) of the connection that registered it; it is the only
/// handle we have on that connection, so all path items of an owner go away together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathItem {
    pub owner: String,
    pub path: String,
}

impl PathItem {
    pub fn new(owner: impl Into<String>, path: impl Into<String>) -> Self {
        PathItem { owner: owner.into(), path: path.into() }
    }
}

impl std::fmt::Display for PathItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.owner, self.path)
    }
}

/// Everything the watcher currently knows about.
///
/// All three collections keep registration order, which is the order properties report. Only the
/// [`Watcher`][crate::Watcher] mutates a registry; everyone else gets read access.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    items: Vec<String>,
    hosts: Vec<String>,
    path_items: Vec<PathItem>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn path_items(&self) -> &[PathItem] {
        &self.path_items
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.items.iter().any(|x| x == name)
    }

    pub fn has_host(&self, name: &str) -> bool {
        self.hosts.iter().any(|x| x == name)
    }

    pub fn has_path_item(&self, item: &PathItem) -> bool {
        self.path_items.contains(item)
    }

    /// Whether at least one host is registered. Individual hosts are never exposed.
    pub fn is_host_registered(&self) -> bool {
        !self.hosts.is_empty()
    }

    /// Returns false if the item was already tracked.
    pub(crate) fn insert_item(&mut self, name: &str) -> bool {
        if self.has_item(name) {
            return false;
        }
        self.items.push(name.to_owned());
        true
    }

    /// Returns false if the host was already tracked.
    pub(crate) fn insert_host(&mut self, name: &str) -> bool {
        if self.has_host(name) {
            return false;
        }
        self.hosts.push(name.to_owned());
        true
    }

    /// Returns false if the path item was already tracked.
    pub(crate) fn insert_path_item(&mut self, item: PathItem) -> bool {
        if self.has_path_item(&item) {
            return false;
        }
        self.path_items.push(item);
        true
    }

    pub(crate) fn remove_item(&mut self, name: &str) -> bool {
        remove_first(&mut self.items, |x| x == name)
    }

    pub(crate) fn remove_host(&mut self, name: &str) -> bool {
        remove_first(&mut self.hosts, |x| x == name)
    }

    /// Remove every path item owned by `owner`, returning how many there were.
    pub(crate) fn remove_path_items_of(&mut self, owner: &str) -> usize {
        let before = self.path_items.len();
        self.path_items.retain(|item| item.owner != owner);
        before - self.path_items.len()
    }
}

fn remove_first<T>(list: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    match list.iter().position(pred) {
        Some(idx) => {
            list.remove(idx);
            true
        }
        None => false,
    }
}
