//! Explicit paint order for overlapping elements.

/// Ordered list of element keys, painted first to last
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZOrder<K> {
    order: Vec<K>,
}

impl<K: PartialEq + Clone> ZOrder<K> {
    pub fn new(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            order: keys.into_iter().collect(),
        }
    }

    /// Paint `key` last; unknown keys are ignored
    pub fn bring_to_front(&mut self, key: &K) {
        if let Some(idx) = self.order.iter().position(|k| k == key) {
            let k = self.order.remove(idx);
            self.order.push(k);
        }
    }

    /// Paint `key` first; unknown keys are ignored
    pub fn send_to_back(&mut self, key: &K) {
        if let Some(idx) = self.order.iter().position(|k| k == key) {
            let k = self.order.remove(idx);
            self.order.insert(0, k);
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &K> {
        self.order.iter()
    }

    pub fn front(&self) -> Option<&K> {
        self.order.last()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
