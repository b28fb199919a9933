//! Entity storage.
//!
//! Each entity kind lives in its own [`Pool`]. A pool can be scanned by index
//! while removals and insertions are queued against it; nothing moves until
//! [`Pool::commit`] runs, so indices stay valid for the whole scan and an
//! entity queued for insertion is never visited by the scan that queued it.

use crate::entities::{Boss, Bullet, Enemy, Player, PowerUp};

#[derive(Clone, Debug)]
pub struct Pool<T> {
    items: Vec<T>,
    removed: Vec<bool>,
    pending: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            removed: Vec::new(),
            pending: Vec::new(),
        }
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Insert immediately. Only for use outside a scan (setup, reset).
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove immediately every item for which `keep` returns false.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        debug_assert!(!self.has_pending(), "retain during an uncommitted scan");
        self.items.retain(keep);
    }

    /// Queue an insertion; it becomes visible at the next commit.
    pub fn queue_insert(&mut self, item: T) {
        self.pending.push(item);
    }

    /// Queue removal of the item at `index`. Returns false when it was
    /// already queued, so a consumed entity is never consumed twice.
    pub fn mark_removed(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        if self.removed.len() < self.items.len() {
            self.removed.resize(self.items.len(), false);
        }
        !std::mem::replace(&mut self.removed[index], true)
    }

    pub fn is_removed(&self, index: usize) -> bool {
        self.removed.get(index).copied().unwrap_or(false)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty() || self.removed.iter().any(|&r| r)
    }

    /// Apply queued removals, then append queued insertions in queue order.
    pub fn commit(&mut self) {
        if self.removed.iter().any(|&r| r) {
            let removed = std::mem::take(&mut self.removed);
            let mut index = 0;
            self.items.retain(|_| {
                let keep = !removed.get(index).copied().unwrap_or(false);
                index += 1;
                keep
            });
        }
        self.removed.clear();
        self.items.append(&mut self.pending);
    }
}

impl<T> FromIterator<T> for Pool<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// Every live entity in a session. The player and boss are held directly:
/// there is always exactly one player and at most one boss.
#[derive(Clone, Debug)]
pub struct EntityStore {
    pub player: Player,
    pub boss: Option<Boss>,
    pub enemies: Pool<Enemy>,
    pub player_bullets: Pool<Bullet>,
    pub enemy_bullets: Pool<Bullet>,
    pub powerups: Pool<PowerUp>,
}

impl EntityStore {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            boss: None,
            enemies: Pool::new(),
            player_bullets: Pool::new(),
            enemy_bullets: Pool::new(),
            powerups: Pool::new(),
        }
    }
}
