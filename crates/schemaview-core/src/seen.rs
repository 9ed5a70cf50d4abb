//! Active-path tracking for recursive descent
//!
//! Both the normalizer and the example generator walk trees that may lead back
//! to a node they are already inside. `Seen` records the identities on the
//! current path only: entries are pushed on the way down and popped on the way
//! back up, so a node reached twice from unrelated branches is visited twice.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::collections::HashSet;
use std::hash::Hash;

/// Why a node could not be entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revisit {
    /// The node is already on the active path
    Cycle,
    /// The path is as deep as the configured ceiling allows
    DepthExceeded,
}

/// Identities currently being visited, innermost last
#[derive(Debug, Clone)]
pub struct Seen<K = usize> {
    stack: Vec<K>,
    active: HashSet<K>,
    max_depth: usize,
}

impl<K: Copy + Eq + Hash> Seen<K> {
    pub fn new(max_depth: usize) -> Self {
        Self {
            stack: Vec::new(),
            active: HashSet::new(),
            max_depth,
        }
    }

    /// Push `id` onto the active path
    pub fn enter(&mut self, id: K) -> Result<(), Revisit> {
        if self.active.contains(&id) {
            return Err(Revisit::Cycle);
        }
        if self.stack.len() >= self.max_depth {
            return Err(Revisit::DepthExceeded);
        }

        self.stack.push(id);
        self.active.insert(id);
        Ok(())
    }

    /// Pop the innermost identity
    pub fn leave(&mut self) -> Option<K> {
        let id = self.stack.pop()?;
        self.active.remove(&id);
        Some(id)
    }

    pub fn contains(&self, id: &K) -> bool {
        self.active.contains(id)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

/// Identity of a node by address
pub(crate) fn identity<T>(node: &T) -> usize {
    node as *const T as usize
}
