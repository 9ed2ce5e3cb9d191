//! PositivitySet - per-label boolean flags
//!
//! Indexed by label id `0..=max_label`. Index 0 is background and is never
//! positive.

/// Boolean flags indexed by label id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PositivitySet {
    flags: Vec<bool>,
}

impl PositivitySet {
    /// Create a set covering labels `0..=max_label`, all negative.
    pub fn new(max_label: u32) -> Self {
        PositivitySet {
            flags: vec![false; max_label as usize + 1],
        }
    }

    /// Create a set from raw flags. Index 0 is forced to `false`.
    pub fn from_flags(mut flags: Vec<bool>) -> Self {
        if flags.is_empty() {
            flags.push(false);
        }
        flags[0] = false;
        PositivitySet { flags }
    }

    /// Create a set from a list of positive label ids.
    ///
    /// The set covers `0..=max_label`; ids beyond that range grow it.
    pub fn from_ids(max_label: u32, ids: impl IntoIterator<Item = u32>) -> Self {
        let mut set = Self::new(max_label);
        for id in ids {
            set.set(id, true);
        }
        set
    }

    /// Mark `id` as positive or negative. Setting id 0 has no effect.
    pub fn set(&mut self, id: u32, positive: bool) {
        if id == 0 {
            return;
        }
        let idx = id as usize;
        if idx >= self.flags.len() {
            self.flags.resize(idx + 1, false);
        }
        self.flags[idx] = positive;
    }

    /// Check whether `id` is positive. Ids outside the set are negative.
    #[inline]
    pub fn is_positive(&self, id: u32) -> bool {
        self.flags.get(id as usize).copied().unwrap_or(false)
    }

    /// Number of entries (`max_label + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// True when the set covers only the background entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.len() <= 1
    }

    /// Largest label id covered.
    pub fn max_label(&self) -> u32 {
        self.flags.len().saturating_sub(1) as u32
    }

    /// Number of positive labels.
    pub fn positive_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    /// Iterate over positive label ids in ascending order.
    pub fn positive_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f)
            .map(|(i, _)| i as u32)
    }

    /// Raw flags.
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.flags
    }
}
