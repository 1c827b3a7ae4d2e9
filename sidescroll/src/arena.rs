//! [`SlotStore`], the dense index-addressed pool underlying every game-object pool.

use core::fmt;
use core::ops;

/// Records that can be stored in a [`SlotStore`] and have their slots reused.
///
/// A record carries its own activity flag. Inactive records stay in place (so that
/// indices of other records never change) until a later [`SlotStore::create()`]
/// overwrites them.
pub trait Slot {
    /// Whether this record is live. Inactive records are skipped by simulation and
    /// are eligible for reuse.
    fn is_active(&self) -> bool;

    /// Marks this record as no longer live.
    fn deactivate(&mut self);
}

/// Error returned when looking up an index at or beyond the end of a [`SlotStore`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, thiserror::Error)]
#[error("{pool} index {index} is out of range (length {len})")]
#[non_exhaustive]
pub struct OutOfRange {
    /// Name of the pool that was accessed.
    pub pool: &'static str,
    /// The index that was requested.
    pub index: usize,
    /// The length of the pool at the time.
    pub len: usize,
}

/// A growable, index-addressed pool of records.
///
/// * An index returned by [`append()`](Self::append) or [`create()`](Self::create)
///   keeps referring to the same record until that record is deactivated *and* its slot
///   is handed out again by a later `create()`. Callers must not hold indices across
///   such a reuse.
/// * The store never shrinks except by [`reset()`](Self::reset), after which no
///   previous index is meaningful.
/// * Creation scans linearly for the lowest inactive slot. Pools in a scene hold tens
///   of records, not millions, so this keeps indices dense without a free list.
///
/// Indexing with `store[i]` panics on an out-of-range index; use
/// [`get()`](Self::get) to handle that case instead.
#[derive(Clone)]
pub struct SlotStore<T> {
    name: &'static str,
    records: Vec<T>,
}

impl<T> SlotStore<T> {
    /// Creates an empty store. `name` identifies the pool in error messages.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            records: Vec::new(),
        }
    }

    /// The name given to [`SlotStore::new()`].
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of slots, active or not.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no slots at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends `record` as a new slot and returns its index, without looking for
    /// reusable slots.
    pub fn append(&mut self, record: T) -> usize {
        let index = self.records.len();
        self.records.push(record);
        index
    }

    /// Returns the record at `index`.
    pub fn get(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.records.len();
        self.records.get(index).ok_or(OutOfRange {
            pool: self.name,
            index,
            len,
        })
    }

    /// Returns the record at `index` for modification.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.records.len();
        self.records.get_mut(index).ok_or(OutOfRange {
            pool: self.name,
            index,
            len,
        })
    }

    /// Iterates over all slots, active or not, with their indices, in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &T)> + ExactSizeIterator {
        self.records.iter().enumerate()
    }

    /// Iterates over all slots for modification, with their indices, in ascending order.
    pub fn iter_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = (usize, &mut T)> + ExactSizeIterator {
        self.records.iter_mut().enumerate()
    }

    /// Removes every slot. All previously returned indices become invalid.
    pub fn reset(&mut self) {
        log::debug!("resetting {} pool of {} slots", self.name, self.records.len());
        self.records.clear();
    }
}

impl<T: Slot> SlotStore<T> {
    /// Returns the index that the next call to [`create()`](Self::create) would use:
    /// the lowest inactive slot, or the current length if every slot is active.
    pub fn next_index(&self) -> usize {
        self.records
            .iter()
            .position(|record| !record.is_active())
            .unwrap_or(self.records.len())
    }

    /// Stores `record` in the lowest inactive slot, or appends it if there is none,
    /// and returns its index.
    ///
    /// A reused slot is entirely overwritten, so nothing of the previous occupant
    /// survives.
    pub fn create(&mut self, record: T) -> usize {
        debug_assert!(record.is_active(), "creating an inactive record");
        let index = self.next_index();
        if let Some(slot) = self.records.get_mut(index) {
            log::debug!("reusing {} slot {index}", self.name);
            *slot = record;
            index
        } else {
            self.append(record)
        }
    }

    /// Deactivates the record at `index`, making its slot available for reuse.
    ///
    /// Deactivating an already inactive record has no effect.
    pub fn deactivate(&mut self, index: usize) -> Result<(), OutOfRange> {
        self.get_mut(index)?.deactivate();
        Ok(())
    }

    /// Number of active records.
    pub fn active_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_active()).count()
    }

    /// Iterates over active records only, with their indices, in ascending order.
    pub fn iter_active(&self) -> impl DoubleEndedIterator<Item = (usize, &T)> {
        self.iter().filter(|(_, record)| record.is_active())
    }
}

impl<T> ops::Index<usize> for SlotStore<T> {
    type Output = T;

    /// Panics with an [`OutOfRange`] message if `index` is not less than the length.
    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Ok(record) => record,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> ops::IndexMut<usize> for SlotStore<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.get_mut(index) {
            Ok(record) => record,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SlotStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { name, records } = self;
        f.debug_struct("SlotStore")
            .field("name", name)
            .field("records", records)
            .finish()
    }
}

/// Declares a newtype around a [`SlotStore`] index, so that indices into different
/// pools cannot be confused.
macro_rules! slot_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(usize);

        impl $name {
            /// Wraps a raw pool index.
            ///
            /// The index is not checked; an id that does not refer to a slot panics
            /// when it is looked up.
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Returns the raw pool index.
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}
pub(crate) use slot_id;
