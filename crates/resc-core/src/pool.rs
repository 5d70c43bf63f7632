//! Deduplicating string pool with position-tracking handles.
//!
//! Plain and styled strings intern into two independent namespaces:
//! equal text in different namespaces never merges, even when a styled
//! entry carries no spans. Entries live in individually owned heap
//! records; the pool's vector only orders them, so sorting and pruning
//! move positions without invalidating a single handle.
//!
//! Reference counting rides on `Rc`: the pool's vector holds exactly one
//! strong count per entry and the dedup indices hold weak ones, so an
//! entry is unreferenced exactly when its strong count is 1. Unreferenced
//! entries stay in the pool until an explicit [`StringPool::prune`].

use std::cell::{Cell, OnceCell};
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::style::{Span, StyledText};

/// A uniquely stored string owned by the pool.
///
/// Sort comparators receive `&Entry` pairs and may order by any of the
/// exposed content.
#[derive(Debug)]
pub struct Entry {
    value: String,
    styled: bool,
    spans: OnceCell<Vec<Span>>,
    index: Cell<usize>,
}

impl Entry {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Span list for styled entries, `None` for plain ones.
    ///
    /// A styled entry without markup reports an empty slice, not `None`.
    pub fn spans(&self) -> Option<&[Span]> {
        if self.styled {
            Some(self.spans.get().map(Vec::as_slice).unwrap_or(&[]))
        } else {
            None
        }
    }

    /// Current position of this entry in pool order.
    pub fn index(&self) -> usize {
        self.index.get()
    }
}

/// Shared handle to a plain pool entry.
///
/// Cloning shares the entry. The entry counts as referenced until every
/// handle is dropped, and is only removed by a later prune.
#[derive(Clone, Debug)]
pub struct Ref(Rc<Entry>);

impl Ref {
    pub fn value(&self) -> &str {
        self.0.value()
    }

    /// Current position of the referenced entry; follows sorts and prunes.
    pub fn index(&self) -> usize {
        self.0.index()
    }
}

/// Shared handle to a styled pool entry.
#[derive(Clone, Debug)]
pub struct StyleRef(Rc<Entry>);

impl StyleRef {
    pub fn value(&self) -> &str {
        self.0.value()
    }

    pub fn spans(&self) -> &[Span] {
        self.0.spans().unwrap_or(&[])
    }

    /// Current position of the referenced entry; follows sorts and prunes.
    pub fn index(&self) -> usize {
        self.0.index()
    }
}

/// Dedup key for the styled namespace: exact (text, span-list) equality.
#[derive(Debug, PartialEq, Eq, Hash)]
struct StyleKey {
    value: String,
    spans: Vec<(String, u32, u32)>,
}

impl StyleKey {
    fn new(text: &StyledText) -> Self {
        Self {
            value: text.text.clone(),
            spans: text
                .spans
                .iter()
                .map(|s| (s.name.clone(), s.first_char, s.last_char))
                .collect(),
        }
    }
}

/// Deduplicating pool of plain and styled strings.
#[derive(Debug, Default)]
pub struct StringPool {
    /// All entries in current pool order. Holds the only strong count the
    /// pool itself contributes to each entry.
    entries: Vec<Rc<Entry>>,
    /// Plain-namespace dedup index.
    plain: IndexMap<String, Weak<Entry>>,
    /// Styled-namespace dedup index.
    styled: IndexMap<StyleKey, Weak<Entry>>,
}

impl StringPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `value` in the plain namespace.
    ///
    /// Returns a handle to the existing entry when the value is already
    /// pooled, otherwise appends a new entry at the next position. Never
    /// fails.
    pub fn make_ref(&mut self, value: &str) -> Ref {
        if let Some(entry) = self.plain.get(value).and_then(Weak::upgrade) {
            return Ref(entry);
        }

        let entry = self.push_entry(value.to_owned(), false);
        self.plain.insert(value.to_owned(), Rc::downgrade(&entry));
        Ref(entry)
    }

    /// Intern styled text: exact (text, span-list) matches share one entry.
    ///
    /// The styled entry is appended first, then each span's tag name is
    /// resolved through the plain namespace, so a fresh tag name lands at
    /// the position following its owner.
    pub fn make_style_ref(&mut self, text: StyledText) -> StyleRef {
        let key = StyleKey::new(&text);
        if let Some(entry) = self.styled.get(&key).and_then(Weak::upgrade) {
            return StyleRef(entry);
        }

        let entry = self.push_entry(text.text, true);
        let spans: Vec<Span> = text
            .spans
            .into_iter()
            .map(|s| Span {
                name: self.make_ref(&s.name),
                first_char: s.first_char,
                last_char: s.last_char,
            })
            .collect();
        entry
            .spans
            .set(spans)
            .expect("span list is set once, at entry creation");
        self.styled.insert(key, Rc::downgrade(&entry));
        StyleRef(entry)
    }

    /// Number of entries currently held, referenced or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of styled entries currently held.
    pub fn style_count(&self) -> usize {
        self.entries.iter().filter(|e| e.spans().is_some()).count()
    }

    /// Iterate entries in current pool order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().map(Rc::as_ref)
    }

    /// Drop every entry no handle refers to and renumber the survivors.
    ///
    /// Entries are released in pool order: a styled entry dropped early in
    /// the pass frees its span-name handles immediately, so a tag name it
    /// was the last owner of is collected in the same pass when the name
    /// sits later in the order.
    pub fn prune(&mut self) {
        let mut kept = Vec::with_capacity(self.entries.len());
        for entry in std::mem::take(&mut self.entries) {
            if Rc::strong_count(&entry) > 1 {
                kept.push(entry);
            }
        }
        self.entries = kept;

        self.plain.retain(|_, weak| weak.strong_count() > 0);
        self.styled.retain(|_, weak| weak.strong_count() > 0);
        self.reindex();
    }

    /// Reorder entries by `cmp` and renumber every position.
    ///
    /// `cmp` must be a strict weak ordering over entry content; the result
    /// of sorting with an inconsistent comparator is unspecified. Sorting
    /// never creates, destroys, or merges entries: handles observe their
    /// new positions immediately, and interning an already-pooled value
    /// still resolves to its relocated entry.
    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&Entry, &Entry) -> Ordering,
    {
        self.entries.sort_by(|a, b| cmp(a, b));
        self.reindex();
    }

    fn push_entry(&mut self, value: String, styled: bool) -> Rc<Entry> {
        let entry = Rc::new(Entry {
            value,
            styled,
            spans: OnceCell::new(),
            index: Cell::new(self.entries.len()),
        });
        self.entries.push(Rc::clone(&entry));
        entry
    }

    fn reindex(&self) {
        for (i, entry) in self.entries.iter().enumerate() {
            entry.index.set(i);
        }
    }
}
