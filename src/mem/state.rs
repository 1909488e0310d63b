use std::fmt::{self, Display};

use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::error::SpecError;

new_key_type! {
    pub(crate) struct FrameKey;
}

/// Immutable description of one memory frame, as entered by the caller.
///
/// Frame ids are numeric strings; eviction tie-breaks and the clock
/// ordering compare them as numbers. `load_time` orders the initial
/// queues and must be unique within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSpec {
    pub id: String,
    pub load_time: u64,
    pub initial_page: Option<String>,
}

impl FrameSpec {
    /// An empty `initial_page` string means the frame starts out empty.
    pub fn new(id: impl Into<String>, load_time: u64, initial_page: Option<&str>) -> Self {
        Self {
            id: id.into(),
            load_time,
            initial_page: initial_page
                .filter(|page| !page.is_empty())
                .map(str::to_owned),
        }
    }
}

impl Display for FrameSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {}: load={} page={}",
            self.id,
            self.load_time,
            self.initial_page.as_deref().unwrap_or("-")
        )
    }
}

/// Per-run shadow of a [`FrameSpec`]: the currently resident page and the
/// reference bit the second-chance family works with.
#[derive(Debug, Clone)]
pub(crate) struct FrameState {
    pub id: String,
    pub id_num: u64,
    pub load_time: u64,
    pub page: Option<String>,
    pub referenced: bool,
}

/// Arena of frame run-states plus a page-residency index. Built fresh for
/// every run from the caller's specs, which stay untouched.
pub(crate) struct FrameTable {
    frames: SlotMap<FrameKey, FrameState>,
    /// Caller's original frame order; snapshots are reported in it.
    order: Vec<FrameKey>,
    resident: FxHashMap<String, FrameKey>,
}

impl FrameTable {
    pub(crate) fn new(specs: &[FrameSpec]) -> Result<Self, SpecError> {
        if specs.is_empty() {
            return Err(SpecError::NoFrames);
        }

        let mut frames = SlotMap::with_key();
        let mut order = Vec::with_capacity(specs.len());
        let mut resident = FxHashMap::default();

        for spec in specs {
            let id_num: u64 =
                spec.id
                    .parse()
                    .map_err(|_| SpecError::MalformedFrame {
                        id: spec.id.clone(),
                        reason: "id is not a number",
                    })?;
            if order.iter().any(|&key| frames[key].id == spec.id) {
                return Err(SpecError::DuplicateFrameId {
                    id: spec.id.clone(),
                });
            }
            if let Some(&clash) = order
                .iter()
                .find(|&&key| frames[key].load_time == spec.load_time)
            {
                return Err(SpecError::DuplicateLoadTime {
                    first: frames[clash].id.clone(),
                    second: spec.id.clone(),
                    load_time: spec.load_time,
                });
            }

            let key = frames.insert(FrameState {
                id: spec.id.clone(),
                id_num,
                load_time: spec.load_time,
                page: spec.initial_page.clone(),
                // The second-chance family starts every frame referenced.
                referenced: true,
            });
            if let Some(page) = &spec.initial_page {
                if let Some(&clash) = resident.get(page) {
                    return Err(SpecError::DuplicateResidentPage {
                        first: frames[clash].id.clone(),
                        second: spec.id.clone(),
                        page: page.clone(),
                    });
                }
                resident.insert(page.clone(), key);
            }
            order.push(key);
        }

        Ok(Self {
            frames,
            order,
            resident,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn frame(&self, key: FrameKey) -> &FrameState {
        &self.frames[key]
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (FrameKey, &FrameState)> {
        self.order.iter().map(|&key| (key, &self.frames[key]))
    }

    /// Frame currently holding `page`, if any. This is the hit check.
    pub(crate) fn lookup(&self, page: &str) -> Option<FrameKey> {
        self.resident.get(page).copied()
    }

    /// Replaces the victim's resident page with `page`.
    pub(crate) fn install(&mut self, key: FrameKey, page: &str) {
        if let Some(old) = self.frames[key].page.take() {
            let removed = self.resident.remove(&old);
            debug_assert_eq!(
                removed,
                Some(key),
                "page {old} was not indexed at its frame"
            );
        }
        debug_assert!(
            !self.resident.contains_key(page),
            "page {page} already resident while being installed"
        );
        self.frames[key].page = Some(page.to_owned());
        self.resident.insert(page.to_owned(), key);
    }

    pub(crate) fn set_referenced(&mut self, key: FrameKey, referenced: bool) {
        self.frames[key].referenced = referenced;
    }

    pub(crate) fn all_referenced(&self) -> bool {
        self.frames.values().all(|frame| frame.referenced)
    }

    pub(crate) fn clear_all_referenced(&mut self) {
        for frame in self.frames.values_mut() {
            frame.referenced = false;
        }
    }

    /// Frame keys ordered by load time ascending, the shared initial
    /// queue order of FIFO, LRU and Second Chance.
    pub(crate) fn by_load_time(&self) -> Vec<FrameKey> {
        let mut keys = self.order.clone();
        keys.sort_by_key(|&key| self.frames[key].load_time);
        keys
    }

    /// Resident pages in the caller's original frame order.
    pub(crate) fn snapshot(&self) -> Vec<Option<String>> {
        self.order
            .iter()
            .map(|&key| self.frames[key].page.clone())
            .collect()
    }

    pub(crate) fn resident_pages(&self) -> &FxHashMap<String, FrameKey> {
        &self.resident
    }
}

/// Page requests must carry an id; position is reported so the caller can
/// point at the offending cell.
pub(crate) fn validate_sequence(sequence: &[String]) -> Result<(), SpecError> {
    for (position, page) in sequence.iter().enumerate() {
        if page.is_empty() {
            return Err(SpecError::EmptyPageId { position });
        }
    }
    Ok(())
}
