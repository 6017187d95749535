//! Annotations and the named slots they are queued on.

use std::fmt;

use indexmap::IndexMap;
use smol_str::SmolStr;

/// A named point in a construct's restoration sequence.
///
/// Which slots a construct declares, and in which order they are flushed, is
/// fixed by the grammar table in `restore::dispatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Start,
    AfterArgs,
    AfterArrow,
    AfterAssign,
    AfterBegin,
    AfterCase,
    AfterChan,
    AfterColon,
    AfterComm,
    AfterCond,
    AfterDefer,
    AfterElse,
    AfterEllipsis,
    AfterFor,
    AfterFun,
    AfterFunc,
    AfterGo,
    AfterHigh,
    AfterIf,
    AfterIndex,
    AfterInit,
    AfterInterface,
    AfterKey,
    AfterLabel,
    AfterLbrace,
    AfterLbrack,
    AfterLen,
    AfterLhs,
    AfterList,
    AfterLow,
    AfterLparen,
    AfterMap,
    AfterMax,
    AfterName,
    AfterNames,
    AfterOp,
    AfterOpening,
    AfterPackage,
    AfterParams,
    AfterPost,
    AfterRange,
    AfterRecv,
    AfterResults,
    AfterReturn,
    AfterSelect,
    AfterStar,
    AfterStruct,
    AfterSwitch,
    AfterTag,
    AfterTok,
    AfterType,
    AfterValue,
    AfterX,
    End,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Where a printer should put an annotation relative to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    /// On a line of its own.
    #[default]
    OwnLine,
    /// At the end of the line holding the preceding token.
    Trailing,
}

/// A comment or blank-line hint queued on a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub text: SmolStr,
    pub placement: Placement,
}

impl Annotation {
    pub fn new(text: impl Into<SmolStr>, placement: Placement) -> Self {
        Self {
            text: text.into(),
            placement,
        }
    }

    /// A comment that sits on its own line.
    pub fn own_line(text: impl Into<SmolStr>) -> Self {
        Self::new(text, Placement::OwnLine)
    }

    /// A comment that trails the preceding token.
    pub fn trailing(text: impl Into<SmolStr>) -> Self {
        Self::new(text, Placement::Trailing)
    }

    /// A blank-line hint.
    pub fn newline() -> Self {
        Self::new("\n", Placement::OwnLine)
    }

    pub fn is_newline(&self) -> bool {
        self.text == "\n"
    }
}

/// Ordered mapping from slot to the annotations queued on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decorations {
    slots: IndexMap<Slot, Vec<Annotation>>,
}

impl Decorations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an annotation at the end of `slot`.
    pub fn push(&mut self, slot: Slot, annotation: Annotation) {
        self.slots.entry(slot).or_default().push(annotation);
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, slot: Slot, annotation: Annotation) -> Self {
        self.push(slot, annotation);
        self
    }

    /// Annotations queued on `slot`, in original order.
    pub fn get(&self, slot: Slot) -> &[Annotation] {
        self.slots.get(&slot).map_or(&[], Vec::as_slice)
    }

    /// Remove every annotation queued on `slot`.
    pub fn clear(&mut self, slot: Slot) {
        self.slots.shift_remove(&slot);
    }

    /// Iterate non-empty slots in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &[Annotation])> {
        self.slots
            .iter()
            .filter(|(_, annotations)| !annotations.is_empty())
            .map(|(slot, annotations)| (*slot, annotations.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
