//! Assertions over positioned trees.

use dectree::{NodeId, PosId, PositionedTree, TextSize};

/// Every booked token and annotation, as `(offset, length)`, sorted by offset.
pub fn spans(tree: &PositionedTree) -> Vec<(TextSize, TextSize)> {
    let mut spans: Vec<_> = tree
        .tokens()
        .iter()
        .map(|token| (token.offset, TextSize::of(token.text.as_str())))
        .chain(
            tree.annotations()
                .iter()
                .map(|annotation| (annotation.offset, TextSize::of(annotation.text.as_str()))),
        )
        .collect();
    spans.sort();
    spans
}

/// Assert that tokens and annotations tile `[base, end)` with no gap or overlap.
pub fn assert_contiguous(tree: &PositionedTree, base: TextSize) {
    let mut expected = base;
    for (offset, len) in spans(tree) {
        assert_eq!(
            offset, expected,
            "piece at {:?} does not start where the previous one ended",
            offset
        );
        expected = offset + len;
    }
    assert_eq!(tree.end(), expected, "end offset does not follow the last piece");
}

/// Assert that annotation offsets strictly increase in emission order.
pub fn assert_annotations_monotonic(tree: &PositionedTree) {
    for pair in tree.annotations().windows(2) {
        assert!(
            pair[0].offset < pair[1].offset,
            "annotation '{}' at {:?} is not before '{}' at {:?}",
            pair[0].text,
            pair[0].offset,
            pair[1].text,
            pair[1].offset
        );
    }
}

/// The positioned node restored from decorated node `origin`.
pub fn restored_as(tree: &PositionedTree, origin: NodeId) -> PosId {
    tree.origins()
        .find(|(_, from)| *from == origin)
        .map(|(at, _)| at)
        .unwrap_or_else(|| panic!("decorated node {:?} was not restored", origin))
}
