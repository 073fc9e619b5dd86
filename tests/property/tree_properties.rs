//! Property-based tests for tree shape and diff guarantees

use dirtrack::tree::builder::build_from_leaves;
use dirtrack::tree::diff::diff_trees;
use dirtrack::types::{DedupPolicy, HashAlgorithm, PaddingPolicy};
use proptest::prelude::*;

fn leaves_from(contents: &[Vec<u8>]) -> Vec<(String, String)> {
    contents
        .iter()
        .enumerate()
        .map(|(i, content)| (format!("d/f{:03}", i), HashAlgorithm::Sha256.hash_bytes(content)))
        .collect()
}

fn build(contents: &[Vec<u8>]) -> dirtrack::tree::node::MerkleTree {
    build_from_leaves(leaves_from(contents), HashAlgorithm::Sha256, PaddingPolicy::EveryLevel)
        .unwrap()
}

fn contents_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 1..40)
}

proptest! {
    /// Rebuilding unchanged contents yields an identical tree and no changes
    #[test]
    fn prop_identical_rebuild_has_no_changes(contents in contents_strategy()) {
        let first = build(&contents);
        let second = build(&contents);
        prop_assert_eq!(&first, &second);
        prop_assert!(diff_trees(&first, &second, DedupPolicy::Unique).unwrap().is_empty());
    }

    /// Changing one file reports exactly that file
    #[test]
    fn prop_single_change_is_isolated(
        contents in contents_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let index = pick.index(contents.len());
        let old = build(&contents);

        let mut edited = contents.clone();
        edited[index].push(0xff);
        let new = build(&edited);

        let expected = vec![format!("d/f{:03}", index)];
        prop_assert_eq!(diff_trees(&old, &new, DedupPolicy::Unique).unwrap(), expected.clone());

        // The trailing-pair rule only collapses leaf padding, so it is exact
        // on the shapes leaf-only padding can build.
        let leaf_only_builds = build_from_leaves(
            leaves_from(&contents),
            HashAlgorithm::Sha256,
            PaddingPolicy::LeafOnly,
        )
        .is_ok();
        if leaf_only_builds {
            prop_assert_eq!(diff_trees(&old, &new, DedupPolicy::TrailingPair).unwrap(), expected);
        }
    }

    /// The tree has ceil(log2(n)) levels and a power-of-two leaf count
    #[test]
    fn prop_tree_is_full(contents in contents_strategy()) {
        let tree = build(&contents);
        let padded = contents.len().max(2).next_power_of_two();
        prop_assert_eq!(tree.leaf_count(), padded);
        prop_assert_eq!(tree.depth(), padded.trailing_zeros() as usize);
        prop_assert_eq!(tree.file_names().len(), contents.len());
        prop_assert!(tree.find_inconsistency(HashAlgorithm::Sha256).is_none());
    }

    /// Both padding policies agree wherever leaf-only padding succeeds
    #[test]
    fn prop_padding_policies_agree(contents in contents_strategy()) {
        let every = build(&contents);
        if let Ok(leaf_only) = build_from_leaves(
            leaves_from(&contents),
            HashAlgorithm::Sha256,
            PaddingPolicy::LeafOnly,
        ) {
            prop_assert_eq!(leaf_only.root_hash(), every.root_hash());
            prop_assert_eq!(leaf_only.leaves(), every.leaves());
        }
    }
}
