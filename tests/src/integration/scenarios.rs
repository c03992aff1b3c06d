//! # Ledger Scenarios
//!
//! End-to-end behaviour of submit → projection → feeds on an in-memory
//! ledger.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use pc_01_state_projection::{FeedQuery, Projection};
    use pc_02_chain_ledger::verify_chain;
    use shared_types::{Block, VoteType, ZERO_HASH};

    fn feed_hashes(ledger: &pc_02_chain_ledger::Ledger, viewer: &str) -> Vec<String> {
        ledger.with_view(|blocks, projection| {
            FeedQuery::new(blocks, projection)
                .home_feed(viewer)
                .into_iter()
                .map(|entry| entry.content_hash)
                .collect()
        })
    }

    fn explore_hashes(ledger: &pc_02_chain_ledger::Ledger) -> Vec<String> {
        ledger.with_view(|blocks, projection| {
            FeedQuery::new(blocks, projection)
                .explore(None)
                .into_iter()
                .map(|entry| entry.content_hash)
                .collect()
        })
    }

    /// alice posts h1, bob follows alice and votes FAKE three times.
    #[test]
    fn test_fake_votes_hide_post_from_follower_feed() {
        let ledger = memory_ledger().unwrap();
        ledger.submit(register("alice")).unwrap();
        ledger.submit(register("bob")).unwrap();
        let h1 = ledger.submit(post_image("alice", "cat.png")).unwrap();
        ledger.submit(follow("bob", "alice")).unwrap();

        assert_eq!(feed_hashes(&ledger, "bob"), [h1.hash_hex()]);

        for _ in 0..3 {
            ledger.submit(vote("bob", &h1, VoteType::Fake)).unwrap();
        }

        let snapshot = ledger.snapshot();
        let image = &snapshot.images[&h1.hash_hex()];
        assert_eq!((image.likes, image.fakes), (0, 3));
        assert!(snapshot.users["bob"].following.contains("alice"));
        assert!(feed_hashes(&ledger, "bob").is_empty());
        assert!(explore_hashes(&ledger).is_empty());

        // Moderation never rewrites history
        assert_eq!(ledger.len(), 8);
        assert!(verify_chain(&snapshot.blocks).is_ok());
    }

    #[test]
    fn test_moderation_threshold_boundary() {
        let ledger = memory_ledger().unwrap();
        for user in ["alice", "bob"] {
            ledger.submit(register(user)).unwrap();
        }
        let post = ledger.submit(post_image("alice", "dog.png")).unwrap();

        for _ in 0..4 {
            ledger.submit(vote("bob", &post, VoteType::Fake)).unwrap();
        }
        ledger.submit(vote("bob", &post, VoteType::Believe)).unwrap();
        // Likes=1, Fakes=4: 4 > 1 + 2
        assert!(explore_hashes(&ledger).is_empty());

        ledger.submit(vote("alice", &post, VoteType::Believe)).unwrap();
        // Likes=2, Fakes=4: 4 == 2 + 2
        assert_eq!(explore_hashes(&ledger), [post.hash_hex()]);
    }

    #[test]
    fn test_chain_links_and_genesis() {
        let ledger = memory_ledger().unwrap();
        ledger.submit(register("alice")).unwrap();
        ledger.submit(post_image("alice", "a.png")).unwrap();

        let blocks = ledger.read_all();
        assert_eq!(blocks[0].prev_hash, ZERO_HASH);
        assert!(blocks[0].is_genesis());
        for pair in blocks.windows(2) {
            assert_eq!(pair[1].prev_hash, pair[0].hash);
            assert_eq!(pair[1].sequence_index, pair[0].sequence_index + 1);
        }
    }

    #[test]
    fn test_reregistration_keeps_profile() {
        let ledger = memory_ledger().unwrap();
        ledger.submit(register("alice")).unwrap();
        ledger.submit(register("bob")).unwrap();
        ledger
            .submit(set_profile("alice", r#"{"bio":"film only","avatar":"me.png"}"#))
            .unwrap();
        ledger.submit(follow("bob", "alice")).unwrap();

        ledger.submit(register("alice")).unwrap();

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.users.len(), 2);
        let alice = &snapshot.users["alice"];
        assert_eq!(alice.bio, "film only");
        assert_eq!(alice.avatar.as_deref(), Some("me.png"));
        assert!(alice.followers.contains("bob"));
    }

    #[test]
    fn test_follow_then_unfollow_is_symmetric() {
        let ledger = memory_ledger().unwrap();
        ledger.submit(register("alice")).unwrap();
        ledger.submit(register("bob")).unwrap();

        ledger.submit(follow("alice", "bob")).unwrap();
        let users = ledger.snapshot().users;
        assert!(users["alice"].following.contains("bob"));
        assert!(users["bob"].followers.contains("alice"));

        ledger.submit(unfollow("alice", "bob")).unwrap();
        let users = ledger.snapshot().users;
        assert!(users["alice"].following.is_empty());
        assert!(users["bob"].followers.is_empty());
    }

    #[test]
    fn test_repost_tombstone_in_feed() {
        let ledger = memory_ledger().unwrap();
        for user in ["alice", "bob", "carol"] {
            ledger.submit(register(user)).unwrap();
        }
        // carol follows bob only; alice's post reaches her through bob's repost
        ledger.submit(follow("carol", "bob")).unwrap();
        let post = ledger.submit(post_image("alice", "sunset.png")).unwrap();

        let repost_block: Block = ledger.submit(repost("bob", &post)).unwrap();
        assert_eq!(feed_hashes(&ledger, "carol"), [post.hash_hex()]);

        ledger.submit(unrepost("bob", &post)).unwrap();
        assert!(feed_hashes(&ledger, "carol").is_empty());
        assert!(!ledger.snapshot().users["bob"].reposted.contains(&post.hash_hex()));

        ledger.submit(repost("bob", &post)).unwrap();
        let entries = ledger.with_view(|blocks, projection| {
            FeedQuery::new(blocks, projection).home_feed("carol")
        });
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_repost);
        assert_ne!(entries[0].block_hash, repost_block.hash_hex());
        assert_eq!(ledger.snapshot().images[&post.hash_hex()].reposts, 1);
    }

    #[test]
    fn test_replay_matches_live_projection() {
        let ledger = memory_ledger().unwrap();
        for user in ["alice", "bob"] {
            ledger.submit(register(user)).unwrap();
        }
        let post = ledger.submit(post_image("alice", "x.png")).unwrap();
        ledger.submit(vote("bob", &post, VoteType::Believe)).unwrap();
        ledger.submit(repost("bob", &post)).unwrap();
        ledger.submit(unrepost("bob", &post)).unwrap();

        let replayed = Projection::replay(&ledger.read_all());
        ledger.with_view(|_, live| assert_eq!(&replayed, live));
    }
}
