//! Multi-grade pools and sampling.

mod common;

use common::fixtures::{sky_dataset, spread_dataset};
use common::{ids, rng, TestContext};
use hanja_cards_lib::db::BookmarkRepository;
use hanja_core::Grade;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

const ALL_THREE: [Grade; 3] = [Grade::Eight, Grade::Seven, Grade::Six];

#[test]
fn test_pool_has_no_duplicate_ids() {
    let ctx = TestContext::with_dataset(&spread_dataset(30));
    for grades in [
        vec![Grade::Eight],
        vec![Grade::Eight, Grade::Eight],
        vec![Grade::Six, Grade::Eight, Grade::Seven, Grade::Six],
    ] {
        let pool = ctx
            .repo(|repo| ctx.state.multi_grade.get_words_by_multiple_grades(repo, &grades))
            .unwrap();
        let unique: HashSet<&str> = pool.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(unique.len(), pool.len());
    }
}

#[test]
fn test_sample_is_bounded_and_respects_exclusions() {
    let ctx = TestContext::with_dataset(&spread_dataset(30));
    ctx.repo(|repo| repo.toggle_bookmark("w0")).unwrap();
    let exclude: Vec<String> = (1..5).map(|i| format!("w{}", i)).collect();
    let mut rng = rng(17);

    for count in [0, 1, 5, 25, 26, 100] {
        let drawn = ctx
            .repo(|repo| {
                ctx.state
                    .multi_grade
                    .get_random_words_from_multiple_grades(repo, &ALL_THREE, count, &exclude, &mut rng)
            })
            .unwrap();
        assert_eq!(drawn.len(), count.min(25));
        for card in &drawn {
            assert_ne!(card.id, "w0");
            assert!(!exclude.contains(&card.id));
        }
    }
}

#[test]
fn test_excluding_all_but_one_returns_that_word() {
    let ctx = TestContext::with_dataset(&sky_dataset());
    let exclude = vec!["w1".to_string(), "w2".to_string(), "w4".to_string()];
    let drawn = ctx
        .repo(|repo| {
            ctx.state.multi_grade.get_random_words_from_multiple_grades(
                repo,
                &[Grade::Eight, Grade::Seven],
                5,
                &exclude,
                &mut rng(1),
            )
        })
        .unwrap();
    assert_eq!(ids(&drawn), vec!["w3"]);
}

#[test]
fn test_every_word_can_lead_the_sample() {
    let ctx = TestContext::with_dataset(&spread_dataset(6));
    let mut rng = rng(99);
    let mut leaders = HashSet::new();
    for _ in 0..300 {
        let drawn = ctx
            .repo(|repo| {
                ctx.state
                    .multi_grade
                    .get_random_words_from_multiple_grades(repo, &ALL_THREE, 1, &[], &mut rng)
            })
            .unwrap();
        leaders.insert(drawn[0].id.clone());
    }
    assert_eq!(leaders.len(), 6);
}

#[test]
fn test_reseed_command_clears_cache() {
    let ctx = TestContext::with_dataset(&sky_dataset());
    let before = hanja_cards_lib::commands::get_words_by_grades(&["8급".to_string()], &ctx.state).unwrap();
    assert_eq!(before.len(), 3);

    hanja_cards_lib::commands::seed_from_static_dataset(&ctx.state).unwrap();
    let after = hanja_cards_lib::commands::get_words_by_grades(&["8급".to_string()], &ctx.state).unwrap();
    assert!(!after.is_empty());
    assert!(after.iter().all(|w| w.id.len() == 4));
}

#[test]
fn test_multi_grade_statistics() {
    let ctx = TestContext::with_dataset(&spread_dataset(10));
    let stats = ctx
        .repo(|repo| ctx.state.multi_grade.get_multi_grade_statistics(repo, &ALL_THREE))
        .unwrap();
    assert_eq!(stats.total_words, 10);
    assert_eq!(stats.grade_breakdown[&Grade::Eight], 4);
    assert_eq!(stats.grade_breakdown[&Grade::Seven], 3);
    assert_eq!(stats.grade_breakdown[&Grade::Six], 3);
}
