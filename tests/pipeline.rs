use rand::rngs::StdRng;
use rand::SeedableRng;

use minerpet::config::Config;
use minerpet::core::genetics::{breeding_eligibility, preview_offspring, BreedingEligibility};
use minerpet::core::lifecycle::SECONDS_PER_DAY;
use minerpet::core::{
    apply_interaction, decay, generate, parse_identifier, EmotionalState, Interaction,
};
use minerpet::physics::{Gesture, PetAnimator};
use minerpet::{snapshot, PetInputs};

const ADDRESS: &str = "0xABCDEF0123456789ABCDEF0123456789ABCDEF01";

#[test]
fn test_identity_is_stable_across_calls() {
    let id = parse_identifier(ADDRESS).unwrap();
    let first = generate(&id).unwrap();
    for _ in 0..5 {
        let again = generate(&parse_identifier(ADDRESS).unwrap()).unwrap();
        assert_eq!(again, first);
    }

    // Case and prefix do not change the bytes
    let bare = parse_identifier(&ADDRESS[2..].to_lowercase()).unwrap();
    assert_eq!(generate(&bare).unwrap(), first);
}

#[test]
fn test_hunger_sets_in_after_grace() {
    let traits = generate(&parse_identifier(ADDRESS).unwrap()).unwrap();
    let config = Config::default_config(Default::default());

    let at_four_minutes = decay(&traits, 240, 0, 240, &config.decay);
    let at_ten_minutes = decay(&traits, 600, 0, 600, &config.decay);

    assert_eq!(at_four_minutes.satisfaction, traits.satisfaction);
    assert!(at_ten_minutes.satisfaction < at_four_minutes.satisfaction);
}

#[test]
fn test_feeding_then_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
    let now = 45 * SECONDS_PER_DAY;

    let identifier = parse_identifier(ADDRESS).unwrap();
    let inputs = PetInputs {
        identifier: identifier.clone(),
        created_at: 0,
        last_fed: now - 6 * 3600,
        last_interaction: now - 6 * 3600,
        now,
        ..PetInputs::default()
    };
    let hungry = snapshot(&inputs, &config, EmotionalState::Idle).unwrap();
    assert!(hungry.lifecycle.can_breed);

    let fed = apply_interaction(&hungry.traits, Interaction::Feed);
    assert!(fed.satisfaction > hungry.traits.satisfaction || fed.satisfaction == 100.0);

    // The caller persists the new clock; the next read starts fresh
    let refreshed = snapshot(
        &PetInputs {
            last_fed: now,
            last_interaction: now,
            ..inputs
        },
        &config,
        EmotionalState::Idle,
    )
    .unwrap();
    assert_eq!(refreshed.traits, generate(&identifier).unwrap());
}

#[test]
fn test_breeding_flow() {
    let config = Config::default_config(Default::default());
    let parent_a = generate(&parse_identifier(ADDRESS).unwrap()).unwrap();
    let parent_b = generate(&parse_identifier("0x1234").unwrap()).unwrap();

    let prime = minerpet::core::LifecycleStage::Prime;
    let now = 100 * SECONDS_PER_DAY;
    assert_eq!(
        breeding_eligibility(prime, Some(now - 3600), now, config.breeding_cooldown_secs),
        BreedingEligibility::CoolingDown {
            remaining_secs: config.breeding_cooldown_secs - 3600
        }
    );
    assert_eq!(
        breeding_eligibility(prime, None, now, config.breeding_cooldown_secs),
        BreedingEligibility::Eligible
    );

    let mut rng = StdRng::seed_from_u64(42);
    let previews = preview_offspring(&parent_a, &parent_b, 2, 5, 8, &config.genetics, &mut rng);
    assert_eq!(previews.len(), 8);
    for preview in &previews {
        assert_eq!(preview.generation, 6);
        assert!((0.95..=1.05).contains(&preview.traits.earning_potential));
        assert!(preview.traits.social_score <= 100);
    }
}

#[tokio::test]
async fn test_animated_gesture_completes() {
    let mut animator = PetAnimator::new();
    let done = animator.start_gesture(Gesture::Jump).unwrap();
    assert!(animator.start_gesture(Gesture::Nod).is_none());

    for _ in 0..Gesture::Jump.duration_frames() {
        animator.tick(EmotionalState::Happy);
    }

    let completion = done.await.unwrap();
    assert_eq!(completion.gesture, Gesture::Jump);
    assert!(!animator.gesture_active());
}
