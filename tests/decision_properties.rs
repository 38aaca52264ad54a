use newscheck::{Decision, DecisionEngine, DecisionError, Threshold, decide};

/// Probability pairs summing to 1 on a 0.01 grid.
fn pairs() -> impl Iterator<Item = (f64, f64)> {
    (0..=100).map(|i| {
        let real = i as f64 / 100.0;
        (real, 1.0 - real)
    })
}

fn thresholds() -> impl Iterator<Item = f64> {
    (1..=20).map(|i| i as f64 / 20.0)
}

#[test]
fn confidence_is_the_larger_probability() {
    for t in thresholds() {
        for (real, fake) in pairs() {
            let result = decide(real, fake, t).unwrap();
            assert_eq!(result.confidence, real.max(fake));
            assert_eq!(result.prob_real, real);
            assert_eq!(result.prob_fake, fake);
        }
    }
}

#[test]
fn decision_rule_holds_everywhere() {
    for t in thresholds() {
        for (real, fake) in pairs() {
            let result = decide(real, fake, t).unwrap();
            let expected = if result.confidence < t {
                Decision::Uncertain
            } else if fake > real {
                Decision::Fake
            } else {
                Decision::Real
            };
            assert_eq!(result.label, expected, "real={real} fake={fake} t={t}");
        }
    }
}

#[test]
fn below_threshold_is_always_uncertain() {
    for (real, fake) in pairs() {
        let confidence = real.max(fake);
        if confidence < 1.0 {
            let t = (confidence + 0.001).min(1.0);
            assert_eq!(decide(real, fake, t).unwrap().label, Decision::Uncertain);
        }
    }
}

#[test]
fn decisions_are_deterministic() {
    let engine = DecisionEngine::new(Threshold::new(0.8).unwrap());
    for (real, fake) in pairs() {
        let first = engine.decide(real, fake).unwrap();
        for _ in 0..3 {
            assert_eq!(engine.decide(real, fake).unwrap(), first);
        }
        assert_eq!(decide(real, fake, 0.8).unwrap(), first);
    }
}

#[test]
fn threshold_never_flips_real_and_fake() {
    for (real, fake) in pairs() {
        let committed: Vec<Decision> = thresholds()
            .map(|t| decide(real, fake, t).unwrap().label)
            .filter(|d| *d != Decision::Uncertain)
            .collect();
        assert!(
            committed.windows(2).all(|w| w[0] == w[1]),
            "real={real} fake={fake}: {committed:?}"
        );
    }
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = DecisionEngine::default();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let fake = 0.85 + i as f64 * 0.01;
                engine.decide(1.0 - fake, fake).unwrap().label
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Decision::Fake);
    }
}

#[test]
fn scenarios() {
    let cases = [
        (0.5, 0.5, 0.8, Decision::Uncertain),
        (0.5, 0.5, 0.4, Decision::Real),
        (0.1, 0.9, 0.8, Decision::Fake),
        (0.85, 0.15, 0.8, Decision::Real),
        (0.7, 0.3, 0.8, Decision::Uncertain),
    ];
    for (real, fake, t, expected) in cases {
        assert_eq!(decide(real, fake, t).unwrap().label, expected);
    }
}

#[test]
fn invalid_values() {
    assert!(matches!(
        decide(1.2, -0.2, 0.8),
        Err(DecisionError::InvalidInput { .. })
    ));
    assert_eq!(decide(0.5, 0.5, 0.0), Err(DecisionError::InvalidConfiguration(0.0)));
    assert_eq!(decide(0.5, 0.5, 1.5), Err(DecisionError::InvalidConfiguration(1.5)));
}
