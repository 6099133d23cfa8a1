use slot_core::{
    generate_roll, payout, resolve, ErrorKind, GameRules, RandomSource, ScriptedRandom, SeededRandom,
    SessionStatus, SessionStore, Symbol,
};

#[test]
fn rng_repeatable() {
    let mut rng1 = SeededRandom::new("s", "c", 42);
    let mut rng2 = SeededRandom::new("s", "c", 42);
    let a: Vec<f64> = (0..10).map(|_| rng1.next_unit()).collect();
    let b: Vec<f64> = (0..10).map(|_| rng2.next_unit()).collect();
    assert_eq!(a, b);
}

#[test]
fn generated_rolls_use_the_alphabet() {
    for nonce in 0..200u64 {
        let mut rng = SeededRandom::new("server", "client", nonce);
        let roll = generate_roll(&mut rng, 3);
        assert_eq!(roll.len(), 3);
        assert!(roll.iter().all(|s| Symbol::ALL.contains(s)));
    }
}

#[test]
fn winning_roll_at_start_pays_symbol() {
    // every draw lands on Lemon; 10 credits is below any house edge band
    let store = SessionStore::new(ScriptedRandom::constant(0.3));
    let session = store.create();
    assert_eq!(session.credits, 10);
    let out = store.roll(&session.id).unwrap();
    assert_eq!(out.roll, vec![Symbol::Lemon; 3]);
    assert_eq!(out.credits_after, 10 - 1 + Symbol::Lemon.payout());
    assert_eq!(store.get(&session.id).unwrap().credits, out.credits_after);
}

#[test]
fn draining_session_ends_in_insufficient_credits() {
    let store = SessionStore::new(ScriptedRandom::new(vec![0.0, 0.3]));
    let session = store.create();
    let mut credits = session.credits;
    for _ in 0..session.credits {
        let out = store.roll(&session.id).unwrap();
        assert_eq!(out.payout, 0);
        assert_eq!(out.credits_after, credits - 1);
        credits = out.credits_after;
    }
    assert_eq!(credits, 0);
    let err = store.roll(&session.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientCredits);
    assert_eq!(store.get(&session.id).unwrap().status, SessionStatus::Open);
}

#[test]
fn cashout_freezes_balance() {
    let store = SessionStore::new(ScriptedRandom::new(vec![0.0, 0.3]));
    let session = store.create();
    for _ in 0..3 {
        store.roll(&session.id).unwrap();
    }
    let cashout = store.cashout(&session.id).unwrap();
    assert_eq!(cashout.final_credits, 7);
    assert_eq!(cashout.status, SessionStatus::Closed);
    assert_eq!(store.roll(&session.id).unwrap_err().kind(), ErrorKind::InvalidState);
    assert_eq!(store.cashout(&session.id).unwrap_err().kind(), ErrorKind::InvalidState);
}

#[test]
fn house_edge_never_improves_a_session() {
    // Same stream with and without the house edge: the edge can only cost credits.
    let fair = GameRules {
        cheat_threshold_low: u64::MAX,
        cheat_threshold_high: u64::MAX,
        ..GameRules::default()
    };
    let rules = GameRules::default();
    for nonce in 0..300u64 {
        let credits = 40 + nonce % 40;
        let honest = resolve(credits, &fair, &mut SeededRandom::new("srv", "cli", nonce));
        let edged = resolve(credits, &rules, &mut SeededRandom::new("srv", "cli", nonce));
        if !edged.rerolled {
            assert_eq!(honest, edged);
        }
        assert_eq!(edged.credits_after, credits - 1 + payout(&edged.roll));
    }
}

#[test]
fn rtp_simulation_smoke() {
    let rules = GameRules::default();
    let mut total_bet = 0u64;
    let mut total_payout = 0u64;
    for n in 0..2_000u64 {
        let mut rng = SeededRandom::new("server", "client", n);
        let out = resolve(20, &rules, &mut rng);
        total_bet += rules.roll_cost;
        total_payout += out.payout;
    }
    let rtp = total_payout as f64 / total_bet as f64;
    // 4 symbols: win chance 1/16, mean payout 25 -> about 1.56 without the edge
    assert!(rtp > 0.5 && rtp < 3.0, "rtp {rtp}");
}
