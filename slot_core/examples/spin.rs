use slot_core::{SeededRandom, SessionStore};

fn main() {
    // Example end-to-end session on a replayable stream
    let rng = SeededRandom::new("example-server-seed", "example-client-seed", 1);
    let seed_hash = rng.server_seed_hash_hex();
    let store = SessionStore::new(rng);
    let session = store.create();
    for _ in 0..5 {
        match store.roll(&session.id) {
            Ok(out) => println!(
                "roll={:?} payout={} credits={}",
                out.roll, out.payout, out.credits_after
            ),
            Err(err) => {
                println!("stopped: {err}");
                break;
            }
        }
    }
    match store.cashout(&session.id) {
        Ok(cashout) => println!(
            "server_seed_hash={} final_credits={} status={}",
            seed_hash, cashout.final_credits, cashout.status
        ),
        Err(err) => println!("cashout failed: {err}"),
    }
}
