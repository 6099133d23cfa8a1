use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use slot_core::{GameError, RandomSource, SeededRandom, SessionStore, ThreadRandom};

#[derive(Parser)]
#[command(name = "slot-cli", about = "Play or simulate slot sessions locally")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Server seed for a replayable run; omit for a fresh random run
    #[arg(long, global = true, env = "SLOT_SEED")]
    seed: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open one session, roll it, then cash out
    Play {
        #[arg(long, default_value_t = 10)]
        rolls: u32,
    },
    /// Run many sessions and report the observed return to player
    Simulate {
        #[arg(long, default_value_t = 1_000)]
        sessions: u32,
        #[arg(long, default_value_t = 200)]
        max_rolls: u32,
    },
}

#[derive(Debug, Default)]
struct SimulationReport {
    sessions: u32,
    rolls: u64,
    wagered: u64,
    paid: u64,
    rerolls: u64,
    final_credits: u64,
}

impl SimulationReport {
    fn rtp(&self) -> f64 {
        if self.wagered == 0 {
            0.0
        } else {
            self.paid as f64 / self.wagered as f64
        }
    }
}

fn play<R: RandomSource>(store: &SessionStore<R>, rolls: u32) -> anyhow::Result<()> {
    let session = store.create();
    println!("session {} opened with {} credits", session.id, session.credits);
    for n in 1..=rolls {
        match store.roll(&session.id) {
            Ok(out) => {
                let symbols: String = out.roll.iter().map(|s| s.code()).collect();
                println!(
                    "#{:>4} {} win={:>3} credits={}",
                    n, symbols, out.payout, out.credits_after
                );
            }
            Err(GameError::InsufficientCredits { credits, .. }) => {
                println!("out of credits ({credits}) after {} rolls", n - 1);
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    let cashout = store.cashout(&session.id)?;
    println!(
        "cashed out {} credits, session {}",
        cashout.final_credits, cashout.status
    );
    Ok(())
}

fn simulate<R: RandomSource>(
    store: &SessionStore<R>,
    sessions: u32,
    max_rolls: u32,
) -> anyhow::Result<SimulationReport> {
    let cost = store.rules().roll_cost;
    let mut report = SimulationReport::default();
    for _ in 0..sessions {
        let session = store.create();
        for _ in 0..max_rolls {
            match store.roll(&session.id) {
                Ok(out) => {
                    report.rolls += 1;
                    report.wagered += cost;
                    report.paid += out.payout;
                    report.rerolls += u64::from(out.rerolled);
                }
                Err(GameError::InsufficientCredits { .. }) => break,
                Err(err) => return Err(err.into()),
            }
        }
        report.final_credits += store.cashout(&session.id)?.final_credits;
        report.sessions += 1;
    }
    tracing::debug!(?report, "simulation finished");
    Ok(report)
}

fn print_report(report: &SimulationReport) {
    println!("sessions        {}", report.sessions);
    println!("rolls           {}", report.rolls);
    println!("wagered         {}", report.wagered);
    println!("paid            {}", report.paid);
    println!("rtp             {:.4}", report.rtp());
    println!("house re-rolls  {}", report.rerolls);
    if report.sessions > 0 {
        println!(
            "avg cashout     {:.2}",
            report.final_credits as f64 / report.sessions as f64
        );
    }
}

fn run<R: RandomSource>(store: SessionStore<R>, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Play { rolls } => play(&store, rolls),
        Commands::Simulate {
            sessions,
            max_rolls,
        } => {
            let report = simulate(&store, sessions, max_rolls)?;
            print_report(&report);
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let cli = Cli::parse();

    match cli.seed {
        Some(seed) => {
            let rng = SeededRandom::new(seed, "slot-cli", 0);
            println!("server_seed_hash={}", rng.server_seed_hash_hex());
            run(SessionStore::new(rng), cli.command)
        }
        None => run(SessionStore::new(ThreadRandom), cli.command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slot_core::ScriptedRandom;

    #[test]
    fn simulate_losing_stream_drains_every_session() {
        let store = SessionStore::new(ScriptedRandom::new(vec![0.0, 0.3]));
        let report = simulate(&store, 5, 100).unwrap();
        assert_eq!(report.sessions, 5);
        assert_eq!(report.rolls, 50);
        assert_eq!(report.paid, 0);
        assert_eq!(report.final_credits, 0);
        assert_eq!(report.rtp(), 0.0);
    }

    #[test]
    fn simulate_respects_roll_cap() {
        let store = SessionStore::new(ScriptedRandom::constant(0.0));
        let report = simulate(&store, 2, 3).unwrap();
        assert_eq!(report.rolls, 6);
        // three cherry wins per session from 10 credits: 10 + 3 * 9
        assert_eq!(report.final_credits, 2 * 37);
    }

    #[test]
    fn seeded_simulation_is_repeatable() {
        let a = simulate(&SessionStore::new(SeededRandom::new("seed", "slot-cli", 0)), 20, 50).unwrap();
        let b = simulate(&SessionStore::new(SeededRandom::new("seed", "slot-cli", 0)), 20, 50).unwrap();
        assert_eq!((a.rolls, a.paid, a.rerolls), (b.rolls, b.paid, b.rerolls));
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["slot-cli", "--seed", "abc", "simulate", "--sessions", "3"]).unwrap();
        assert_eq!(cli.seed.as_deref(), Some("abc"));
        assert!(matches!(
            cli.command,
            Commands::Simulate {
                sessions: 3,
                max_rolls: 200
            }
        ));
    }
}
