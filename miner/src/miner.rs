use powcheck::{check_hash, Difficulty, Hash, RuleEpoch};

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};
use std::thread;
use std::time::Instant;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};


// what gets hashed: the payload plus the nonce being ground

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Template {

    pub payload: String,
    pub nonce: u64,
}

impl Template {

    pub fn hash(&self) -> Result<Hash> {

        Ok(Hash::hash(self)?)
    }
}


pub struct Miner {

    payload: String,

    difficulty: Difficulty,

    rule: RuleEpoch,

    threads: u64,

    // nonces 0..max_nonces are shared out between the threads
    max_nonces: u64,

    report_every: Duration,

    mining: Arc<AtomicBool>,

    hashes: Arc<AtomicU64>,
}

impl Miner {

    pub fn new(payload: String, difficulty: Difficulty, rule: RuleEpoch, threads: u64, max_nonces: u64, report_every: Duration) -> Self {

        Miner {
            payload,
            difficulty,
            rule,
            threads: threads.max(1),
            max_nonces,
            report_every,
            mining: Arc::new(AtomicBool::new(false)),
            hashes: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn hashes(&self) -> u64 {

        self.hashes.load(Ordering::Relaxed)
    }

    // Ok(None) when the whole nonce budget was spent without a solution

    pub async fn run(&self) -> Result<Option<(Template, Hash)>> {

        let started = Instant::now();

        self.mining.store(true, Ordering::Relaxed);

        // the only senders live in the workers; once they all stop, recv_async disconnects
        let (sender, receiver) = flume::unbounded();

        let workers: Vec<_> = (0..self.threads)
            .map(|worker| self.spawn_mining_thread(worker, sender.clone()))
            .collect();

        drop(sender);

        let mut report_interval = interval(self.report_every);

        // the first tick completes immediately
        report_interval.tick().await;

        let found = loop {

            tokio::select! {

                _ = report_interval.tick() => {

                    self.report(started);
                }

                received = receiver.recv_async() => {

                    break received.ok();
                }
            }
        };

        self.mining.store(false, Ordering::Relaxed);

        for worker in workers {

            worker.join().map_err(|_| anyhow!("mining thread panicked"))?;
        }

        self.report(started);

        let Some(template) = found else {

            return Ok(None);
        };

        // never report a template the rule does not accept
        let hash = template.hash()?;

        if !check_hash(&hash, self.difficulty, self.rule) {

            return Err(anyhow!("worker returned nonce {} that fails the {} rule", template.nonce, self.rule));
        }

        Ok(Some((template, hash)))
    }

    fn report(&self, started: Instant) {

        let hashes = self.hashes();
        let elapsed = started.elapsed().as_secs_f64();
        let hashes_per_sec = if elapsed > 0.0 { (hashes as f64 / elapsed) as u64 } else { 0 };

        info!(hashes, hashes_per_sec, "mining progress");
    }

    // worker i tries nonces i, i + threads, i + 2 * threads, ...

    fn spawn_mining_thread(&self, worker: u64, sender: flume::Sender<Template>) -> thread::JoinHandle<()> {

        let mining = self.mining.clone();

        let hashes = self.hashes.clone();

        let mut template = Template { payload: self.payload.clone(), nonce: worker };

        let difficulty = self.difficulty;
        let rule = self.rule;
        let stride = self.threads;
        let max_nonces = self.max_nonces;

        thread::spawn(move || {

            while mining.load(Ordering::Relaxed) && template.nonce < max_nonces {

                let hash = match template.hash() {

                    Ok(hash) => hash,

                    Err(e) => {

                        warn!(worker, error = %e, "failed to hash template");
                        return;
                    }
                };

                hashes.fetch_add(1, Ordering::Relaxed);

                if check_hash(&hash, difficulty, rule) {

                    debug!(worker, nonce = template.nonce, %hash, "found nonce");

                    mining.store(false, Ordering::Relaxed);

                    // the receiver may already have a solution from another worker
                    let _ = sender.send(template);

                    return;
                }

                template.nonce = match template.nonce.checked_add(stride) {

                    Some(nonce) => nonce,

                    None => return,
                };
            }
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_nonce_under_trivial_legacy_difficulty() {
        // every hash is below 2^256 at difficulty 1
        let miner = Miner::new("block".into(), 1, RuleEpoch::Legacy, 2, 1_000, Duration::from_secs(60));

        let (template, hash) = miner.run().await.expect("run").expect("solution");

        assert!(template.nonce < 2);
        assert_eq!(template.payload, "block");
        assert_eq!(template.hash().expect("hash"), hash);
    }

    #[tokio::test]
    async fn gives_up_when_budget_is_spent() {
        // the current rule at maximum difficulty needs a hash below 2^152
        let miner = Miner::new("block".into(), u64::MAX, RuleEpoch::Current, 3, 300, Duration::from_secs(60));

        assert!(miner.run().await.expect("run").is_none());
        assert_eq!(miner.hashes(), 300);
    }

    #[tokio::test]
    async fn solution_meets_moderate_legacy_difficulty() {
        let miner = Miner::new("payload".into(), 16, RuleEpoch::Legacy, 4, 1_000_000, Duration::from_secs(60));

        let (_, hash) = miner.run().await.expect("run").expect("solution");

        assert!(powcheck::check_hash_legacy(&hash, 16));
    }
}
