use pve_bot::model::claim_once;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

#[test]
fn only_first_claim_wins() {
    let flag = AtomicBool::new(false);
    assert!(claim_once(&flag));
    assert!(!claim_once(&flag));
    assert!(!claim_once(&flag));
}

#[tokio::test]
async fn concurrent_claims_succeed_once() {
    let flag = Arc::new(AtomicBool::new(false));
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let flag = flag.clone();
            tokio::spawn(async move { claim_once(&flag) })
        })
        .collect();
    let mut wins = 0;
    for h in handles {
        if h.await.unwrap() {
            wins += 1;
        }
    }
    assert_eq!(wins, 1);
}
