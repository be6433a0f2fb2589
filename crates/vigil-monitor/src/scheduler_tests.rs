use super::*;
use std::sync::Arc;

use chrono::{Duration, TimeZone};

use vigil_core::MonitorTypeRegistry;
use vigil_protocols::MonitorStore;

use crate::memory_store::MemoryMonitorStore;
use crate::test_support::ScriptedCheck;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(secs)
}

fn identity() -> NodeIdentity {
    NodeIdentity::new("node-1", "store", "001")
}

struct Fixture {
    store: Arc<MemoryMonitorStore>,
    dispatcher: CheckDispatcher,
    emitter: EventEmitter,
    local: Arc<ScriptedCheck>,
    clustered: Arc<ScriptedCheck>,
}

fn fixture() -> Fixture {
    let registry = Arc::new(MonitorTypeRegistry::new());
    let local = Arc::new(ScriptedCheck::new("cpu", false, &[95]));
    let clustered = Arc::new(ScriptedCheck::new("queue", true, &[50]));
    registry.register(local.clone()).unwrap();
    registry.register(clustered.clone()).unwrap();

    let store = Arc::new(MemoryMonitorStore::new());
    Fixture {
        emitter: EventEmitter::new(store.clone(), "host-a"),
        dispatcher: CheckDispatcher::new(registry),
        store,
        local,
        clustered,
    }
}

#[tokio::test]
async fn test_local_run_period() {
    let mut f = fixture();
    let mut scheduler = LocalScheduler::new();
    let monitors = vec![Monitor::new("cpu-high", "cpu", 90).with_run_period(60)];

    let fired = scheduler
        .run(&monitors, &f.dispatcher, &mut f.emitter, &identity(), at(0))
        .await
        .unwrap();
    assert_eq!(fired, 1);
    assert_eq!(scheduler.last_check_time("cpu-high"), Some(at(0)));

    scheduler
        .run(&monitors, &f.dispatcher, &mut f.emitter, &identity(), at(59))
        .await
        .unwrap();
    assert_eq!(f.local.calls(), 1);

    scheduler
        .run(&monitors, &f.dispatcher, &mut f.emitter, &identity(), at(60))
        .await
        .unwrap();
    assert_eq!(f.local.calls(), 2);
    assert_eq!(scheduler.last_check_time("cpu-high"), Some(at(60)));
    assert_eq!(f.store.get_monitor_events().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_local_skips_clustered_disabled_and_unknown() {
    let mut f = fixture();
    let mut scheduler = LocalScheduler::new();
    let monitors = vec![
        Monitor::new("queue-depth", "queue", 10),
        Monitor::new("cpu-off", "cpu", 90).with_enabled(false),
        Monitor::new("gpu-hot", "gpu", 90),
    ];

    let fired = scheduler
        .run(&monitors, &f.dispatcher, &mut f.emitter, &identity(), at(0))
        .await
        .unwrap();
    assert_eq!(fired, 0);
    assert_eq!(f.local.calls(), 0);
    assert_eq!(f.clustered.calls(), 0);
    assert!(scheduler.last_check_time("gpu-hot").is_none());
}

#[tokio::test]
async fn test_local_records_time_before_failing_check() {
    let registry = Arc::new(MonitorTypeRegistry::new());
    registry
        .register(Arc::new(ScriptedCheck::failing("cpu", false)))
        .unwrap();
    let dispatcher = CheckDispatcher::new(registry);
    let mut emitter = EventEmitter::new(Arc::new(MemoryMonitorStore::new()), "host-a");
    let mut scheduler = LocalScheduler::new();
    let monitors = vec![Monitor::new("cpu-high", "cpu", 90).with_run_period(60)];

    let result = scheduler
        .run(&monitors, &dispatcher, &mut emitter, &identity(), at(0))
        .await;
    assert!(matches!(result, Err(MonitorError::CheckFailed { .. })));
    assert_eq!(scheduler.last_check_time("cpu-high"), Some(at(0)));
}

#[tokio::test]
async fn test_local_forgets_removed_monitors() {
    let mut f = fixture();
    let mut scheduler = LocalScheduler::new();
    let cpu = Monitor::new("cpu-high", "cpu", 90).with_run_period(60);
    let both = vec![cpu.clone(), Monitor::new("cpu-low", "cpu", 10).with_run_period(60)];

    scheduler
        .run(&both, &f.dispatcher, &mut f.emitter, &identity(), at(0))
        .await
        .unwrap();
    assert_eq!(scheduler.last_check_time("cpu-low"), Some(at(0)));

    scheduler
        .run(&[cpu], &f.dispatcher, &mut f.emitter, &identity(), at(10))
        .await
        .unwrap();
    assert_eq!(scheduler.last_check_time("cpu-high"), Some(at(0)));
    assert!(scheduler.last_check_time("cpu-low").is_none());

    // A re-added monitor is due straight away.
    scheduler
        .run(&both, &f.dispatcher, &mut f.emitter, &identity(), at(20))
        .await
        .unwrap();
    assert_eq!(scheduler.last_check_time("cpu-low"), Some(at(20)));
    assert_eq!(f.local.calls(), 3);
}

#[tokio::test]
async fn test_cluster_uses_shared_lock_time() {
    let mut f = fixture();
    let scheduler = ClusterScheduler::new();
    let monitors = vec![
        Monitor::new("queue-fast", "queue", 10).with_run_period(30),
        Monitor::new("queue-slow", "queue", 10).with_run_period(300),
        Monitor::new("cpu-high", "cpu", 90),
    ];

    let fired = scheduler
        .run(
            Some(at(0)),
            &monitors,
            &f.dispatcher,
            &mut f.emitter,
            &identity(),
            at(60),
        )
        .await
        .unwrap();
    assert_eq!(fired, 1);
    assert_eq!(f.clustered.calls(), 1);
    assert_eq!(f.local.calls(), 0);

    let events = f.store.get_monitor_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].monitor_id, "queue-fast");
}

#[tokio::test]
async fn test_cluster_missing_lock_time_is_epoch() {
    let mut f = fixture();
    let monitors = vec![Monitor::new("queue-slow", "queue", 10).with_run_period(86_400)];

    let fired = ClusterScheduler::new()
        .run(None, &monitors, &f.dispatcher, &mut f.emitter, &identity(), at(0))
        .await
        .unwrap();
    assert_eq!(fired, 1);
}

#[tokio::test]
async fn test_cluster_values_bypass_window() {
    let mut f = fixture();
    let monitors = vec![Monitor::new("queue-depth", "queue", 10).with_run_count(4)];

    let fired = ClusterScheduler::new()
        .run(None, &monitors, &f.dispatcher, &mut f.emitter, &identity(), at(0))
        .await
        .unwrap();
    assert_eq!(fired, 1);
    assert!(f.emitter.averager().is_empty());
}
