// ==========================================
// API 层缓存行为集成测试
// ==========================================
// 测试目标: 按数据类区分的 TTL、前缀失效、同键并发抓取合并
// 覆盖范围: 固定时钟下的确定性 TTL 边界
// ==========================================

mod test_helpers;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::Duration;
use nursery_sowing_aps::api::{CancelToken, SowingApi};
use nursery_sowing_aps::clock::{Clock, FixedClock};
use nursery_sowing_aps::config::SowingConfig;

use test_helpers::{arc_repo, day, raw_slot, test_catalog, FakeSowingRepository};

fn build_api(repo: Arc<FakeSowingRepository>) -> (Arc<SowingApi>, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::at_day(day(2024, 5, 10)));
    let api = SowingApi::new(
        repo,
        clock.clone() as Arc<dyn Clock>,
        SowingConfig::default(),
    )
    .expect("配置合法");
    (Arc::new(api), clock)
}

fn repo_with_slots() -> Arc<FakeSowingRepository> {
    arc_repo(
        FakeSowingRepository::empty()
            .with_catalog(test_catalog())
            .with_slots(
                "P1",
                "S1",
                2024,
                vec![raw_slot(
                    "SLOT_001",
                    "2024-06-01",
                    "2024-06-10",
                    1000,
                    200,
                    100,
                    Some(15),
                )],
            ),
    )
}

// ==========================================
// 第一部分: 数据类 TTL
// ==========================================

#[tokio::test]
async fn test_scenario_1_slot_overview_cached_within_bulk_ttl() {
    let repo = repo_with_slots();
    let (api, clock) = build_api(repo.clone());
    let cancel = CancelToken::new();

    api.slot_overview("P1", "S1", 2024, &cancel).await.unwrap();
    clock.advance(Duration::seconds(59));
    api.slot_overview("P1", "S1", 2024, &cancel).await.unwrap();

    assert_eq!(repo.calls.slots.load(Ordering::SeqCst), 1, "TTL 内命中缓存");
}

#[tokio::test]
async fn test_scenario_2_slot_overview_refetched_after_bulk_ttl() {
    let repo = repo_with_slots();
    let (api, clock) = build_api(repo.clone());
    let cancel = CancelToken::new();

    api.slot_overview("P1", "S1", 2024, &cancel).await.unwrap();
    clock.advance(Duration::seconds(60) + Duration::milliseconds(1));
    api.slot_overview("P1", "S1", 2024, &cancel).await.unwrap();

    assert_eq!(repo.calls.slots.load(Ordering::SeqCst), 2, "TTL 过期后重新抓取");
}

#[tokio::test]
async fn test_scenario_3_alerts_use_short_ttl() {
    // 告警 30 秒过期,目录 60 秒仍有效
    let repo = arc_repo(FakeSowingRepository::empty().with_catalog(test_catalog()));
    let (api, clock) = build_api(repo.clone());
    let cancel = CancelToken::new();

    api.alerts_overview(&cancel).await.unwrap();
    api.plant_catalog(&cancel).await.unwrap();

    clock.advance(Duration::seconds(31));
    api.alerts_overview(&cancel).await.unwrap();
    api.plant_catalog(&cancel).await.unwrap();

    assert_eq!(repo.calls.alerts.load(Ordering::SeqCst), 2, "告警已过期");
    assert_eq!(repo.calls.catalog.load(Ordering::SeqCst), 1, "目录仍有效");
}

#[tokio::test]
async fn test_scenario_4_operations_snapshot_joins_both_feeds() {
    let repo = arc_repo(FakeSowingRepository::empty());
    let (api, _clock) = build_api(repo.clone());
    let cancel = CancelToken::new();

    let snapshot = api.operations_snapshot(&cancel).await.unwrap();

    assert_eq!(snapshot.today.date, day(2024, 5, 10));
    assert_eq!(repo.calls.alerts.load(Ordering::SeqCst), 1);
    assert_eq!(repo.calls.today.load(Ordering::SeqCst), 1);

    // 快照内的两路各自进缓存
    api.alerts_overview(&cancel).await.unwrap();
    api.today_summary(&cancel).await.unwrap();
    assert_eq!(repo.calls.alerts.load(Ordering::SeqCst), 1);
    assert_eq!(repo.calls.today.load(Ordering::SeqCst), 1);
}

// ==========================================
// 第二部分: 失效
// ==========================================

#[tokio::test]
async fn test_scenario_5_invalidate_slots_by_plant_prefix() {
    // 失效 P1 的槽位缓存,不影响 P9 的槽位缓存
    let repo = arc_repo(
        FakeSowingRepository::empty()
            .with_catalog({
                let mut catalog = test_catalog();
                catalog.push(nursery_sowing_aps::domain::plant::Plant {
                    plant_id: "P9".to_string(),
                    name: "黄瓜".to_string(),
                    sowing_allowed: true,
                    subtypes: vec![nursery_sowing_aps::domain::plant::Subtype {
                        subtype_id: "S1".to_string(),
                        name: "水果黄瓜".to_string(),
                        default_ready_days: Some(12),
                        default_buffer_pct: None,
                    }],
                });
                catalog
            })
            .with_slots(
                "P1",
                "S1",
                2024,
                vec![raw_slot("A", "2024-06-01", "2024-06-10", 100, 0, 0, Some(15))],
            )
            .with_slots(
                "P9",
                "S1",
                2024,
                vec![raw_slot("B", "2024-06-01", "2024-06-10", 100, 0, 0, Some(15))],
            ),
    );
    let (api, _clock) = build_api(repo.clone());
    let cancel = CancelToken::new();

    api.slot_overview("P1", "S1", 2024, &cancel).await.unwrap();
    api.slot_overview("P9", "S1", 2024, &cancel).await.unwrap();
    assert_eq!(repo.calls.slots.load(Ordering::SeqCst), 2);

    api.invalidate_slots(Some("P1"));

    api.slot_overview("P1", "S1", 2024, &cancel).await.unwrap();
    api.slot_overview("P9", "S1", 2024, &cancel).await.unwrap();
    assert_eq!(
        repo.calls.slots.load(Ordering::SeqCst),
        3,
        "P1 重新抓取, P9 仍命中缓存"
    );
}

#[tokio::test]
async fn test_scenario_6_invalidate_all_clears_every_class() {
    let repo = repo_with_slots();
    let (api, _clock) = build_api(repo.clone());
    let cancel = CancelToken::new();

    api.slot_overview("P1", "S1", 2024, &cancel).await.unwrap();
    api.alerts_overview(&cancel).await.unwrap();

    api.invalidate_all();

    api.slot_overview("P1", "S1", 2024, &cancel).await.unwrap();
    api.alerts_overview(&cancel).await.unwrap();
    assert_eq!(repo.calls.slots.load(Ordering::SeqCst), 2);
    assert_eq!(repo.calls.alerts.load(Ordering::SeqCst), 2);
    assert_eq!(repo.calls.catalog.load(Ordering::SeqCst), 2);
}

// ==========================================
// 第三部分: 同键并发抓取合并
// ==========================================

#[tokio::test]
async fn test_scenario_7_concurrent_same_key_fetches_coalesce() {
    let repo = repo_with_slots();
    let (api, _clock) = build_api(repo.clone());

    let mut handles = Vec::new();
    for _ in 0..6 {
        let api = api.clone();
        handles.push(tokio::spawn(async move {
            let cancel = CancelToken::new();
            api.slot_overview("P1", "S1", 2024, &cancel).await.unwrap()
        }));
    }
    for handle in handles {
        let overview = handle.await.unwrap();
        assert_eq!(overview.rows.len(), 1);
    }

    assert_eq!(
        repo.calls.slots.load(Ordering::SeqCst),
        1,
        "同键并发调用只落一次抓取"
    );
}
