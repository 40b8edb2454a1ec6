use chrono::{NaiveDate, NaiveTime};
use rendezvous_common::models::{
    MeetingAssignment, NewAvailabilitySlot, NewParty, PartyKind, TimeWindow,
    MEETING_DURATION_MINUTES,
};
use rendezvous_db::{
    DbClient, MemoryScheduleRepository, OverlapQuery, RepositoryFactory, ScheduleRepository, ScheduleRepositoryFactory,
    SqlScheduleRepository,
};
use tempfile::TempDir;

async fn temp_repository() -> (SqlScheduleRepository, TempDir) {
    let (repo, _client, dir) = temp_repository_with_client().await;
    (repo, dir)
}

async fn temp_repository_with_client() -> (SqlScheduleRepository, DbClient, TempDir) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", dir.path().join("rendezvous.db").display());
    let client = DbClient::from_url(&url).await.unwrap();
    let repo: SqlScheduleRepository =
        ScheduleRepositoryFactory::new().create_repository(client.clone());
    repo.init_schema().await.unwrap();
    (repo, client, dir)
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn party(name: &str, tz: &str) -> NewParty {
    NewParty {
        name: name.to_string(),
        company: format!("{} Co", name),
        timezone_label: tz.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

fn meeting(selection_id: i64, investor_id: i64, pc_id: i64, start: u32) -> MeetingAssignment {
    MeetingAssignment {
        selection_id,
        portfolio_company_id: pc_id,
        investor_id,
        date: day(),
        start_time: t(start, 0),
        end_time: t(start + 1, 0),
        duration_minutes: MEETING_DURATION_MINUTES,
    }
}

#[tokio::test]
async fn test_schema_init_is_idempotent() {
    let (repo, _dir) = temp_repository().await;
    repo.init_schema().await.unwrap();
    assert!(repo.list_slots().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_slots_round_trip_dates_and_times() {
    let (repo, _dir) = temp_repository().await;
    let inserted = repo
        .insert_slots(vec![
            NewAvailabilitySlot {
                timezone_label: "GMT".into(),
                date: day(),
                start_time: t(9, 0),
                end_time: t(10, 30),
            },
            NewAvailabilitySlot {
                timezone_label: "IST".into(),
                date: day(),
                start_time: t(14, 0),
                end_time: t(15, 0),
            },
        ])
        .await
        .unwrap();
    assert_eq!(inserted.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 2]);

    let gmt = repo.list_slots_by_timezone("GMT").await.unwrap();
    assert_eq!(gmt.len(), 1);
    assert_eq!(gmt[0].date, day());
    assert_eq!(gmt[0].start_time, t(9, 0));
    assert_eq!(gmt[0].end_time, t(10, 30));
}

#[tokio::test]
async fn test_selections_resolve_and_cascade() {
    let (repo, _dir) = temp_repository().await;
    let investor = repo.insert_party(PartyKind::Investor, party("Ada", "GMT")).await.unwrap();
    let acme = repo
        .insert_party(PartyKind::PortfolioCompany, party("Acme", "IST"))
        .await
        .unwrap();
    let bolt = repo
        .insert_party(PartyKind::PortfolioCompany, party("Bolt", "GMT"))
        .await
        .unwrap();

    let created = repo
        .insert_selections(vec![(investor.id, acme.id), (investor.id, bolt.id), (investor.id, acme.id)])
        .await
        .unwrap();
    assert_eq!(created, 2);

    let resolved = repo.list_resolved_selections().await.unwrap();
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].investor_timezone, "GMT");
    assert_eq!(resolved[0].portfolio_company_timezone, "IST");

    assert!(repo.delete_party(PartyKind::Investor, investor.id).await.unwrap());
    assert!(repo.list_selections().await.unwrap().is_empty());
    assert_eq!(repo.list_parties(PartyKind::PortfolioCompany).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_replace_schedule_truncates_and_resets_ids() {
    let (repo, _dir) = temp_repository().await;
    repo.replace_schedule(vec![meeting(1, 1, 1, 9), meeting(2, 1, 2, 10)], vec![meeting(3, 2, 1, 9)])
        .await
        .unwrap();

    let (scheduled, unscheduled) = repo
        .replace_schedule(vec![meeting(4, 3, 3, 11)], vec![meeting(5, 3, 4, 11)])
        .await
        .unwrap();
    assert_eq!(scheduled[0].id, 1);
    assert_eq!(unscheduled[0].id, 1);

    let stored = repo.list_scheduled_meetings().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].assignment, meeting(4, 3, 3, 11));
    assert!(stored[0].created_at.is_some());
    assert_eq!(repo.list_unscheduled_meetings().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_overlap_query_and_manual_meetings() {
    let (repo, _dir) = temp_repository().await;
    repo.replace_schedule(vec![meeting(1, 1, 1, 9), meeting(2, 2, 2, 10)], vec![])
        .await
        .unwrap();

    let hits = repo
        .find_overlapping_meetings(
            OverlapQuery::on_date(day(), 7, 1).within(TimeWindow::new(t(9, 30), t(10, 30))),
        )
        .await
        .unwrap();
    assert_eq!(hits.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1]);

    // Touching windows do not overlap.
    let touching = repo
        .find_overlapping_meetings(
            OverlapQuery::on_date(day(), 1, 1).within(TimeWindow::new(t(10, 0), t(11, 0))),
        )
        .await
        .unwrap();
    assert!(touching.is_empty());

    let excluded = repo
        .find_overlapping_meetings(OverlapQuery::on_date(day(), 1, 2).excluding_meeting(1))
        .await
        .unwrap();
    assert_eq!(excluded.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2]);

    let manual = repo.insert_meeting(meeting(3, 3, 3, 13)).await.unwrap();
    assert_eq!(manual.id, 3);
    let moved = repo
        .update_meeting(manual.id, meeting(3, 3, 3, 15))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.assignment.start_time, t(15, 0));
    assert!(repo.delete_meeting(manual.id).await.unwrap());
    assert!(repo.find_meeting(manual.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_slot_seconds_round_trip_like_the_memory_store() {
    let (repo, _dir) = temp_repository().await;
    let memory = MemoryScheduleRepository::new();
    let slot = NewAvailabilitySlot {
        timezone_label: "GMT".into(),
        date: day(),
        start_time: NaiveTime::from_hms_opt(9, 0, 30).unwrap(),
        end_time: t(10, 0),
    };

    let inserted = repo.insert_slots(vec![slot.clone()]).await.unwrap();
    let read_back = repo.list_slots().await.unwrap();
    assert_eq!(read_back, inserted);
    assert_eq!(read_back[0].start_time, NaiveTime::from_hms_opt(9, 0, 30).unwrap());

    let in_memory = memory.insert_slots(vec![slot]).await.unwrap();
    assert_eq!(in_memory[0].start_time, read_back[0].start_time);
    assert_eq!(in_memory[0].end_time, read_back[0].end_time);
}

#[tokio::test]
async fn test_overlap_query_compares_seconds() {
    let (repo, _dir) = temp_repository().await;
    repo.replace_schedule(vec![meeting(1, 1, 1, 9)], vec![]).await.unwrap();

    let just_after = NaiveTime::from_hms_opt(9, 59, 59).unwrap();
    let hits = repo
        .find_overlapping_meetings(
            OverlapQuery::on_date(day(), 1, 9).within(TimeWindow::new(just_after, t(11, 0))),
        )
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn test_failed_replace_schedule_keeps_previous_schedule() {
    let (repo, client, _dir) = temp_repository_with_client().await;
    repo.replace_schedule(vec![meeting(1, 1, 1, 9)], vec![meeting(2, 2, 1, 9)])
        .await
        .unwrap();
    let scheduled_before = repo.list_scheduled_meetings().await.unwrap();
    let unscheduled_before = repo.list_unscheduled_meetings().await.unwrap();

    client
        .execute(
            "CREATE TRIGGER fail_unscheduled BEFORE INSERT ON unscheduled_meetings \
             BEGIN SELECT RAISE(ABORT, 'insert refused'); END",
        )
        .await
        .unwrap();

    let result = repo
        .replace_schedule(vec![meeting(3, 3, 3, 11)], vec![meeting(4, 4, 3, 11)])
        .await;
    assert!(result.is_err());

    assert_eq!(repo.list_scheduled_meetings().await.unwrap(), scheduled_before);
    assert_eq!(repo.list_unscheduled_meetings().await.unwrap(), unscheduled_before);
}
